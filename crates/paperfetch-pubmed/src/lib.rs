//! paperfetch PubMed - industry-affiliated authors from PubMed search results
//!
//! Searches PubMed through the NCBI E-utilities, fetches the matching
//! articles, and reports the authors whose affiliations look non-academic.
//!
//! # Example
//!
//! ```ignore
//! use paperfetch_pubmed::{Config, NoopSink, Outcome, run};
//! use paperfetch_core::ProgressContext;
//!
//! let config = Config {
//!     query: "crispr".into(),
//!     max_results: 20,
//!     ..Default::default()
//! };
//!
//! if let Outcome::Records(records) = run(&config, &NoopSink, &ProgressContext::hidden())? {
//!     paperfetch_pubmed::report::write_report(&records, "out.csv".as_ref())?;
//! }
//! ```

pub mod classify;
pub mod config;
pub mod diagnostics;
pub mod eutils;
pub mod extract;
pub mod node;
pub mod report;
pub mod resolve;
pub mod runner;

// Re-exports
pub use classify::{ClassifierPolicy, is_non_academic};
pub use config::Config;
pub use diagnostics::{DiagnosticSink, DirSink, NoopSink};
pub use eutils::{EutilsError, FetchClient, SearchClient};
pub use extract::{ExtractOptions, Record, extract_record};
pub use report::{HEADER, ReportOutcome, write_report};
pub use runner::{EmptyReason, Outcome, run};
