//! Paperfetch Core - Shared plumbing for the paperfetch tools
//!
//! Logging, stage progress display and a blocking HTTP helper built on a
//! shared async client.

pub mod error;
pub mod http;
pub mod logging;
pub mod progress;

// Re-exports for convenience
pub use error::HttpError;
pub use http::{DEFAULT_TIMEOUT, get_text};
pub use logging::{IndicatifLogger, init_logging};
pub use progress::{ProgressContext, finish_stage};
