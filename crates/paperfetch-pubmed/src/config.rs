//! PubMed pipeline configuration

use std::time::Duration;

use crate::classify::ClassifierPolicy;
use crate::extract::{ExtractOptions, UNKNOWN_TITLE};

/// Base URL of the NCBI E-utilities
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Query used when none is given
pub const DEFAULT_QUERY: &str = "biotechnology";

/// Identifier cap for one search
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Runtime configuration for the PubMed pipeline
#[derive(Debug, Clone)]
pub struct Config {
    /// Free-text PubMed search term
    pub query: String,
    /// E-utilities base URL (esearch.fcgi / efetch.fcgi are appended)
    pub base_url: String,
    /// Maximum identifiers requested from esearch
    pub max_results: usize,
    /// Optional NCBI API key, passed through as `api_key`
    pub api_key: Option<String>,
    /// Optional `tool` parameter identifying this client to NCBI
    pub tool: Option<String>,
    /// Optional contact `email` parameter
    pub email: Option<String>,
    /// Deadline for each HTTP exchange
    pub timeout: Duration,
    /// Title used when an article has none
    pub title_placeholder: String,
    /// Affiliation classification policy
    pub policy: ClassifierPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            api_key: None,
            tool: Some("paperfetch".to_string()),
            email: None,
            timeout: paperfetch_core::DEFAULT_TIMEOUT,
            title_placeholder: UNKNOWN_TITLE.to_string(),
            policy: ClassifierPolicy::default(),
        }
    }
}

impl Config {
    /// Endpoint URL for an E-utility such as `esearch.fcgi`.
    pub fn endpoint(&self, utility: &str) -> String {
        format!("{}/{utility}", self.base_url.trim_end_matches('/'))
    }

    /// Extraction settings derived from this config.
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            title_placeholder: self.title_placeholder.clone(),
            policy: self.policy,
        }
    }
}
