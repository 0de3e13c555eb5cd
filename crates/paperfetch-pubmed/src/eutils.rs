//! NCBI E-utilities clients
//!
//! `esearch` turns a query into PMIDs (JSON), `efetch` turns PMIDs into
//! article XML. Both are one blocking GET each; nothing is retried.

use std::fmt;

use paperfetch_core::{HttpError, get_text};
use serde::Deserialize;

use crate::config::Config;
use crate::diagnostics::DiagnosticSink;
use crate::node::{XmlNode, parse_article_set};

const ESEARCH: &str = "esearch.fcgi";
const EFETCH: &str = "efetch.fcgi";

/// Failure talking to an E-utility.
#[derive(Debug)]
pub enum EutilsError {
    /// Service unreachable, non-success status, or timeout
    Transport {
        endpoint: &'static str,
        source: HttpError,
    },
    /// Response arrived but could not be understood
    Payload {
        endpoint: &'static str,
        message: String,
    },
}

impl EutilsError {
    fn payload(endpoint: &'static str, message: impl Into<String>) -> Self {
        Self::Payload {
            endpoint,
            message: message.into(),
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Transport { endpoint, .. } | Self::Payload { endpoint, .. } => endpoint,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub fn is_payload(&self) -> bool {
        matches!(self, Self::Payload { .. })
    }
}

impl fmt::Display for EutilsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { endpoint, source } => write!(f, "{endpoint}: {source}"),
            Self::Payload { endpoint, message } => {
                write!(f, "{endpoint}: unexpected response: {message}")
            }
        }
    }
}

impl std::error::Error for EutilsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport { source, .. } => Some(source),
            Self::Payload { .. } => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    esearchresult: Option<SearchResult>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    idlist: Option<Vec<String>>,
    #[serde(rename = "ERROR")]
    error: Option<String>,
}

/// Query parameters shared by every E-utility call.
fn common_params(config: &Config) -> Vec<(&'static str, String)> {
    let mut params = vec![("db", "pubmed".to_string())];
    if let Some(tool) = &config.tool {
        params.push(("tool", tool.clone()));
    }
    if let Some(email) = &config.email {
        params.push(("email", email.clone()));
    }
    if let Some(key) = &config.api_key {
        params.push(("api_key", key.clone()));
    }
    params
}

fn get(
    config: &Config,
    endpoint: &'static str,
    params: &[(&str, String)],
) -> Result<String, EutilsError> {
    let url = config.endpoint(endpoint);
    log::debug!("GET {url}");
    get_text(&url, params, config.timeout)
        .map_err(|source| EutilsError::Transport { endpoint, source })
}

/// esearch client: query → PMIDs.
pub struct SearchClient<'a> {
    config: &'a Config,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> SearchClient<'a> {
    pub fn new(config: &'a Config, sink: &'a dyn DiagnosticSink) -> Self {
        Self { config, sink }
    }

    /// Up to `max_results` PMIDs for `query`, in the order the service returned them.
    pub fn search(&self, query: &str) -> Result<Vec<String>, EutilsError> {
        let mut params = common_params(self.config);
        params.push(("term", query.to_string()));
        params.push(("retmode", "json".to_string()));
        params.push(("retmax", self.config.max_results.to_string()));

        let body = get(self.config, ESEARCH, &params)?;
        self.sink.record("esearch.json", &body);

        let mut ids = parse_search_response(&body)?;
        ids.truncate(self.config.max_results);
        Ok(ids)
    }
}

fn parse_search_response(body: &str) -> Result<Vec<String>, EutilsError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| EutilsError::payload(ESEARCH, e.to_string()))?;

    if let Some(error) = response.error {
        return Err(EutilsError::payload(ESEARCH, error));
    }
    let Some(result) = response.esearchresult else {
        return Err(EutilsError::payload(ESEARCH, "missing esearchresult"));
    };
    match (result.idlist, result.error) {
        (Some(ids), _) => Ok(ids),
        (None, Some(error)) => Err(EutilsError::payload(ESEARCH, error)),
        (None, None) => Err(EutilsError::payload(ESEARCH, "missing idlist")),
    }
}

/// efetch client: PMIDs → article nodes.
pub struct FetchClient<'a> {
    config: &'a Config,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> FetchClient<'a> {
    pub fn new(config: &'a Config, sink: &'a dyn DiagnosticSink) -> Self {
        Self { config, sink }
    }

    /// Fetch and split the articles for `ids`. No request is made for an empty list.
    pub fn fetch(&self, ids: &[String]) -> Result<Vec<XmlNode>, EutilsError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut params = common_params(self.config);
        params.push(("id", ids.join(",")));
        params.push(("retmode", "xml".to_string()));

        let body = get(self.config, EFETCH, &params)?;
        self.sink.record("efetch.xml", &body);

        let set = parse_article_set(&body)
            .map_err(|e| EutilsError::payload(EFETCH, format!("{e:#}")))?;

        if set.articles.is_empty() && !set.errors.is_empty() {
            return Err(EutilsError::payload(EFETCH, set.errors.join("; ")));
        }
        for error in &set.errors {
            log::warn!("efetch reported: {error}");
        }
        Ok(set.articles)
    }
}
