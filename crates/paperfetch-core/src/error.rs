//! Transport error type shared by the HTTP helpers

use std::time::Duration;

/// Failure of a single request/response exchange.
///
/// Upstream callers treat every variant as terminal: nothing is retried and
/// no partial body is ever returned alongside an error.
#[derive(Debug)]
pub enum HttpError {
    /// Request failed, with the HTTP status when the server answered
    Http {
        status: Option<u16>,
        message: String,
    },
    /// No complete response within the configured timeout
    Timeout(Duration),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http {
                status: Some(s),
                message,
            } => write!(f, "HTTP {s}: {message}"),
            Self::Http {
                status: None,
                message,
            } => write!(f, "HTTP error: {message}"),
            Self::Timeout(limit) => write!(f, "request timed out after {}s", limit.as_secs()),
        }
    }
}

impl std::error::Error for HttpError {}

impl HttpError {
    /// Create HTTP error from reqwest error.
    ///
    /// The request URL is stripped so API keys in query strings never reach logs.
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        Self::Http {
            status: e.status().map(|s| s.as_u16()),
            message: e.without_url().to_string(),
        }
    }

    /// Status code returned by the server, if it answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => *status,
            Self::Timeout(_) => None,
        }
    }

    /// True when the server was never reached or never answered
    pub fn is_unreachable(&self) -> bool {
        self.status().is_none()
    }
}
