//! Blocking request/response helpers.
//!
//! Uses async reqwest internally with tokio::time::timeout for an overall
//! deadline, but presents a sync interface so callers stay sequential.

use std::sync::LazyLock;
use std::time::Duration;

use crate::error::HttpError;

/// Connect timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default deadline for a whole exchange (send + body)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("paperfetch/", env!("CARGO_PKG_VERSION"));

/// Shared async HTTP client.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .expect("failed to build HTTP client")
});

/// Shared tokio runtime for HTTP operations.
///
/// One worker is enough: requests are issued strictly one after another.
static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// HTTP GET with query parameters → response body as text.
///
/// Non-success statuses are errors. The whole exchange must finish within `timeout`.
pub fn get_text(
    url: &str,
    query: &[(&str, String)],
    timeout: Duration,
) -> Result<String, HttpError> {
    SHARED_RUNTIME.handle().block_on(async {
        let exchange = async {
            let response = SHARED_CLIENT
                .get(url)
                .query(query)
                .send()
                .await?
                .error_for_status()?;
            response.text().await
        };

        match tokio::time::timeout(timeout, exchange).await {
            Ok(result) => result.map_err(HttpError::from_reqwest),
            Err(_) => Err(HttpError::Timeout(timeout)),
        }
    })
}
