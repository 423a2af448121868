//! Shared outbound HTTP plumbing: client construction, status checking and
//! the retry policy every outbound call goes through.

pub mod retry;

pub use retry::RetryPolicy;

use std::time::Duration;

use crate::error::{CatalogError, Result};

/// Per-request timeout used unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the reqwest client used by the lookup, probe and source adapters.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("marquee/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(CatalogError::from)
}

/// Turn a non-success status into [`CatalogError::HttpStatus`] so the retry
/// policy can classify it.
pub fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(CatalogError::HttpStatus {
            status,
            url: response.url().to_string(),
        })
    }
}
