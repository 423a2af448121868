//! Error type shared by the core components.

use thiserror::Error;

/// Errors raised by the catalog, poster and click components.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Filesystem access failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level failure of an outbound request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// An outbound request got a non-success status.
    #[error("HTTP status {status} from {url}")]
    HttpStatus {
        /// Status the server answered with.
        status: reqwest::StatusCode,
        /// Final request URL.
        url: String,
    },

    /// PostgreSQL query or connection failure.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis failure.
    #[error("Queue error: {0}")]
    Queue(#[from] redis::RedisError),

    /// JSON encoding or decoding failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A configured or stored URL does not parse.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Requested item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The metadata service had no usable poster.
    #[error("Poster lookup failed: {0}")]
    LookupFailed(String),

    /// A document is not shaped like a movie record.
    #[error("Malformed movie record: {0}")]
    MalformedRecord(String),

    /// Anything else.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// Connection failures, timeouts, throttling and server-side errors are
    /// worth another attempt; everything else is final.
    pub fn is_retryable(&self) -> bool {
        match self {
            CatalogError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            CatalogError::HttpStatus { status, .. } => {
                status.as_u16() == 429 || status.as_u16() == 408 || status.is_server_error()
            }
            _ => false,
        }
    }
}

/// Result alias using [`CatalogError`].
pub type Result<T> = std::result::Result<T, CatalogError>;
