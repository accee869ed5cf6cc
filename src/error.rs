//! Custom error types for litreview.
//!
//! Every fallible operation returns `Result<T, ReviewError>`. The variants
//! double as the recovery policy: [`ReviewError::is_fatal`] tells a driver
//! loop whether to log and move on or to stop and hand the error to `main`.

use thiserror::Error;

/// Main error type for litreview operations.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Database write or schema failure. The dataset cannot be trusted past it.
    #[error("Persistence error: {0}")]
    Persistence(#[from] rusqlite::Error),

    /// Network/HTTP request error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request did not complete within the per-attempt timeout
    #[error("Timed out: {0}")]
    Timeout(String),

    /// Provider quota exhausted (HTTP 429)
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// External API returned an error
    #[error("API error: {code} - {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from API
        message: String,
    },

    /// Lookup produced no value (no publisher, no continent mapping, ...)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Response body did not have the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV output error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

impl ReviewError {
    /// Errors that must stop the current run instead of skipping one item.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ReviewError::Persistence(_) | ReviewError::QuotaExceeded(_) | ReviewError::Config(_)
        )
    }

    /// Errors worth another attempt after a backoff.
    pub fn is_transient(&self) -> bool {
        match self {
            ReviewError::Timeout(_) => true,
            ReviewError::Network(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            ReviewError::Api { code, .. } => *code >= 500,
            _ => false,
        }
    }
}

/// Result type alias using `ReviewError`
pub type Result<T> = std::result::Result<T, ReviewError>;

/// Extension trait for adding context to Option types
pub trait OptionExt<T> {
    /// Convert Option to Result with a parse error message
    fn ok_or_parse(self, msg: &str) -> Result<T>;

    /// Convert Option to Result with a not-found message
    fn ok_or_not_found(self, msg: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_parse(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| ReviewError::Parse(msg.to_string()))
    }

    fn ok_or_not_found(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| ReviewError::NotFound(msg.to_string()))
    }
}
