//! TrollGuard error types

use std::time::Duration;

/// TrollGuard error types
#[derive(Debug, thiserror::Error)]
pub enum TrollGuardError {
    // Provider/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("model not found: {0}")]
    ModelNotFound(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A classifier distribution did not contain a label the analysis depends on.
    #[error("classifier output is missing the '{0}' label")]
    MissingLabel(String),

    #[error("unexpected classifier output: {0}")]
    UnexpectedOutput(String),

    // Soft errors
    #[error("empty response from model")]
    EmptyResponse,

    // Configuration errors
    #[error("no provider configured for {0}")]
    NoProvider(&'static str),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl TrollGuardError {
    /// Whether a retry has a chance of succeeding.
    ///
    /// Network failures, rate limits, 5xx responses (including the inference
    /// API's "model is loading" 503) and empty responses are transient.
    /// Everything else is permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            TrollGuardError::Http(_)
            | TrollGuardError::RateLimited { .. }
            | TrollGuardError::EmptyResponse => true,
            TrollGuardError::Api { status, .. } => (500..600).contains(status),
            _ => false,
        }
    }

    /// Provider-supplied back-off hint, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            TrollGuardError::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

/// Result type alias for TrollGuard operations
pub type Result<T> = std::result::Result<T, TrollGuardError>;
