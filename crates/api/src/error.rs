//! Error types for `gocardless-api`.

use crate::safety::sanitize_reqwest_error;
use thiserror::Error;

/// Main error type for GoCardless API calls.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Configuration errors (unknown environment, empty token, unusable base URL).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The API answered with a non-2xx status. Displays as the provider's own message.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        request_id: Option<String>,
    },

    /// Transport errors (connect, timeout, TLS). URLs are redacted.
    #[error("{0}")]
    Transport(String),

    /// The response did not have the expected envelope or record shape.
    #[error("{0}")]
    Decode(String),

    /// JSON encoding errors (request bodies).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for GoCardless API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(sanitize_reqwest_error(&value))
    }
}

impl ApiError {
    /// HTTP status of an API error, if this is one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Provider request id of an API error, when the error envelope carried one.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Api { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }
}
