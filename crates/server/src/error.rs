//! Error types for tool execution.
//!
//! Every variant ends up as text in a tool result (`Error executing <tool>: <error>`), so the
//! messages are written for the calling agent.

use gocardless_api::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("GOCARDLESS_ACCESS_TOKEN environment variable is required")]
    MissingAccessToken,

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("missing required argument '{0}'")]
    MissingArgument(&'static str),

    #[error("invalid argument '{name}': expected {expected}")]
    InvalidArgument {
        name: &'static str,
        expected: &'static str,
    },

    #[error("subscription {0} has no linked mandate")]
    MissingMandateLink(String),

    #[error("mandate {0} has no linked customer")]
    MissingCustomerLink(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for tool execution.
pub type Result<T> = std::result::Result<T, ToolError>;
