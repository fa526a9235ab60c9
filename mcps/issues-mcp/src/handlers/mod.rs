//! Handler implementations for the issue tools
//!
//! Each handler validates its input, makes its upstream request(s) and
//! formats the result. Failures never leave a handler as an error: they are
//! folded into a message starting with `Error: ` so the agent always gets text
//! it can act on.
//!
//! Organized by tool: search, issue, label

mod issue;
mod label;
mod search;

pub use issue::*;
pub use label::*;
pub use search::*;

use thiserror::Error;
use tracing::{info, warn};

use crate::github::ApiError;
use crate::params::ValidationError;

/// Prefix of every failed tool result
pub const ERROR_MARKER: &str = "Error: ";

/// Why a tool call produced no result
#[derive(Error, Debug)]
pub enum ToolError {
    /// Rejected before any request was made
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The upstream call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The result could not be serialized
    #[error("failed to render result: {0}")]
    Render(#[from] serde_json::Error),
}

/// Result of a tool call before it is folded into text
pub type ToolResult = Result<String, ToolError>;

impl ToolError {
    /// Short name of the condition, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Api(e) => e.kind(),
            Self::Render(_) => "render",
        }
    }

    /// The text handed back to the agent
    pub fn into_message(self) -> String {
        format!("{ERROR_MARKER}{self}")
    }
}

/// Log the outcome of a tool call and turn it into its final text
pub(crate) fn finish(tool: &str, result: ToolResult) -> String {
    match result {
        Ok(text) => {
            info!(tool, bytes = text.len(), "tool call succeeded");
            text
        }
        Err(e) => {
            warn!(tool, kind = e.kind(), "tool call failed: {}", e);
            e.into_message()
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_has_marker_and_no_type_names() {
        let message = ToolError::from(ApiError::Timeout).into_message();
        assert_eq!(message, "Error: Request timed out. Please try again.");
        assert!(!message.contains("ApiError"));
    }

    #[test]
    fn test_kind_delegates_to_api_error() {
        assert_eq!(ToolError::from(ApiError::RateLimited).kind(), "rate_limited");
    }

    #[test]
    fn test_finish_passes_success_through() {
        assert_eq!(finish("t", Ok("done".to_string())), "done");
    }
}
