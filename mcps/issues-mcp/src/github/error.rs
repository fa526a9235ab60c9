//! Error types for issue tracker API calls
//!
//! Every variant renders as a message an agent can act on; the handlers put
//! that message into the tool result rather than failing the call.

use thiserror::Error;

use crate::text::excerpt;

/// Longest slice of an upstream error body carried into a message
const BODY_EXCERPT_CHARS: usize = 500;

/// Errors that can occur when talking to the GitHub REST API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 404 from the API
    #[error("Resource not found: {resource}. Please check the issue number or repository is correct.")]
    NotFound {
        /// What was being looked up (e.g. "issue #123 in owner/repo")
        resource: String,
    },

    /// 403 or 429 from the API; unauthenticated clients hit this quickly
    #[error("API rate limit exceeded. Please wait a few minutes before making more requests.")]
    RateLimited,

    /// 422 from the API
    #[error("Invalid request parameters rejected by GitHub ({details}). Please check your input values.")]
    InvalidRequest {
        /// Upstream explanation, when it sent one
        details: String,
    },

    /// No response within the configured timeout
    #[error("Request timed out. Please try again.")]
    Timeout,

    /// The request never reached the API
    #[error("Network request failed. Please check your internet connection. Details: {0}")]
    Network(String),

    /// Any other non-success status
    #[error("GitHub API request failed with status {status}. Details: {body}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Leading part of the response body
        body: String,
    },

    /// A success response whose body does not match the expected shape
    #[error("Unexpected response from GitHub API: {0}")]
    Decode(String),
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Map a non-success HTTP status to a domain error
    pub fn from_status(status: u16, body: &str, resource: &str) -> Self {
        match status {
            404 => Self::NotFound {
                resource: resource.to_string(),
            },
            403 | 429 => Self::RateLimited,
            422 => Self::InvalidRequest {
                details: upstream_message(body).unwrap_or_else(|| "validation failed".to_string()),
            },
            _ => Self::Upstream {
                status,
                body: excerpt(body.trim(), BODY_EXCERPT_CHARS),
            },
        }
    }

    /// Short name of the condition, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::RateLimited => "rate_limited",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::Timeout => "timeout",
            Self::Network(_) => "network",
            Self::Upstream { .. } => "upstream",
            Self::Decode(_) => "decode",
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

/// GitHub error bodies look like `{"message": "...", "errors": [...]}`
fn upstream_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(|m| excerpt(m, BODY_EXCERPT_CHARS))
}
