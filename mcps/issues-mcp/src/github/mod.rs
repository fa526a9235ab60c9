//! GitHub REST API access
//!
//! Request construction, the HTTP client and the mapping from HTTP failures
//! to domain errors.

pub mod client;
pub mod error;
pub mod request;

pub use client::{fetch_as, GithubClient, IssueApi};
pub use error::{ApiError, ApiResult};
pub use request::ApiRequest;
