//! Issue Tracker MCP Library
//!
//! Read-only MCP tools over the GitHub REST issues API for one repository.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use issues_mcp::{Config, IssuesMcpServer};
//!
//! let server = IssuesMcpServer::new(&Config::default())?;
//! let result = server
//!     .call_tool("search_issues", serde_json::json!({ "query": "segfault" }))
//!     .await?;
//! ```
//!
//! # Tools
//! - `search_issues`: keyword search with state and label filters
//! - `get_issue_details`: one issue, optionally with recent comments
//! - `list_issues_by_label`: issues carrying all of a set of labels
//!
//! # Requirements
//! - Network access to the API; no token is sent, so the unauthenticated
//!   rate limit applies

pub mod config;
pub mod format;
pub mod github;
pub mod handlers;
pub mod logging;
pub mod params;
pub mod server;
mod text;
pub mod types;

// Re-export main server type
pub use config::{Config, ConfigError, GithubConfig};
pub use server::{IssuesMcpServer, ServerError};

// Re-export parameter types for direct API usage
pub use params::{GetIssueDetailsInput, ListIssuesByLabelInput, SearchIssuesInput};
