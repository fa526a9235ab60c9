//! Issue and comment payloads
//!
//! These structs mirror the JSON returned by the GitHub REST API for
//! `/repos/{owner}/{repo}/issues`, `/search/issues` and issue comments.
//! Fields the tools never read are left out; serde ignores them.

use serde::{Deserialize, Serialize};

use super::common::{Label, Milestone, User};

/// Represents a GitHub issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue number (unique within repository)
    pub number: u64,

    /// Issue title
    pub title: String,

    /// Issue state (open, closed)
    pub state: String,

    /// Issue body/description (markdown)
    #[serde(default)]
    pub body: Option<String>,

    /// Issue author
    pub user: User,

    /// Assigned users
    #[serde(default)]
    pub assignees: Vec<User>,

    /// Applied labels
    #[serde(default)]
    pub labels: Vec<Label>,

    /// Associated milestone
    #[serde(default)]
    pub milestone: Option<Milestone>,

    /// Creation timestamp (ISO 8601)
    pub created_at: String,

    /// Last update timestamp (ISO 8601)
    pub updated_at: String,

    /// Closed timestamp (ISO 8601), if closed
    #[serde(default)]
    pub closed_at: Option<String>,

    /// Issue page on github.com
    pub html_url: String,

    /// Number of comments
    #[serde(default)]
    pub comments: u32,

    /// Present when the item is a pull request (the issues endpoints list both)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<serde_json::Value>,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    pub fn label_names(&self) -> Vec<String> {
        self.labels.iter().map(|label| label.name.clone()).collect()
    }

    pub fn assignee_logins(&self) -> Vec<String> {
        self.assignees.iter().map(|user| user.login.clone()).collect()
    }
}

/// A comment on an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment author
    pub user: User,

    /// Comment text (markdown)
    #[serde(default)]
    pub body: String,

    /// Creation timestamp (ISO 8601)
    pub created_at: String,
}

/// Body of a `/search/issues` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Total number of matches across all pages
    #[serde(default)]
    pub total_count: u64,

    /// Matches on the requested page
    #[serde(default)]
    pub items: Vec<Issue>,
}
