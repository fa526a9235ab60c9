//! Domain responses returned by the tools
//!
//! These are the shapes an agent sees in JSON mode; their field names are part
//! of the tool contract. Markdown mode renders the same values.

use serde::{Deserialize, Serialize};

use crate::params::{IssueState, Page};
use crate::text::truncate_chars;
use crate::types::{Comment, Issue, SearchResponse};

/// Characters of the issue body kept in list previews
pub const BODY_PREVIEW_CHARS: usize = 200;

/// One issue in a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub number: u64,
    pub title: String,
    pub state: String,
    pub url: String,
    pub author: String,
    pub created_at: String,
    pub updated_at: String,
    pub comments: u32,
    pub labels: Vec<String>,
    pub body_preview: String,
}

impl From<&Issue> for IssueSummary {
    fn from(issue: &Issue) -> Self {
        let body = issue.body.as_deref().unwrap_or_default();
        Self {
            number: issue.number,
            title: issue.title.clone(),
            state: issue.state.clone(),
            url: issue.html_url.clone(),
            author: issue.user.login.clone(),
            created_at: issue.created_at.clone(),
            updated_at: issue.updated_at.clone(),
            comments: issue.comments,
            labels: issue.label_names(),
            body_preview: truncate_chars(body, BODY_PREVIEW_CHARS).0.to_string(),
        }
    }
}

/// A page of keyword search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    pub total_count: u64,
    pub page: u32,
    pub per_page: u32,
    pub has_more: bool,
    pub issues: Vec<IssueSummary>,
}

impl SearchPage {
    pub fn new(response: &SearchResponse, page: Page) -> Self {
        Self {
            total_count: response.total_count,
            page: page.number,
            per_page: page.per_page,
            has_more: page.has_more_than(response.total_count),
            issues: response.items.iter().map(IssueSummary::from).collect(),
        }
    }
}

/// A page of issues carrying a set of labels
///
/// The listing endpoint reports no total, so `has_more` means the upstream
/// page was full. Pull requests on the page are dropped, so `results_count`
/// can be below `per_page` even when `has_more` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelPage {
    pub labels_filter: Vec<String>,
    pub state: IssueState,
    pub page: u32,
    pub per_page: u32,
    pub results_count: usize,
    pub has_more: bool,
    pub issues: Vec<IssueSummary>,
}

impl LabelPage {
    pub fn new(labels: &[String], state: IssueState, page: Page, issues: &[Issue]) -> Self {
        let summaries: Vec<IssueSummary> = issues
            .iter()
            .filter(|issue| !issue.is_pull_request())
            .map(IssueSummary::from)
            .collect();
        Self {
            labels_filter: labels.to_vec(),
            state,
            page: page.number,
            per_page: page.per_page,
            results_count: summaries.len(),
            has_more: page.is_full(issues.len()),
            issues: summaries,
        }
    }
}

/// One comment attached to issue details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentSummary {
    pub author: String,
    pub created_at: String,
    pub body: String,
}

impl From<&Comment> for CommentSummary {
    fn from(comment: &Comment) -> Self {
        Self {
            author: comment.user.login.clone(),
            created_at: comment.created_at.clone(),
            body: comment.body.clone(),
        }
    }
}

/// Everything known about a single issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDetail {
    pub number: u64,
    pub title: String,
    pub state: String,
    pub url: String,
    pub author: String,
    pub created_at: String,
    pub updated_at: String,
    pub closed_at: Option<String>,
    pub comments_count: u32,
    pub labels: Vec<String>,
    pub assignees: Vec<String>,
    pub milestone: Option<String>,
    pub body: String,
    /// Newest first; empty unless comments were requested
    pub comments: Vec<CommentSummary>,
}

impl IssueDetail {
    pub fn new(issue: &Issue, comments: &[Comment]) -> Self {
        Self {
            number: issue.number,
            title: issue.title.clone(),
            state: issue.state.clone(),
            url: issue.html_url.clone(),
            author: issue.user.login.clone(),
            created_at: issue.created_at.clone(),
            updated_at: issue.updated_at.clone(),
            closed_at: issue.closed_at.clone(),
            comments_count: issue.comments,
            labels: issue.label_names(),
            assignees: issue.assignee_logins(),
            milestone: issue.milestone.as_ref().map(|m| m.title.clone()),
            body: issue.body.clone().unwrap_or_default(),
            comments: comments.iter().map(CommentSummary::from).collect(),
        }
    }
}
