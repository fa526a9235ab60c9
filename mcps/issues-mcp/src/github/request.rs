//! Request construction for the issue tools
//!
//! Each tool call maps to one [`ApiRequest`]: an endpoint path plus ordered
//! query parameters. Building them is pure, so tests can assert on the exact
//! query an operation would send.

use crate::params::{Choice, IssueState, LabelListParameters, SearchParameters};

/// A GET request against the REST API, relative to the configured base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Endpoint path, starting with `/`
    pub path: String,
    /// Query parameters in the order they are sent
    pub query: Vec<(String, String)>,
    /// Human-readable name of the resource, used when it does not exist
    pub resource: String,
}

impl ApiRequest {
    fn new(path: String, resource: String) -> Self {
        Self {
            path,
            query: Vec::new(),
            resource,
        }
    }

    fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// First value sent for `key`
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Build the `q` string for `/search/issues`
///
/// Labels are ANDed by repeating the `label:` qualifier; labels containing
/// whitespace are quoted.
pub fn search_query(repo: &str, params: &SearchParameters) -> String {
    let mut q = format!("{} repo:{} is:issue", params.query, repo);

    if params.state != IssueState::All {
        q.push_str(" state:");
        q.push_str(params.state.as_str());
    }

    for label in &params.labels {
        if label.chars().any(char::is_whitespace) {
            q.push_str(&format!(" label:\"{label}\""));
        } else {
            q.push_str(&format!(" label:{label}"));
        }
    }

    q
}

/// `GET /search/issues`
pub fn search_issues(repo: &str, params: &SearchParameters) -> ApiRequest {
    ApiRequest::new(
        "/search/issues".to_string(),
        format!("issue search in {repo}"),
    )
    .param("q", search_query(repo, params))
    .param("sort", params.sort.as_str())
    .param("order", params.order.as_str())
    .param("per_page", params.page.per_page)
    .param("page", params.page.number)
}

/// `GET /repos/{repo}/issues/{number}`
pub fn get_issue(repo: &str, number: u64) -> ApiRequest {
    ApiRequest::new(
        format!("/repos/{repo}/issues/{number}"),
        format!("issue #{number} in {repo}"),
    )
}

/// `GET /repos/{repo}/issues/{number}/comments`, one page of `per_page`
///
/// The endpoint always pages oldest first; see [`latest_comment_pages`].
pub fn list_comments(repo: &str, number: u64, per_page: u32, page: u32) -> ApiRequest {
    ApiRequest::new(
        format!("/repos/{repo}/issues/{number}/comments"),
        format!("comments of issue #{number} in {repo}"),
    )
    .param("per_page", per_page)
    .param("page", page)
}

/// Page numbers holding the newest `max_comments` of `total` comments, last
/// page first
///
/// The last page may be short, in which case the page before it is needed
/// too.
pub fn latest_comment_pages(total: u32, max_comments: u32) -> Vec<u32> {
    if total == 0 || max_comments == 0 {
        return Vec::new();
    }
    let last = total.div_ceil(max_comments);
    if last > 1 && total % max_comments != 0 {
        vec![last, last - 1]
    } else {
        vec![last]
    }
}

/// `GET /repos/{repo}/issues` filtered by labels
///
/// The endpoint returns only issues that carry every listed label.
pub fn list_issues_by_label(repo: &str, params: &LabelListParameters) -> ApiRequest {
    ApiRequest::new(
        format!("/repos/{repo}/issues"),
        format!("repository {repo}"),
    )
    .param("labels", params.labels.join(","))
    .param("state", params.state.as_str())
    .param("sort", params.sort.as_str())
    .param("direction", params.order.as_str())
    .param("per_page", params.page.per_page)
    .param("page", params.page.number)
}
