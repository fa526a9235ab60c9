//! Keyword search parameter types

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    split_labels, Checker, IssueState, Page, ResponseFormat, SortBy, SortOrder, ValidationError,
    MAX_LABELS_LEN, MAX_QUERY_LEN,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[schemars(extend("required" = ["query"]))]
pub struct SearchIssuesInput {
    #[schemars(
        length(min = 1, max = 200),
        description = "Search query (e.g., 'segmentation fault', 'python API', 'performance')"
    )]
    pub query: Option<String>,
    #[schemars(
        with = "Option<IssueState>",
        description = "Filter by issue state: 'open', 'closed', or 'all' (default: open)"
    )]
    pub state: Option<String>,
    #[schemars(
        length(max = 100),
        description = "Comma-separated labels to filter by (e.g., 'bug,CPU')"
    )]
    pub labels: Option<String>,
    #[schemars(
        with = "Option<SortBy>",
        description = "Sort results by: 'created', 'updated', or 'comments' (default: created)"
    )]
    pub sort: Option<String>,
    #[schemars(
        with = "Option<SortOrder>",
        description = "Sort order: 'asc' or 'desc' (default: desc)"
    )]
    pub order: Option<String>,
    #[schemars(range(min = 1, max = 30), description = "Number of results per page (default: 10)")]
    pub per_page: Option<i64>,
    #[schemars(range(min = 1), description = "Page number for pagination (default: 1)")]
    pub page: Option<i64>,
    #[schemars(
        with = "Option<ResponseFormat>",
        description = "Output format: 'markdown' for human-readable or 'json' for structured data"
    )]
    pub response_format: Option<String>,
    #[serde(flatten)]
    #[schemars(skip)]
    pub unknown: BTreeMap<String, Value>,
}

/// Validated keyword search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParameters {
    pub query: String,
    pub state: IssueState,
    /// Every label must be present on a matching issue
    pub labels: Vec<String>,
    pub sort: SortBy,
    pub order: SortOrder,
    pub page: Page,
    pub format: ResponseFormat,
}

impl SearchIssuesInput {
    pub fn validate(&self) -> Result<SearchParameters, ValidationError> {
        let mut check = Checker::default();
        check.unknown_fields(&self.unknown);

        let query = check.text("query", self.query.as_deref(), true, MAX_QUERY_LEN);
        if let Some(qualifier) = query.as_deref().and_then(scope_qualifier) {
            check.reject(
                "query",
                format!("must not contain the '{qualifier}' qualifier; the repository is fixed"),
            );
        }
        let labels = check
            .text("labels", self.labels.as_deref(), false, MAX_LABELS_LEN)
            .map(|raw| split_labels(&raw))
            .unwrap_or_default();

        let params = SearchParameters {
            query: query.unwrap_or_default(),
            state: check.choice("state", self.state.as_deref()),
            labels,
            sort: check.choice("sort", self.sort.as_deref()),
            order: check.choice("order", self.order.as_deref()),
            page: check.page(self.page, self.per_page),
            format: check.choice("response_format", self.response_format.as_deref()),
        };
        check.finish(params)
    }
}

/// Search qualifiers that would widen results beyond the configured repository
const SCOPE_QUALIFIERS: &[&str] = &["repo:", "org:", "user:"];

/// First word of `query` that is a scope qualifier, if any
fn scope_qualifier(query: &str) -> Option<&'static str> {
    query.split_whitespace().find_map(|word| {
        let word = word.trim_start_matches(['-', '(']).to_ascii_lowercase();
        SCOPE_QUALIFIERS
            .iter()
            .copied()
            .find(|qualifier| word.starts_with(qualifier))
    })
}
