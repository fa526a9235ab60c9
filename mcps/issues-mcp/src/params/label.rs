//! Label listing parameter types

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    split_labels, Checker, IssueState, Page, ResponseFormat, SortBy, SortOrder, ValidationError,
    MAX_LABELS_LEN,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[schemars(extend("required" = ["labels"]))]
pub struct ListIssuesByLabelInput {
    #[schemars(
        length(min = 1, max = 100),
        description = "Comma-separated labels (e.g., 'bug', 'enhancement', 'bug,CPU'). Issues must carry all of them."
    )]
    pub labels: Option<String>,
    #[schemars(
        with = "Option<IssueState>",
        description = "Filter by issue state: 'open', 'closed', or 'all' (default: open)"
    )]
    pub state: Option<String>,
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

/// Validated label listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelListParameters {
    /// Never empty
    pub labels: Vec<String>,
    pub state: IssueState,
    pub sort: SortBy,
    pub order: SortOrder,
    pub page: Page,
    pub format: ResponseFormat,
}

impl ListIssuesByLabelInput {
    pub fn validate(&self) -> Result<LabelListParameters, ValidationError> {
        let mut check = Checker::default();
        check.unknown_fields(&self.unknown);

        let labels = match check.text("labels", self.labels.as_deref(), true, MAX_LABELS_LEN) {
            Some(raw) => {
                let labels = split_labels(&raw);
                if labels.is_empty() {
                    check.reject("labels", "must name at least one label");
                }
                labels
            }
            None => Vec::new(),
        };

        let params = LabelListParameters {
            labels,
            state: check.choice("state", self.state.as_deref()),
            sort: check.choice("sort", self.sort.as_deref()),
            order: check.choice("order", self.order.as_deref()),
            page: check.page(self.page, self.per_page),
            format: check.choice("response_format", self.response_format.as_deref()),
        };
        check.finish(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(value: Value) -> ListIssuesByLabelInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_labels_split_and_trimmed() {
        let params = input(json!({ "labels": "bug, CPU " })).validate().unwrap();
        assert_eq!(params.labels, vec!["bug", "CPU"]);
        assert_eq!(params.state, IssueState::Open);
        assert_eq!(params.page, Page::default());
    }

    #[test]
    fn test_labels_required() {
        let err = input(json!({ "state": "all" })).validate().unwrap_err();
        assert!(err.has_field("labels"));
    }

    #[test]
    fn test_only_commas_rejected() {
        let err = input(json!({ "labels": " , ," })).validate().unwrap_err();
        assert!(err.to_string().contains("labels: must name at least one label"));
    }

    #[test]
    fn test_labels_too_long_rejected() {
        let err = input(json!({ "labels": "a".repeat(101) }))
            .validate()
            .unwrap_err();
        assert!(err.has_field("labels"));
    }

    #[test]
    fn test_pagination_rejected_before_labels_are_used() {
        let err = input(json!({ "labels": "bug", "page": 0, "per_page": 0 }))
            .validate()
            .unwrap_err();
        assert!(err.has_field("page"));
        assert!(err.has_field("per_page"));
    }
}
