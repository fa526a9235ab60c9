//! Label listing handler

use tracing::info;

use super::{finish, ToolResult};
use crate::format::{markdown, render, LabelPage};
use crate::github::{fetch_as, request, IssueApi};
use crate::params::ListIssuesByLabelInput;
use crate::types::Issue;

/// List issues in `repo` carrying every given label
pub async fn list_issues_by_label(
    api: &dyn IssueApi,
    repo: &str,
    input: &ListIssuesByLabelInput,
) -> String {
    finish("list_issues_by_label", try_list_issues_by_label(api, repo, input).await)
}

pub async fn try_list_issues_by_label(
    api: &dyn IssueApi,
    repo: &str,
    input: &ListIssuesByLabelInput,
) -> ToolResult {
    let params = input.validate()?;
    info!(labels = ?params.labels, state = %params.state, page = params.page.number, "listing issues by label");

    let request = request::list_issues_by_label(repo, &params);
    let issues: Vec<Issue> = fetch_as(api, &request).await?;
    let page = LabelPage::new(&params.labels, params.state, params.page, &issues);

    Ok(render(params.format, &page, markdown::label_page)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::ApiError;
    use crate::handlers::testing::{issue_json, ScriptedApi};
    use serde_json::json;

    fn input(value: serde_json::Value) -> ListIssuesByLabelInput {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_labels_are_anded_in_one_filter() {
        let api = ScriptedApi::new(vec![Ok(json!([issue_json(3, 1)]))]);

        let text = list_issues_by_label(&api, "o/r", &input(json!({ "labels": "bug,CPU" }))).await;

        let requests = api.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/repos/o/r/issues");
        assert_eq!(requests[0].query_value("labels"), Some("bug,CPU"));
        assert!(text.starts_with("# Issues with Labels: `bug`, `CPU`"));
    }

    #[tokio::test]
    async fn test_empty_result_message() {
        let api = ScriptedApi::new(vec![Ok(json!([]))]);

        let text = list_issues_by_label(&api, "o/r", &input(json!({ "labels": "GPU" }))).await;

        assert_eq!(text, "No open issues found with labels: GPU");
    }

    #[tokio::test]
    async fn test_full_page_reports_more() {
        let api = ScriptedApi::new(vec![Ok(json!([issue_json(1, 0), issue_json(2, 0)]))]);

        let text = list_issues_by_label(
            &api,
            "o/r",
            &input(json!({ "labels": "bug", "per_page": 2, "response_format": "json" })),
        )
        .await;

        let page: LabelPage = serde_json::from_str(&text).unwrap();
        assert_eq!(page.results_count, 2);
        assert!(page.has_more);
        assert_eq!(page.labels_filter, vec!["bug"]);
    }

    #[tokio::test]
    async fn test_forbidden_is_rate_limit_text() {
        let api = ScriptedApi::new(vec![Err(ApiError::RateLimited)]);

        let text = list_issues_by_label(&api, "o/r", &input(json!({ "labels": "bug" }))).await;

        assert!(text.contains("rate limit"));
        assert_eq!(api.requests().len(), 1);
    }
}
