//! Keyword search handler

use tracing::info;

use super::{finish, ToolResult};
use crate::format::{markdown, render, SearchPage};
use crate::github::{fetch_as, request, IssueApi};
use crate::params::SearchIssuesInput;
use crate::types::SearchResponse;

/// Search issues in `repo` by keyword, state and labels
pub async fn search_issues(api: &dyn IssueApi, repo: &str, input: &SearchIssuesInput) -> String {
    finish("search_issues", try_search_issues(api, repo, input).await)
}

pub async fn try_search_issues(
    api: &dyn IssueApi,
    repo: &str,
    input: &SearchIssuesInput,
) -> ToolResult {
    let params = input.validate()?;
    info!(query = %params.query, state = %params.state, page = params.page.number, "searching issues");

    let response: SearchResponse = fetch_as(api, &request::search_issues(repo, &params)).await?;
    let page = SearchPage::new(&response, params.page);

    Ok(render(params.format, &page, |page| {
        markdown::search_page(page, repo)
    })?)
}
