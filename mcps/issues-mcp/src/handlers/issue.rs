//! Issue detail handler

use std::cmp::Reverse;

use chrono::DateTime;
use tracing::{debug, info};

use super::{finish, ToolResult};
use crate::format::{markdown, render, IssueDetail};
use crate::github::{fetch_as, request, IssueApi};
use crate::params::GetIssueDetailsInput;
use crate::types::{Comment, Issue};

/// Fetch one issue from `repo`, optionally with its most recent comments
pub async fn get_issue_details(
    api: &dyn IssueApi,
    repo: &str,
    input: &GetIssueDetailsInput,
) -> String {
    finish("get_issue_details", try_get_issue_details(api, repo, input).await)
}

pub async fn try_get_issue_details(
    api: &dyn IssueApi,
    repo: &str,
    input: &GetIssueDetailsInput,
) -> ToolResult {
    let params = input.validate()?;
    info!(issue = params.issue_number, comments = params.include_comments, "fetching issue");

    let issue: Issue = fetch_as(api, &request::get_issue(repo, params.issue_number)).await?;

    let comments = if params.include_comments && issue.comments > 0 {
        let mut comments: Vec<Comment> = Vec::new();
        for page in request::latest_comment_pages(issue.comments, params.max_comments) {
            let request =
                request::list_comments(repo, params.issue_number, params.max_comments, page);
            let batch: Vec<Comment> = fetch_as(api, &request).await?;
            comments.extend(batch);
        }
        newest_first(&mut comments, params.max_comments as usize);
        comments
    } else {
        debug!("skipping comments");
        Vec::new()
    };

    let detail = IssueDetail::new(&issue, &comments);
    Ok(render(params.format, &detail, markdown::issue_detail)?)
}

/// Order comments newest first and keep at most `limit`
///
/// Unparseable timestamps sort last.
fn newest_first(comments: &mut Vec<Comment>, limit: usize) {
    comments.sort_by_key(|c| Reverse(DateTime::parse_from_rfc3339(&c.created_at).ok()));
    comments.truncate(limit);
}
