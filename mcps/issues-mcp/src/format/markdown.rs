//! Markdown rendering of tool results

use chrono::{DateTime, Utc};

use super::response::{CommentSummary, IssueDetail, IssueSummary, LabelPage, SearchPage};
use crate::params::IssueState;
use crate::text::excerpt;

/// Characters of a comment body shown in issue details
pub const COMMENT_BODY_CHARS: usize = 300;

/// Render an ISO 8601 timestamp as `YYYY-MM-DD HH:MM:SS UTC`
///
/// Unparseable input is returned unchanged.
pub fn timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| {
            dt.with_timezone(&Utc)
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string()
        })
        .unwrap_or_else(|_| raw.to_string())
}

fn code_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("`{item}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn issue_section(out: &mut String, issue: &IssueSummary, always_show_labels: bool) {
    out.push_str(&format!("### #{}: {}\n", issue.number, issue.title));
    out.push_str(&format!(
        "**State:** {} | **Comments:** {} | **Created:** {} | **Updated:** {}\n",
        issue.state,
        issue.comments,
        timestamp(&issue.created_at),
        timestamp(&issue.updated_at)
    ));
    if always_show_labels || !issue.labels.is_empty() {
        let labels = if issue.labels.is_empty() {
            "None".to_string()
        } else {
            code_list(&issue.labels)
        };
        out.push_str(&format!("**Labels:** {labels}\n"));
    }
    out.push_str(&format!("**URL:** {}\n\n", issue.url));
}

fn next_page_hint(out: &mut String, page: u32) {
    out.push_str(&format!("\n*Use `page: {}` to see more results*\n", page + 1));
}

/// Keyword search results
pub fn search_page(page: &SearchPage, repo: &str) -> String {
    if page.issues.is_empty() {
        return "No issues found matching your criteria.".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!("# Issues in {} (Page {})\n\n", repo, page.page));
    out.push_str(&format!("**Total Results:** {}  \n", page.total_count));
    out.push_str(&format!(
        "**Showing:** {} issues on page {}  \n",
        page.issues.len(),
        page.page
    ));
    out.push_str(&format!("**Has More:** {}\n\n", yes_no(page.has_more)));
    out.push_str("---\n\n");

    for issue in &page.issues {
        issue_section(&mut out, issue, false);
    }

    if page.has_more {
        next_page_hint(&mut out, page.page);
    }
    out
}

/// Issues carrying a set of labels
pub fn label_page(page: &LabelPage) -> String {
    if page.issues.is_empty() {
        let state = match page.state {
            IssueState::All => String::new(),
            state => format!("{state} "),
        };
        return format!(
            "No {}issues found with labels: {}",
            state,
            page.labels_filter.join(", ")
        );
    }

    let mut out = String::new();
    out.push_str(&format!("# Issues with Labels: {}\n\n", code_list(&page.labels_filter)));
    out.push_str(&format!("**State:** {}  \n", page.state));
    out.push_str(&format!("**Page:** {}  \n", page.page));
    out.push_str(&format!("**Showing:** {} issues  \n", page.results_count));
    out.push_str(&format!("**Has More:** {}\n\n", yes_no(page.has_more)));
    out.push_str("---\n\n");

    for issue in &page.issues {
        issue_section(&mut out, issue, true);
    }

    if page.has_more {
        next_page_hint(&mut out, page.page);
    }
    out
}

fn comment_section(out: &mut String, comment: &CommentSummary) {
    out.push_str("---\n");
    out.push_str(&format!("**Author:** @{}  \n", comment.author));
    out.push_str(&format!("**Posted:** {}\n\n", timestamp(&comment.created_at)));
    out.push_str(&format!("{}\n\n", excerpt(&comment.body, COMMENT_BODY_CHARS)));
}

/// A single issue: description, then metadata, then recent comments
pub fn issue_detail(issue: &IssueDetail) -> String {
    let mut out = String::new();
    out.push_str(&format!("## #{}: {}\n\n", issue.number, issue.title));
    out.push_str(&format!("**URL:** {}\n\n", issue.url));

    out.push_str("**Description:**\n");
    if issue.body.trim().is_empty() {
        out.push_str("No description provided.\n");
    } else {
        out.push_str(&format!("{}\n", issue.body.trim_end()));
    }

    out.push_str("\n### Details\n\n");
    out.push_str(&format!("**State:** {}  \n", issue.state.to_uppercase()));
    out.push_str(&format!("**Author:** @{}  \n", issue.author));
    out.push_str(&format!("**Created:** {}  \n", timestamp(&issue.created_at)));
    out.push_str(&format!("**Updated:** {}  \n", timestamp(&issue.updated_at)));
    if let Some(closed_at) = &issue.closed_at {
        out.push_str(&format!("**Closed:** {}  \n", timestamp(closed_at)));
    }
    out.push_str(&format!("**Comments:** {}  \n", issue.comments_count));
    let labels = if issue.labels.is_empty() {
        "None".to_string()
    } else {
        code_list(&issue.labels)
    };
    out.push_str(&format!("**Labels:** {labels}\n"));

    if !issue.assignees.is_empty() {
        let assignees = issue
            .assignees
            .iter()
            .map(|login| format!("@{login}"))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("**Assignees:** {assignees}\n"));
    }
    if let Some(milestone) = &issue.milestone {
        out.push_str(&format!("**Milestone:** {milestone}\n"));
    }

    if !issue.comments.is_empty() {
        out.push_str(&format!(
            "\n## Recent Comments ({} of {})\n",
            issue.comments.len(),
            issue.comments_count
        ));
        for comment in &issue.comments {
            comment_section(&mut out, comment);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(number: u64, labels: &[&str]) -> IssueSummary {
        IssueSummary {
            number,
            title: format!("Issue {number}"),
            state: "open".to_string(),
            url: format!("https://github.com/o/r/issues/{number}"),
            author: "octocat".to_string(),
            created_at: "2024-01-02T03:04:05Z".to_string(),
            updated_at: "2024-02-03T04:05:06+02:00".to_string(),
            comments: 2,
            labels: labels.iter().map(|l| l.to_string()).collect(),
            body_preview: String::new(),
        }
    }

    fn detail() -> IssueDetail {
        IssueDetail {
            number: 42,
            title: "Crash in CPU plugin".to_string(),
            state: "open".to_string(),
            url: "https://github.com/o/r/issues/42".to_string(),
            author: "octocat".to_string(),
            created_at: "2024-01-02T03:04:05Z".to_string(),
            updated_at: "2024-01-03T03:04:05Z".to_string(),
            closed_at: None,
            comments_count: 9,
            labels: vec!["bug".to_string()],
            assignees: vec!["hubot".to_string(), "monalisa".to_string()],
            milestone: Some("2025.1".to_string()),
            body: "Steps to reproduce".to_string(),
            comments: vec![],
        }
    }

    #[test]
    fn test_timestamp_formats_to_utc() {
        assert_eq!(timestamp("2024-01-02T03:04:05Z"), "2024-01-02 03:04:05 UTC");
        assert_eq!(timestamp("2024-02-03T04:05:06+02:00"), "2024-02-03 02:05:06 UTC");
        assert_eq!(timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_empty_search_page() {
        let page = SearchPage {
            total_count: 0,
            page: 1,
            per_page: 10,
            has_more: false,
            issues: vec![],
        };
        assert_eq!(
            search_page(&page, "o/r"),
            "No issues found matching your criteria."
        );
    }

    #[test]
    fn test_search_page_layout() {
        let page = SearchPage {
            total_count: 25,
            page: 1,
            per_page: 2,
            has_more: true,
            issues: vec![summary(1, &["bug", "CPU"]), summary(2, &[])],
        };
        let text = search_page(&page, "o/r");

        assert!(text.starts_with("# Issues in o/r (Page 1)\n"));
        assert!(text.contains("**Total Results:** 25"));
        assert!(text.contains("**Showing:** 2 issues on page 1"));
        assert!(text.contains("**Has More:** Yes"));
        assert!(text.contains("### #1: Issue 1\n"));
        assert!(text.contains("**Labels:** `bug`, `CPU`"));
        assert!(text.contains("**Updated:** 2024-02-03 02:05:06 UTC"));
        assert_eq!(text.matches("**Labels:**").count(), 1);
        assert!(text.contains("*Use `page: 2` to see more results*"));
    }

    #[test]
    fn test_search_page_is_deterministic() {
        let page = SearchPage {
            total_count: 1,
            page: 1,
            per_page: 10,
            has_more: false,
            issues: vec![summary(7, &["docs"])],
        };
        assert_eq!(search_page(&page, "o/r"), search_page(&page, "o/r"));
        assert!(!search_page(&page, "o/r").contains("to see more results"));
    }

    #[test]
    fn test_empty_label_page_names_state_and_labels() {
        let mut page = LabelPage {
            labels_filter: vec!["bug".to_string(), "CPU".to_string()],
            state: IssueState::Closed,
            page: 1,
            per_page: 10,
            results_count: 0,
            has_more: false,
            issues: vec![],
        };
        assert_eq!(label_page(&page), "No closed issues found with labels: bug, CPU");

        page.state = IssueState::All;
        assert_eq!(label_page(&page), "No issues found with labels: bug, CPU");
    }

    #[test]
    fn test_label_page_always_shows_labels() {
        let page = LabelPage {
            labels_filter: vec!["bug".to_string()],
            state: IssueState::Open,
            page: 3,
            per_page: 1,
            results_count: 1,
            has_more: true,
            issues: vec![summary(5, &[])],
        };
        let text = label_page(&page);

        assert!(text.starts_with("# Issues with Labels: `bug`\n"));
        assert!(text.contains("**State:** open"));
        assert!(text.contains("**Labels:** None"));
        assert!(text.contains("*Use `page: 4` to see more results*"));
    }

    #[test]
    fn test_issue_detail_layout() {
        let text = issue_detail(&detail());

        let body_at = text.find("Steps to reproduce").unwrap();
        let state_at = text.find("**State:** OPEN").unwrap();
        assert!(body_at < state_at);
        assert!(text.contains("**Assignees:** @hubot, @monalisa"));
        assert!(text.contains("**Milestone:** 2025.1"));
        assert!(!text.contains("Recent Comments"));
        assert!(!text.contains("**Closed:**"));
    }

    #[test]
    fn test_issue_detail_without_body() {
        let mut issue = detail();
        issue.body = "  ".to_string();
        issue.assignees.clear();
        issue.milestone = None;
        let text = issue_detail(&issue);

        assert!(text.contains("No description provided."));
        assert!(!text.contains("**Assignees:**"));
        assert!(!text.contains("**Milestone:**"));
    }

    #[test]
    fn test_issue_detail_comments_truncated() {
        let mut issue = detail();
        issue.comments = vec![
            CommentSummary {
                author: "newest".to_string(),
                created_at: "2024-03-01T00:00:00Z".to_string(),
                body: "y".repeat(COMMENT_BODY_CHARS + 50),
            },
            CommentSummary {
                author: "older".to_string(),
                created_at: "2024-02-01T00:00:00Z".to_string(),
                body: "short".to_string(),
            },
        ];
        let text = issue_detail(&issue);

        assert!(text.contains("## Recent Comments (2 of 9)"));
        assert!(text.find("@newest").unwrap() < text.find("@older").unwrap());
        assert!(text.contains(&format!("{}...", "y".repeat(COMMENT_BODY_CHARS))));
        assert!(!text.contains(&"y".repeat(COMMENT_BODY_CHARS + 1)));
        assert!(text.contains("**Posted:** 2024-03-01 00:00:00 UTC"));
    }
}
