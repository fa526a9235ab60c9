//! Issue detail parameter types

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Checker, ResponseFormat, ValidationError, DEFAULT_MAX_COMMENTS, MAX_COMMENTS};

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[schemars(extend("required" = ["issue_number"]))]
pub struct GetIssueDetailsInput {
    #[schemars(range(min = 1), description = "GitHub issue number (e.g., 12345)")]
    pub issue_number: Option<i64>,
    #[schemars(description = "Include issue comments in the response (default: false)")]
    pub include_comments: Option<bool>,
    #[schemars(
        range(min = 1, max = 20),
        description = "Maximum number of comments to include (default: 5)"
    )]
    pub max_comments: Option<i64>,
    #[schemars(
        with = "Option<ResponseFormat>",
        description = "Output format: 'markdown' for human-readable or 'json' for structured data"
    )]
    pub response_format: Option<String>,
    #[serde(flatten)]
    #[schemars(skip)]
    pub unknown: BTreeMap<String, Value>,
}

/// Validated issue lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueDetailParameters {
    pub issue_number: u64,
    pub include_comments: bool,
    pub max_comments: u32,
    pub format: ResponseFormat,
}

impl GetIssueDetailsInput {
    pub fn validate(&self) -> Result<IssueDetailParameters, ValidationError> {
        let mut check = Checker::default();
        check.unknown_fields(&self.unknown);

        let issue_number = match self.issue_number {
            None => {
                check.reject("issue_number", "is required");
                0
            }
            Some(number) if number < 1 => {
                check.reject("issue_number", format!("must be at least 1 (got {number})"));
                0
            }
            Some(number) => number.unsigned_abs(),
        };

        let params = IssueDetailParameters {
            issue_number,
            include_comments: self.include_comments.unwrap_or(false),
            max_comments: check.bounded(
                "max_comments",
                self.max_comments,
                DEFAULT_MAX_COMMENTS,
                1,
                Some(MAX_COMMENTS),
            ),
            format: check.choice("response_format", self.response_format.as_deref()),
        };
        check.finish(params)
    }
}
