//! Parameter types for the issue tools
//!
//! Each tool has a raw input type (what the MCP client sends, with a published
//! JSON schema) and a validated parameter type. Raw inputs are decoded
//! leniently so that out-of-range numbers, unknown enum values and unknown
//! argument names reach [`validate`](SearchIssuesInput::validate) and come back
//! to the agent as a readable message instead of a protocol fault.
//!
//! Organized by tool: search, issue, label

mod issue;
mod label;
mod search;

pub use issue::*;
pub use label::*;
pub use search::*;

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Default number of issues per page
pub const DEFAULT_PER_PAGE: u32 = 10;
/// Largest page size a client may request
pub const MAX_PER_PAGE: u32 = 30;
/// Default number of comments attached to issue details
pub const DEFAULT_MAX_COMMENTS: u32 = 5;
/// Largest number of comments a client may request
pub const MAX_COMMENTS: u32 = 20;
/// Longest accepted search query, in characters
pub const MAX_QUERY_LEN: usize = 200;
/// Longest accepted comma-separated label list, in characters
pub const MAX_LABELS_LEN: usize = 100;

// ============================================================================
// Enumerations
// ============================================================================

/// A closed set of lowercase wire values
pub trait Choice: Copy + Default + 'static {
    /// Every accepted value, in documentation order
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|choice| choice.as_str().eq_ignore_ascii_case(raw))
    }

    fn expected() -> String {
        Self::ALL
            .iter()
            .map(|choice| format!("'{}'", choice.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Issue state filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    #[default]
    Open,
    Closed,
    All,
}

impl Choice for IssueState {
    const ALL: &'static [Self] = &[Self::Open, Self::Closed, Self::All];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

/// Sort key for issue listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Created,
    Updated,
    Comments,
}

impl Choice for SortBy {
    const ALL: &'static [Self] = &[Self::Created, Self::Updated, Self::Comments];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Comments => "comments",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl Choice for SortOrder {
    const ALL: &'static [Self] = &[Self::Asc, Self::Desc];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Output format of a tool result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Human-readable text
    #[default]
    Markdown,
    /// Structured data
    Json,
}

impl Choice for ResponseFormat {
    const ALL: &'static [Self] = &[Self::Markdown, Self::Json];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Json => "json",
        }
    }
}

macro_rules! display_choice {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_choice!(IssueState, SortBy, SortOrder, ResponseFormat);

// ============================================================================
// Pagination
// ============================================================================

/// A validated page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number
    pub number: u32,
    /// Page size, within `1..=MAX_PER_PAGE`
    pub per_page: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Page {
    /// Whether a result set of `total` items extends past this page
    pub fn has_more_than(&self, total: u64) -> bool {
        total > u64::from(self.number) * u64::from(self.per_page)
    }

    /// Whether a page of `returned` items was full (no total available)
    pub fn is_full(&self, returned: usize) -> bool {
        returned as u64 == u64::from(self.per_page)
    }
}

// ============================================================================
// Validation
// ============================================================================

/// A single rejected argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub problem: String,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.problem)
    }
}

/// Every argument that failed validation for one tool call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid parameters: {}", join_violations(.violations))]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Whether `field` is among the rejected arguments
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

/// Collects violations while a raw input is being checked
#[derive(Debug, Default)]
pub(crate) struct Checker {
    violations: Vec<FieldViolation>,
}

impl Checker {
    pub(crate) fn reject(&mut self, field: &str, problem: impl Into<String>) {
        self.violations.push(FieldViolation {
            field: field.to_string(),
            problem: problem.into(),
        });
    }

    /// Reject every argument name the tool does not declare
    pub(crate) fn unknown_fields(&mut self, unknown: &BTreeMap<String, Value>) {
        for name in unknown.keys() {
            self.reject(name, "unknown parameter");
        }
    }

    /// Parse an optional enumeration value, falling back to its default
    pub(crate) fn choice<T: Choice>(&mut self, field: &str, raw: Option<&str>) -> T {
        match raw {
            None => T::default(),
            Some(raw) => T::parse(raw).unwrap_or_else(|| {
                self.reject(
                    field,
                    format!("must be one of {} (got '{}')", T::expected(), raw.trim()),
                );
                T::default()
            }),
        }
    }

    /// Check an optional integer against an inclusive range
    pub(crate) fn bounded(
        &mut self,
        field: &str,
        raw: Option<i64>,
        default: u32,
        min: u32,
        max: Option<u32>,
    ) -> u32 {
        let Some(value) = raw else {
            return default;
        };
        let in_range = value >= i64::from(min) && max.map_or(true, |max| value <= i64::from(max));
        match u32::try_from(value) {
            Ok(value) if in_range => value,
            _ => {
                let expected = match max {
                    Some(max) => format!("must be between {min} and {max}"),
                    None => format!("must be at least {min}"),
                };
                self.reject(field, format!("{expected} (got {value})"));
                default
            }
        }
    }

    /// Trim an optional text argument and check its length in characters
    pub(crate) fn text(
        &mut self,
        field: &str,
        raw: Option<&str>,
        required: bool,
        max_len: usize,
    ) -> Option<String> {
        let trimmed = raw.map(str::trim).filter(|s| !s.is_empty());
        match trimmed {
            None if required => {
                self.reject(field, "is required and must not be empty");
                None
            }
            None => None,
            Some(text) if text.chars().count() > max_len => {
                self.reject(field, format!("must be at most {max_len} characters"));
                None
            }
            Some(text) => Some(text.to_string()),
        }
    }

    /// Pagination shared by the listing tools
    pub(crate) fn page(&mut self, page: Option<i64>, per_page: Option<i64>) -> Page {
        Page {
            number: self.bounded("page", page, 1, 1, None),
            per_page: self.bounded("per_page", per_page, DEFAULT_PER_PAGE, 1, Some(MAX_PER_PAGE)),
        }
    }

    pub(crate) fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.violations.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError {
                violations: self.violations,
            })
        }
    }
}

/// Split comma-separated labels, trimming each and dropping empty fragments
pub fn split_labels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}
