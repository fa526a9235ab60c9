//! Types shared across issue tracker entities
//!
//! Users, labels and milestones as embedded in issue and comment payloads.

use serde::{Deserialize, Serialize};

/// A GitHub account (issue author, assignee, commenter)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// GitHub login/username
    pub login: String,
}

/// Represents a GitHub label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Label name
    pub name: String,

    /// Label color (hex without #)
    #[serde(default)]
    pub color: Option<String>,
}

/// Represents a GitHub milestone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Milestone title
    pub title: String,

    /// Milestone number
    #[serde(default)]
    pub number: Option<u32>,
}
