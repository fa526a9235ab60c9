//! Type definitions for issue tracker entities
//!
//! Rust structs for the JSON payloads returned by the GitHub REST API.

pub mod common;
pub mod issue;

pub use common::{Label, Milestone, User};
pub use issue::{Comment, Issue, SearchResponse};
