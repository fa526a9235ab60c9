//! Result formatting
//!
//! Turns a domain response into the single string a tool returns, either as
//! pretty-printed JSON or as Markdown.

pub mod markdown;
mod response;

pub use response::*;

use serde::Serialize;

use crate::params::ResponseFormat;

/// Render `value` in the requested format
///
/// `as_markdown` is only called in Markdown mode.
pub fn render<T: Serialize>(
    format: ResponseFormat,
    value: &T,
    as_markdown: impl FnOnce(&T) -> String,
) -> Result<String, serde_json::Error> {
    match format {
        ResponseFormat::Json => serde_json::to_string_pretty(value),
        ResponseFormat::Markdown => Ok(as_markdown(value)),
    }
}
