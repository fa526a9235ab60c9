//! MCP Server implementation
//!
//! This module defines the server that exposes the issue tracker tools over
//! MCP. Every tool returns exactly one text item; failures are reported in
//! that text rather than as protocol errors.

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo, Tool},
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::config::Config;
use crate::github::{ApiResult, GithubClient, IssueApi};
use crate::handlers::{self, ERROR_MARKER};
use crate::params::{GetIssueDetailsInput, ListIssuesByLabelInput, SearchIssuesInput};

/// Errors from calling a tool in-process
#[derive(Error, Debug)]
pub enum ServerError {
    /// No tool is registered under the name
    #[error("tool not found: {0}")]
    ToolNotFound(String),
}

/// The issue tracker MCP server
///
/// Holds the upstream client and the repository every tool queries. Cloning
/// shares the client.
#[derive(Clone)]
pub struct IssuesMcpServer {
    api: Arc<dyn IssueApi>,
    repo: String,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Tool Router Implementation
// ============================================================================

#[tool_router]
impl IssuesMcpServer {
    /// Build a server backed by the GitHub REST API
    pub fn new(config: &Config) -> ApiResult<Self> {
        let client = GithubClient::new(&config.github)?;
        Ok(Self::with_api(Arc::new(client), &config.github.repo))
    }

    /// Build a server over any [`IssueApi`] implementation
    pub fn with_api(api: Arc<dyn IssueApi>, repo: &str) -> Self {
        Self {
            api,
            repo: repo.to_string(),
            tool_router: Self::tool_router(),
        }
    }

    /// Repository the tools query
    pub fn repo(&self) -> &str {
        &self.repo
    }

    #[tool(
        name = "search_issues",
        description = "Search issues in the repository by keyword, with optional state and label filters. \
                       Returns issue numbers, titles, states, labels, comment counts and URLs. \
                       Use get_issue_details for the full description and comments of one issue.",
        annotations(
            title = "Search Issues",
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = true
        )
    )]
    async fn search_issues(
        &self,
        Parameters(input): Parameters<SearchIssuesInput>,
    ) -> Result<CallToolResult, McpError> {
        let text = handlers::search_issues(self.api.as_ref(), &self.repo, &input).await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(
        name = "get_issue_details",
        description = "Get the full details of one issue: description, state, author, labels, assignees, \
                       milestone, timestamps and optionally its most recent comments.",
        annotations(
            title = "Get Issue Details",
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = true
        )
    )]
    async fn get_issue_details(
        &self,
        Parameters(input): Parameters<GetIssueDetailsInput>,
    ) -> Result<CallToolResult, McpError> {
        let text = handlers::get_issue_details(self.api.as_ref(), &self.repo, &input).await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(
        name = "list_issues_by_label",
        description = "List issues carrying ALL of the given comma-separated labels (e.g. 'bug,CPU'), \
                       filtered by state and sorted by creation, update time or comment count.",
        annotations(
            title = "List Issues by Label",
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = true
        )
    )]
    async fn list_issues_by_label(
        &self,
        Parameters(input): Parameters<ListIssuesByLabelInput>,
    ) -> Result<CallToolResult, McpError> {
        let text = handlers::list_issues_by_label(self.api.as_ref(), &self.repo, &input).await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

// ============================================================================
// In-process API
// ============================================================================

impl IssuesMcpServer {
    /// All registered tools with their schemas and annotations
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    /// Call a tool by name with JSON arguments, without a transport
    ///
    /// Arguments that do not decode into the tool's input are reported as
    /// error text, the same as any other invalid parameter.
    pub async fn call_tool(&self, name: &str, args: Value) -> Result<CallToolResult, ServerError> {
        let result = match name {
            "search_issues" => match decode::<SearchIssuesInput>(args) {
                Ok(input) => self.search_issues(Parameters(input)).await,
                Err(text) => Ok(text_result(text)),
            },
            "get_issue_details" => match decode::<GetIssueDetailsInput>(args) {
                Ok(input) => self.get_issue_details(Parameters(input)).await,
                Err(text) => Ok(text_result(text)),
            },
            "list_issues_by_label" => match decode::<ListIssuesByLabelInput>(args) {
                Ok(input) => self.list_issues_by_label(Parameters(input)).await,
                Err(text) => Ok(text_result(text)),
            },
            _ => return Err(ServerError::ToolNotFound(name.to_string())),
        };

        // The tool methods above never produce a protocol error
        Ok(result.unwrap_or_else(|e| text_result(format!("{ERROR_MARKER}{}", e.message))))
    }
}

fn decode<T: DeserializeOwned>(args: Value) -> Result<T, String> {
    let args = if args.is_null() { Value::Object(Default::default()) } else { args };
    serde_json::from_value(args)
        .map_err(|e| format!("{ERROR_MARKER}Invalid parameters: {e}"))
}

fn text_result(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for IssuesMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                format!(
                    "Issue tracker MCP Server - read-only tools for searching and inspecting \
                     issues in the {} repository: search_issues, get_issue_details and \
                     list_issues_by_label. Results are Markdown by default; pass \
                     response_format='json' for structured data. Failures are returned as text \
                     starting with 'Error: '.",
                    self.repo
                ),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::ApiError;
    use crate::handlers::testing::{issue_json, ScriptedApi};
    use rmcp::ServerHandler;
    use serde_json::json;

    fn server(responses: Vec<ApiResult<Value>>) -> (IssuesMcpServer, Arc<ScriptedApi>) {
        let api = Arc::new(ScriptedApi::new(responses));
        (IssuesMcpServer::with_api(api.clone(), "o/r"), api)
    }

    fn text_of(result: &CallToolResult) -> &str {
        assert_eq!(result.content.len(), 1);
        match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => text.text.as_str(),
            _ => panic!("expected text content"),
        }
    }

    #[test]
    fn test_lists_three_read_only_tools() {
        let (server, _) = server(vec![]);
        let tools = server.list_tools();

        let mut names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();
        names.sort();
        assert_eq!(
            names,
            vec!["get_issue_details", "list_issues_by_label", "search_issues"]
        );

        for tool in &tools {
            let annotations = tool.annotations.as_ref().expect("annotations");
            assert_eq!(annotations.read_only_hint, Some(true));
            assert_eq!(annotations.destructive_hint, Some(false));
            assert_eq!(annotations.idempotent_hint, Some(true));
            assert_eq!(annotations.open_world_hint, Some(true));
        }
    }

    #[test]
    fn test_schema_hides_unknown_capture() {
        let (server, _) = server(vec![]);
        let tool = server
            .list_tools()
            .into_iter()
            .find(|t| t.name == "search_issues")
            .unwrap();

        let properties = tool.input_schema.get("properties").unwrap();
        assert!(properties.get("query").is_some());
        assert!(properties.get("per_page").is_some());
        assert!(properties.get("unknown").is_none());
        assert_eq!(tool.input_schema.get("required"), Some(&json!(["query"])));
    }

    #[test]
    fn test_info_enables_tools() {
        let (server, _) = server(vec![]);
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("o/r"));
    }

    #[tokio::test]
    async fn test_call_search() {
        let (server, api) = server(vec![Ok(json!({
            "total_count": 1,
            "items": [issue_json(5, 0)]
        }))]);

        let result = server
            .call_tool("search_issues", json!({ "query": "crash" }))
            .await
            .unwrap();

        assert!(text_of(&result).contains("### #5: Issue 5"));
        assert_eq!(api.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_call_failure_is_text_not_fault() {
        let (server, _) = server(vec![Err(ApiError::NotFound {
            resource: "issue #1 in o/r".to_string(),
        })]);

        let result = server
            .call_tool("get_issue_details", json!({ "issue_number": 1 }))
            .await
            .unwrap();

        assert!(text_of(&result).starts_with(ERROR_MARKER));
    }

    #[tokio::test]
    async fn test_call_with_mistyped_argument() {
        let (server, api) = server(vec![]);

        let result = server
            .call_tool("search_issues", json!({ "query": "crash", "per_page": "ten" }))
            .await
            .unwrap();

        assert!(text_of(&result).starts_with("Error: Invalid parameters"));
        assert!(api.requests().is_empty());
    }

    #[tokio::test]
    async fn test_call_with_missing_arguments() {
        let (server, _) = server(vec![]);

        let result = server
            .call_tool("list_issues_by_label", Value::Null)
            .await
            .unwrap();

        assert!(text_of(&result).contains("labels"));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let (server, _) = server(vec![]);

        let result = server.call_tool("create_issue", json!({})).await;

        assert!(matches!(result, Err(ServerError::ToolNotFound(name)) if name == "create_issue"));
    }
}
