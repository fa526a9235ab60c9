//! Issue Tracker MCP Server
//!
//! Read-only search and inspection of GitHub issues via MCP over stdio.
//!
//! # Configuration
//! Defaults to the public API and `openvinotoolkit/openvino`. Override with
//! `--repo` / `--api-url` (or `ISSUES_MCP_REPO` / `ISSUES_MCP_API_URL`), or in
//! `~/.config/issues-mcp/config.toml`.
//!
//! ```json
//! { "mcpServers": { "issues": { "command": "./issues-mcp", "args": ["--repo", "owner/name"] } } }
//! ```

use std::path::PathBuf;

use clap::Parser;
use rmcp::{transport::stdio, ServiceExt};

use issues_mcp::{logging, Config, IssuesMcpServer};

#[derive(Parser)]
#[command(name = "issues-mcp")]
#[command(version, about = "Read-only MCP server for GitHub issues")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, env = "ISSUES_MCP_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Repository to query, as OWNER/REPO
    #[arg(long, env = "ISSUES_MCP_REPO")]
    repo: Option<String>,

    /// REST API base URL
    #[arg(long, env = "ISSUES_MCP_API_URL")]
    api_url: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose)?;

    tracing::info!("Starting Issues MCP Server");

    let config = Config::load(cli.config.as_deref())?.with_overrides(cli.api_url, cli.repo)?;
    tracing::info!(
        "Repository: {} via {}",
        config.github.repo,
        config.github.api_url
    );

    let server = IssuesMcpServer::new(&config)?;
    let service = server.serve(stdio()).await?;

    tracing::info!("Server running, waiting for requests...");
    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}
