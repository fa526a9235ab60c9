//! Configuration loading for issues-mcp
//!
//! Configuration is layered, later layers winning:
//! 1. Default values (public GitHub API, `openvinotoolkit/openvino`)
//! 2. A TOML file: `--config`, else `ISSUES_MCP_CONFIG_PATH`, else
//!    `~/.config/issues-mcp/config.toml` when it exists
//! 3. `--api-url` / `--repo` (or `ISSUES_MCP_API_URL` / `ISSUES_MCP_REPO`)
//!
//! Nothing needs to be configured to run against the default repository.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or checking configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid api_url '{0}': must be an absolute http(s) URL")]
    InvalidApiUrl(String),

    #[error("invalid repo '{0}': expected OWNER/REPO")]
    InvalidRepo(String),

    #[error("timeout_secs must be at least 1")]
    InvalidTimeout,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Upstream API settings
    #[serde(default)]
    pub github: GithubConfig,
}

/// Upstream API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubConfig {
    /// REST API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Repository the tools query, in OWNER/REPO form
    #[serde(default = "default_repo")]
    pub repo: String,
    /// User-Agent header (GitHub rejects requests without one)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

// Default value functions
fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_repo() -> String {
    "openvinotoolkit/openvino".to_string()
}

fn default_user_agent() -> String {
    concat!("issues-mcp/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            repo: default_repo(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GithubConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// An explicitly given path must exist; the default location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::find_config_path().filter(|path| path.exists()),
        };

        let config = match path {
            Some(path) => {
                tracing::info!("Loading config from: {}", path.display());
                Self::from_file(&path)?
            }
            None => {
                tracing::info!("No config file found, using defaults");
                Self::default()
            }
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply command-line (or environment) overrides, then re-check
    pub fn with_overrides(
        mut self,
        api_url: Option<String>,
        repo: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(api_url) = api_url {
            self.github.api_url = api_url;
        }
        if let Some(repo) = repo {
            self.github.repo = repo;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let github = &self.github;

        match url::Url::parse(&github.api_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(ConfigError::InvalidApiUrl(github.api_url.clone())),
        }

        let mut parts = github.repo.split('/');
        let valid_repo = matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(owner), Some(name), None) if !owner.trim().is_empty() && !name.trim().is_empty()
        );
        if !valid_repo {
            return Err(ConfigError::InvalidRepo(github.repo.clone()));
        }

        if github.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        Ok(())
    }

    /// Find the configuration file path
    fn find_config_path() -> Option<PathBuf> {
        // 1. Check environment variable
        if let Ok(path) = std::env::var("ISSUES_MCP_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        // 2. Check ~/.config/issues-mcp/config.toml
        if let Ok(home) = std::env::var("HOME") {
            let path = PathBuf::from(home)
                .join(".config")
                .join("issues-mcp")
                .join("config.toml");
            return Some(path);
        }

        None
    }
}
