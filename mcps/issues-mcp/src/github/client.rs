//! HTTP client for the GitHub REST API
//!
//! [`IssueApi`] is the seam between the tools and the network: the production
//! [`GithubClient`] performs one unauthenticated GET per request, and tests
//! substitute recording doubles.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::error::{ApiError, ApiResult};
use super::request::ApiRequest;
use crate::config::GithubConfig;

/// Media type for the v3 REST API
const ACCEPT_GITHUB_V3: &str = "application/vnd.github.v3+json";

/// Source of issue tracker data
///
/// Implementations must be `Send + Sync` so concurrent tool calls can share
/// one instance. No implementation retries.
#[async_trait]
pub trait IssueApi: Send + Sync {
    /// Perform `request` and return the decoded JSON body
    async fn fetch(&self, request: &ApiRequest) -> ApiResult<Value>;
}

/// Perform `request` and decode the body into `T`
pub async fn fetch_as<T: DeserializeOwned>(
    api: &dyn IssueApi,
    request: &ApiRequest,
) -> ApiResult<T> {
    let value = api.fetch(request).await?;
    Ok(serde_json::from_value(value)?)
}

/// GitHub REST client
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    base_url: String,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> ApiResult<Self> {
        Self::with_timeout(&config.api_url, &config.user_agent, config.timeout())
    }

    pub fn with_timeout(base_url: &str, user_agent: &str, timeout: Duration) -> ApiResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static(ACCEPT_GITHUB_V3),
        );

        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL for an endpoint path, keeping any path prefix of the base
    /// (GitHub Enterprise serves the API under `/api/v3`)
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl IssueApi for GithubClient {
    #[instrument(skip(self, request), fields(path = %request.path))]
    async fn fetch(&self, request: &ApiRequest) -> ApiResult<Value> {
        let url = self.endpoint(&request.path);
        debug!(url = %url, query = ?request.query, "GET request");

        let response = self
            .client
            .get(&url)
            .query(&request.query)
            .send()
            .await
            .map_err(|e| {
                let err = ApiError::from(e);
                warn!(kind = err.kind(), "request failed: {}", err);
                err
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<Value>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_status(status.as_u16(), &body, &request.resource);
        warn!(status = status.as_u16(), kind = err.kind(), "upstream returned an error");
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = GithubClient::with_timeout(
            "https://ghe.example.com/api/v3/",
            "test",
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(
            client.endpoint("/repos/o/r/issues"),
            "https://ghe.example.com/api/v3/repos/o/r/issues"
        );
    }

    #[test]
    fn test_new_from_config() {
        let client = GithubClient::new(&GithubConfig::default()).unwrap();
        assert_eq!(client.endpoint("/search/issues"), "https://api.github.com/search/issues");
    }
}
