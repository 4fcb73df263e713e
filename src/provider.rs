//! Remote content provider for the daily dashboard
//!
//! The dashboard backend generates a fresh devotional bundle on each
//! `GET /api/dashboard`. This module wraps that call behind the
//! `ContentProvider` trait so the resolver can be driven by any source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::content::Content;

/// Path of the dashboard endpoint relative to the backend URL
const DASHBOARD_PATH: &str = "/api/dashboard";

/// Errors that can occur when generating content
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP request failed (connection, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Backend returned status {0}")]
    Status(u16),

    /// Response body is not a valid dashboard
    #[error("Failed to parse dashboard: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Source of freshly generated dashboards
///
/// One call is one attempt: implementations do not retry.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn generate(&self) -> Result<Content, ProviderError>;
}

/// Client for the dashboard backend
#[derive(Debug, Clone)]
pub struct DashboardClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Backend base URL, without a trailing slash
    base_url: String,
}

impl DashboardClient {
    /// Creates a client for `base_url` whose requests give up after `timeout`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http_client, base_url))
    }

    /// Creates a client with a custom HTTP client
    pub fn with_client(http_client: Client, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Full URL of the dashboard endpoint
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, DASHBOARD_PATH)
    }
}

#[async_trait]
impl ContentProvider for DashboardClient {
    async fn generate(&self) -> Result<Content, ProviderError> {
        let url = self.endpoint();
        debug!(%url, "requesting dashboard");

        let response = self.http_client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        let content: Content = serde_json::from_str(&text)?;
        Ok(content)
    }
}
