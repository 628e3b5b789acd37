//! Document Source
//!
//! Fetches wiki pages over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::SourceConfig;

use super::error::{ExtractError, Result};

/// Anything that can hand out the HTML of a page by URL.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Builds the HTTP client shared by the page source and the evaluator.
pub fn build_client(config: &SourceConfig) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .user_agent(config.user_agent.clone())
        .build()
}

/// [`DocumentSource`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<String> {
        let unreachable = |reason: String| ExtractError::SourceUnreachable {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unreachable(format!("status {status}")));
        }

        let body = response.text().await.map_err(|e| unreachable(e.to_string()))?;
        debug!(bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
