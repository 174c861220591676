use crate::types::{RelayError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// HTTP settings for the feed fetch.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "paper-relay/0.1".to_string(),
            timeout_seconds: 30,
        }
    }
}

pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { client })
    }

    /// Fetch the feed document as text. A non-success status is an error;
    /// the orchestrator downgrades any fetch error to "no new entries".
    pub async fn fetch(&self, url: &str) -> Result<String> {
        debug!("Fetching feed: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::FeedUnavailable(format!(
                "HTTP {} when fetching {}",
                status, url
            )));
        }

        let content = response.text().await?;
        info!("Fetched feed: {} ({} bytes)", url, content.len());
        Ok(content)
    }
}
