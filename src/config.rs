use crate::types::{RelayError, Result};
use std::env;
use std::path::PathBuf;
use url::Url;

/// Runtime configuration, read from the environment once at startup and
/// passed by parameter from there on.
#[derive(Debug, Clone)]
pub struct Config {
    /// Feed URL to poll.
    pub feed_url: String,
    /// Webhook endpoints, posted to in order.
    pub webhook_urls: Vec<Url>,
    /// Model identifier for the summarization call.
    pub model: String,
    /// Vertex AI region.
    pub region: String,
    /// GCP project identifier.
    pub project_id: String,
    /// Bearer token for the Vertex AI endpoint.
    pub auth_token: String,
    /// Path of the watermark file.
    pub watermark_path: PathBuf,
    /// Lookback window seeding the watermark when no file exists.
    pub lookback_days: i64,
    /// Fixed delay between entries during delivery.
    pub pacing_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let webhook_urls = required("WEBHOOK_URLS")?
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Url::parse(s).map_err(RelayError::from))
            .collect::<Result<Vec<_>>>()?;
        if webhook_urls.is_empty() {
            return Err(RelayError::Config(
                "WEBHOOK_URLS contains no endpoints".to_string(),
            ));
        }

        Ok(Self {
            feed_url: required("RSS_URL")?,
            webhook_urls,
            model: required("MODEL")?,
            region: required("REGION")?,
            project_id: required("PROJECT_ID")?,
            auth_token: required("VERTEX_ACCESS_TOKEN")?,
            watermark_path: PathBuf::from(required("DATE_FILE_PATH")?),
            lookback_days: parse_or("LOOKBACK_DAYS", 8)?,
            pacing_seconds: parse_or("PACING_SECONDS", 1)?,
        })
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name).map_err(|_| RelayError::Config(format!("{} is not set", name)))
}

fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| RelayError::Config(format!("{} is not a valid number: {}", name, raw))),
        Err(_) => Ok(default),
    }
}
