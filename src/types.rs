use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Timestamps carry their original UTC offset so the persisted watermark
/// round-trips exactly as written.
pub type Timestamp = DateTime<FixedOffset>;

/// Raw record from the feed source. Any field can be absent in the wild, so
/// everything stays optional until the filter projects it for delivery.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub authors: Option<String>,
    /// Publication timestamp as an ISO-8601 string, as carried by the feed.
    pub published: Option<String>,
    pub doi: Option<String>,
    pub link: Option<String>,
    /// HTML-fragment summary, abstract first.
    pub summary: Option<String>,
    pub content: Option<String>,
}

/// Normalized projection of a [`FeedEntry`], ready for summarization and
/// delivery. Missing fields have been replaced by fixed placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedInfo {
    pub title: String,
    pub authors: String,
    pub publication_date: String,
    pub doi: String,
    pub content: String,
    pub summary: String,
    pub link: String,
}

/// Outcome of posting one message to one webhook endpoint. Logged, never
/// persisted.
#[derive(Debug, Clone)]
pub struct DeliveryResult {
    pub endpoint: String,
    pub http_status: Option<u16>,
    pub success: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed unavailable: {0}")]
    FeedUnavailable(String),

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Corrupt watermark in {path}: {source}")]
    CorruptWatermark {
        path: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Summarizer error: {0}")]
    Summarizer(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RelayError>;
