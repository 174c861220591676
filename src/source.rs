use crate::fetcher::{FetchConfig, Fetcher};
use crate::parser::FeedParser;
use crate::types::{FeedEntry, Result};
use async_trait::async_trait;

/// Feed source seam: fetch and parse one feed into ordered raw entries.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_entries(&self) -> Result<Vec<FeedEntry>>;
}

/// RSS/Atom feed source backed by an HTTP fetch and feed-rs parsing.
pub struct RssFeedSource {
    url: String,
    fetcher: Fetcher,
}

impl RssFeedSource {
    pub fn new(url: String, config: FetchConfig) -> Result<Self> {
        Ok(Self {
            url,
            fetcher: Fetcher::new(config)?,
        })
    }
}

#[async_trait]
impl FeedSource for RssFeedSource {
    async fn fetch_entries(&self) -> Result<Vec<FeedEntry>> {
        let content = self.fetcher.fetch(&self.url).await?;
        FeedParser::parse(&content)
    }
}
