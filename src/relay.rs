use crate::config::Config;
use crate::delivery::{Deliver, WebhookDeliverer};
use crate::fetcher::FetchConfig;
use crate::filter;
use crate::formatter::format_message;
use crate::source::{FeedSource, RssFeedSource};
use crate::summarizer::{Summarize, VertexSummarizer};
use crate::types::{FeedEntry, Result, Timestamp};
use crate::watermark::WatermarkStore;
use chrono::{DateTime, Duration};
use std::time::Duration as StdDuration;
use tracing::{error, info, warn};

/// Outcome of one relay run.
#[derive(Debug)]
pub enum RelayOutcome {
    /// Feed unavailable, empty, or nothing newer than the watermark. No side
    /// effects were performed.
    NoNewEntries,
    /// At least one entry was newer; the watermark advanced.
    Processed {
        delivered: usize,
        skipped: usize,
        watermark: Timestamp,
    },
}

/// One-shot orchestrator: fetch the feed, compare its newest entry against
/// the watermark, then summarize, format and deliver each new entry oldest
/// first, and advance the watermark.
pub struct Relay {
    source: Box<dyn FeedSource>,
    watermark: WatermarkStore,
    summarizer: Box<dyn Summarize>,
    deliverer: Box<dyn Deliver>,
    pacing: StdDuration,
}

impl Relay {
    pub fn new(
        source: Box<dyn FeedSource>,
        watermark: WatermarkStore,
        summarizer: Box<dyn Summarize>,
        deliverer: Box<dyn Deliver>,
        pacing: StdDuration,
    ) -> Self {
        Self {
            source,
            watermark,
            summarizer,
            deliverer,
            pacing,
        }
    }

    /// Wire up the production collaborators from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let source = RssFeedSource::new(config.feed_url.clone(), FetchConfig::default())?;
        let watermark = WatermarkStore::new(
            config.watermark_path.clone(),
            Duration::days(config.lookback_days),
        );
        let summarizer = VertexSummarizer::new(config)?;
        let deliverer =
            WebhookDeliverer::new(reqwest::Client::new(), config.webhook_urls.clone());

        Ok(Self::new(
            Box::new(source),
            watermark,
            Box::new(summarizer),
            Box::new(deliverer),
            StdDuration::from_secs(config.pacing_seconds),
        ))
    }

    pub async fn run(&self) -> Result<RelayOutcome> {
        let entries = match self.source.fetch_entries().await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Feed unavailable, treating as no new entries: {}", e);
                return Ok(RelayOutcome::NoNewEntries);
            }
        };
        if entries.is_empty() {
            info!("No entries found in the feed");
            return Ok(RelayOutcome::NoNewEntries);
        }

        let Some(latest) = latest_entry_date(&entries) else {
            info!("No valid publication date found in the entries");
            return Ok(RelayOutcome::NoNewEntries);
        };

        let watermark = self.watermark.read()?;
        if latest <= watermark {
            info!("No new entries, no action required");
            return Ok(RelayOutcome::NoNewEntries);
        }

        info!("New entries found, processing");
        let selected = filter::select_new(&entries, watermark);

        let mut delivered = 0usize;
        let mut skipped = 0usize;

        // Filter output keeps feed order (newest-first); iterate in reverse
        // so chat messages read chronologically.
        for info in selected.iter().rev() {
            let summary = match self.summarizer.summarize(&info.content, &info.summary).await {
                Ok(summary) => summary,
                Err(e) => {
                    error!("Summarizer failed for {}: {}", info.title, e);
                    skipped += 1;
                    continue;
                }
            };

            let message = format_message(info, &summary);
            self.deliverer.deliver(&message, &info.title).await;
            delivered += 1;

            tokio::time::sleep(self.pacing).await;
        }

        self.watermark.write(latest)?;

        Ok(RelayOutcome::Processed {
            delivered,
            skipped,
            watermark: latest,
        })
    }
}

/// Publication date of the first entry in feed order with a usable
/// timestamp. Assumes the feed is newest-first; see DESIGN.md for the
/// ordering caveat.
fn latest_entry_date(entries: &[FeedEntry]) -> Option<Timestamp> {
    entries.iter().find_map(|entry| {
        entry
            .published
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(published: Option<&str>) -> FeedEntry {
        FeedEntry {
            published: published.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn latest_date_comes_from_first_usable_entry() {
        let entries = vec![
            entry(None),
            entry(Some("not a date")),
            entry(Some("2024-01-03T00:00:00+00:00")),
            entry(Some("2024-01-05T00:00:00+00:00")),
        ];

        let latest = latest_entry_date(&entries).unwrap();
        // First usable entry wins, even when a later entry is newer.
        assert_eq!(latest.to_rfc3339(), "2024-01-03T00:00:00+00:00");
    }

    #[test]
    fn latest_date_is_none_without_usable_entries() {
        assert!(latest_entry_date(&[entry(None), entry(Some("bad"))]).is_none());
        assert!(latest_entry_date(&[]).is_none());
    }
}
