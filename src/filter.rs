use crate::types::{ExtractedInfo, FeedEntry, Timestamp};
use chrono::DateTime;
use tracing::warn;

pub const NO_TITLE: &str = "No title available";
pub const NO_AUTHOR: &str = "No author available";
pub const NO_DOI: &str = "No DOI available";
pub const NO_LINK: &str = "No link available";
pub const NO_SUMMARY: &str = "No summary available";
pub const NO_CONTENT: &str = "No content available";

/// Marker separating the abstract from citation boilerplate in the raw
/// HTML-ish summary.
const SUMMARY_BREAK: &str = "<br />";

/// Select the entries published strictly after `watermark`, projected into
/// delivery form. An entry with a missing or unparseable date is skipped
/// without aborting the batch; the rest keep their feed order.
pub fn select_new(entries: &[FeedEntry], watermark: Timestamp) -> Vec<ExtractedInfo> {
    let mut selected = Vec::new();

    for entry in entries {
        let Some(raw_date) = entry.published.as_deref() else {
            warn!("Skipping entry without publication date: {:?}", entry.title);
            continue;
        };
        let published = match DateTime::parse_from_rfc3339(raw_date) {
            Ok(date) => date,
            Err(e) => {
                warn!("Error parsing date {:?}: {}", raw_date, e);
                continue;
            }
        };

        if published > watermark {
            selected.push(extract(entry, raw_date));
        }
    }

    selected
}

fn extract(entry: &FeedEntry, raw_date: &str) -> ExtractedInfo {
    // Only the portion before the first break marker is kept. Deliberate
    // truncation policy, not a bug.
    let summary = match entry.summary.as_deref() {
        Some(s) => s.split(SUMMARY_BREAK).next().unwrap_or("").to_string(),
        None => NO_SUMMARY.to_string(),
    };

    ExtractedInfo {
        title: entry.title.clone().unwrap_or_else(|| NO_TITLE.to_string()),
        authors: entry.authors.clone().unwrap_or_else(|| NO_AUTHOR.to_string()),
        publication_date: raw_date.to_string(),
        doi: entry.doi.clone().unwrap_or_else(|| NO_DOI.to_string()),
        content: entry.content.clone().unwrap_or_else(|| NO_CONTENT.to_string()),
        summary,
        link: entry.link.clone().unwrap_or_else(|| NO_LINK.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, published: Option<&str>) -> FeedEntry {
        FeedEntry {
            title: Some(title.to_string()),
            published: published.map(str::to_string),
            ..Default::default()
        }
    }

    fn watermark(raw: &str) -> Timestamp {
        DateTime::parse_from_rfc3339(raw).unwrap()
    }

    #[test]
    fn keeps_only_strictly_newer_entries_in_feed_order() {
        let entries = vec![
            entry("newest", Some("2024-01-03T00:00:00+00:00")),
            entry("middle", Some("2024-01-02T12:00:00+00:00")),
            entry("boundary", Some("2024-01-02T00:00:00+00:00")),
            entry("old", Some("2024-01-01T00:00:00+00:00")),
        ];

        let selected = select_new(&entries, watermark("2024-01-02T00:00:00+00:00"));

        let titles: Vec<&str> = selected.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["newest", "middle"]);
    }

    #[test]
    fn skips_entries_with_missing_or_bad_dates() {
        let entries = vec![
            entry("no date", None),
            entry("bad date", Some("yesterday-ish")),
            entry("good", Some("2024-01-03T00:00:00+00:00")),
        ];

        let selected = select_new(&entries, watermark("2024-01-01T00:00:00+00:00"));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].title, "good");
    }

    #[test]
    fn missing_fields_become_placeholders() {
        let entries = vec![FeedEntry {
            published: Some("2024-01-03T00:00:00+00:00".to_string()),
            ..Default::default()
        }];

        let selected = select_new(&entries, watermark("2024-01-01T00:00:00+00:00"));
        let info = &selected[0];
        assert_eq!(info.title, NO_TITLE);
        assert_eq!(info.authors, NO_AUTHOR);
        assert_eq!(info.doi, NO_DOI);
        assert_eq!(info.link, NO_LINK);
        assert_eq!(info.summary, NO_SUMMARY);
        assert_eq!(info.content, NO_CONTENT);
        assert_eq!(info.publication_date, "2024-01-03T00:00:00+00:00");
    }

    #[test]
    fn summary_is_truncated_at_first_break_marker() {
        let entries = vec![FeedEntry {
            published: Some("2024-01-03T00:00:00+00:00".to_string()),
            summary: Some("The abstract.<br />Citation<br />More".to_string()),
            ..Default::default()
        }];

        let selected = select_new(&entries, watermark("2024-01-01T00:00:00+00:00"));
        assert_eq!(selected[0].summary, "The abstract.");
    }

    #[test]
    fn comparison_respects_offsets() {
        // 09:00+09:00 is midnight UTC, not after the midnight-UTC watermark.
        let entries = vec![
            entry("same instant", Some("2024-01-02T09:00:00+09:00")),
            entry("later instant", Some("2024-01-02T09:00:01+09:00")),
        ];

        let selected = select_new(&entries, watermark("2024-01-02T00:00:00+00:00"));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].title, "later instant");
    }
}
