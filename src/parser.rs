use crate::types::{FeedEntry, RelayError, Result};
use feed_rs::parser;
use tracing::info;

pub struct FeedParser;

impl FeedParser {
    /// Parse a feed document into raw entries, preserving feed order
    /// (typically newest-first).
    pub fn parse(content: &str) -> Result<Vec<FeedEntry>> {
        let feed = parser::parse(content.as_bytes())
            .map_err(|e| RelayError::Parse(format!("Failed to parse feed: {}", e)))?;

        let entries: Vec<FeedEntry> = feed.entries.into_iter().map(Self::map_entry).collect();
        info!("Parsed feed with {} entries", entries.len());
        Ok(entries)
    }

    fn map_entry(entry: feed_rs::model::Entry) -> FeedEntry {
        let title = entry.title.map(|t| t.content);

        let authors = if entry.authors.is_empty() {
            None
        } else {
            Some(
                entry
                    .authors
                    .iter()
                    .map(|a| a.name.clone())
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        };

        let link = entry.links.first().map(|l| l.href.clone());

        // APS-style feeds carry the DOI in the article link path.
        let doi = link
            .as_deref()
            .and_then(extract_doi)
            .or_else(|| extract_doi(&entry.id));

        let summary = entry.summary.map(|s| s.content);

        // First content part's value; the filter substitutes the placeholder
        // when absent.
        let content = entry.content.and_then(|c| c.body);

        let published = entry.published.map(|d| d.to_rfc3339());

        FeedEntry {
            title,
            authors,
            published,
            doi,
            link,
            summary,
            content,
        }
    }
}

/// Pull a DOI out of a URL such as
/// `http://link.aps.org/doi/10.1103/PhysRevLett.132.101801`.
fn extract_doi(url: &str) -> Option<String> {
    let idx = url.find("/doi/")?;
    let doi = &url[idx + 5..];
    if doi.is_empty() {
        None
    } else {
        Some(doi.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const APS_STYLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/">
  <channel>
    <title>Physical Review Letters</title>
    <item>
      <title>Observation of a Narrow Resonance</title>
      <link>http://link.aps.org/doi/10.1103/PhysRevLett.132.101801</link>
      <pubDate>Wed, 03 Jan 2024 00:00:00 GMT</pubDate>
      <description>The abstract text.&lt;br /&gt;Citation boilerplate.</description>
      <content:encoded><![CDATA[Full abstract body.]]></content:encoded>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parses_aps_style_feed() {
        let entries = FeedParser::parse(APS_STYLE_FEED).unwrap();
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert_eq!(
            entry.title.as_deref(),
            Some("Observation of a Narrow Resonance")
        );
        assert_eq!(
            entry.link.as_deref(),
            Some("http://link.aps.org/doi/10.1103/PhysRevLett.132.101801")
        );
        assert_eq!(entry.doi.as_deref(), Some("10.1103/PhysRevLett.132.101801"));
        assert_eq!(entry.published.as_deref(), Some("2024-01-03T00:00:00+00:00"));
        assert_eq!(
            entry.summary.as_deref(),
            Some("The abstract text.<br />Citation boilerplate.")
        );
        assert_eq!(entry.content.as_deref(), Some("Full abstract body."));
    }

    #[test]
    fn rejects_non_feed_content() {
        assert!(FeedParser::parse("not a feed at all").is_err());
    }

    #[test]
    fn extracts_doi_from_link() {
        assert_eq!(
            extract_doi("http://link.aps.org/doi/10.1103/PhysRevD.109.012004"),
            Some("10.1103/PhysRevD.109.012004".to_string())
        );
        assert_eq!(extract_doi("http://example.com/article/123"), None);
        assert_eq!(extract_doi("http://link.aps.org/doi/"), None);
    }
}
