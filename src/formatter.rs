use crate::types::ExtractedInfo;

/// Render one entry plus its summary into the fixed five-line message block:
/// bolded title, authors, publication date, summary in a code fence, link.
/// No markup escaping is applied beyond the fence itself.
pub fn format_message(info: &ExtractedInfo, summary: &str) -> String {
    format!(
        "- **{}**\n {}\n {}\n ```{}```\n {}\n",
        info.title, info.authors, info.publication_date, summary, info.link
    )
}
