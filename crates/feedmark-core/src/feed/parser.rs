use feed_rs::parser;

use super::models::{ArticleItem, FetchedFeed};
use crate::{Error, Result};

const SUMMARY_WRAP_WIDTH: usize = 100;

/// Parse RSS/Atom content into at most `max_entries` articles.
///
/// Articles are returned newest first when every entry carries a date,
/// otherwise in the order the feed lists them.
pub fn parse_feed(content: &[u8], max_entries: usize) -> Result<FetchedFeed> {
    let feed = parser::parse(content).map_err(|e| Error::FeedParse(e.to_string()))?;

    let title = feed
        .title
        .map(|t| t.content.trim().to_string())
        .filter(|t| !t.is_empty());

    let mut items: Vec<ArticleItem> = feed
        .entries
        .into_iter()
        .map(|entry| {
            let title = entry
                .title
                .map(|t| t.content.trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Untitled".to_string());

            let link = entry
                .links
                .first()
                .map(|l| l.href.trim().to_string())
                .unwrap_or_default();

            let published = entry.published.or(entry.updated);

            let summary = entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body))
                .map(|html| html_to_text(&html))
                .filter(|text| !text.is_empty());

            ArticleItem {
                title,
                link,
                published,
                summary,
            }
        })
        .collect();

    if items.iter().all(|item| item.published.is_some()) {
        // Stable, so entries sharing a timestamp keep feed order
        items.sort_by(|a, b| b.published.cmp(&a.published));
    }
    items.truncate(max_entries);

    Ok(FetchedFeed { title, items })
}

/// Convert HTML content to plain text
fn html_to_text(html: &str) -> String {
    html2text::from_read(html.as_bytes(), SUMMARY_WRAP_WIDTH)
        .unwrap_or_else(|_| html.to_string())
        .trim()
        .to_string()
}
