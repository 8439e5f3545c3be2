use anyhow::Result;

use feedmark_core::{AppConfig, FeedFetcher};

use super::FeedSource;
use crate::render::{render_articles, render_feed_list, render_fetch_error, Palette};

/// Fetch every configured feed in file order and print its latest articles.
///
/// A feed that fails to load gets an inline error line and the run moves on.
pub async fn run(source: &FeedSource, config: &AppConfig, palette: &Palette) -> Result<()> {
    let Some(entries) = source.load()? else {
        return Ok(());
    };

    if entries.is_empty() {
        render_feed_list(&mut std::io::stdout().lock(), &entries, palette)?;
        return Ok(());
    }

    let fetcher = FeedFetcher::new(config)?;
    let max_entries = config.general.max_entries;
    let mut failed = 0usize;

    for entry in &entries {
        let result = fetcher.fetch(&entry.url, max_entries).await;

        let mut out = std::io::stdout().lock();
        match result {
            Ok(feed) => render_articles(&mut out, &entry.name, &feed.items, palette)?,
            Err(e) => {
                tracing::debug!("Failed to fetch '{}': {}", entry.name, e);
                failed += 1;
                render_fetch_error(&mut out, &entry.name, &e, palette)?;
            }
        }
    }

    tracing::info!("Read {} feeds ({} failed)", entries.len(), failed);
    Ok(())
}
