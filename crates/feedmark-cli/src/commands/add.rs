use anyhow::Result;

use feedmark_core::{feedlist, FeedEntry};

use super::FeedSource;
use crate::render::{render_feed_list, Palette};

pub fn run(source: &FeedSource, url: &str, name: &str, category: Option<&str>, palette: &Palette) -> Result<()> {
    let entry = FeedEntry::new(name, url, category);
    feedlist::append(&source.path, &entry)?;

    println!("Added {} to {}\n", entry, source.path.display());

    let entries = feedlist::load(&source.path)?;
    render_feed_list(&mut std::io::stdout().lock(), &entries, palette)?;

    Ok(())
}
