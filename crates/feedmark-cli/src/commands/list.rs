use anyhow::Result;

use super::FeedSource;
use crate::render::{render_feed_list, Palette};

pub fn run(source: &FeedSource, palette: &Palette) -> Result<()> {
    let Some(entries) = source.list()? else {
        return Ok(());
    };

    render_feed_list(&mut std::io::stdout().lock(), &entries, palette)?;
    Ok(())
}
