use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use super::models::{FeedEntry, UNCATEGORIZED};
use super::parser::{parse, trailing_category};
use crate::{Error, Result};

/// Written at the top of a feed list created by `append`
const FILE_HEADER: &str = "# RSS Feeds\n\n";

/// Read and parse the feed list at `path`
pub fn load(path: &Path) -> Result<Vec<FeedEntry>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::FeedListNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let entries = parse(&content);
    tracing::debug!("Loaded {} feeds from {}", entries.len(), path.display());
    Ok(entries)
}

/// List configured feeds in document order
pub fn list(path: &Path) -> Result<Vec<FeedEntry>> {
    load(path)
}

/// Append `entry` to the feed list at `path`.
///
/// Existing lines are never rewritten. When the category in effect at the end
/// of the file differs from the entry's, a new heading is written first so the
/// entry reads back under its own category and as the last entry. A missing
/// file is created with a minimal heading structure. Duplicates are allowed.
pub fn append(path: &Path, entry: &FeedEntry) -> Result<()> {
    entry.validate()?;

    let existing = match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => return Err(e.into()),
    };

    let chunk = append_chunk(existing.as_deref(), entry);

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(chunk.as_bytes())?;
    file.flush()?;

    tracing::info!("Added feed '{}' to {}", entry.name, path.display());
    Ok(())
}

/// Text to add after `existing` so that `entry` becomes the last feed
fn append_chunk(existing: Option<&str>, entry: &FeedEntry) -> String {
    let wanted = entry.category.as_deref().map(str::trim);
    let heading = wanted.unwrap_or(UNCATEGORIZED);
    let mut chunk = String::new();

    match existing {
        None => {
            chunk.push_str(FILE_HEADER);
            chunk.push_str(&format!("## {}\n", heading));
        }
        Some(text) => {
            if !text.is_empty() && !text.ends_with('\n') {
                chunk.push('\n');
            }

            let current = trailing_category(text);
            let needs_heading = match wanted {
                Some(category) => current.as_deref() != Some(category),
                // Uncategorized links may follow a headless list as-is
                None => current.is_some() && current.as_deref() != Some(UNCATEGORIZED),
            };

            if needs_heading {
                let ends_with_blank = text.is_empty() || text.ends_with("\n\n") || text.ends_with("\r\n\r\n");
                if !ends_with_blank {
                    chunk.push('\n');
                }
                chunk.push_str(&format!("## {}\n", heading));
            }
        }
    }

    chunk.push_str(&entry.to_markdown());
    chunk.push('\n');
    chunk
}
