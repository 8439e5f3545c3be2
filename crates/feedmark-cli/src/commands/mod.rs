use std::path::{Path, PathBuf};

use anyhow::Result;

use feedmark_core::{feedlist, Error, FeedEntry};

pub mod add;
pub mod list;
pub mod read;
pub mod tui;

/// Feed list file selected for this run
pub struct FeedSource {
    pub path: PathBuf,
    /// Whether the path came from `--file`
    pub explicit: bool,
}

impl FeedSource {
    pub fn new(path: PathBuf, explicit: bool) -> Self {
        Self { path, explicit }
    }

    /// Load the configured feeds for reading.
    ///
    /// A missing default file prints a hint and yields `None`; a missing
    /// `--file` is an error.
    pub fn load(&self) -> Result<Option<Vec<FeedEntry>>> {
        self.read_with(feedlist::load)
    }

    /// Same as [`FeedSource::load`], for listing without fetching
    pub fn list(&self) -> Result<Option<Vec<FeedEntry>>> {
        self.read_with(feedlist::list)
    }

    fn read_with(&self, reader: fn(&Path) -> feedmark_core::Result<Vec<FeedEntry>>) -> Result<Option<Vec<FeedEntry>>> {
        match reader(&self.path) {
            Ok(entries) => Ok(Some(entries)),
            Err(Error::FeedListNotFound(path)) if !self.explicit => {
                println!("No feed list found at {}.", path.display());
                println!("\nTo create one, run:");
                println!("  feedmark --add <url> --name <name> [--category <category>]");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}
