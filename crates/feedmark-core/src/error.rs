use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Feed list not found: {}", .0.display())]
    FeedListNotFound(PathBuf),

    #[error("{reason}")]
    Fetch { url: String, reason: String },

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("Invalid feed: {0}")]
    InvalidFeed(String),

    #[error("Could not open browser: {0}")]
    BrowserLaunch(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a fetch failure for `url`
    pub fn fetch(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
