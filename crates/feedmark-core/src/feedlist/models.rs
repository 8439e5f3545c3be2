use std::fmt;

use url::Url;

use super::parser::parse_heading;
use crate::{Error, Result};

/// Heading used when a feed is appended without a category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A configured feed, as written in the feed list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub name: String,
    pub url: String,
    /// Text of the nearest heading above the link, if any
    pub category: Option<String>,
}

impl FeedEntry {
    /// Build an entry; surrounding whitespace is dropped from every field
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        category: Option<impl Into<String>>,
    ) -> Self {
        Self {
            name: trimmed(name.into()),
            url: trimmed(url.into()),
            category: category.map(|c| trimmed(c.into())),
        }
    }

    /// Check that the entry can be written as a single link line and read back unchanged
    pub fn validate(&self) -> Result<()> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidFeed("feed name is empty".to_string()));
        }
        if name.contains(']') || name.contains('\n') || name.contains('\r') {
            return Err(Error::InvalidFeed(format!(
                "feed name '{}' may not contain ']' or line breaks",
                name
            )));
        }

        validate_url(&self.url)?;

        if let Some(category) = &self.category {
            let category = category.trim();
            if category.is_empty() || category.contains('\n') || category.contains('\r') {
                return Err(Error::InvalidFeed(format!(
                    "category '{}' must be a single non-empty line",
                    category
                )));
            }
            // A trailing " #" run would be eaten as a closing sequence
            if parse_heading(&format!("## {}", category)) != Some(category) {
                return Err(Error::InvalidFeed(format!(
                    "category '{}' would not read back as written",
                    category
                )));
            }
        }

        Ok(())
    }

    /// The markdown link line for this entry, without a trailing newline
    pub fn to_markdown(&self) -> String {
        format!("- [{}]({})", self.name.trim(), self.url.trim())
    }
}

fn trimmed(s: String) -> String {
    s.trim().to_string()
}

impl fmt::Display for FeedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.url)
    }
}

/// Feed URLs must be absolute http(s) URLs that fit inside `(...)`
pub(crate) fn validate_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::InvalidFeed("feed URL is empty".to_string()));
    }
    if raw.contains(')') || raw.chars().any(char::is_whitespace) {
        return Err(Error::InvalidFeed(format!(
            "feed URL '{}' may not contain ')' or whitespace",
            raw
        )));
    }

    let url = Url::parse(raw).map_err(|e| Error::InvalidFeed(format!("'{}': {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::InvalidFeed(format!(
            "'{}': unsupported scheme '{}'",
            raw, other
        ))),
    }
}

/// Group entries by category for display.
///
/// Categories keep the order of their first appearance in the file and entries
/// keep file order inside each group. A category that appears under several
/// headings is merged into one group.
pub fn group_by_category(entries: &[FeedEntry]) -> Vec<(Option<&str>, Vec<&FeedEntry>)> {
    let mut groups: Vec<(Option<&str>, Vec<&FeedEntry>)> = Vec::new();

    for entry in entries {
        let category = entry.category.as_deref();
        match groups.iter_mut().find(|(c, _)| *c == category) {
            Some((_, members)) => members.push(entry),
            None => groups.push((category, vec![entry])),
        }
    }

    groups
}
