use chrono::{DateTime, Utc};

/// One article within a fetched feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleItem {
    pub title: String,
    /// Article URL, empty when the feed gives none
    pub link: String,
    pub published: Option<DateTime<Utc>>,
    /// Plain-text summary
    pub summary: Option<String>,
}

/// Result of fetching one feed
#[derive(Debug, Clone, Default)]
pub struct FetchedFeed {
    /// Title declared by the feed itself
    pub title: Option<String>,
    pub items: Vec<ArticleItem>,
}

impl ArticleItem {
    pub fn has_link(&self) -> bool {
        !self.link.is_empty()
    }

    /// Get a preview of the summary (first N characters)
    pub fn summary_preview(&self, max_len: usize) -> String {
        let text = self.summary.as_deref().unwrap_or("");

        if max_len == 0 {
            return String::new();
        }

        if text.chars().count() <= max_len {
            text.to_string()
        } else {
            let cut: String = text.chars().take(max_len).collect();
            format!("{}...", cut.trim_end())
        }
    }
}
