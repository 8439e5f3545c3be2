use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use url::Url;

use super::models::FetchedFeed;
use super::parser::parse_feed;
use crate::config::AppConfig;
use crate::{Error, Result};

const MAX_FEED_BYTES: usize = 5 * 1024 * 1024;
const MAX_REDIRECTS: usize = 10;

/// Feed fetcher with a shared HTTP client.
///
/// Every call is one fresh GET: no retries and no caching.
pub struct FeedFetcher {
    client: Client,
}

impl FeedFetcher {
    /// Create a new feed fetcher with configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Self::build_client(config.fetch.request_timeout_secs, &config.fetch.user_agent)?;
        Ok(Self { client })
    }

    fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "application/rss+xml,application/atom+xml,application/xml;q=0.9,text/xml;q=0.9,*/*;q=0.8",
            ),
        );

        Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .default_headers(headers)
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(Error::Http)
    }

    /// Fetch and parse the feed at `url`, keeping at most `max_entries` articles.
    ///
    /// Every failure is reported as [`Error::Fetch`] so callers can report it
    /// against the feed and move on.
    pub async fn fetch(&self, url: &str, max_entries: usize) -> Result<FetchedFeed> {
        tracing::info!("Fetching feed from: {}", url);

        let result = match self.download(url).await {
            Ok(content) => parse_feed(&content, max_entries),
            Err(e) => Err(e),
        };

        match result {
            Ok(feed) => {
                tracing::debug!("Fetched {} items from {}", feed.items.len(), url);
                Ok(feed)
            }
            Err(e @ Error::Fetch { .. }) => Err(e),
            Err(Error::FeedParse(reason)) => Err(Error::fetch(url, format!("could not parse feed: {}", reason))),
            Err(other) => Err(Error::fetch(url, other)),
        }
    }

    async fn download(&self, url: &str) -> Result<Bytes> {
        let parsed = Url::parse(url).map_err(|e| Error::fetch(url, format!("invalid URL: {}", e)))?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| Error::fetch(url, describe_request_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch(url, format!("HTTP {}", status)));
        }

        if let Some(length) = response.content_length() {
            ensure_content_size(length as usize, url)?;
        }

        let content = response
            .bytes()
            .await
            .map_err(|e| Error::fetch(url, describe_request_error(&e)))?;
        ensure_content_size(content.len(), url)?;

        Ok(content)
    }
}

fn ensure_content_size(size: usize, url: &str) -> Result<()> {
    if size > MAX_FEED_BYTES {
        return Err(Error::fetch(url, format!("feed too large ({} bytes)", size)));
    }
    Ok(())
}

fn describe_request_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request timed out".to_string()
    } else if e.is_connect() {
        format!("could not connect: {}", e)
    } else if e.is_redirect() {
        "too many redirects".to_string()
    } else {
        e.to_string()
    }
}
