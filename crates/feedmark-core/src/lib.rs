pub mod config;
pub mod error;
pub mod feed;
pub mod feedlist;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use feed::{ArticleItem, FeedFetcher, FetchedFeed};
pub use feedlist::FeedEntry;
