mod fetcher;
mod models;
mod parser;

pub use fetcher::FeedFetcher;
pub use models::{ArticleItem, FetchedFeed};
pub use parser::parse_feed;
