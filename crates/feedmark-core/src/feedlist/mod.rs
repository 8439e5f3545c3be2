mod models;
mod parser;
mod store;

pub use models::{group_by_category, FeedEntry, UNCATEGORIZED};
pub use parser::parse;
pub use store::{append, list, load};
