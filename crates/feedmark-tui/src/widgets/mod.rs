mod article_detail;
mod article_list;
mod feed_list;
mod popup;
mod status_bar;

pub use article_detail::ArticleDetailWidget;
pub use article_list::ArticleListWidget;
pub use feed_list::FeedListWidget;
pub use popup::PopupWidget;
pub use status_bar::StatusBarWidget;
