use std::path::PathBuf;

use feedmark_core::{AppConfig, ArticleItem, Error, FeedEntry, FetchedFeed};

use crate::input::Action;
use crate::theme::Theme;

/// Which list the user is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    FeedList,
    ArticleList,
}

/// Input field of the add-feed form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Url,
    Name,
    Category,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            Self::Url => Self::Name,
            Self::Name => Self::Category,
            Self::Category => Self::Url,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Url => Self::Category,
            Self::Name => Self::Url,
            Self::Category => Self::Name,
        }
    }
}

/// State of the add-feed popup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddFeedForm {
    pub url: String,
    pub name: String,
    pub category: String,
    pub field: FormField,
    pub error: Option<String>,
}

impl AddFeedForm {
    fn active_mut(&mut self) -> &mut String {
        match self.field {
            FormField::Url => &mut self.url,
            FormField::Name => &mut self.name,
            FormField::Category => &mut self.category,
        }
    }

    /// Build the entry to append, or explain what is missing
    pub fn to_entry(&self) -> Result<FeedEntry, String> {
        if self.url.trim().is_empty() {
            return Err("Please enter a feed URL".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("Please enter a feed name".to_string());
        }

        let category = Some(self.category.trim()).filter(|c| !c.is_empty());
        let entry = FeedEntry::new(self.name.trim(), self.url.trim(), category);
        entry.validate().map_err(|e| e.to_string())?;
        Ok(entry)
    }
}

/// Overlay mode, independent of the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    AddFeed(AddFeedForm),
    Help,
}

/// Side effect requested by a state transition.
///
/// The event loop performs the effect and hands the outcome back through the
/// matching `on_*` method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Re-read the feed list file
    LoadFeeds,
    /// Fetch articles for a feed
    Fetch(FeedEntry),
    /// Open a link in the default browser
    OpenLink(String),
    /// Append a feed to the feed list file
    AddFeed(FeedEntry),
}

/// Application state
pub struct App {
    /// Feed list file
    pub feed_file: PathBuf,
    /// Articles kept per fetch
    pub max_entries: usize,
    /// Show summaries in the detail pane
    pub show_summary: bool,
    pub theme: Theme,
    /// Configured feeds in file order
    pub feeds: Vec<FeedEntry>,
    /// Cursor in the feed list
    pub selected_feed: usize,
    /// Feed whose articles are displayed
    pub current_feed: Option<FeedEntry>,
    /// Title declared by the current feed
    pub feed_title: Option<String>,
    pub articles: Vec<ArticleItem>,
    /// Cursor in the article list
    pub selected_article: usize,
    pub view: View,
    pub mode: Mode,
    /// Status message
    pub status_message: Option<String>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// A refresh is in flight; the view stays where it is when it lands
    refreshing: bool,
}

impl App {
    pub fn new(config: &AppConfig, feed_file: PathBuf, max_entries: usize, theme: Theme) -> Self {
        Self {
            feed_file,
            max_entries,
            show_summary: config.ui.show_summary,
            theme,
            feeds: Vec::new(),
            selected_feed: 0,
            current_feed: None,
            feed_title: None,
            articles: Vec::new(),
            selected_article: 0,
            view: View::FeedList,
            mode: Mode::Normal,
            status_message: None,
            should_quit: false,
            refreshing: false,
        }
    }

    /// Set a status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn selected_feed_entry(&self) -> Option<&FeedEntry> {
        self.feeds.get(self.selected_feed)
    }

    pub fn current_article(&self) -> Option<&ArticleItem> {
        self.articles.get(self.selected_article)
    }

    /// Name shown for the feed whose articles are displayed
    pub fn current_feed_name(&self) -> &str {
        self.current_feed
            .as_ref()
            .map(|f| f.name.as_str())
            .unwrap_or("")
    }

    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, Mode::AddFeed(_))
    }

    /// Apply an action and return the side effect it requires, if any
    pub fn update(&mut self, action: Action) -> Option<Effect> {
        if self.is_input_mode() && action == Action::Cancel {
            self.cancel_mode();
            return None;
        }
        if self.mode == Mode::Help {
            if action != Action::None {
                self.mode = Mode::Normal;
            }
            return None;
        }
        if let Mode::AddFeed(form) = &mut self.mode {
            return Self::update_form(form, action);
        }

        match action {
            Action::Quit => {
                self.should_quit = true;
                None
            }
            Action::MoveDown => {
                self.move_cursor(1);
                None
            }
            Action::MoveUp => {
                self.move_cursor(-1);
                None
            }
            Action::JumpToTop => {
                self.move_cursor(isize::MIN);
                None
            }
            Action::JumpToBottom => {
                self.move_cursor(isize::MAX);
                None
            }
            Action::Select => match self.view {
                View::FeedList => self.fetch_selected(),
                View::ArticleList => self.open_current_article(),
            },
            Action::OpenInBrowser => match self.view {
                View::ArticleList => self.open_current_article(),
                View::FeedList => {
                    self.set_status("Select a feed to browse its articles");
                    None
                }
            },
            Action::Back => {
                self.view = View::FeedList;
                self.clear_status();
                None
            }
            Action::Refresh => match self.view {
                // The feed list is re-read first; the shown feed is re-fetched once it lands
                View::FeedList => {
                    self.refreshing = true;
                    self.set_status("Reloading feed list...");
                    Some(Effect::LoadFeeds)
                }
                View::ArticleList => match self.current_feed.clone() {
                    Some(feed) => {
                        self.refreshing = true;
                        self.set_status(format!("Loading {}...", feed.name));
                        Some(Effect::Fetch(feed))
                    }
                    None => None,
                },
            },
            Action::StartAddFeed => {
                let mut form = AddFeedForm::default();
                // Offer the category under the cursor as a starting point
                if let Some(category) = self.selected_feed_entry().and_then(|f| f.category.clone()) {
                    form.category = category;
                }
                self.mode = Mode::AddFeed(form);
                None
            }
            Action::ShowHelp => {
                self.mode = Mode::Help;
                None
            }
            _ => None,
        }
    }

    fn update_form(form: &mut AddFeedForm, action: Action) -> Option<Effect> {
        match action {
            Action::InputChar(c) => {
                form.active_mut().push(c);
                form.error = None;
                None
            }
            Action::Backspace => {
                form.active_mut().pop();
                None
            }
            Action::NextField => {
                form.field = form.field.next();
                None
            }
            Action::PrevField => {
                form.field = form.field.prev();
                None
            }
            Action::Confirm => match form.to_entry() {
                Ok(entry) => Some(Effect::AddFeed(entry)),
                Err(msg) => {
                    form.error = Some(msg);
                    None
                }
            },
            _ => None,
        }
    }

    /// Leave the current overlay without saving
    pub fn cancel_mode(&mut self) {
        self.mode = Mode::Normal;
    }

    fn move_cursor(&mut self, delta: isize) {
        let (cursor, len) = match self.view {
            View::FeedList => (&mut self.selected_feed, self.feeds.len()),
            View::ArticleList => (&mut self.selected_article, self.articles.len()),
        };

        if len == 0 {
            *cursor = 0;
            return;
        }

        let target = (*cursor as isize).saturating_add(delta);
        *cursor = target.clamp(0, len as isize - 1) as usize;
    }

    fn fetch_selected(&mut self) -> Option<Effect> {
        match self.selected_feed_entry().cloned() {
            Some(feed) => {
                self.refreshing = false;
                self.set_status(format!("Loading {}...", feed.name));
                Some(Effect::Fetch(feed))
            }
            None => {
                self.set_status("No feeds configured. Press 'a' to add one");
                None
            }
        }
    }

    fn open_current_article(&mut self) -> Option<Effect> {
        match self.current_article() {
            Some(article) if article.has_link() => Some(Effect::OpenLink(article.link.clone())),
            Some(_) => {
                self.set_status("This article has no link");
                None
            }
            None => None,
        }
    }

    /// Feed list file was (re)read.
    ///
    /// During a refresh this asks for the displayed feed to be fetched again.
    pub fn on_feeds_loaded(&mut self, result: feedmark_core::Result<Vec<FeedEntry>>) -> Option<Effect> {
        let refreshing = std::mem::take(&mut self.refreshing);

        match result {
            Ok(feeds) => {
                self.selected_feed = self.selected_feed.min(feeds.len().saturating_sub(1));
                if feeds.is_empty() {
                    self.set_status("No feeds configured. Press 'a' to add one");
                } else {
                    self.set_status(format!("{} feeds", feeds.len()));
                }
                self.feeds = feeds;
            }
            Err(Error::FeedListNotFound(path)) => {
                self.feeds.clear();
                self.selected_feed = 0;
                self.set_status(format!(
                    "No feed list at {}. Press 'a' to create one",
                    path.display()
                ));
            }
            Err(e) => {
                self.set_status(format!("Could not read feed list: {}", e));
                return None;
            }
        }

        if !refreshing {
            return None;
        }

        let current = self.current_feed.clone()?;
        if self.feeds.contains(&current) {
            self.refreshing = true;
            self.set_status(format!("Loading {}...", current.name));
            Some(Effect::Fetch(current))
        } else {
            // The displayed feed was removed from the file
            self.current_feed = None;
            self.feed_title = None;
            self.articles.clear();
            self.selected_article = 0;
            None
        }
    }

    /// A fetch requested through [`Effect::Fetch`] finished
    pub fn on_fetched(&mut self, feed: FeedEntry, result: feedmark_core::Result<FetchedFeed>) {
        match result {
            Ok(fetched) => {
                let count = fetched.items.len();
                let same_feed = self.current_feed.as_ref() == Some(&feed);
                self.articles = fetched.items;
                self.feed_title = fetched.title;
                self.selected_article = if same_feed {
                    self.selected_article.min(count.saturating_sub(1))
                } else {
                    0
                };
                self.set_status(format!("{}: {} articles", feed.name, count));
                self.current_feed = Some(feed);
                if !std::mem::take(&mut self.refreshing) {
                    self.view = View::ArticleList;
                }
            }
            Err(e) => {
                self.refreshing = false;
                tracing::warn!("Failed to fetch feed '{}': {}", feed.name, e);
                self.set_status(format!("could not load {}: {}", feed.name, e));
            }
        }
    }

    /// A browser launch requested through [`Effect::OpenLink`] finished
    pub fn on_link_opened(&mut self, url: &str, result: feedmark_core::Result<()>) {
        match result {
            Ok(()) => self.set_status(format!("Opening: {}", url)),
            Err(e) => self.set_status(e.to_string()),
        }
    }

    /// An append requested through [`Effect::AddFeed`] finished
    pub fn on_feed_added(&mut self, entry: &FeedEntry, result: feedmark_core::Result<()>) -> Option<Effect> {
        match result {
            Ok(()) => {
                self.mode = Mode::Normal;
                self.set_status(format!("Added {}", entry.name));
                Some(Effect::LoadFeeds)
            }
            Err(e) => {
                if let Mode::AddFeed(form) = &mut self.mode {
                    form.error = Some(e.to_string());
                } else {
                    self.set_status(format!("Could not add feed: {}", e));
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn app_with_feeds() -> App {
        let mut app = App::new(
            &AppConfig::default(),
            PathBuf::from("feeds.md"),
            5,
            Theme::default(),
        );
        app.on_feeds_loaded(Ok(vec![
            FeedEntry::new("HN", "https://news.ycombinator.com/rss", Some("Tech")),
            FeedEntry::new("BBC", "https://feeds.bbci.co.uk/news/rss.xml", Some("News")),
        ]));
        app
    }

    fn article(title: &str, link: &str) -> ArticleItem {
        ArticleItem {
            title: title.to_string(),
            link: link.to_string(),
            published: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            summary: None,
        }
    }

    fn fetched(items: Vec<ArticleItem>) -> FetchedFeed {
        FetchedFeed {
            title: Some("Feed".to_string()),
            items,
        }
    }

    #[test]
    fn test_starts_in_feed_list() {
        let app = app_with_feeds();
        assert_eq!(app.view, View::FeedList);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.feeds.len(), 2);
    }

    #[test]
    fn test_select_feed_fetches_then_shows_articles() {
        let mut app = app_with_feeds();
        app.update(Action::MoveDown);

        let effect = app.update(Action::Select);
        let feed = app.feeds[1].clone();
        assert_eq!(effect, Some(Effect::Fetch(feed.clone())));
        assert_eq!(app.status_message.as_deref(), Some("Loading BBC..."));
        assert_eq!(app.view, View::FeedList);

        app.on_fetched(feed, Ok(fetched(vec![article("A", "https://a.example")])));
        assert_eq!(app.view, View::ArticleList);
        assert_eq!(app.articles.len(), 1);
        assert_eq!(app.current_feed_name(), "BBC");
    }

    #[test]
    fn test_failed_fetch_stays_in_feed_list() {
        let mut app = app_with_feeds();
        let feed = app.feeds[0].clone();

        app.on_fetched(feed.clone(), Err(Error::fetch(&feed.url, "request timed out")));

        assert_eq!(app.view, View::FeedList);
        assert_eq!(
            app.status_message.as_deref(),
            Some("could not load HN: request timed out")
        );
    }

    #[test]
    fn test_back_returns_to_feed_list() {
        let mut app = app_with_feeds();
        let feed = app.feeds[0].clone();
        app.on_fetched(feed, Ok(fetched(vec![article("A", "https://a.example")])));

        assert_eq!(app.update(Action::Back), None);
        assert_eq!(app.view, View::FeedList);
    }

    #[test]
    fn test_refresh_depends_on_view() {
        let mut app = app_with_feeds();
        assert_eq!(app.update(Action::Refresh), Some(Effect::LoadFeeds));
        // Nothing displayed yet, so there is nothing to re-fetch
        let feeds = app.feeds.clone();
        assert_eq!(app.on_feeds_loaded(Ok(feeds)), None);

        let feed = app.feeds[0].clone();
        app.on_fetched(feed.clone(), Ok(fetched(vec![article("Old", "https://a.example")])));
        assert_eq!(app.update(Action::Refresh), Some(Effect::Fetch(feed.clone())));

        app.on_fetched(
            feed,
            Ok(fetched(vec![
                article("New 1", "https://b.example"),
                article("New 2", "https://c.example"),
            ])),
        );
        let titles: Vec<_> = app.articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["New 1", "New 2"]);
    }

    #[test]
    fn test_refresh_from_feed_list_refetches_current_feed() {
        let mut app = app_with_feeds();
        let feed = app.feeds[1].clone();
        app.selected_feed = 1;
        app.update(Action::Select);
        app.on_fetched(feed.clone(), Ok(fetched(vec![article("Old", "https://a.example")])));
        app.update(Action::Back);
        assert_eq!(app.view, View::FeedList);

        // Reload the list, then fetch the displayed feed again
        assert_eq!(app.update(Action::Refresh), Some(Effect::LoadFeeds));
        let reloaded = app.feeds.clone();
        assert_eq!(app.on_feeds_loaded(Ok(reloaded)), Some(Effect::Fetch(feed.clone())));

        app.on_fetched(feed, Ok(fetched(vec![article("Fresh", "https://b.example")])));
        assert_eq!(app.articles[0].title, "Fresh");
        assert_eq!(app.view, View::FeedList);
    }

    #[test]
    fn test_refresh_drops_feed_removed_from_file() {
        let mut app = app_with_feeds();
        let feed = app.feeds[0].clone();
        app.on_fetched(feed, Ok(fetched(vec![article("Old", "https://a.example")])));
        app.update(Action::Back);

        assert_eq!(app.update(Action::Refresh), Some(Effect::LoadFeeds));
        let remaining = app.feeds[1..].to_vec();
        assert_eq!(app.on_feeds_loaded(Ok(remaining)), None);
        assert!(app.current_feed.is_none());
        assert!(app.articles.is_empty());
    }

    #[test]
    fn test_plain_reload_does_not_fetch() {
        let mut app = app_with_feeds();
        let feed = app.feeds[0].clone();
        app.on_fetched(feed, Ok(fetched(vec![article("Old", "https://a.example")])));

        let feeds = app.feeds.clone();
        assert_eq!(app.on_feeds_loaded(Ok(feeds)), None);
    }

    #[test]
    fn test_select_article_opens_link() {
        let mut app = app_with_feeds();
        let feed = app.feeds[0].clone();
        app.on_fetched(
            feed,
            Ok(fetched(vec![
                article("A", "https://a.example"),
                article("B", ""),
            ])),
        );

        assert_eq!(
            app.update(Action::Select),
            Some(Effect::OpenLink("https://a.example".to_string()))
        );

        app.update(Action::MoveDown);
        assert_eq!(app.update(Action::OpenInBrowser), None);
        assert_eq!(app.status_message.as_deref(), Some("This article has no link"));
    }

    #[test]
    fn test_browser_failure_is_reported_inline() {
        let mut app = app_with_feeds();
        let feed = app.feeds[0].clone();
        app.on_fetched(feed, Ok(fetched(vec![article("A", "https://a.example")])));

        app.on_link_opened(
            "https://a.example",
            Err(Error::BrowserLaunch("no browser available".to_string())),
        );

        assert_eq!(app.view, View::ArticleList);
        assert!(!app.should_quit);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Could not open browser: no browser available")
        );
    }

    #[test]
    fn test_cursor_is_clamped() {
        let mut app = app_with_feeds();
        app.update(Action::MoveUp);
        assert_eq!(app.selected_feed, 0);
        app.update(Action::JumpToBottom);
        assert_eq!(app.selected_feed, 1);
        app.update(Action::MoveDown);
        assert_eq!(app.selected_feed, 1);
        app.update(Action::JumpToTop);
        assert_eq!(app.selected_feed, 0);
    }

    #[test]
    fn test_quit() {
        let mut app = app_with_feeds();
        app.update(Action::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_add_feed_form_flow() {
        let mut app = app_with_feeds();
        app.update(Action::StartAddFeed);
        assert!(app.is_input_mode());
        app.update(Action::Cancel);
        assert_eq!(app.mode, Mode::Normal);
        app.update(Action::StartAddFeed);

        // Quit is just text while typing
        assert_eq!(app.update(Action::Quit), None);
        assert!(!app.should_quit);

        assert_eq!(app.update(Action::Confirm), None);
        match &app.mode {
            Mode::AddFeed(form) => assert_eq!(form.error.as_deref(), Some("Please enter a feed URL")),
            other => panic!("expected add form, got {:?}", other),
        }

        for c in "https://lobste.rs/rss".chars() {
            app.update(Action::InputChar(c));
        }
        app.update(Action::NextField);
        for c in "Lobsters".chars() {
            app.update(Action::InputChar(c));
        }

        let expected = FeedEntry::new("Lobsters", "https://lobste.rs/rss", Some("Tech"));
        let effect = app.update(Action::Confirm);
        assert_eq!(effect, Some(Effect::AddFeed(expected.clone())));

        assert_eq!(app.on_feed_added(&expected, Ok(())), Some(Effect::LoadFeeds));
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn test_add_feed_rejects_invalid_url() {
        let mut app = app_with_feeds();
        app.update(Action::StartAddFeed);
        for c in "not a url".chars() {
            app.update(Action::InputChar(c));
        }
        app.update(Action::PrevField);
        app.update(Action::PrevField);
        for c in "Name".chars() {
            app.update(Action::InputChar(c));
        }

        assert_eq!(app.update(Action::Confirm), None);
        match &app.mode {
            Mode::AddFeed(form) => assert!(form.error.as_deref().unwrap().starts_with("Invalid feed")),
            other => panic!("expected add form, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_feed_list_is_reported() {
        let mut app = app_with_feeds();
        app.on_feeds_loaded(Err(Error::FeedListNotFound(PathBuf::from("gone.md"))));
        assert!(app.feeds.is_empty());
        assert_eq!(app.update(Action::Select), None);
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let mut app = app_with_feeds();
        app.update(Action::ShowHelp);
        assert_eq!(app.mode, Mode::Help);
        app.update(Action::MoveDown);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.selected_feed, 0);
    }
}
