use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use feedmark_core::{feedlist, AppConfig, Error, FeedFetcher};
use feedmark_tui::{
    app::{App, Effect, Mode},
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    load_theme,
    widgets::{ArticleDetailWidget, ArticleListWidget, FeedListWidget, PopupWidget, StatusBarWidget},
};

use super::FeedSource;

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(config: &AppConfig, source: &FeedSource) -> Result<()> {
    let fetcher = FeedFetcher::new(config)?;
    let theme = load_theme(&config.ui.theme);
    let mut app = App::new(config, source.path.clone(), config.general.max_entries, theme);

    // An explicit --file that does not exist is fatal, as for the other actions
    match feedlist::load(&app.feed_file) {
        Err(Error::FeedListNotFound(path)) if source.explicit => {
            return Err(Error::FeedListNotFound(path).into());
        }
        result => {
            app.on_feeds_loaded(result);
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("feedmark"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, &fetcher, config.ui.tick_rate_ms).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(terminal: &mut Tui, app: &mut App, fetcher: &FeedFetcher, tick_rate_ms: u64) -> Result<()> {
    let event_handler = EventHandler::new(tick_rate_ms);

    loop {
        terminal.draw(|frame| draw(frame, app))?;

        // Only key presses change state; fetches never start on their own
        if let Some(AppEvent::Key(key)) = event_handler.next()? {
            let action = handle_key_event(key, app);
            let mut effect = app.update(action);
            while let Some(next) = effect {
                effect = perform(terminal, app, fetcher, next).await?;
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Carry out a side effect and feed its outcome back into the app
async fn perform(terminal: &mut Tui, app: &mut App, fetcher: &FeedFetcher, effect: Effect) -> Result<Option<Effect>> {
    match effect {
        Effect::LoadFeeds => Ok(app.on_feeds_loaded(feedlist::load(&app.feed_file))),
        Effect::Fetch(feed) => {
            // Show "Loading ..." before waiting on the network
            terminal.draw(|frame| draw(frame, app))?;
            let result = fetcher.fetch(&feed.url, app.max_entries).await;
            app.on_fetched(feed, result);
            Ok(None)
        }
        Effect::OpenLink(url) => {
            let result = open::that(&url).map_err(|e| Error::BrowserLaunch(e.to_string()));
            app.on_link_opened(&url, result);
            Ok(None)
        }
        Effect::AddFeed(entry) => {
            let result = feedlist::append(&app.feed_file, &entry);
            Ok(app.on_feed_added(&entry, result))
        }
    }
}

fn draw(frame: &mut Frame, app: &App) {
    // Main layout: content + status bar
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 4), // Feeds
            Constraint::Ratio(3, 8), // Article list
            Constraint::Ratio(3, 8), // Article detail
        ])
        .split(main_layout[0]);

    FeedListWidget::render(frame, columns[0], app);
    ArticleListWidget::render(frame, columns[1], app);
    ArticleDetailWidget::render(frame, columns[2], app);
    StatusBarWidget::render(frame, main_layout[1], app);

    match &app.mode {
        Mode::AddFeed(form) => PopupWidget::render_add_feed(frame, form, &app.theme),
        Mode::Help => PopupWidget::render_help(frame, &app.theme),
        Mode::Normal => {}
    }
}
