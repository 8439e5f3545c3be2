use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Mode, View};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let mode_str = match &app.mode {
            Mode::Normal => match app.view {
                View::FeedList => "FEEDS",
                View::ArticleList => "ARTICLES",
            },
            Mode::AddFeed(_) => "ADD FEED",
            Mode::Help => "HELP",
        };

        let mode_text = format!(" {} ", mode_str);
        let status_text = match &app.status_message {
            Some(msg) => format!(" {}", msg),
            None => format!(" Feeds: {} | Articles: {}", app.feeds.len(), app.articles.len()),
        };

        let help_hint = " q:quit r:refresh f:feeds a:add ?:help ";
        let padding_len = (area.width as usize)
            .saturating_sub(mode_text.len() + status_text.chars().count() + help_hint.len());

        let line = Line::from(vec![
            Span::styled(
                mode_text,
                Style::default()
                    .fg(theme.bg0)
                    .bg(theme.success)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                status_text,
                Style::default().fg(theme.fg0).bg(theme.bg2),
            ),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(
                help_hint,
                Style::default().fg(theme.grey2).bg(theme.bg2),
            ),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
