use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::app::{App, View};

/// Summary characters shown under each title
const PREVIEW_CHARS: usize = 60;

pub struct ArticleListWidget;

impl ArticleListWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let is_focused = app.view == View::ArticleList;

        let border_style = if is_focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.grey0)
        };

        let title = match app.current_feed.as_ref() {
            Some(feed) => format!(" {} ", feed.name),
            None => " Articles ".to_string(),
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(theme.bg0));

        let items: Vec<ListItem> = app
            .articles
            .iter()
            .enumerate()
            .map(|(i, article)| {
                let title_style = if i == app.selected_article && is_focused {
                    Style::default()
                        .fg(theme.fg0)
                        .bg(theme.selection)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.fg1)
                };

                let date = article
                    .published
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "----------".to_string());

                let mut lines = vec![Line::from(vec![
                    Span::styled(date, Style::default().fg(theme.green)),
                    Span::raw(" "),
                    Span::styled(article.title.clone(), title_style),
                ])];

                if app.show_summary && article.summary.is_some() {
                    lines.push(Line::from(Span::styled(
                        format!("           {}", article.summary_preview(PREVIEW_CHARS).replace('\n', " ")),
                        Style::default().fg(theme.grey1),
                    )));
                }

                ListItem::new(lines)
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(theme.selection));

        let mut state = ListState::default();
        if !app.articles.is_empty() {
            state.select(Some(app.selected_article));
        }

        frame.render_stateful_widget(list, area, &mut state);
    }
}
