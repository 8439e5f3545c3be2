use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::app::{App, View};

pub struct FeedListWidget;

impl FeedListWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let is_focused = app.view == View::FeedList;

        let border_style = if is_focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.grey0)
        };

        let block = Block::default()
            .title(" Feeds ")
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(theme.bg0));

        let mut items: Vec<ListItem> = Vec::with_capacity(app.feeds.len() * 2);
        let mut selected_row = None;
        let mut last_category: Option<&str> = None;

        for (i, feed) in app.feeds.iter().enumerate() {
            // Category header whenever the heading changes in file order
            let category = feed.category.as_deref();
            if let Some(heading) = category.filter(|_| category != last_category) {
                items.push(ListItem::new(Line::from(Span::styled(
                    heading.to_string(),
                    Style::default()
                        .fg(theme.category)
                        .add_modifier(Modifier::BOLD),
                ))));
            }
            last_category = category;

            if i == app.selected_feed {
                selected_row = Some(items.len());
            }

            let is_current = app.current_feed.as_ref() == Some(feed);
            let marker = if is_current { "● " } else { "  " };

            let style = if i == app.selected_feed && is_focused {
                Style::default()
                    .fg(theme.fg0)
                    .bg(theme.selection)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg1)
            };

            items.push(ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(theme.yellow)),
                Span::styled(feed.name.clone(), style),
            ])));
        }

        if items.is_empty() {
            items.push(ListItem::new(Line::from(Span::styled(
                "No feeds. Press 'a' to add one",
                Style::default().fg(theme.grey1),
            ))));
        }

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(theme.selection)
                .add_modifier(Modifier::BOLD),
        );

        let mut state = ListState::default();
        state.select(selected_row);

        frame.render_stateful_widget(list, area, &mut state);
    }
}
