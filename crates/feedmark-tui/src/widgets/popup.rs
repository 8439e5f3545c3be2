use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::app::{AddFeedForm, FormField};
use crate::theme::Theme;

const HELP_LINES: &[(&str, &str)] = &[
    ("j / Down", "Move down"),
    ("k / Up", "Move up"),
    ("g / G", "Jump to top / bottom"),
    ("Enter", "Open feed / article"),
    ("o", "Open article in browser"),
    ("f", "Back to feed list"),
    ("r", "Refresh"),
    ("a", "Add a feed"),
    ("?", "Toggle this help"),
    ("q", "Quit"),
];

pub struct PopupWidget;

impl PopupWidget {
    /// Render the add-feed form over the current view
    pub fn render_add_feed(frame: &mut Frame, form: &AddFeedForm, theme: &Theme) {
        let area = frame.area();
        let popup_width = 64u16.min(area.width.saturating_sub(4));
        let popup_height = 11u16.min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Add Feed ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));

        let inner_area = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // URL
                Constraint::Length(1), // Name
                Constraint::Length(1), // Category
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Error
                Constraint::Min(1),    // Hint
            ])
            .split(inner_area);

        let value_width = (inner_area.width as usize).saturating_sub(12);
        let fields = [
            (FormField::Url, "URL", &form.url),
            (FormField::Name, "Name", &form.name),
            (FormField::Category, "Category", &form.category),
        ];

        for (i, (field, label, value)) in fields.into_iter().enumerate() {
            let active = form.field == field;
            let label_style = if active {
                Style::default().fg(theme.yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.grey1)
            };
            let value_style = if active {
                Style::default().fg(theme.fg1).bg(theme.bg2)
            } else {
                Style::default().fg(theme.fg0)
            };

            let mut shown = tail_to_width(value, value_width.saturating_sub(1));
            if active {
                shown.push('_');
            }

            let line = Line::from(vec![
                Span::styled(format!("{:>9}: ", label), label_style),
                Span::styled(shown, value_style),
            ]);
            frame.render_widget(Paragraph::new(line), chunks[i]);
        }

        if let Some(error) = &form.error {
            let error_line = Paragraph::new(Line::from(Span::styled(
                error.as_str(),
                Style::default().fg(theme.error),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(error_line, chunks[4]);
        }

        let hint = Paragraph::new(Line::from(Span::styled(
            "Tab: next field  Enter: save  Esc: cancel",
            Style::default().fg(theme.grey1),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(hint, chunks[5]);
    }

    /// Render the key binding overview
    pub fn render_help(frame: &mut Frame, theme: &Theme) {
        let area = frame.area();
        let popup_width = 44u16.min(area.width.saturating_sub(4));
        let popup_height = (HELP_LINES.len() as u16 + 2).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.info))
            .style(Style::default().bg(theme.bg1));

        let lines: Vec<Line> = HELP_LINES
            .iter()
            .map(|(key, description)| {
                Line::from(vec![
                    Span::styled(
                        format!(" {:<10}", key),
                        Style::default().fg(theme.aqua).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*description, Style::default().fg(theme.fg0)),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Keep the end of `s` that fits in `max_width` terminal columns, so the
/// cursor stays visible while typing long URLs.
fn tail_to_width(s: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut start = s.len();
    for (idx, c) in s.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width {
            break;
        }
        width += w;
        start = idx;
    }
    s[start..].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_to_width_keeps_short_strings() {
        assert_eq!(tail_to_width("abc", 10), "abc");
        assert_eq!(tail_to_width("", 10), "");
    }

    #[test]
    fn test_tail_to_width_keeps_end() {
        assert_eq!(tail_to_width("https://example.com/feed", 4), "feed");
    }

    #[test]
    fn test_tail_to_width_counts_wide_chars() {
        // Each CJK char takes two columns
        assert_eq!(tail_to_width("新闻速递", 5), "速递");
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        let rect = centered_rect(40, 10, area);
        assert_eq!(rect, Rect::new(30, 20, 40, 10));
    }
}
