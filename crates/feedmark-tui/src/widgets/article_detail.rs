use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

pub struct ArticleDetailWidget;

impl ArticleDetailWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let block = Block::default()
            .title(" Article ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.grey0))
            .style(Style::default().bg(theme.bg0));

        let content = match app.current_article() {
            Some(article) => {
                let mut lines: Vec<Line> = Vec::new();

                // Title
                lines.push(Line::from(Span::styled(
                    article.title.clone(),
                    Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(""));

                let feed_name = app
                    .feed_title
                    .clone()
                    .unwrap_or_else(|| app.current_feed_name().to_string());
                lines.push(Self::meta_line("Feed", feed_name, app));

                let published = article
                    .published
                    .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "unknown date".to_string());
                lines.push(Self::meta_line("Published", published, app));

                if article.has_link() {
                    lines.push(Line::from(vec![
                        Span::styled("Link: ", Style::default().fg(theme.grey1)),
                        Span::styled(
                            article.link.clone(),
                            Style::default()
                                .fg(theme.blue)
                                .add_modifier(Modifier::UNDERLINED),
                        ),
                    ]));
                }

                if app.show_summary {
                    if let Some(summary) = &article.summary {
                        lines.push(Line::from(""));
                        for line in summary.lines() {
                            lines.push(Line::from(Span::styled(
                                line.to_string(),
                                Style::default().fg(theme.fg0),
                            )));
                        }
                    }
                }

                Text::from(lines)
            }
            None => Text::from(Line::from(Span::styled(
                "Select a feed, then an article to view it",
                Style::default().fg(theme.grey1),
            ))),
        };

        let paragraph = Paragraph::new(content)
            .block(block)
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, area);
    }

    fn meta_line<'a>(label: &'a str, value: String, app: &App) -> Line<'a> {
        Line::from(vec![
            Span::styled(format!("{}: ", label), Style::default().fg(app.theme.grey1)),
            Span::styled(value, Style::default().fg(app.theme.grey2)),
        ])
    }
}
