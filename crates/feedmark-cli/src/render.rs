use std::fmt::Display;
use std::io::Write;

use crossterm::style::{Color, Stylize};
use feedmark_core::feedlist::{group_by_category, UNCATEGORIZED};
use feedmark_core::{ArticleItem, FeedEntry};

/// Colors used for CLI output.
///
/// `None` fields print plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Palette {
    pub header: Option<Color>,
    pub category: Option<Color>,
    pub title: Option<Color>,
    pub link: Option<Color>,
    pub date: Option<Color>,
    pub error: Option<Color>,
}

impl Palette {
    /// Palette for a theme name; unknown names get the default palette
    pub fn for_theme(name: &str) -> Self {
        match name {
            "mono" => Self::plain(),
            "nord" => Self {
                header: Some(Color::Cyan),
                category: Some(Color::Blue),
                title: Some(Color::White),
                link: Some(Color::DarkCyan),
                date: Some(Color::DarkGrey),
                error: Some(Color::Red),
            },
            _ => Self {
                header: Some(Color::Yellow),
                category: Some(Color::Green),
                title: Some(Color::White),
                link: Some(Color::Blue),
                date: Some(Color::DarkGrey),
                error: Some(Color::Red),
            },
        }
    }

    /// No colors at all
    pub fn plain() -> Self {
        Self::default()
    }
}

fn paint(text: impl Display, color: Option<Color>) -> String {
    match color {
        Some(color) => text.to_string().with(color).to_string(),
        None => text.to_string(),
    }
}

/// Print configured feeds grouped by category
pub fn render_feed_list(out: &mut impl Write, entries: &[FeedEntry], palette: &Palette) -> std::io::Result<()> {
    if entries.is_empty() {
        writeln!(out, "No feeds configured yet.")?;
        writeln!(out, "\nTo add a feed, run:")?;
        writeln!(out, "  feedmark --add <url> --name <name> [--category <category>]")?;
        return Ok(());
    }

    writeln!(out, "{}", paint(format!("Feeds ({}):", entries.len()), palette.header))?;

    for (category, members) in group_by_category(entries) {
        let label = match category {
            Some(name) => name.to_string(),
            None => format!("({})", UNCATEGORIZED.to_lowercase()),
        };
        writeln!(out, "\n{}", paint(label, palette.category))?;

        for entry in members {
            writeln!(
                out,
                "  {} {}",
                paint(&entry.name, palette.title),
                paint(format!("<{}>", entry.url), palette.link)
            )?;
        }
    }

    Ok(())
}

/// Print the articles fetched for one feed
pub fn render_articles(
    out: &mut impl Write,
    feed_name: &str,
    items: &[ArticleItem],
    palette: &Palette,
) -> std::io::Result<()> {
    writeln!(out, "{}", paint(format!("=== {} ===", feed_name), palette.header))?;

    if items.is_empty() {
        writeln!(out, "  (no articles)")?;
    }

    for item in items {
        let date = item
            .published
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown date".to_string());

        writeln!(out, "- {}", paint(&item.title, palette.title))?;
        if item.has_link() {
            writeln!(out, "  {}", paint(&item.link, palette.link))?;
        }
        writeln!(out, "  {}", paint(date, palette.date))?;
    }
    writeln!(out)?;

    Ok(())
}

/// Print the inline error line for a feed that could not be loaded
pub fn render_fetch_error(
    out: &mut impl Write,
    feed_name: &str,
    error: &feedmark_core::Error,
    palette: &Palette,
) -> std::io::Result<()> {
    writeln!(
        out,
        "{}\n",
        paint(format!("could not load {}: {}", feed_name, error), palette.error)
    )
}
