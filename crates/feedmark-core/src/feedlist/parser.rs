use std::sync::OnceLock;

use regex::Regex;

use super::models::{validate_url, FeedEntry};

fn heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^ {0,3}#{1,6}(?:[ \t]+(.*?)|([^#\s].*?))(?:[ \t]+#+)?[ \t]*$")
            .expect("valid heading regex")
    })
}

fn link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*[-*+][ \t]+\[([^\]]*)\]\(([^)\s]*)\)\s*$").expect("valid link regex")
    })
}

/// Heading text if `line` is a markdown heading.
///
/// The space after the `#` run is optional, so `##Tech` counts too.
pub(crate) fn parse_heading(line: &str) -> Option<&str> {
    let caps = heading_re().captures(line)?;
    let text = caps.get(1).or_else(|| caps.get(2))?.as_str().trim();
    (!text.is_empty()).then_some(text)
}

/// Parse a feed list document.
///
/// Headings set the category for the links below them. Link lines of the form
/// `- [Name](URL)` become entries; lines that look like links but carry an
/// empty name or an unusable URL are skipped. Everything else is ignored.
pub fn parse(content: &str) -> Vec<FeedEntry> {
    let mut category: Option<&str> = None;
    let mut entries = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        if let Some(heading) = parse_heading(line) {
            category = Some(heading);
            continue;
        }

        let Some(caps) = link_re().captures(line) else {
            if looks_like_link(line) {
                tracing::debug!("Skipping malformed feed line {}: {}", idx + 1, line.trim());
            }
            continue;
        };

        let name = caps[1].trim();
        let url = caps[2].trim();

        if name.is_empty() {
            tracing::debug!("Skipping feed line {} with empty name", idx + 1);
            continue;
        }
        if let Err(e) = validate_url(url) {
            tracing::debug!("Skipping feed line {}: {}", idx + 1, e);
            continue;
        }

        entries.push(FeedEntry::new(name, url, category));
    }

    entries
}

fn looks_like_link(line: &str) -> bool {
    let trimmed = line.trim_start();
    ["- [", "* [", "+ ["].iter().any(|p| trimmed.starts_with(p))
}

/// Category in effect after the last line of `content`
pub(crate) fn trailing_category(content: &str) -> Option<String> {
    content
        .lines()
        .filter_map(parse_heading)
        .last()
        .map(str::to_string)
}
