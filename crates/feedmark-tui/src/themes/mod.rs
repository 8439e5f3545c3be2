//! Theme registry

mod nord;

use ratatui::style::Color;

use crate::theme::Theme;

/// Load a theme by name, falling back to gruvbox-dark for unknown names
pub fn load_theme(name: &str) -> Theme {
    match name.to_lowercase().as_str() {
        "gruvbox-dark" | "gruvbox" => Theme::default(),
        "nord" => nord::default(),
        "mono" => mono(),
        other => {
            tracing::warn!("Unknown theme '{}', using gruvbox-dark", other);
            Theme::default()
        }
    }
}

/// Terminal default colors only
fn mono() -> Theme {
    Theme {
        bg0: Color::Reset,
        bg1: Color::Reset,
        bg2: Color::DarkGray,
        fg0: Color::Reset,
        fg1: Color::White,
        grey0: Color::DarkGray,
        grey1: Color::Gray,
        grey2: Color::Gray,
        yellow: Color::Reset,
        green: Color::Reset,
        aqua: Color::Reset,
        blue: Color::Reset,
        selection: Color::DarkGray,
        category: Color::White,
        error: Color::Reset,
        success: Color::Reset,
        info: Color::Reset,
        accent: Color::White,
    }
}
