use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode, View};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    JumpToTop,
    JumpToBottom,
    Select,
    Back,       // 'f': return to the feed list
    Refresh,
    OpenInBrowser,
    StartAddFeed,
    ShowHelp,
    // Add-feed form
    NextField,
    PrevField,
    Confirm,
    Cancel,
    InputChar(char),
    Backspace,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    if app.is_input_mode() {
        return handle_input_mode(key);
    }

    if app.mode == Mode::Help {
        // Any key exits help
        return Action::Cancel;
    }

    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Navigation within the list
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => Action::MoveDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => Action::MoveUp,
        (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => Action::JumpToTop,
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => Action::JumpToBottom,

        // Views
        (KeyCode::Enter, _) => Action::Select,
        (KeyCode::Right, _) | (KeyCode::Char('l'), KeyModifiers::NONE)
            if app.view == View::FeedList =>
        {
            Action::Select
        }
        (KeyCode::Char('f'), KeyModifiers::NONE) => Action::Back,
        (KeyCode::Left, _) | (KeyCode::Char('h'), KeyModifiers::NONE) | (KeyCode::Esc, _)
            if app.view == View::ArticleList =>
        {
            Action::Back
        }

        // Actions
        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::Refresh,
        (KeyCode::Char('o'), KeyModifiers::NONE) | (KeyCode::Char('b'), KeyModifiers::NONE) => {
            Action::OpenInBrowser
        }
        (KeyCode::Char('a'), KeyModifiers::NONE) => Action::StartAddFeed,
        (KeyCode::Char('?'), _) => Action::ShowHelp,

        _ => Action::None,
    }
}

/// Handle key events in input mode (add-feed form)
fn handle_input_mode(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Enter, _) => Action::Confirm,
        (KeyCode::Esc, _) => Action::Cancel,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Cancel,
        (KeyCode::Tab, _) | (KeyCode::Down, _) => Action::NextField,
        (KeyCode::BackTab, _) | (KeyCode::Up, _) => Action::PrevField,
        (KeyCode::Backspace, _) => Action::Backspace,
        (KeyCode::Char(c), _) => Action::InputChar(c),
        _ => Action::None,
    }
}
