use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// User intents recognized by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleAll,
    WidenWindow,
    NarrowWindow,
    SwitchView,
    ToggleHelp,
    Quit,
    // Table navigation
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,
    GotoTop,
    GotoBottom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub keys: &'static str,
    pub description: &'static str,
}

const fn entry(keys: &'static str, description: &'static str) -> HelpEntry {
    HelpEntry { keys, description }
}

pub const GLOBAL_HELP: &[HelpEntry] = &[
    entry("a", "toggle all"),
    entry("←/h", "before"),
    entry("→/l", "after"),
    entry("tab", "section"),
    entry("?", "toggle help"),
    entry("q", "quit"),
];

pub const TABLE_HELP: &[HelpEntry] = &[
    entry("↑/k", "up"),
    entry("↓/j", "down"),
    entry("b/pgup", "page up"),
    entry("f/pgdn", "page down"),
    entry("u/ctrl+u", "½ page up"),
    entry("d/ctrl+d", "½ page down"),
    entry("g/home", "go to start"),
    entry("G/end", "go to end"),
];

pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('u') => Some(Action::HalfPageUp),
            KeyCode::Char('d') => Some(Action::HalfPageDown),
            _ => None,
        };
    }

    let action = match key.code {
        KeyCode::Char('a') => Action::ToggleAll,
        KeyCode::Char('h') | KeyCode::Left => Action::WidenWindow,
        KeyCode::Char('l') | KeyCode::Right => Action::NarrowWindow,
        KeyCode::Tab | KeyCode::BackTab => Action::SwitchView,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('k') | KeyCode::Up => Action::LineUp,
        KeyCode::Char('j') | KeyCode::Down => Action::LineDown,
        KeyCode::Char('b') | KeyCode::PageUp => Action::PageUp,
        KeyCode::Char('f') | KeyCode::Char(' ') | KeyCode::PageDown => Action::PageDown,
        KeyCode::Char('u') => Action::HalfPageUp,
        KeyCode::Char('d') => Action::HalfPageDown,
        KeyCode::Char('g') | KeyCode::Home => Action::GotoTop,
        KeyCode::Char('G') | KeyCode::End => Action::GotoBottom,
        _ => return None,
    };
    Some(action)
}
