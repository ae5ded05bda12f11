//! Event handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Grid navigation
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    JumpToTop,
    JumpToBottom,
    PageUp,
    PageDown,

    // Pages
    /// Open the selected card.
    Activate,
    NavigateBack,
    /// Expand a dashboard preview to the full collection.
    ShowAll,

    // Items
    ToggleWatched,

    // UI toggles
    ToggleHelp,
    ToggleTheme,

    // Other actions
    Refresh,
    Cancel,

    // View switching
    NextTab,
    PrevTab,

    // Application
    Quit,
    ForceQuit,

    // No action
    None,
}

impl KeyAction {
    /// Convert a key event to an action.
    pub fn from_key_event(event: KeyEvent) -> Self {
        match (event.code, event.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::ForceQuit,

            // Esc closes overlays, otherwise goes back
            (KeyCode::Esc, _) => KeyAction::Cancel,

            // Navigation - vim style
            (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::MoveDown,
            (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::MoveUp,
            (KeyCode::Char('h'), KeyModifiers::NONE) => KeyAction::MoveLeft,
            (KeyCode::Char('l'), KeyModifiers::NONE) => KeyAction::MoveRight,

            // Navigation - arrow keys
            (KeyCode::Down, _) => KeyAction::MoveDown,
            (KeyCode::Up, _) => KeyAction::MoveUp,
            (KeyCode::Left, _) => KeyAction::MoveLeft,
            (KeyCode::Right, _) => KeyAction::MoveRight,

            // Jump
            (KeyCode::Char('g'), KeyModifiers::NONE) => KeyAction::JumpToTop,
            (KeyCode::Char('G'), KeyModifiers::SHIFT) => KeyAction::JumpToBottom,
            (KeyCode::Home, _) => KeyAction::JumpToTop,
            (KeyCode::End, _) => KeyAction::JumpToBottom,

            // Page navigation
            (KeyCode::PageUp, _) => KeyAction::PageUp,
            (KeyCode::PageDown, _) => KeyAction::PageDown,
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => KeyAction::PageUp,
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => KeyAction::PageDown,

            // Pages
            (KeyCode::Enter, _) => KeyAction::Activate,
            (KeyCode::Backspace, _) => KeyAction::NavigateBack,
            (KeyCode::Char('-'), KeyModifiers::NONE) => KeyAction::NavigateBack,
            (KeyCode::Char('a'), KeyModifiers::NONE) => KeyAction::ShowAll,

            // Items
            (KeyCode::Char('w'), KeyModifiers::NONE) => KeyAction::ToggleWatched,

            // UI toggles
            (KeyCode::Char('?'), KeyModifiers::NONE) => KeyAction::ToggleHelp,
            (KeyCode::Char('?'), KeyModifiers::SHIFT) => KeyAction::ToggleHelp,
            (KeyCode::Char('t'), KeyModifiers::NONE) => KeyAction::ToggleTheme,
            (KeyCode::Char('r'), KeyModifiers::NONE) => KeyAction::Refresh,

            // View switching
            (KeyCode::Tab, KeyModifiers::NONE) => KeyAction::NextTab,
            (KeyCode::BackTab, _) => KeyAction::PrevTab,

            _ => KeyAction::None,
        }
    }
}

/// A section of key bindings for the help display.
pub struct HelpSection {
    pub title: &'static str,
    pub bindings: Vec<KeyBinding>,
}

/// Key binding for display in help.
pub struct KeyBinding {
    pub keys: &'static str,
    pub description: &'static str,
}

/// Get all key bindings organized by section for help display.
pub fn get_help_sections() -> Vec<HelpSection> {
    vec![
        HelpSection {
            title: "Grid",
            bindings: vec![
                KeyBinding { keys: "h/j/k/l", description: "Move selection" },
                KeyBinding { keys: "g/G", description: "First/last card" },
                KeyBinding { keys: "PgUp/PgDn", description: "Page up/down" },
                KeyBinding { keys: "Enter", description: "Open details" },
                KeyBinding { keys: "a", description: "Show all (dashboard)" },
            ],
        },
        HelpSection {
            title: "Pages",
            bindings: vec![
                KeyBinding { keys: "Bksp/Esc", description: "Go back" },
                KeyBinding { keys: "Tab", description: "Next tab" },
                KeyBinding { keys: "S-Tab", description: "Previous tab" },
                KeyBinding { keys: "w", description: "Toggle watched" },
                KeyBinding { keys: "r", description: "Reload collection" },
            ],
        },
        HelpSection {
            title: "General",
            bindings: vec![
                KeyBinding { keys: "t", description: "Toggle theme" },
                KeyBinding { keys: "?", description: "Toggle help" },
                KeyBinding { keys: "q", description: "Quit" },
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_page_keys() {
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Enter)), KeyAction::Activate);
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Backspace)), KeyAction::NavigateBack);
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Char('a'))), KeyAction::ShowAll);
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Esc)), KeyAction::Cancel);
    }

    #[test]
    fn test_force_quit() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(KeyAction::from_key_event(event), KeyAction::ForceQuit);
        assert_eq!(KeyAction::from_key_event(key(KeyCode::F(5))), KeyAction::None);
    }
}
