//! Keyboard input helpers
//!
//! Wraps crossterm key events with the predicates the app's key handling
//! is written in terms of.

use crossterm::event::{KeyCode, KeyModifiers};

/// Key event representation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Shorthand for a key without modifiers
    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Ctrl+C, which quits from any mode
    pub fn is_interrupt(&self) -> bool {
        self.code == KeyCode::Char('c') && self.modifiers.contains(KeyModifiers::CONTROL)
    }

    pub fn is_escape(&self) -> bool {
        self.code == KeyCode::Esc
    }

    pub fn is_enter(&self) -> bool {
        self.code == KeyCode::Enter
    }

    /// Tab forward
    pub fn is_tab(&self) -> bool {
        self.code == KeyCode::Tab
    }

    /// Shift+Tab
    pub fn is_back_tab(&self) -> bool {
        self.code == KeyCode::BackTab
    }

    pub fn is_up(&self) -> bool {
        self.code == KeyCode::Up
    }

    pub fn is_down(&self) -> bool {
        self.code == KeyCode::Down
    }

    pub fn is_backspace(&self) -> bool {
        self.code == KeyCode::Backspace
    }

    /// Printable character typed without Ctrl/Alt
    pub fn char(&self) -> Option<char> {
        if self.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }
        if let KeyCode::Char(c) = self.code { Some(c) } else { None }
    }
}

impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(key: crossterm::event::KeyEvent) -> Self {
        Self::new(key.code, key.modifiers)
    }
}
