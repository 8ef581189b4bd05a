//! Terminal User Interface for toolhub.
//!
//! One screen with three parts:
//! - **Search**: query box filtering the catalog
//! - **Main panel**: catalog list, a widget, or the external-link fallback
//! - **Footer**: key hints and the backend status page
//!
//! The TUI runs as part of the main process using tokio for async requests.

mod app;
mod events;
mod input;
mod runner;
mod views;

pub use app::{App, Mode};
pub use events::{Event, EventHandler};
pub use runner::{BackendEvent, TuiRunner};

use crossterm::{
    ExecutableCommand,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use eyre::Result;
use ratatui::prelude::*;
use std::io::{Stdout, stdout};

/// Type alias for our terminal backend.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode.
///
/// Enables raw mode and switches to the alternate screen.
pub fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
///
/// Disables raw mode and leaves the alternate screen.
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

pub mod colors {
    use ratatui::style::Color;

    pub const LOADING: Color = Color::Rgb(255, 215, 0); // Gold
    pub const READY: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const FAILED: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const LINK: Color = Color::Rgb(100, 149, 237); // Cornflower
    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const CATEGORY: Color = Color::Magenta;
    pub const DIM: Color = Color::DarkGray;
}

/// Parse a `#rrggbb` (or `rrggbb`) color into a terminal color.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
