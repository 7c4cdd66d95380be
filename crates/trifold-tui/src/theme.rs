//! Colors and borders for the trifold TUI.

use ratatui::style::Color;
use ratatui::symbols::border;

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds
    pub base: Color,
    pub surface: Color,

    // Foregrounds
    pub text: Color,
    pub subtext: Color,
    pub muted: Color,

    // Accents
    pub primary: Color,

    // Semantic
    pub warning: Color,
    pub error: Color,

    // Borders
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    /// Catppuccin Mocha theme (default dark theme).
    pub fn mocha() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),       // #1e1e2e
            surface: Color::Rgb(49, 50, 68),    // #313244
            text: Color::Rgb(205, 214, 244),    // #cdd6f4
            subtext: Color::Rgb(166, 173, 200), // #a6adc8
            muted: Color::Rgb(108, 112, 134),   // #6c7086
            primary: Color::Rgb(180, 190, 254), // #b4befe (lavender)
            warning: Color::Rgb(249, 226, 175), // #f9e2af (yellow)
            error: Color::Rgb(243, 139, 168),   // #f38ba8 (red)
            border: Color::Rgb(69, 71, 90),     // #45475a
            border_focused: Color::Rgb(180, 190, 254),
        }
    }
}

/// Border sets with an ASCII fallback.
#[derive(Debug, Clone, Copy)]
pub struct BorderSet {
    ascii: bool,
}

impl BorderSet {
    /// Create a border set, forcing ASCII when requested.
    #[must_use]
    pub fn new(ascii: bool) -> Self {
        Self { ascii }
    }

    /// Border set from config, also honoring `NO_COLOR`.
    #[must_use]
    pub fn from_env(ascii_config: bool) -> Self {
        Self::new(ascii_config || std::env::var("NO_COLOR").is_ok())
    }

    /// Normal (unfocused) borders.
    #[must_use]
    pub fn normal(&self) -> border::Set {
        if self.ascii {
            border::PLAIN
        } else {
            border::ROUNDED
        }
    }

    /// Focused borders.
    #[must_use]
    pub fn focused(&self) -> border::Set {
        if self.ascii {
            border::DOUBLE
        } else {
            border::THICK
        }
    }
}
