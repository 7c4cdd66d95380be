//! Footer keybinding hints widget.
//!
//! Format: `[1-3] layout │ [f] fullscreen │ [Tab] focus │ [r] refresh │ [?] help │ [q] quit`

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::Theme;

/// A single keybinding hint.
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// The key or key combination (e.g., "Tab").
    pub key: String,
    /// The action description (e.g., "focus").
    pub action: String,
}

impl KeyHint {
    /// Create a new key hint.
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Footer hints widget.
pub struct FooterHints<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
}

impl<'a> FooterHints<'a> {
    /// Create a new footer hints widget.
    pub fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }

    /// The default viewport hints.
    pub fn default_hints() -> Vec<KeyHint> {
        vec![
            KeyHint::new("1-3", "layout"),
            KeyHint::new("f", "fullscreen"),
            KeyHint::new("Tab", "focus"),
            KeyHint::new("r", "refresh"),
            KeyHint::new("?", "help"),
            KeyHint::new("q", "quit"),
        ]
    }
}

impl Widget for FooterHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();
        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" \u{2502} ", Style::default().fg(self.theme.muted)));
            }
            spans.push(Span::styled("[", Style::default().fg(self.theme.muted)));
            spans.push(Span::styled(&hint.key, Style::default().fg(self.theme.primary)));
            spans.push(Span::styled("] ", Style::default().fg(self.theme.muted)));
            spans.push(Span::styled(&hint.action, Style::default().fg(self.theme.subtext)));
        }

        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(self.theme.surface))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_hint_creation() {
        let hint = KeyHint::new("Tab", "focus");
        assert_eq!(hint.key, "Tab");
        assert_eq!(hint.action, "focus");
    }

    #[test]
    fn test_default_hints_cover_the_input_surface() {
        let hints = FooterHints::default_hints();
        assert!(hints.iter().any(|h| h.action == "layout"));
        assert!(hints.iter().any(|h| h.action == "fullscreen"));
        assert!(hints.iter().any(|h| h.action == "focus"));
        assert!(hints.iter().any(|h| h.action == "quit"));
    }
}
