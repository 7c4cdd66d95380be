//! Pane widget: one bordered content space.
//!
//! Supports focused/unfocused states with different border styles.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::render::wrap_lines;
use crate::theme::{BorderSet, Theme};

/// One content pane with a border and title.
pub struct Pane<'a> {
    title: String,
    focused: bool,
    lines: &'a [String],
    theme: &'a Theme,
    borders: &'a BorderSet,
}

impl<'a> Pane<'a> {
    /// Create a pane for the given content lines.
    pub fn new(lines: &'a [String], theme: &'a Theme, borders: &'a BorderSet) -> Self {
        Self {
            title: String::new(),
            focused: false,
            lines,
            theme,
            borders,
        }
    }

    /// Set the pane title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set whether the pane is focused.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for Pane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_set = if self.focused {
            self.borders.focused()
        } else {
            self.borders.normal()
        };
        let border_style = if self.focused {
            Style::default().fg(self.theme.border_focused)
        } else {
            Style::default().fg(self.theme.border)
        };
        let title_style = if self.focused {
            Style::default().fg(self.theme.primary)
        } else {
            Style::default().fg(self.theme.subtext)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_set(border_set)
            .border_style(border_style);
        if !self.title.is_empty() {
            block = block.title(self.title.clone()).title_style(title_style);
        }

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let wrapped = wrap_lines(self.lines, inner.width);
        let text = wrapped.join("\n");
        let paragraph = Paragraph::new(text).style(Style::default().fg(self.theme.text));
        paragraph.render(inner, buf);
    }
}
