//! Top status bar widget.
//!
//! Format: `trifold │ Triple ⟲2 │ Space 1            frames: 3/7`

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use trifold_engine::LayoutMode;
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

/// Top status bar: layout mode, focused space, frame counts.
pub struct StatusBar<'a> {
    layout: LayoutMode,
    focus: usize,
    known_frames: usize,
    total_frames: Option<u64>,
    notification: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    /// Create a status bar for the current viewport state.
    pub fn new(layout: LayoutMode, focus: usize, theme: &'a Theme) -> Self {
        Self {
            layout,
            focus,
            known_frames: 0,
            total_frames: None,
            notification: None,
            theme,
        }
    }

    /// Set the number of frames known locally and advertised remotely.
    #[must_use]
    pub fn frames(mut self, known: usize, total: Option<u64>) -> Self {
        self.known_frames = known;
        self.total_frames = total;
        self
    }

    /// Set a transient notification message.
    #[must_use]
    pub fn notification(mut self, notification: Option<&'a str>) -> Self {
        self.notification = notification;
        self
    }

    fn layout_label(&self) -> String {
        let name = match self.layout.variant {
            0 => "Single",
            1 => "Double",
            _ => "Triple",
        };
        if self.layout.rotation_count() > 1 {
            format!("{name} \u{27f2}{}", self.layout.rotation)
        } else {
            name.to_string()
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut left = vec![
            Span::styled("trifold", Style::default().fg(self.theme.primary)),
            Span::styled(" \u{2502} ", Style::default().fg(self.theme.muted)),
            Span::styled(self.layout_label(), Style::default().fg(self.theme.text)),
            Span::styled(" \u{2502} ", Style::default().fg(self.theme.muted)),
            Span::styled(
                format!("Space {}", self.focus),
                Style::default().fg(self.theme.subtext),
            ),
        ];

        let right_text = if let Some(notification) = self.notification {
            Span::styled(notification.to_string(), Style::default().fg(self.theme.warning))
        } else {
            let total = self
                .total_frames
                .map_or_else(|| "?".to_string(), |t| t.to_string());
            Span::styled(
                format!("frames: {}/{total}", self.known_frames),
                Style::default().fg(self.theme.subtext),
            )
        };

        let left_width: usize = left.iter().map(|s| s.content.width()).sum();
        let right_width = right_text.content.width();
        let padding = (area.width as usize).saturating_sub(left_width + right_width);
        if padding > 0 {
            left.push(Span::raw(" ".repeat(padding)));
        }
        left.push(right_text);

        Paragraph::new(Line::from(left))
            .style(Style::default().bg(self.theme.surface))
            .render(area, buf);
    }
}
