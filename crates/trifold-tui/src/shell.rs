//! Shell layout: mapping slot display state onto the terminal.
//!
//! Visibility and sizing come from the engine's display recompute; the
//! layout rotation only selects the concrete arrangement of the visible
//! panes (rows vs columns vs main-plus-stack).

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Clear, Paragraph},
    Frame,
};
use trifold_engine::{LayoutMode, SLOT_COUNT};

use crate::app::App;
use crate::render::slot_lines;
use crate::theme::{BorderSet, Theme};
use crate::widgets::{FooterHints, Pane, StatusBar};

/// Minimum terminal width.
pub const MIN_WIDTH: u16 = 30;
/// Minimum terminal height.
pub const MIN_HEIGHT: u16 = 8;

/// Render the whole shell: status bar, panes, footer hints.
pub fn render_shell(frame: &mut Frame<'_>, app: &App, theme: &Theme, borders: &BorderSet) {
    let area = frame.area();
    let known = app.contents().iter().filter(|c| !c.is_empty()).count();
    let status = StatusBar::new(app.view.layout(), app.view.focus(), theme)
        .frames(known, app.total_frames())
        .notification(app.notification.as_deref());

    // Too small: just the status bar
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        frame.render_widget(status, Rect { height: 1.min(area.height), ..area });
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(0),    // Pane area
            Constraint::Length(1), // Footer hints
        ])
        .split(area);

    frame.render_widget(status, chunks[0]);
    render_panes(frame, chunks[1], app, theme, borders);
    let hints = FooterHints::default_hints();
    frame.render_widget(FooterHints::new(&hints, theme), chunks[2]);

    if app.show_help {
        render_help_overlay(frame, area, theme);
    }
}

fn render_panes(frame: &mut Frame<'_>, area: Rect, app: &App, theme: &Theme, borders: &BorderSet) {
    let doc = app.view.panes().document();
    let visible: Vec<usize> = (0..SLOT_COUNT)
        .filter(|&i| doc.slot(i).is_some_and(|s| s.display().visible))
        .collect();

    if visible.is_empty() {
        let placeholder =
            Paragraph::new("waiting for frames...").style(Style::default().fg(theme.subtext));
        frame.render_widget(placeholder, area);
        return;
    }

    let areas = arrange(area, app.view.layout(), visible.len());
    for (slot, rect) in visible.into_iter().zip(areas) {
        let Some(s) = doc.slot(slot) else { continue };
        let lines = slot_lines(s.children());
        let pane = Pane::new(&lines, theme, borders)
            .title(format!(" {} ", app.pane_title(slot)))
            .focused(slot == app.view.focus());
        frame.render_widget(pane, rect);
    }
}

/// Split the pane area into one rect per visible pane.
///
/// The engine guarantees equal flex shares in multi-pane modes; rotation
/// picks which axis (or main-plus-stack grouping) realizes them.
fn arrange(area: Rect, layout: LayoutMode, visible: usize) -> Vec<Rect> {
    let halves = [Constraint::Percentage(50), Constraint::Percentage(50)];
    match visible {
        0 => Vec::new(),
        1 => vec![area],
        2 => Layout::default()
            .direction(split_direction(layout))
            .constraints(halves)
            .split(area)
            .to_vec(),
        _ => match layout.rotation {
            0 => Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, 3); 3])
                .split(area)
                .to_vec(),
            1 => Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Ratio(1, 3); 3])
                .split(area)
                .to_vec(),
            2 => {
                // Top row of two, third pane across the bottom.
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints(halves)
                    .split(area);
                let top = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints(halves)
                    .split(rows[0]);
                vec![top[0], top[1], rows[1]]
            }
            _ => {
                // Main pane on the left, the other two stacked right.
                let cols = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints(halves)
                    .split(area);
                let right = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints(halves)
                    .split(cols[1]);
                vec![cols[0], right[0], right[1]]
            }
        },
    }
}

fn split_direction(layout: LayoutMode) -> Direction {
    if layout.rotation % 2 == 0 {
        Direction::Horizontal
    } else {
        Direction::Vertical
    }
}

fn render_help_overlay(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let width = 44.min(area.width);
    let height = 12.min(area.height);
    let popup = centered_fixed(width, height, area);

    let lines = vec![
        Line::from("trifold keys"),
        Line::from(""),
        Line::from("  1 / 2 / 3    select layout, rotate in place"),
        Line::from("  f / Enter    toggle fullscreen"),
        Line::from("  Tab / S-Tab  move focus"),
        Line::from("  F1-F3        focus a specific space"),
        Line::from("  r            refetch visible frames"),
        Line::from("  ?            toggle this help"),
        Line::from("  q / Esc      quit"),
    ];

    frame.render_widget(Clear, popup);
    let help = Paragraph::new(lines).style(Style::default().fg(theme.text).bg(theme.surface));
    frame.render_widget(help, popup);
}

/// Create a centered rect with fixed dimensions.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode(variant: usize, rotation: usize) -> LayoutMode {
        LayoutMode { variant, rotation }
    }

    fn total_area(rects: &[Rect]) -> u32 {
        rects.iter().map(|r| r.area()).sum()
    }

    #[test]
    fn test_arrange_single_takes_whole_area() {
        let area = Rect::new(0, 0, 90, 30);
        assert_eq!(arrange(area, mode(0, 0), 1), vec![area]);
    }

    #[test]
    fn test_arrange_two_splits_by_rotation_axis() {
        let area = Rect::new(0, 0, 90, 30);
        let row = arrange(area, mode(1, 0), 2);
        assert_eq!(row.len(), 2);
        assert_eq!(row[0].height, area.height);

        let column = arrange(area, mode(1, 1), 2);
        assert_eq!(column[0].width, area.width);
    }

    #[test]
    fn test_arrange_three_covers_area_in_every_rotation() {
        let area = Rect::new(0, 0, 90, 30);
        for rotation in 0..4 {
            let rects = arrange(area, mode(2, rotation), 3);
            assert_eq!(rects.len(), 3, "rotation {rotation}");
            assert_eq!(total_area(&rects), area.area(), "rotation {rotation}");
        }
    }

    #[test]
    fn test_centered_fixed_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 5);
        let rect = centered_fixed(44, 12, area);
        assert!(rect.width <= area.width);
        assert!(rect.height <= area.height);
    }
}
