//! Viewport state machine: layout mode, fullscreen memory, and focus.

use crate::layout::{LayoutError, LayoutMode, SLOT_COUNT};
use crate::panes::PaneSet;

/// The viewport state: current layout, saved fullscreen-return layout, and
/// focused pane index.
///
/// Owns the [`PaneSet`] it renders through. Invariants:
/// - [`set_focus`](Self::set_focus) and [`cycle_layout`](Self::cycle_layout)
///   keep `focus` a valid index for the current pane count.
///   [`toggle_fullscreen`](Self::toggle_fullscreen) deliberately leaves
///   `focus` alone so the forced single-pane view zooms into the pane that
///   was focused.
/// - `saved` is `Some` only while in fullscreen-forced single-pane mode
///   entered from a multi-pane mode, and is consumed exactly once when
///   fullscreen is toggled off.
#[derive(Debug)]
pub struct ViewState {
    layout: LayoutMode,
    saved: Option<LayoutMode>,
    focus: usize,
    panes: PaneSet,
}

impl ViewState {
    /// Create a viewport over the given panes, starting in single-pane
    /// mode with slot 0 focused.
    pub fn new(panes: PaneSet) -> Self {
        Self {
            layout: LayoutMode::default(),
            saved: None,
            focus: 0,
            panes,
        }
    }

    /// The current layout mode.
    #[must_use]
    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    /// The layout that fullscreen will restore, if fullscreen is active.
    #[must_use]
    pub fn saved_layout(&self) -> Option<LayoutMode> {
        self.saved
    }

    /// The focused pane index.
    #[must_use]
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// The pane set this viewport renders through.
    #[must_use]
    pub fn panes(&self) -> &PaneSet {
        &self.panes
    }

    /// Toggle fullscreen: force single-pane mode, remembering the current
    /// layout; toggle again to restore it.
    ///
    /// Already single-pane with nothing to restore, this does nothing.
    pub fn toggle_fullscreen(&mut self) {
        if self.layout.is_single() {
            if let Some(saved) = self.saved.take() {
                self.layout = saved;
            }
        } else {
            self.saved = Some(self.layout);
            self.layout = LayoutMode::default();
        }
    }

    /// Select a layout variant, or advance its rotation if already active.
    ///
    /// Any explicit layout choice invalidates the fullscreen memory, and
    /// focus is clamped so it stays valid for the new pane count. A variant
    /// outside the defined set fails without touching any state.
    pub fn cycle_layout(&mut self, variant: usize) -> Result<(), LayoutError> {
        if variant >= SLOT_COUNT {
            return Err(LayoutError::InvalidVariant(variant));
        }
        self.saved = None;
        self.focus = self.focus.min(variant);
        self.layout = if self.layout.variant == variant {
            LayoutMode {
                variant,
                rotation: (self.layout.rotation + 1) % self.layout.rotation_count(),
            }
        } else {
            LayoutMode {
                variant,
                rotation: 0,
            }
        };
        Ok(())
    }

    /// Move focus to the given slot, clamped to the visible pane count.
    pub fn set_focus(&mut self, index: usize) {
        self.focus = index.min(self.layout.pane_count() - 1);
    }

    /// Replace pane contents and schedule the display recompute.
    ///
    /// Pure pass-through to [`PaneSet::apply`]; no viewport state changes.
    pub fn render(&mut self, contents: &[String]) {
        let layout = self.layout;
        self.panes.apply(contents, layout);
    }

    /// Run the deferred display recompute against the current layout and
    /// focus. Hosts call this once per draw tick.
    pub fn on_frame(&mut self) {
        let (layout, focus) = (self.layout, self.focus);
        self.panes.on_frame(layout, focus);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn view() -> ViewState {
        ViewState::new(PaneSet::new(Document::new()))
    }

    fn assert_focus_valid(view: &ViewState) {
        assert!(view.focus() < view.layout().pane_count());
    }

    #[test]
    fn test_initial_state() {
        let view = view();
        assert_eq!(view.layout(), LayoutMode::default());
        assert_eq!(view.saved_layout(), None);
        assert_eq!(view.focus(), 0);
    }

    #[test]
    fn test_cycle_into_new_variant_resets_rotation() {
        // Scenario A: single pane -> double pane, then rotate in place.
        let mut view = view();
        view.cycle_layout(1).unwrap();
        assert_eq!(view.layout(), LayoutMode { variant: 1, rotation: 0 });
        assert_eq!(view.focus(), 0);

        view.cycle_layout(1).unwrap();
        assert_eq!(view.layout(), LayoutMode { variant: 1, rotation: 1 });
    }

    #[test]
    fn test_cycle_clamps_focus_to_new_pane_count() {
        // Scenario B: triple pane focused on slot 2, shrink to double.
        let mut view = view();
        view.cycle_layout(2).unwrap();
        view.set_focus(2);

        view.cycle_layout(1).unwrap();
        assert_eq!(view.focus(), 1);
        assert_eq!(view.layout(), LayoutMode { variant: 1, rotation: 0 });
        assert_focus_valid(&view);
    }

    #[test]
    fn test_rotation_cycle_lengths() {
        let mut view = view();
        for (variant, cycle) in [(0, 1), (1, 2), (2, 4)] {
            view.cycle_layout(variant).unwrap();
            let start = view.layout().rotation;
            for _ in 0..cycle {
                view.cycle_layout(variant).unwrap();
            }
            assert_eq!(view.layout().rotation, start, "variant {variant}");
        }
    }

    #[test]
    fn test_fullscreen_round_trip() {
        // Scenario C: fullscreen from double pane and back.
        let mut view = view();
        view.cycle_layout(1).unwrap();

        view.toggle_fullscreen();
        assert_eq!(view.layout(), LayoutMode::default());
        assert_eq!(view.saved_layout(), Some(LayoutMode { variant: 1, rotation: 0 }));

        view.toggle_fullscreen();
        assert_eq!(view.layout(), LayoutMode { variant: 1, rotation: 0 });
        assert_eq!(view.saved_layout(), None);
    }

    #[test]
    fn test_fullscreen_noop_when_nothing_saved() {
        let mut view = view();
        view.toggle_fullscreen();
        assert_eq!(view.layout(), LayoutMode::default());
        assert_eq!(view.saved_layout(), None);
    }

    #[test]
    fn test_fullscreen_zooms_into_focused_pane() {
        let mut view = view();
        view.cycle_layout(2).unwrap();
        view.set_focus(2);

        view.toggle_fullscreen();
        assert!(view.layout().is_single());
        assert_eq!(view.focus(), 2);

        view.render(&[]);
        view.on_frame();
        let doc = view.panes().document();
        assert!(doc.slot(2).unwrap().display().visible);
        assert!(!doc.slot(0).unwrap().display().visible);
    }

    #[test]
    fn test_fullscreen_preserves_rotation() {
        let mut view = view();
        view.cycle_layout(2).unwrap();
        view.cycle_layout(2).unwrap();
        let before = view.layout();

        view.toggle_fullscreen();
        view.toggle_fullscreen();
        assert_eq!(view.layout(), before);
    }

    #[test]
    fn test_cycle_layout_invalidates_fullscreen_memory() {
        let mut view = view();
        view.cycle_layout(1).unwrap();
        view.toggle_fullscreen();
        assert!(view.saved_layout().is_some());

        view.cycle_layout(2).unwrap();
        assert_eq!(view.saved_layout(), None);
        // Fullscreen now saves the triple layout instead of restoring.
        view.toggle_fullscreen();
        assert_eq!(view.saved_layout(), Some(LayoutMode { variant: 2, rotation: 0 }));
    }

    #[test]
    fn test_invalid_variant_fails_without_mutation() {
        let mut view = view();
        view.cycle_layout(1).unwrap();
        view.toggle_fullscreen();
        let (layout, saved, focus) = (view.layout(), view.saved_layout(), view.focus());

        let err = view.cycle_layout(3).unwrap_err();
        assert_eq!(err, LayoutError::InvalidVariant(3));
        assert_eq!(view.layout(), layout);
        assert_eq!(view.saved_layout(), saved);
        assert_eq!(view.focus(), focus);
    }

    #[test]
    fn test_set_focus_clamps() {
        let mut view = view();
        view.cycle_layout(1).unwrap();
        view.set_focus(9);
        assert_eq!(view.focus(), 1);
        view.set_focus(0);
        assert_eq!(view.focus(), 0);
        assert_focus_valid(&view);
    }

    #[test]
    fn test_invariants_hold_across_an_operation_sequence() {
        // Saved layout only ever exists while single-pane, and the clamping
        // mutators keep focus inside the pane count.
        fn check(view: &ViewState) {
            assert_focus_valid(view);
            if view.saved_layout().is_some() {
                assert!(view.layout().is_single());
            }
        }

        let mut view = view();
        view.toggle_fullscreen();
        check(&view);
        view.cycle_layout(2).unwrap();
        check(&view);
        view.set_focus(2);
        check(&view);
        view.cycle_layout(0).unwrap();
        check(&view);
        view.set_focus(1);
        check(&view);
        view.cycle_layout(1).unwrap();
        check(&view);
    }

    #[test]
    fn test_render_does_not_change_state() {
        let mut view = view();
        view.cycle_layout(1).unwrap();
        view.set_focus(1);
        let (layout, focus) = (view.layout(), view.focus());

        view.render(&["<p>A</p>".to_string(), "<p>B</p>".to_string()]);
        assert_eq!(view.layout(), layout);
        assert_eq!(view.focus(), focus);
        assert!(view.panes().recompute_pending());
    }

    #[test]
    fn test_render_and_frame_flow() {
        let mut view = view();
        view.cycle_layout(1).unwrap();
        view.render(&["<p>A</p>".to_string(), "<p>B</p>".to_string()]);
        view.on_frame();

        let doc = view.panes().document();
        assert!(doc.slot(0).unwrap().display().visible);
        assert!(doc.slot(1).unwrap().display().visible);
        assert!(!doc.slot(2).unwrap().display().visible);
    }
}
