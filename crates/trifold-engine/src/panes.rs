//! Pane-rendering engine: content replacement and display recompute.

use tracing::{debug, warn};

use crate::dom::{rematerialize, Document, Flex, SlotDisplay};
use crate::fragment::parse_fragment;
use crate::layout::{LayoutMode, SLOT_COUNT};

/// The three fixed pane slots and their deferred display recompute.
///
/// [`apply`](Self::apply) replaces visible slots' content immediately but
/// only marks the visibility/sizing pass as pending; the host runs
/// [`on_frame`](Self::on_frame) on its next draw tick. Re-applying before
/// the tick coalesces: the recompute runs once, with whatever layout and
/// focus are current when it fires.
#[derive(Debug)]
pub struct PaneSet {
    document: Document,
    dirty: bool,
}

impl PaneSet {
    /// Bind to the host document's slot anchors.
    ///
    /// Missing anchors are tolerated: those slots are skipped forever and
    /// the pane simply never updates.
    pub fn new(document: Document) -> Self {
        for index in 0..SLOT_COUNT {
            if document.slot(index).is_none() {
                warn!(slot = index, "pane anchor missing; slot will never update");
            }
        }
        Self {
            document,
            dirty: false,
        }
    }

    /// The bound host document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Replace the visible slots' content and schedule a display recompute.
    ///
    /// Each slot in `0..pane_count` receives the parse of its entry in
    /// `contents` (empty when absent), with script/style elements rebuilt
    /// live so they activate on insertion. Slots beyond the pane count are
    /// not touched; their stale content persists so shrinking the pane
    /// count does not flicker.
    pub fn apply(&mut self, contents: &[String], layout: LayoutMode) {
        for index in 0..layout.pane_count() {
            let markup = contents.get(index).map_or("", String::as_str);
            let mut nodes = parse_fragment(markup);
            rematerialize(&mut nodes);
            self.document.attach(index, nodes);
        }
        self.dirty = true;
    }

    /// Whether a display recompute is pending.
    #[must_use]
    pub fn recompute_pending(&self) -> bool {
        self.dirty
    }

    /// Run the pending display recompute, if any, against the layout and
    /// focus current at this instant.
    pub fn on_frame(&mut self, layout: LayoutMode, focus: usize) {
        if !self.dirty {
            return;
        }
        self.dirty = false;
        let count = layout.pane_count();
        for index in 0..SLOT_COUNT {
            let display = if layout.is_single() {
                SlotDisplay {
                    visible: index == focus,
                    flex: Flex::Full,
                }
            } else {
                SlotDisplay {
                    visible: index < count,
                    flex: Flex::Even,
                }
            };
            self.document.set_display(index, display);
        }
        debug!(
            variant = layout.variant,
            rotation = layout.rotation,
            focus,
            "display recomputed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Node;

    fn contents(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn displays(panes: &PaneSet) -> Vec<SlotDisplay> {
        (0..SLOT_COUNT)
            .map(|i| panes.document().slot(i).map(|s| s.display()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_apply_replaces_visible_slots_only() {
        let mut panes = PaneSet::new(Document::new());
        let triple = LayoutMode { variant: 2, rotation: 0 };
        panes.apply(&contents(&["<p>A</p>", "<p>B</p>", "<p>C</p>"]), triple);

        let double = LayoutMode { variant: 1, rotation: 0 };
        panes.apply(&contents(&["<p>X</p>", "<p>Y</p>"]), double);

        let slot2 = panes.document().slot(2).unwrap();
        let p = slot2.children()[0].as_element().unwrap();
        assert_eq!(p.text_content(), "C");
    }

    #[test]
    fn test_apply_with_missing_content_clears_slot() {
        let mut panes = PaneSet::new(Document::new());
        let double = LayoutMode { variant: 1, rotation: 0 };
        panes.apply(&contents(&["<p>A</p>"]), double);
        assert!(panes.document().slot(1).unwrap().children().is_empty());
    }

    #[test]
    fn test_apply_activates_scripts() {
        let mut panes = PaneSet::new(Document::new());
        let single = LayoutMode::default();
        panes.apply(&contents(&["<script>x=1</script>"]), single);

        let slot = panes.document().slot(0).unwrap();
        let script = slot.children()[0].as_element().unwrap();
        assert_eq!(script.tag, "script");
        assert!(script.live);
        assert_eq!(script.text_content(), "x=1");
        assert_eq!(panes.document().activations().len(), 1);
    }

    #[test]
    fn test_recompute_is_deferred_until_frame() {
        let mut panes = PaneSet::new(Document::new());
        let double = LayoutMode { variant: 1, rotation: 0 };
        panes.apply(&contents(&["<p>A</p>", "<p>B</p>"]), double);
        assert!(panes.recompute_pending());

        // Scenario D: slots 0 and 1 shown at equal share, slot 2 hidden.
        panes.on_frame(double, 0);
        let display = displays(&panes);
        assert_eq!(display[0], SlotDisplay { visible: true, flex: Flex::Even });
        assert_eq!(display[1], SlotDisplay { visible: true, flex: Flex::Even });
        assert!(!display[2].visible);
        assert!(!panes.recompute_pending());
    }

    #[test]
    fn test_single_pane_shows_only_focused_slot() {
        let mut panes = PaneSet::new(Document::new());
        let single = LayoutMode::default();
        panes.apply(&contents(&["<p>A</p>"]), single);
        panes.on_frame(single, 1);

        let display = displays(&panes);
        assert!(!display[0].visible);
        assert_eq!(display[1], SlotDisplay { visible: true, flex: Flex::Full });
        assert!(!display[2].visible);
    }

    #[test]
    fn test_back_to_back_applies_coalesce() {
        let mut panes = PaneSet::new(Document::new());
        let single = LayoutMode::default();
        let triple = LayoutMode { variant: 2, rotation: 0 };
        panes.apply(&contents(&["<p>A</p>"]), single);
        panes.apply(&contents(&["<p>A</p>", "<p>B</p>", "<p>C</p>"]), triple);

        // One recompute, using the state current when the frame fires.
        panes.on_frame(triple, 0);
        assert!(displays(&panes).iter().all(|d| d.visible));
        panes.on_frame(triple, 0);
        assert!(!panes.recompute_pending());
    }

    #[test]
    fn test_missing_anchor_is_skipped() {
        let mut panes = PaneSet::new(Document::with_anchors([true, false, true]));
        let triple = LayoutMode { variant: 2, rotation: 0 };
        panes.apply(&contents(&["<p>A</p>", "<p>B</p>", "<p>C</p>"]), triple);

        assert!(panes.document().slot(1).is_none());
        let slot0 = panes.document().slot(0).unwrap();
        assert_eq!(slot0.children()[0].as_element().unwrap().text_content(), "A");
    }

    #[test]
    fn test_frame_without_pending_recompute_is_noop() {
        let mut panes = PaneSet::new(Document::new());
        panes.on_frame(LayoutMode::default(), 0);
        assert!(!panes.document().slot(0).unwrap().display().visible);
    }

    #[test]
    fn test_plain_markup_stays_inert() {
        let mut panes = PaneSet::new(Document::new());
        panes.apply(&contents(&["<p>A</p>"]), LayoutMode::default());
        let slot = panes.document().slot(0).unwrap();
        assert!(matches!(slot.children()[0], Node::Element(ref el) if !el.live));
        assert!(panes.document().activations().is_empty());
    }
}
