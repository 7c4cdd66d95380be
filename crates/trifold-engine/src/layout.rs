//! Layout modes for the viewport.
//!
//! A layout mode is a `(variant, rotation)` pair: the variant selects how
//! many of the three slots are visible (variant 0 = single pane, 1 = double,
//! 2 = triple), and the rotation picks a sub-arrangement within that variant.

use thiserror::Error;

/// Number of fixed pane slots.
pub const SLOT_COUNT: usize = 3;

/// Rotation cycle length per variant.
const ROTATION_COUNTS: [usize; SLOT_COUNT] = [1, 2, 4];

/// A layout mode: pane-count variant plus sub-arrangement rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutMode {
    /// Pane-count variant (0 = single, 1 = double, 2 = triple).
    pub variant: usize,
    /// Sub-arrangement index within the variant.
    pub rotation: usize,
}

impl LayoutMode {
    /// Number of visible panes in this mode.
    #[must_use]
    pub fn pane_count(self) -> usize {
        self.variant + 1
    }

    /// Length of the rotation cycle for this mode's variant.
    #[must_use]
    pub fn rotation_count(self) -> usize {
        ROTATION_COUNTS[self.variant]
    }

    /// Whether this is the single-pane (tabbed) mode.
    #[must_use]
    pub fn is_single(self) -> bool {
        self.variant == 0
    }
}

/// Errors from layout operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// Requested variant has no defined pane arrangement.
    #[error("invalid layout variant {0}: expected 0, 1, or 2")]
    InvalidVariant(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_is_single_pane() {
        let layout = LayoutMode::default();
        assert_eq!(layout.variant, 0);
        assert_eq!(layout.rotation, 0);
        assert!(layout.is_single());
    }

    #[test]
    fn test_pane_count_per_variant() {
        for variant in 0..SLOT_COUNT {
            let layout = LayoutMode { variant, rotation: 0 };
            assert_eq!(layout.pane_count(), variant + 1);
        }
    }

    #[test]
    fn test_rotation_count_per_variant() {
        let counts: Vec<usize> = (0..SLOT_COUNT)
            .map(|variant| LayoutMode { variant, rotation: 0 }.rotation_count())
            .collect();
        assert_eq!(counts, vec![1, 2, 4]);
    }
}
