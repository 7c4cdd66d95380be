//! Shared widgets for the trifold TUI.

mod footer_hints;
mod pane;
mod status_bar;

pub use footer_hints::{FooterHints, KeyHint};
pub use pane::Pane;
pub use status_bar::StatusBar;
