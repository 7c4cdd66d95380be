//! trifold-engine: viewport state machine and pane-rendering engine
//!
//! This crate provides the core of trifold, including:
//! - Layout modes and the viewport state machine
//! - The markup tree, fragment parsing, and live-element semantics
//! - Pane content replacement with deferred display recompute
//! - Configuration management

pub mod config;
pub mod dom;
pub mod fragment;
pub mod layout;
pub mod panes;
pub mod view;

// Re-export commonly used types
pub use config::{Config, ConfigError, API_URL_ENV};
pub use dom::{rematerialize, Activation, Attr, Document, Element, Flex, Node, Slot, SlotDisplay};
pub use fragment::parse_fragment;
pub use layout::{LayoutError, LayoutMode, SLOT_COUNT};
pub use panes::PaneSet;
pub use view::ViewState;

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
