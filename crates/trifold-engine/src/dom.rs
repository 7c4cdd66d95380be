//! Markup tree model and the host document.
//!
//! Slot content is an owned tree of [`Node`]s. Parsing markup from a string
//! produces *inert* script/style elements, the way string injection does in
//! a live page; [`rematerialize`] rebuilds them as fresh *live* elements
//! that activate exactly once when attached to a slot. The [`Document`]
//! records every activation so hosts can observe them.

use tracing::debug;

use crate::layout::SLOT_COUNT;

/// Tags that activate when a live element is attached.
const EXECUTABLE_TAGS: [&str; 2] = ["script", "style"];

/// Whether a tag names an executable (script/style) element.
#[must_use]
pub fn is_executable(tag: &str) -> bool {
    EXECUTABLE_TAGS.contains(&tag)
}

/// One name/value attribute pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

impl Attr {
    /// Create an attribute.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A markup element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercased tag name.
    pub tag: String,
    pub attrs: Vec<Attr>,
    pub children: Vec<Node>,
    /// Live script/style elements activate on attach; parsed ones are inert.
    pub live: bool,
}

impl Element {
    /// Create an inert element with no attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
            live: false,
        }
    }

    /// Look up an attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Flattened text payload of this element's subtree.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

/// A node in a content subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    /// The element behind this node, if it is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            Self::Text(_) => None,
        }
    }

    /// Serialize this node back to markup.
    #[must_use]
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        write_markup(self, &mut out);
        out
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(t) => out.push_str(t),
            Node::Element(el) => collect_text(&el.children, out),
        }
    }
}

fn write_markup(node: &Node, out: &mut String) {
    match node {
        Node::Text(t) => out.push_str(&escape_text(t)),
        Node::Element(el) => {
            out.push('<');
            out.push_str(&el.tag);
            for attr in &el.attrs {
                out.push(' ');
                out.push_str(&attr.name);
                out.push_str("=\"");
                out.push_str(&escape_attr(&attr.value));
                out.push('"');
            }
            out.push('>');
            if is_executable(&el.tag) {
                // Raw-text bodies serialize unescaped.
                for child in &el.children {
                    if let Node::Text(t) = child {
                        out.push_str(t);
                    }
                }
            } else {
                for child in &el.children {
                    write_markup(child, out);
                }
            }
            out.push_str("</");
            out.push_str(&el.tag);
            out.push('>');
        }
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

/// Rebuild every script/style element in the tree as a fresh live element
/// with identical attributes and identical flattened text payload.
///
/// Parsed script/style elements are inert; only rebuilt ones activate when
/// attached. All other nodes pass through untouched.
pub fn rematerialize(nodes: &mut Vec<Node>) {
    for node in nodes.iter_mut() {
        if let Node::Element(el) = node {
            if is_executable(&el.tag) {
                let text = el.text_content();
                let children = if text.is_empty() {
                    Vec::new()
                } else {
                    vec![Node::Text(text)]
                };
                *node = Node::Element(Element {
                    tag: el.tag.clone(),
                    attrs: el.attrs.clone(),
                    children,
                    live: true,
                });
            } else {
                rematerialize(&mut el.children);
            }
        }
    }
}

/// Flex share of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flex {
    /// `1 1 100%`: fill the whole main area.
    Full,
    /// `1 1 0`: equal share with sibling slots.
    #[default]
    Even,
}

/// Computed display state of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlotDisplay {
    pub visible: bool,
    pub flex: Flex,
}

/// One fixed visual slot: a container holding one content subtree.
#[derive(Debug, Default)]
pub struct Slot {
    children: Vec<Node>,
    display: SlotDisplay,
}

impl Slot {
    /// The slot's current content subtree.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// The slot's computed display state.
    #[must_use]
    pub fn display(&self) -> SlotDisplay {
        self.display
    }
}

/// Record of a live script/style element activating on insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub slot: usize,
    pub tag: String,
    pub text: String,
}

/// The host surface: three fixed slot anchors.
///
/// A slot whose anchor was absent at construction stays absent forever;
/// operations on it are skipped.
#[derive(Debug)]
pub struct Document {
    slots: [Option<Slot>; SLOT_COUNT],
    activations: Vec<Activation>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Host with all three anchors present.
    #[must_use]
    pub fn new() -> Self {
        Self::with_anchors([true; SLOT_COUNT])
    }

    /// Host with only the flagged anchors present (malformed host pages
    /// lose panes, not the whole viewport).
    #[must_use]
    pub fn with_anchors(present: [bool; SLOT_COUNT]) -> Self {
        let slots = present.map(|p| p.then(Slot::default));
        Self {
            slots,
            activations: Vec::new(),
        }
    }

    /// The slot at `index`, if its anchor exists.
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Replace the content of the slot at `index`, activating live
    /// script/style elements in the incoming subtree.
    ///
    /// A missing anchor makes this a no-op.
    pub fn attach(&mut self, index: usize, children: Vec<Node>) {
        let Some(slot) = self.slots.get_mut(index).and_then(Option::as_mut) else {
            return;
        };
        slot.children = children;
        let mut activated = Vec::new();
        record_live(&slot.children, index, &mut activated);
        for activation in &activated {
            debug!(slot = activation.slot, tag = %activation.tag, "element activated");
        }
        self.activations.extend(activated);
    }

    /// Set the computed display state of the slot at `index`.
    pub(crate) fn set_display(&mut self, index: usize, display: SlotDisplay) {
        if let Some(slot) = self.slots.get_mut(index).and_then(Option::as_mut) {
            slot.display = display;
        }
    }

    /// Every activation since construction, in insertion order.
    #[must_use]
    pub fn activations(&self) -> &[Activation] {
        &self.activations
    }
}

fn record_live(nodes: &[Node], slot: usize, out: &mut Vec<Activation>) {
    for node in nodes {
        if let Node::Element(el) = node {
            if el.live && is_executable(&el.tag) {
                out.push(Activation {
                    slot,
                    tag: el.tag.clone(),
                    text: el.text_content(),
                });
            }
            record_live(&el.children, slot, out);
        }
    }
}
