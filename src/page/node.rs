//! Element nodes of the headless document.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

use super::layout::Rect;
use crate::element::CounterElement;

/// Stable identifier of an element within one [`Document`](super::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Element data owned by the document.
#[derive(Debug)]
pub struct ElementNode {
    id: ElementId,
    tag: String,
    classes: RefCell<Vec<String>>,
    attributes: RefCell<FxHashMap<String, String>>,
    text: RefCell<String>,
    /// Layout box in document coordinates.
    bounds: Cell<Rect>,
    attached: Cell<bool>,
}

impl ElementNode {
    pub(crate) fn new(id: ElementId, tag: &str, bounds: Rect) -> Self {
        Self {
            id,
            tag: tag.to_ascii_lowercase(),
            classes: RefCell::default(),
            attributes: RefCell::default(),
            text: RefCell::default(),
            bounds: Cell::new(bounds),
            attached: Cell::new(true),
        }
    }

    /// Identifier within the owning document.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Lower-cased tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Current text content.
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    /// Layout box in document coordinates.
    pub fn bounds(&self) -> Rect {
        self.bounds.get()
    }

    /// Move or resize the element.
    pub fn set_bounds(&self, bounds: Rect) {
        self.bounds.set(bounds);
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attribute(&self, name: &str, value: &str) {
        let _ = self
            .attributes
            .borrow_mut()
            .insert(name.to_owned(), value.to_owned());
    }

    /// Whether the attribute is present (with any value).
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.borrow().contains_key(name)
    }

    /// Read an attribute value.
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    /// Whether the element carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().iter().any(|c| c == class)
    }

    /// Add `class` unless already present.
    pub fn add_class(&self, class: &str) {
        if !self.has_class(class) {
            self.classes.borrow_mut().push(class.to_owned());
        }
    }

    pub(crate) fn detach(&self) {
        self.attached.set(false);
    }
}

/// Weak, cloneable reference to an element.
///
/// Animation runs hold these instead of owning the node: once the document
/// drops an element every operation becomes a no-op and
/// [`CounterElement::is_connected`] reports `false`.
#[derive(Debug, Clone)]
pub struct ElementHandle {
    id: ElementId,
    node: Weak<ElementNode>,
}

impl ElementHandle {
    pub(crate) fn new(node: &Rc<ElementNode>) -> Self {
        Self {
            id: node.id,
            node: Rc::downgrade(node),
        }
    }

    /// Identifier of the referenced element.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The node, if it is still alive.
    pub fn upgrade(&self) -> Option<Rc<ElementNode>> {
        self.node.upgrade()
    }

    /// Current text content, `None` once the element is gone.
    pub fn text(&self) -> Option<String> {
        self.upgrade().map(|node| node.text())
    }
}

impl CounterElement for ElementHandle {
    fn attribute(&self, name: &str) -> Option<String> {
        self.upgrade().and_then(|node| node.attribute(name))
    }

    fn has_class(&self, class: &str) -> bool {
        self.upgrade().is_some_and(|node| node.has_class(class))
    }

    fn add_class(&self, class: &str) {
        if let Some(node) = self.upgrade() {
            node.add_class(class);
        }
    }

    fn set_text(&self, text: &str) {
        if let Some(node) = self.upgrade() {
            *node.text.borrow_mut() = text.to_owned();
        }
    }

    fn is_connected(&self) -> bool {
        self.upgrade().is_some_and(|node| node.attached.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> Rc<ElementNode> {
        Rc::new(ElementNode::new(ElementId(1), "SPAN", Rect::default()))
    }

    #[test]
    fn handle_reads_and_writes_through() {
        let node = node();
        node.set_attribute("data-target", "150");
        let handle = ElementHandle::new(&node);

        assert_eq!(handle.attribute("data-target").as_deref(), Some("150"));
        assert_eq!(handle.attribute("data-other"), None);
        handle.set_text("42");
        handle.add_class("animated");
        handle.add_class("animated");

        assert_eq!(node.text(), "42");
        assert!(handle.has_class("animated"));
        assert_eq!(node.classes.borrow().len(), 1);
        assert_eq!(node.tag(), "span");
    }

    #[test]
    fn dropped_node_turns_handle_inert() {
        let node = node();
        let handle = ElementHandle::new(&node);
        assert!(handle.is_connected());
        drop(node);

        assert!(!handle.is_connected());
        handle.set_text("ignored");
        handle.add_class("animated");
        assert!(!handle.has_class("animated"));
        assert_eq!(handle.text(), None);
    }

    #[test]
    fn detached_node_reports_disconnected() {
        let node = node();
        let handle = ElementHandle::new(&node);
        node.detach();
        assert!(!handle.is_connected());
        assert_eq!(handle.id().to_string(), "#1");
    }
}
