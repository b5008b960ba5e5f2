use std::rc::Rc;

use super::layout::Rect;
use super::node::{ElementHandle, ElementId, ElementNode};
use crate::selector::Selector;

/// Flat, ordered collection of elements owned by the headless page.
///
/// The document holds the only strong references; everything else
/// (observers, animation runs) works through [`ElementHandle`]s.
#[derive(Debug, Default)]
pub struct Document {
    nodes: Vec<Rc<ElementNode>>,
    next_id: u32,
}

impl Document {
    /// Empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element and return a handle to it.
    pub fn create_element(
        &mut self,
        tag: &str,
        classes: &[&str],
        attributes: &[(&str, &str)],
        bounds: Rect,
    ) -> ElementHandle {
        let id = ElementId(self.next_id);
        self.next_id += 1;

        let node = Rc::new(ElementNode::new(id, tag, bounds));
        for class in classes {
            node.add_class(class);
        }
        for (name, value) in attributes {
            node.set_attribute(name, value);
        }
        let handle = ElementHandle::new(&node);
        self.nodes.push(node);
        handle
    }

    /// Remove an element. Outstanding handles become inert.
    ///
    /// Returns `false` if no element had that id.
    pub fn remove(&mut self, id: ElementId) -> bool {
        let Some(index) = self.nodes.iter().position(|node| node.id() == id) else {
            return false;
        };
        let node = self.nodes.remove(index);
        node.detach();
        true
    }

    /// Handle to the element with `id`.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<ElementHandle> {
        self.node(id).map(ElementHandle::new)
    }

    /// The node with `id`.
    #[must_use]
    pub fn node(&self, id: ElementId) -> Option<&Rc<ElementNode>> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    /// Text content of the element with `id`.
    #[must_use]
    pub fn text_of(&self, id: ElementId) -> Option<String> {
        self.node(id).map(|node| node.text())
    }

    /// All elements in document order.
    pub fn nodes(&self) -> impl Iterator<Item = &Rc<ElementNode>> + '_ {
        self.nodes.iter()
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Elements matching `selector`, in document order.
    #[must_use]
    pub fn query_selector_all(&self, selector: &Selector) -> Vec<ElementHandle> {
        self.nodes
            .iter()
            .filter(|node| {
                selector.matches(
                    node.tag(),
                    |class| node.has_class(class),
                    |name| node.has_attribute(name),
                )
            })
            .map(ElementHandle::new)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::CounterElement;

    fn stat_page() -> (Document, Vec<ElementHandle>) {
        let mut doc = Document::new();
        let card = Rect::new(0.0, 0.0, 200.0, 40.0);
        let handles = vec![
            doc.create_element(
                "span",
                &["b-stat-card__value"],
                &[("data-target", "150")],
                card,
            ),
            doc.create_element("span", &["b-stat-card__value"], &[], card),
            doc.create_element("div", &["other"], &[("data-target", "9")], card),
            doc.create_element(
                "span",
                &["b-stat-card__value", "wide"],
                &[("data-target", "abc")],
                card,
            ),
        ];
        (doc, handles)
    }

    #[test]
    fn query_returns_matches_in_document_order() {
        let (doc, handles) = stat_page();
        let selector = Selector::parse(".b-stat-card__value[data-target]").unwrap();
        let found: Vec<ElementId> = doc
            .query_selector_all(&selector)
            .iter()
            .map(ElementHandle::id)
            .collect();
        assert_eq!(found, vec![handles[0].id(), handles[3].id()]);
    }

    #[test]
    fn removal_invalidates_handles() {
        let (mut doc, handles) = stat_page();
        assert!(doc.remove(handles[0].id()));
        assert!(!doc.remove(handles[0].id()));
        assert!(!handles[0].is_connected());
        assert!(handles[1].is_connected());
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.text_of(handles[0].id()), None);
    }

    #[test]
    fn ids_are_unique_and_stable() {
        let (mut doc, handles) = stat_page();
        let extra = doc.create_element("span", &[], &[], Rect::default());
        assert!(handles.iter().all(|h| h.id() != extra.id()));
        assert_eq!(doc.element(extra.id()).map(|h| h.id()), Some(extra.id()));
        assert!(!doc.is_empty());
    }
}
