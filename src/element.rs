//! Host element abstraction.

/// A display node a counter can be rendered into.
///
/// Methods take `&self`: hosts hand out cheap shared handles (a JS object
/// reference in the browser, a weak node reference in the headless page),
/// and all mutation goes through them. Writes to an element that is no
/// longer live must be silently ignored.
pub trait CounterElement {
    /// Read an attribute value, `None` when absent.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Whether the element carries `class`.
    fn has_class(&self, class: &str) -> bool;

    /// Add `class` to the element.
    fn add_class(&self, class: &str);

    /// Replace the element's text content.
    fn set_text(&self, text: &str);

    /// Whether the element still exists in its document.
    fn is_connected(&self) -> bool;
}
