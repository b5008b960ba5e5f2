//! Headless page: an in-process host for counters.
//!
//! Provides what the browser provides to the counter script: a document of
//! elements with layout boxes, a scrollable viewport, an intersection
//! observer and a per-frame callback scheduler. Used by the test-suite and
//! by the `countup` simulator.
//!
//! Each [`Page::frame`] first runs due animation callbacks, then recomputes
//! intersections and notifies the watcher about every observed element whose
//! intersection changed, in that order.

mod document;
mod frame_loop;
mod layout;
mod node;
mod script;

use std::rc::Rc;

pub use document::Document;
pub use frame_loop::{FrameClock, FrameLoop};
pub use layout::{Rect, Viewport};
pub use node::{ElementHandle, ElementId, ElementNode};
pub use script::{
    Action, ElementSpec, EventSpec, FrameReport, Playback, Script, TextChange,
    Timing,
};

use crate::error::CountUpError;
use crate::options::Options;
use crate::selector::Selector;
use crate::watcher::{Intersection, VisibilityWatcher};

/// An element under observation and the last intersection delivered for it.
struct Observation {
    element: ElementHandle,
    last: Option<Intersection>,
}

/// Document, viewport, frame loop and visibility watcher wired together.
pub struct Page {
    document: Document,
    viewport: Viewport,
    frames: Rc<FrameLoop>,
    watcher: VisibilityWatcher<FrameLoop>,
    selector: Selector,
    observed: Vec<Observation>,
    started: bool,
}

impl Page {
    /// Page over `document`, configured by `options`.
    pub fn new(
        document: Document,
        viewport: Viewport,
        options: &Options,
    ) -> Result<Self, CountUpError> {
        options.validate()?;
        let selector = Selector::parse(&options.watcher.selector)?;
        let frames = Rc::new(FrameLoop::new());
        let watcher = VisibilityWatcher::new(options, Rc::clone(&frames));
        Ok(Self {
            document,
            viewport,
            frames,
            watcher,
            selector,
            observed: Vec::new(),
            started: false,
        })
    }

    /// Register every element matching the selector.
    ///
    /// Selection happens once: elements added afterwards are not picked up,
    /// and later calls register nothing. Returns the number registered.
    pub fn start(&mut self) -> usize {
        if self.started {
            log::debug!("page already started, not re-scanning");
            return 0;
        }
        self.started = true;

        let matches = self.document.query_selector_all(&self.selector);
        let count = matches.len();
        for element in matches {
            self.register(element);
        }
        log::debug!("registered {count} counter element(s)");
        count
    }

    /// Begin observing `element`. Already observed elements are ignored.
    pub fn register(&mut self, element: ElementHandle) {
        if self.is_observed(element.id()) {
            return;
        }
        self.observed.push(Observation {
            element,
            last: None,
        });
    }

    /// Stop observing the element with `id`.
    pub fn unregister(&mut self, id: ElementId) -> bool {
        let before = self.observed.len();
        self.observed.retain(|obs| obs.element.id() != id);
        self.observed.len() != before
    }

    /// Whether the element with `id` is being observed.
    #[must_use]
    pub fn is_observed(&self, id: ElementId) -> bool {
        self.observed.iter().any(|obs| obs.element.id() == id)
    }

    /// Number of observed elements.
    #[must_use]
    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// The document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access to the document.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Scroll the viewport so its top sits at `y`.
    pub fn scroll_to(&mut self, y: f64) {
        self.viewport.scroll_y = y;
    }

    /// Remove an element; any run on it ends at its next frame.
    pub fn remove_element(&mut self, id: ElementId) -> bool {
        let _ = self.unregister(id);
        self.document.remove(id)
    }

    /// Text content of the element with `id`.
    #[must_use]
    pub fn text_of(&self, id: ElementId) -> Option<String> {
        self.document.text_of(id)
    }

    /// Whether any animation frame is still requested.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.frames.is_idle()
    }

    /// Advance one frame stamped `now_ms`.
    pub fn frame(&mut self, now_ms: f64) {
        let _ = self.frames.run_frame(now_ms);
        self.deliver_intersections();
    }

    /// Notify the watcher about every changed intersection, dropping
    /// elements it releases and elements that no longer exist.
    pub fn deliver_intersections(&mut self) {
        let root = self.viewport.bounds();
        let watcher = &self.watcher;

        self.observed.retain_mut(|obs| {
            let Some(node) = obs.element.upgrade() else {
                return false;
            };
            let current = node.bounds().intersection_with(&root);
            if obs.last == Some(current) {
                return true;
            }
            obs.last = Some(current);

            let reaction = watcher.on_intersection(&obs.element, current);
            if reaction.releases_element() {
                log::trace!("{} released ({reaction:?})", obs.element.id());
            }
            !reaction.releases_element()
        });
    }
}
