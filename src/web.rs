//! Browser host: counters on real DOM elements.
//!
//! Elements are found with `querySelectorAll`, observed by an
//! `IntersectionObserver` configured with the watcher threshold, and
//! animated on `requestAnimationFrame`.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use crate::animation::{FrameCallback, FrameScheduler};
use crate::element::CounterElement;
use crate::error::CountUpError;
use crate::options::Options;
use crate::watcher::{Intersection, VisibilityWatcher};

impl CounterElement for Element {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        if let Err(e) = self.class_list().add_1(class) {
            log::warn!("failed to add class '{class}': {e:?}");
        }
    }

    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }

    fn is_connected(&self) -> bool {
        web_sys::Node::is_connected(self)
    }
}

/// `requestAnimationFrame` on the global window.
#[derive(Debug, Default)]
pub struct AnimationFrames;

impl FrameScheduler for AnimationFrames {
    fn request_frame(&self, callback: FrameCallback) {
        let Some(window) = web_sys::window() else {
            log::warn!("no global window, dropping animation frame");
            return;
        };
        let closure = Closure::once_into_js(move |timestamp: f64| callback(timestamp));
        if let Err(e) = window.request_animation_frame(closure.unchecked_ref()) {
            log::warn!("requestAnimationFrame failed: {e:?}");
        }
    }
}

/// Find every counter and start observing it.
///
/// Returns the number of elements registered. The observer and its
/// callback live for the rest of the page.
pub fn install(options: &Options) -> Result<u32, CountUpError> {
    options.validate()?;

    let window =
        web_sys::window().ok_or_else(|| CountUpError::Host("no global window".to_owned()))?;
    let document = window
        .document()
        .ok_or_else(|| CountUpError::Host("window has no document".to_owned()))?;
    let nodes = document
        .query_selector_all(&options.watcher.selector)
        .map_err(|e| CountUpError::Selector(format!("{e:?}")))?;

    let watcher = VisibilityWatcher::new(options, Rc::new(AnimationFrames));
    let on_entries = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let intersection = Intersection {
                    ratio: entry.intersection_ratio(),
                    intersecting: entry.is_intersecting(),
                };
                if watcher
                    .on_intersection(&target, intersection)
                    .releases_element()
                {
                    observer.unobserve(&target);
                }
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.watcher.threshold));
    let observer = IntersectionObserver::new_with_options(
        on_entries.as_ref().unchecked_ref(),
        &init,
    )
    .map_err(|e| CountUpError::Host(format!("IntersectionObserver: {e:?}")))?;
    // The observer holds the callback for the page's lifetime.
    on_entries.forget();

    let mut count = 0;
    for index in 0..nodes.length() {
        let Some(element) = nodes
            .item(index)
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        observer.observe(&element);
        count += 1;
    }
    log::info!("observing {count} counter element(s)");
    Ok(count)
}

/// Wasm entry point: install counters with optional JSON options.
#[wasm_bindgen(js_name = startCounters)]
pub fn start_counters(options_json: Option<String>) -> Result<u32, JsValue> {
    console_error_panic_hook::set_once();
    // A second call finds the logger already set.
    let _ = console_log::init_with_level(log::Level::Info);

    let options = match options_json {
        Some(json) => Options::from_json_str(&json),
        None => Ok(Options::default()),
    }
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    install(&options).map_err(|e| JsValue::from_str(&e.to_string()))
}
