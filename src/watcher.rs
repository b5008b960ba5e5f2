//! Visibility watcher: turns intersection notifications into one-shot
//! count-up starts.
//!
//! Hosts own the actual observation (an `IntersectionObserver` in the
//! browser, [`crate::page::Page`] headless) and forward each notification to
//! [`VisibilityWatcher::on_intersection`]. The returned [`Reaction`] tells the
//! host whether to stop observing the element.

use std::rc::Rc;

use crate::animation::{CountUpAnimator, CountValue, FrameScheduler};
use crate::element::CounterElement;
use crate::options::Options;

/// Slack allowed below the threshold. Browsers may report a crossing ratio
/// a hair under the configured threshold and never call back again while
/// the element stays put.
const THRESHOLD_TOLERANCE: f64 = 1e-6;

/// How much of an element is inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Visible fraction of the element's area, 0.0 to 1.0.
    pub ratio: f64,
    /// Whether the element touches the viewport at all.
    pub intersecting: bool,
}

impl Intersection {
    /// Nothing of the element is visible.
    pub const HIDDEN: Self = Self {
        ratio: 0.0,
        intersecting: false,
    };
}

/// What the watcher did with a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Below the threshold; keep observing.
    Pending,
    /// A run was started and the element marked.
    Started,
    /// Visible, but already marked; no run started.
    AlreadyAnimated,
}

impl Reaction {
    /// Whether the host must stop observing the element.
    ///
    /// True for every reaction past the threshold, even when no run
    /// started, so a rapid hide/show cannot trigger twice.
    #[must_use]
    pub fn releases_element(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// One-shot trigger policy shared by every host.
pub struct VisibilityWatcher<S: ?Sized> {
    threshold: f64,
    target_attribute: String,
    animated_class: String,
    animator: CountUpAnimator<S>,
}

impl<S: FrameScheduler + ?Sized + 'static> VisibilityWatcher<S> {
    /// Watcher configured from `options`, animating through `scheduler`.
    pub fn new(options: &Options, scheduler: Rc<S>) -> Self {
        Self {
            threshold: options.watcher.threshold,
            target_attribute: options.watcher.target_attribute.clone(),
            animated_class: options.watcher.animated_class.clone(),
            animator: CountUpAnimator::new(scheduler, &options.animation),
        }
    }

    /// Visible fraction required to trigger.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether `intersection` is past the trigger threshold.
    #[must_use]
    pub fn is_visible_enough(&self, intersection: Intersection) -> bool {
        intersection.intersecting && intersection.ratio + THRESHOLD_TOLERANCE >= self.threshold
    }

    /// Handle one intersection notification for `element`.
    pub fn on_intersection<E>(&self, element: &E, intersection: Intersection) -> Reaction
    where
        E: CounterElement + Clone + 'static,
    {
        if !self.is_visible_enough(intersection) {
            return Reaction::Pending;
        }
        self.on_visible(element)
    }

    /// React to `element` having become visible.
    ///
    /// Starts a run unless the element already carries the animated class,
    /// then marks it.
    pub fn on_visible<E>(&self, element: &E) -> Reaction
    where
        E: CounterElement + Clone + 'static,
    {
        let target = CountValue::parse_attribute(
            element.attribute(&self.target_attribute).as_deref(),
        );
        if element.has_class(&self.animated_class) {
            log::trace!("counter already animated, releasing it");
            return Reaction::AlreadyAnimated;
        }
        if target.is_nan() {
            log::debug!(
                "counter has no numeric '{}' attribute, animating NaN",
                self.target_attribute
            );
        }
        self.animator.animate(element.clone(), target);
        element.add_class(&self.animated_class);
        Reaction::Started
    }
}
