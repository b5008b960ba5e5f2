//! Drives animation runs through the host's frame scheduler.

use std::rc::Rc;

use super::count::CountValue;
use super::run::{AnimationRun, FrameOutcome};
use crate::element::CounterElement;
use crate::options::AnimationOptions;
use crate::util::easing::EasingFunction;

/// Callback invoked once on the next frame with its timestamp in
/// milliseconds.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Per-frame callback scheduler (`requestAnimationFrame` or equivalent).
///
/// Single-threaded and cooperative: each requested callback runs exactly
/// once, on a later frame, never re-entrantly from `request_frame`.
pub trait FrameScheduler {
    /// Request `callback` to run on the next frame.
    fn request_frame(&self, callback: FrameCallback);
}

/// Starts count-up runs and keeps them ticking frame by frame.
///
/// The animator holds no per-run state; each run lives inside its own
/// chain of frame callbacks, so concurrently animating counters never
/// share anything.
pub struct CountUpAnimator<S: ?Sized> {
    scheduler: Rc<S>,
    duration_ms: f64,
    easing: EasingFunction,
}

impl<S: FrameScheduler + ?Sized + 'static> CountUpAnimator<S> {
    /// Animator that schedules frames on `scheduler`.
    pub fn new(scheduler: Rc<S>, options: &AnimationOptions) -> Self {
        Self {
            scheduler,
            duration_ms: options.duration_ms,
            easing: options.easing,
        }
    }

    /// Duration given to every run, in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Animate `element` from zero to `target`.
    ///
    /// Returns immediately; the first frame is requested from the
    /// scheduler. There is no handle to cancel the run.
    pub fn animate<E>(&self, element: E, target: CountValue)
    where
        E: CounterElement + 'static,
    {
        log::debug!(
            "starting count-up to {target} over {}ms",
            self.duration_ms
        );
        let run = AnimationRun::new(target, self.duration_ms, self.easing);
        schedule_step(Rc::clone(&self.scheduler), element, run);
    }
}

/// Request one frame for `run`; the callback re-schedules itself until the
/// run finishes or the element goes away.
fn schedule_step<S, E>(scheduler: Rc<S>, element: E, mut run: AnimationRun)
where
    S: FrameScheduler + ?Sized + 'static,
    E: CounterElement + 'static,
{
    let next = Rc::clone(&scheduler);
    scheduler.request_frame(Box::new(move |now_ms: f64| {
        if !element.is_connected() {
            log::debug!("counter element detached, dropping its run");
            return;
        }
        match run.step(now_ms) {
            FrameOutcome::Continue(value) => {
                element.set_text(&value.to_string());
                schedule_step(next, element, run);
            }
            FrameOutcome::Finished(value) => {
                element.set_text(&value.to_string());
                log::trace!("count-up finished at {value}");
            }
        }
    }));
}
