use std::cell::{Cell, RefCell};

use web_time::Instant;

use crate::animation::{FrameCallback, FrameScheduler};

/// Cooperative per-frame scheduler for the headless page.
///
/// Callbacks requested while a frame is running are deferred to the next
/// [`run_frame`](Self::run_frame), like `requestAnimationFrame`.
#[derive(Default)]
pub struct FrameLoop {
    pending: RefCell<Vec<FrameCallback>>,
    frames_run: Cell<u64>,
}

impl FrameLoop {
    /// Empty loop.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every callback due this frame with timestamp `now_ms`.
    ///
    /// Returns the number of callbacks invoked.
    pub fn run_frame(&self, now_ms: f64) -> usize {
        let due = std::mem::take(&mut *self.pending.borrow_mut());
        let count = due.len();
        for callback in due {
            callback(now_ms);
        }
        self.frames_run.set(self.frames_run.get() + 1);
        count
    }

    /// Callbacks waiting for the next frame.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Whether no callback is waiting.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }

    /// Frames run so far.
    #[must_use]
    pub fn frames_run(&self) -> u64 {
        self.frames_run.get()
    }
}

impl FrameScheduler for FrameLoop {
    fn request_frame(&self, callback: FrameCallback) {
        self.pending.borrow_mut().push(callback);
    }
}

impl std::fmt::Debug for FrameLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameLoop")
            .field("pending", &self.pending())
            .field("frames_run", &self.frames_run.get())
            .finish()
    }
}

/// Millisecond frame timestamps measured from a fixed origin.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    origin: Instant,
}

impl FrameClock {
    /// Clock whose zero is now.
    #[must_use]
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Milliseconds since the clock started.
    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}
