//! A single count-up run from zero to its target.

use super::count::CountValue;
use crate::util::easing::EasingFunction;

/// What a frame produced and whether the run wants another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Render this readout and request another frame.
    Continue(CountValue),
    /// Render this (exact target) readout and stop.
    Finished(CountValue),
}

impl FrameOutcome {
    /// The value to render for this frame.
    #[must_use]
    pub fn readout(self) -> CountValue {
        match self {
            Self::Continue(value) | Self::Finished(value) => value,
        }
    }

    /// Whether the run completed on this frame.
    #[must_use]
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Finished(_))
    }
}

/// Ephemeral state for one animation of one counter.
///
/// The start timestamp is latched by the first [`step`](Self::step) call.
/// It is an explicit `Option`, so a first frame stamped `0.0` is a valid
/// start rather than "not started yet".
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationRun {
    /// Frame timestamp of the first step, in milliseconds.
    started_at: Option<f64>,
    /// Value reached at the end of the run.
    target: CountValue,
    /// Wall-clock length of the run, in milliseconds.
    duration_ms: f64,
    /// Curve applied to linear progress.
    easing: EasingFunction,
}

impl AnimationRun {
    /// Run toward `target` over `duration_ms` using `easing`.
    #[must_use]
    pub fn new(target: CountValue, duration_ms: f64, easing: EasingFunction) -> Self {
        Self {
            started_at: None,
            target,
            duration_ms,
            easing,
        }
    }

    /// Value the run ends on.
    #[must_use]
    pub fn target(&self) -> CountValue {
        self.target
    }

    /// Total run length in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Whether the first frame has been seen.
    #[must_use]
    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Normalized progress (0.0 to 1.0) after `elapsed_ms`.
    #[must_use]
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Readout for a given elapsed time, before the final snap.
    #[must_use]
    pub fn readout_at(&self, elapsed_ms: f64) -> CountValue {
        let eased = self.easing.evaluate(self.progress(elapsed_ms));
        self.target.scaled(eased)
    }

    /// Advance the run to the frame stamped `now_ms`.
    ///
    /// Once `duration_ms` has elapsed the readout is the exact target, not
    /// the eased approximation.
    pub fn step(&mut self, now_ms: f64) -> FrameOutcome {
        let started_at = *self.started_at.get_or_insert(now_ms);
        let elapsed = now_ms - started_at;

        if elapsed < self.duration_ms {
            FrameOutcome::Continue(self.readout_at(elapsed))
        } else {
            FrameOutcome::Finished(self.target)
        }
    }
}
