//! Count-up animation: eased runs from zero to a target, one frame at a time.

mod animator;
mod count;
mod run;

pub use animator::{CountUpAnimator, FrameCallback, FrameScheduler};
pub use count::CountValue;
pub use run::{AnimationRun, FrameOutcome};
