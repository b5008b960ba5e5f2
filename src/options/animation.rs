use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

/// Timing of each count-up run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
pub struct AnimationOptions {
    /// Run length in milliseconds (frame timestamp units).
    #[schemars(title = "Duration (ms)", range(min = 0.0, max = 10000.0), extend("step" = 50.0))]
    pub duration_ms: f64,
    /// Curve applied to linear progress.
    #[schemars(title = "Easing")]
    pub easing: EasingFunction,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            duration_ms: 2000.0,
            easing: EasingFunction::DEFAULT,
        }
    }
}
