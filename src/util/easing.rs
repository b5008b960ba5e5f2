//! Easing curves that remap linear animation progress.
//!
//! Every curve maps `[0, 1]` onto `[0, 1]`, hits both endpoints exactly and
//! is non-decreasing, so a count-up never runs backwards.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing function variants for count-up curves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out, `t(2 - t)` (fast start, slow end).
    #[default]
    QuadraticOut,
    /// Cubic ease-out (stronger deceleration than quadratic).
    CubicOut,
}

impl EasingFunction {
    /// Default curve: quadratic ease-out.
    pub const DEFAULT: Self = Self::QuadraticOut;

    /// Evaluate the easing function at progress `t`.
    ///
    /// Input is clamped to `[0.0, 1.0]`.
    #[inline]
    #[must_use]
    pub fn evaluate(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::QuadraticIn => t * t,
            Self::QuadraticOut => t * (2.0 - t),
            Self::CubicOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt * omt
            }
        }
    }
}
