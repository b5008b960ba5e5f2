use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which elements are watched and when they count as visible.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Watcher", inline)]
#[serde(default)]
pub struct WatcherOptions {
    /// Fraction of an element's area that must be inside the viewport.
    #[schemars(title = "Threshold", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub threshold: f64,
    /// Selector matched once at startup to find counter elements.
    #[schemars(title = "Selector")]
    pub selector: String,
    /// Attribute holding the target integer.
    #[schemars(title = "Target Attribute")]
    pub target_attribute: String,
    /// Class marking an element that has already been animated.
    #[schemars(title = "Animated Class")]
    pub animated_class: String,
}

impl Default for WatcherOptions {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            selector: ".b-stat-card__value[data-target]".to_owned(),
            target_attribute: "data-target".to_owned(),
            animated_class: "animated".to_owned(),
        }
    }
}
