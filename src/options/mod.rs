//! Counter options with TOML and JSON support.
//!
//! Everything tweakable (visibility threshold, selection, marker class,
//! run duration and easing) lives here. Options serialize to/from TOML for
//! the simulator and parse from JSON for the browser entry point.

mod animation;
mod watcher;

use std::path::Path;

pub use animation::AnimationOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use watcher::WatcherOptions;

use crate::error::CountUpError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial files (e.g. only overriding `[animation]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Element selection and visibility threshold.
    pub watcher: WatcherOptions,
    /// Count-up timing.
    pub animation: AnimationOptions,
}

impl Options {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse and validate options from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, CountUpError> {
        let opts: Self = toml::from_str(content)
            .map_err(|e| CountUpError::OptionsParse(e.to_string()))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Parse and validate options from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self, CountUpError> {
        let opts: Self = serde_json::from_str(content)
            .map_err(|e| CountUpError::OptionsParse(e.to_string()))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, CountUpError> {
        let content = std::fs::read_to_string(path).map_err(CountUpError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), CountUpError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CountUpError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(CountUpError::Io)?;
        }
        std::fs::write(path, content).map_err(CountUpError::Io)
    }

    /// Reject values the watcher and animator cannot work with.
    pub fn validate(&self) -> Result<(), CountUpError> {
        let threshold = self.watcher.threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(CountUpError::InvalidOption(format!(
                "watcher.threshold must be within [0, 1], got {threshold}"
            )));
        }
        let duration = self.animation.duration_ms;
        if !duration.is_finite() || duration < 0.0 {
            return Err(CountUpError::InvalidOption(format!(
                "animation.duration_ms must be a finite, non-negative \
                 number, got {duration}"
            )));
        }
        for (name, value) in [
            ("watcher.selector", &self.watcher.selector),
            ("watcher.target_attribute", &self.watcher.target_attribute),
            ("watcher.animated_class", &self.watcher.animated_class),
        ] {
            if value.trim().is_empty() {
                return Err(CountUpError::InvalidOption(format!(
                    "{name} must not be empty"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::easing::EasingFunction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn defaults_match_the_stat_card_markup() {
        let opts = Options::default();
        assert_eq!(opts.watcher.threshold, 0.3);
        assert_eq!(opts.watcher.selector, ".b-stat-card__value[data-target]");
        assert_eq!(opts.watcher.target_attribute, "data-target");
        assert_eq!(opts.watcher.animated_class, "animated");
        assert_eq!(opts.animation.duration_ms, 2000.0);
        assert_eq!(opts.animation.easing, EasingFunction::QuadraticOut);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[animation]
duration_ms = 500.0
easing = "cubic_out"
"#;
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.animation.duration_ms, 500.0);
        assert_eq!(opts.animation.easing, EasingFunction::CubicOut);
        assert_eq!(opts.watcher, WatcherOptions::default());
    }

    #[test]
    fn json_options_parse() {
        let opts =
            Options::from_json_str(r#"{"watcher": {"threshold": 0.5}}"#).unwrap();
        assert_eq!(opts.watcher.threshold, 0.5);
        assert_eq!(opts.animation, AnimationOptions::default());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = Options::from_toml_str("[watcher]\nthreshold = 1.5\n").unwrap_err();
        assert!(matches!(err, CountUpError::InvalidOption(_)));

        let err =
            Options::from_toml_str("[animation]\nduration_ms = -1.0\n").unwrap_err();
        assert!(matches!(err, CountUpError::InvalidOption(_)));

        let err = Options::from_toml_str("[watcher]\nanimated_class = \" \"\n")
            .unwrap_err();
        assert!(matches!(err, CountUpError::InvalidOption(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Options::from_toml_str("[watcher\nthreshold = ").unwrap_err();
        assert!(matches!(err, CountUpError::OptionsParse(_)));
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = std::env::temp_dir().join(format!(
            "countup-options-{}",
            std::process::id()
        ));
        let path = dir.join("nested").join("counters.toml");
        let mut opts = Options::default();
        opts.watcher.threshold = 0.75;
        opts.animation.easing = EasingFunction::Linear;

        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(loaded, opts);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();
        assert!(props.contains_key("watcher"));
        assert!(props.contains_key("animation"));

        let watcher = &props["watcher"]["properties"];
        assert!(watcher.get("threshold").is_some());
        assert!(watcher.get("selector").is_some());
        let animation = &props["animation"]["properties"];
        assert!(animation.get("duration_ms").is_some());
        assert!(animation.get("easing").is_some());
    }
}
