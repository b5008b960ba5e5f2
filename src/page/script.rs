//! Scripted playback of a headless page.
//!
//! A script describes a page (viewport, counter elements) and a timeline of
//! scroll and removal events. [`Playback`] replays it frame by frame and
//! reports every text change, which is what the `countup` binary logs.
//!
//! ```toml
//! [viewport]
//! height = 800.0
//!
//! [timing]
//! end_ms = 4000.0
//!
//! [[element]]
//! classes = ["b-stat-card__value"]
//! attributes = { data-target = "150" }
//! y = 1200.0
//!
//! [[event]]
//! at_ms = 500.0
//! action = "scroll"
//! to = 700.0
//! ```

use std::collections::{BTreeMap, VecDeque};
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::document::Document;
use super::layout::{Rect, Viewport};
use super::node::ElementId;
use super::Page;
use crate::error::CountUpError;
use crate::options::Options;

/// Frame pacing for a playback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Time between frames.
    pub frame_interval_ms: f64,
    /// Timeline length; playback continues past it until runs settle.
    pub end_ms: f64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            frame_interval_ms: 1000.0 / 60.0,
            end_ms: 3000.0,
        }
    }
}

/// One element of the scripted page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementSpec {
    /// Tag name.
    pub tag: String,
    /// Class list.
    pub classes: Vec<String>,
    /// Attributes, e.g. `data-target`.
    pub attributes: BTreeMap<String, String>,
    /// Left edge.
    pub x: f64,
    /// Top edge in document coordinates.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Default for ElementSpec {
    fn default() -> Self {
        Self {
            tag: "span".to_owned(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            x: 0.0,
            y: 0.0,
            width: 300.0,
            height: 100.0,
        }
    }
}

/// Something that happens to the page at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Scroll the viewport top to `to`.
    Scroll {
        /// New scroll offset.
        to: f64,
    },
    /// Remove the element at this index of the `[[element]]` list.
    Remove {
        /// Element index.
        element: usize,
    },
}

/// An [`Action`] scheduled at `at_ms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSpec {
    /// Timeline position.
    pub at_ms: f64,
    /// What happens.
    #[serde(flatten)]
    pub action: Action,
}

/// A page plus a timeline, loaded from TOML.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    /// Viewport size and initial scroll.
    pub viewport: Viewport,
    /// Frame pacing.
    pub timing: Timing,
    /// Counter options; defaults when absent.
    pub options: Option<Options>,
    /// Page elements in document order.
    #[serde(rename = "element")]
    pub elements: Vec<ElementSpec>,
    /// Timeline events.
    #[serde(rename = "event")]
    pub events: Vec<EventSpec>,
}

impl Script {
    /// Parse a script from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, CountUpError> {
        toml::from_str(content).map_err(|e| CountUpError::ScriptParse(e.to_string()))
    }

    /// Load a script from a TOML file.
    pub fn load(path: &Path) -> Result<Self, CountUpError> {
        let content = std::fs::read_to_string(path).map_err(CountUpError::Io)?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<(), CountUpError> {
        let interval = self.timing.frame_interval_ms;
        if !interval.is_finite() || interval <= 0.0 {
            return Err(CountUpError::ScriptParse(format!(
                "timing.frame_interval_ms must be positive, got {interval}"
            )));
        }
        if !self.timing.end_ms.is_finite() {
            return Err(CountUpError::ScriptParse(
                "timing.end_ms must be finite".to_owned(),
            ));
        }
        for (i, event) in self.events.iter().enumerate() {
            if !event.at_ms.is_finite() {
                return Err(CountUpError::ScriptParse(format!(
                    "event {i} at_ms must be finite, got {}",
                    event.at_ms
                )));
            }
            if let Action::Remove { element } = event.action {
                if element >= self.elements.len() {
                    return Err(CountUpError::ScriptParse(format!(
                        "event {i} removes element {element}, but only {} exist",
                        self.elements.len()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Build the page and start observing its counters.
    ///
    /// `options` overrides the script's own `[options]` table.
    pub fn into_playback(self, options: Option<Options>) -> Result<Playback, CountUpError> {
        self.validate()?;
        let options = options.or(self.options).unwrap_or_default();

        let mut document = Document::new();
        let ids: Vec<ElementId> = self
            .elements
            .iter()
            .map(|spec| {
                let classes: Vec<&str> = spec.classes.iter().map(String::as_str).collect();
                let attributes: Vec<(&str, &str)> = spec
                    .attributes
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect();
                document
                    .create_element(
                        &spec.tag,
                        &classes,
                        &attributes,
                        Rect::new(spec.x, spec.y, spec.width, spec.height),
                    )
                    .id()
            })
            .collect();

        let mut page = Page::new(document, self.viewport, &options)?;
        let _ = page.start();

        let mut events = self.events;
        events.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));

        let last_texts = ids
            .iter()
            .filter_map(|&id| page.text_of(id).map(|text| (id, text)))
            .collect();

        Ok(Playback {
            page,
            ids,
            events: events.into(),
            timing: self.timing,
            last_frame_ms: None,
            last_texts,
        })
    }
}

/// A text change observed on one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    /// Index into the script's element list.
    pub index: usize,
    /// Element id in the page.
    pub element: ElementId,
    /// New text content.
    pub text: String,
}

/// Everything that changed on one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Frame timestamp.
    pub time_ms: f64,
    /// Text changes, in element order.
    pub changes: Vec<TextChange>,
}

/// Frame-by-frame replay of a [`Script`].
pub struct Playback {
    page: Page,
    ids: Vec<ElementId>,
    events: VecDeque<EventSpec>,
    timing: Timing,
    last_frame_ms: Option<f64>,
    last_texts: FxHashMap<ElementId, String>,
}

impl Playback {
    /// The page being played.
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Page ids of the script's elements, by index.
    #[must_use]
    pub fn element_ids(&self) -> &[ElementId] {
        &self.ids
    }

    /// Frame pacing.
    #[must_use]
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Whether the timeline is over, no events remain and no run is active.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.last_frame_ms.is_some_and(|t| t >= self.timing.end_ms)
            && self.events.is_empty()
            && !self.page.is_animating()
    }

    /// Advance by one frame interval. `None` once finished.
    pub fn advance(&mut self) -> Option<FrameReport> {
        if self.is_finished() {
            return None;
        }
        let now = self
            .last_frame_ms
            .map_or(0.0, |t| t + self.timing.frame_interval_ms);
        Some(self.advance_to(now))
    }

    /// Apply events due by `now_ms`, run one frame and report changes.
    pub fn advance_to(&mut self, now_ms: f64) -> FrameReport {
        while self.events.front().is_some_and(|e| e.at_ms <= now_ms) {
            if let Some(event) = self.events.pop_front() {
                self.apply(&event.action);
            }
        }

        self.page.frame(now_ms);
        self.last_frame_ms = Some(now_ms);

        let mut changes = Vec::new();
        for (index, &id) in self.ids.iter().enumerate() {
            let Some(text) = self.page.text_of(id) else {
                continue;
            };
            if self.last_texts.get(&id) != Some(&text) {
                let _ = self.last_texts.insert(id, text.clone());
                changes.push(TextChange {
                    index,
                    element: id,
                    text,
                });
            }
        }
        FrameReport {
            time_ms: now_ms,
            changes,
        }
    }

    /// Play to completion, handing every frame report to `on_frame`.
    pub fn run<F>(&mut self, mut on_frame: F)
    where
        F: FnMut(&FrameReport),
    {
        while let Some(report) = self.advance() {
            on_frame(&report);
        }
    }

    fn apply(&mut self, action: &Action) {
        match *action {
            Action::Scroll { to } => {
                log::debug!("scroll to {to}");
                self.page.scroll_to(to);
            }
            Action::Remove { element } => {
                if let Some(&id) = self.ids.get(element) {
                    log::debug!("remove element {element} ({id})");
                    let _ = self.page.remove_element(id);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"
[viewport]
height = 800.0

[timing]
frame_interval_ms = 20.0
end_ms = 1000.0

[[element]]
classes = ["b-stat-card__value"]
attributes = { data-target = "150" }
y = 100.0

[[element]]
classes = ["b-stat-card__value"]
attributes = { data-target = "80" }
y = 2000.0

[[element]]
classes = ["b-stat-card__value"]
attributes = { data-target = "abc" }
y = 200.0

[[event]]
at_ms = 500.0
action = "scroll"
to = 1500.0
"#;

    fn final_texts(playback: &Playback) -> Vec<Option<String>> {
        playback
            .element_ids()
            .iter()
            .map(|&id| playback.page().text_of(id))
            .collect()
    }

    #[test]
    fn parses_elements_and_events() {
        let script = Script::from_toml_str(SCRIPT).unwrap();
        assert_eq!(script.elements.len(), 3);
        assert_eq!(script.elements[0].tag, "span");
        assert_eq!(script.viewport.height, 800.0);
        assert_eq!(script.viewport.width, 1280.0);
        assert_eq!(
            script.events,
            vec![EventSpec {
                at_ms: 500.0,
                action: Action::Scroll { to: 1500.0 },
            }]
        );
    }

    #[test]
    fn playback_animates_every_counter_to_its_target() {
        let mut playback = Script::from_toml_str(SCRIPT)
            .unwrap()
            .into_playback(None)
            .unwrap();
        let mut reports = Vec::new();
        playback.run(|report| reports.push(report.clone()));

        assert!(playback.is_finished());
        assert_eq!(
            final_texts(&playback),
            vec![
                Some("150".to_owned()),
                Some("80".to_owned()),
                Some("NaN".to_owned()),
            ]
        );

        // The off-screen card only starts after the scroll at 500ms.
        let first_change_of_second = reports
            .iter()
            .find(|r| r.changes.iter().any(|c| c.index == 1))
            .map(|r| r.time_ms)
            .unwrap();
        assert!(first_change_of_second > 500.0);
    }

    #[test]
    fn removal_event_stops_the_counter() {
        let script = format!(
            "{SCRIPT}\n[[event]]\nat_ms = 100.0\naction = \"remove\"\nelement = 0\n"
        );
        let mut playback = Script::from_toml_str(&script)
            .unwrap()
            .into_playback(None)
            .unwrap();
        playback.run(|_| {});
        assert_eq!(final_texts(&playback)[0], None);
        assert_eq!(final_texts(&playback)[1].as_deref(), Some("80"));
    }

    #[test]
    fn option_override_wins() {
        let mut options = Options::default();
        options.animation.duration_ms = 100.0;
        let mut playback = Script::from_toml_str(SCRIPT)
            .unwrap()
            .into_playback(Some(options))
            .unwrap();
        let mut done_at = None;
        playback.run(|report| {
            if report.changes.iter().any(|c| c.index == 0 && c.text == "150") {
                done_at = Some(report.time_ms);
            }
        });
        assert!(done_at.is_some_and(|t| t <= 200.0));
    }

    #[test]
    fn unknown_removal_target_is_rejected() {
        let script = "[[event]]\nat_ms = 1.0\naction = \"remove\"\nelement = 3\n";
        let err = Script::from_toml_str(script)
            .unwrap()
            .into_playback(None)
            .err()
            .unwrap();
        assert!(matches!(err, CountUpError::ScriptParse(_)));
    }

    #[test]
    fn non_finite_event_time_is_rejected() {
        for at in ["nan", "inf", "-inf"] {
            let script = format!("[[event]]\nat_ms = {at}\naction = \"scroll\"\nto = 10.0\n");
            let err = Script::from_toml_str(&script)
                .unwrap()
                .into_playback(None)
                .err()
                .unwrap();
            assert!(matches!(err, CountUpError::ScriptParse(_)), "{at}");
        }
    }

    #[test]
    fn untouched_counters_report_nothing() {
        let script = "[[element]]\nclasses = [\"b-stat-card__value\"]\n\
                      attributes = { data-target = \"5\" }\ny = 99999.0\n";
        let mut playback = Script::from_toml_str(script)
            .unwrap()
            .into_playback(None)
            .unwrap();
        let report = playback.advance().unwrap();
        assert!(report.changes.is_empty());
    }

    #[test]
    fn bundled_demo_plays_through() {
        let script = Script::from_toml_str(include_str!("../../demos/stat_cards.toml")).unwrap();
        assert_eq!(script.options.as_ref().map(|o| o.watcher.threshold), Some(0.3));
        let mut playback = script.into_playback(None).unwrap();
        playback.run(|_| {});
        assert_eq!(
            final_texts(&playback),
            vec![Some("150".to_owned()), None, Some("2048".to_owned())]
        );
    }

    #[test]
    fn malformed_script_is_a_parse_error() {
        let err = Script::from_toml_str("[[element]]\ny = \"high\"\n").unwrap_err();
        assert!(matches!(err, CountUpError::ScriptParse(_)));
    }
}
