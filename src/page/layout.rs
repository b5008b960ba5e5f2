//! Viewport geometry and intersection ratios.

use serde::{Deserialize, Serialize};

use crate::watcher::Intersection;

/// Axis-aligned rectangle in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width (non-negative).
    pub width: f64,
    /// Height (non-negative).
    pub height: f64,
}

impl Rect {
    /// Rectangle from position and size.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Area in square pixels.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Overlap with `other`, `None` when disjoint.
    ///
    /// Rectangles sharing only an edge intersect with zero area, matching
    /// how browsers report edge-adjacent targets.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        (left <= right && top <= bottom)
            .then(|| Self::new(left, top, right - left, bottom - top))
    }

    /// How much of `self` lies within `root`.
    ///
    /// A zero-area target that touches the root counts as fully visible.
    #[must_use]
    pub fn intersection_with(&self, root: &Self) -> Intersection {
        let Some(overlap) = self.intersection(root) else {
            return Intersection::HIDDEN;
        };
        let area = self.area();
        let ratio = if area > 0.0 {
            (overlap.area() / area).clamp(0.0, 1.0)
        } else {
            1.0
        };
        Intersection {
            ratio,
            intersecting: true,
        }
    }
}

/// The visible window onto the document, scrolled vertically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Visible width.
    pub width: f64,
    /// Visible height.
    pub height: f64,
    /// Vertical scroll offset from the document top.
    pub scroll_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            scroll_y: 0.0,
        }
    }
}

impl Viewport {
    /// Viewport of the given size at the document top.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
        }
    }

    /// Visible region in document coordinates.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.height)
    }
}
