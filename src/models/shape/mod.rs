//! Outline shapes produced for a day group on every render pass.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::geometry::Rect;

/// Which geometric case a day group falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeCase {
    /// One event card
    Single,
    /// Several cards on one grid row
    HorizontalRun,
    /// Several full rows
    PerfectRectangle,
    /// Wrapped rows with an incomplete final row (inverted L)
    Cutout,
    /// Two rows that share no grid column, joined by a connector
    SplitDisjoint,
}

impl ShapeCase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeCase::Single => "single",
            ShapeCase::HorizontalRun => "horizontal-run",
            ShapeCase::PerfectRectangle => "perfect-rectangle",
            ShapeCase::Cutout => "cutout",
            ShapeCase::SplitDisjoint => "split-disjoint",
        }
    }
}

impl fmt::Display for ShapeCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ephemeral outline value. Coordinates are overlay-relative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Rect {
        left: f64,
        top: f64,
        width: f64,
        height: f64,
        #[serde(rename = "borderRadius")]
        border_radius: f64,
    },
    Path {
        path: String,
        bounds: Rect,
    },
}

impl Shape {
    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rect {
                left,
                top,
                width,
                height,
                ..
            } => Rect::new(*left, *top, *width, *height),
            Shape::Path { bounds, .. } => *bounds,
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            Shape::Path { path, .. } => Some(path),
            Shape::Rect { .. } => None,
        }
    }
}
