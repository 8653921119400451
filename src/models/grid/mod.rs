//! Grid geometry read once per render pass.

use serde::{Deserialize, Serialize};

use crate::models::geometry::Rect;

/// Fallback values used when a CSS custom property is missing or malformed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridDefaults {
    pub cell_width: f64,
    pub cell_height: f64,
    pub gap: f64,
    pub border_radius: f64,
    pub badge_offset_x: f64,
}

impl Default for GridDefaults {
    fn default() -> Self {
        Self {
            cell_width: 220.0,
            cell_height: 180.0,
            gap: 20.0,
            border_radius: 8.0,
            badge_offset_x: 16.0,
        }
    }
}

impl GridDefaults {
    pub fn contract(&self) -> GridLayoutContract {
        GridLayoutContract {
            cell_width: self.cell_width,
            cell_height: self.cell_height,
            gap: self.gap,
        }
    }
}

/// Derived, read-only grid description for one render pass.
///
/// `events_per_row` depends on the live container width, so a value is only
/// valid until the next resize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSettings {
    pub cell_width: f64,
    pub cell_height: f64,
    pub gap: f64,
    pub container_width: f64,
    pub events_per_row: usize,
    pub border_radius: f64,
    pub badge_offset_x: f64,
}

impl GridSettings {
    pub fn contract(&self) -> GridLayoutContract {
        GridLayoutContract {
            cell_width: self.cell_width,
            cell_height: self.cell_height,
            gap: self.gap,
        }
    }

    /// Grid column of a box given in grid-container-relative coordinates.
    pub fn column_of(&self, relative: &Rect) -> i64 {
        ((relative.left + self.gap / 2.0) / (self.cell_width + self.gap)).floor() as i64
    }

    /// Grid row of a box given in grid-container-relative coordinates.
    pub fn row_of(&self, relative: &Rect) -> i64 {
        ((relative.top + self.gap / 2.0) / (self.cell_height + self.gap)).floor() as i64
    }
}

/// The one description of the calendar grid shared by the stylesheet and the
/// outline engine. The CSS declarations and the column arithmetic are both
/// derived from it so they cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLayoutContract {
    pub cell_width: f64,
    pub cell_height: f64,
    pub gap: f64,
}

impl GridLayoutContract {
    /// Columns an auto-fill grid of fixed-width tracks produces for `container_width`.
    pub fn columns_for_width(&self, container_width: f64) -> usize {
        let columns = ((container_width + self.gap) / (self.cell_width + self.gap)).floor();
        if columns.is_finite() && columns >= 1.0 {
            columns as usize
        } else {
            1
        }
    }

    pub fn grid_template_columns(&self) -> String {
        format!("repeat(auto-fill, {}px)", self.cell_width)
    }

    pub fn grid_auto_rows(&self) -> String {
        format!("{}px", self.cell_height)
    }

    /// Declarations for the grid container rule.
    pub fn css_declarations(&self) -> String {
        format!(
            "display: grid; grid-template-columns: {}; grid-auto-rows: {}; gap: {}px;",
            self.grid_template_columns(),
            self.grid_auto_rows(),
            self.gap
        )
    }

    /// Box of the `index`-th auto-placed item in a container of `container_width`
    /// whose content box starts at `origin`.
    pub fn cell_rect(&self, index: usize, container_width: f64, origin: (f64, f64)) -> Rect {
        let columns = self.columns_for_width(container_width);
        let column = (index % columns) as f64;
        let row = (index / columns) as f64;
        Rect::new(
            origin.0 + column * (self.cell_width + self.gap),
            origin.1 + row * (self.cell_height + self.gap),
            self.cell_width,
            self.cell_height,
        )
    }
}
