//! Grid metrics: CSS custom properties + live container width → [`GridSettings`].

use thiserror::Error;

use crate::dom::{classes, CalendarDom, NodeId};
use crate::models::grid::{GridDefaults, GridLayoutContract, GridSettings};

pub const CELL_WIDTH_VAR: &str = "--dm-grid-cell-width";
pub const CELL_HEIGHT_VAR: &str = "--dm-grid-cell-height";
pub const GAP_VAR: &str = "--dm-grid-gap";
pub const BORDER_RADIUS_VAR: &str = "--dm-border-radius";
pub const BADGE_OFFSET_X_VAR: &str = "--dm-badge-offset-x";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridMetricsError {
    #[error("CSS custom property {0} is not set")]
    Missing(&'static str),
    #[error("CSS custom property {name} has malformed value {value:?}")]
    Malformed { name: &'static str, value: String },
    #[error("CSS custom property {name} must be positive (got {value})")]
    NotPositive { name: &'static str, value: f64 },
    #[error("CSS custom property {name} must not be negative (got {value})")]
    Negative { name: &'static str, value: f64 },
}

/// Parse a pixel length such as `220px`, `220` or ` 12.5px `.
pub fn parse_px(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    number.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Strict reader: every property must be present and well formed.
pub fn read_grid_settings<D: CalendarDom + ?Sized>(
    dom: &D,
    container: NodeId,
) -> Result<GridSettings, GridMetricsError> {
    let cell_width = read_positive(dom, CELL_WIDTH_VAR)?;
    let cell_height = read_positive(dom, CELL_HEIGHT_VAR)?;
    let gap = read_non_negative(dom, GAP_VAR)?;
    let border_radius = read_non_negative(dom, BORDER_RADIUS_VAR)?;
    let badge_offset_x = read_number(dom, BADGE_OFFSET_X_VAR)?;

    Ok(build(dom, container, cell_width, cell_height, gap, border_radius, badge_offset_x))
}

/// Production reader: a missing or malformed property falls back to its
/// default and logs a warning, so geometry never degenerates into NaN.
pub fn get_active_grid_settings<D: CalendarDom + ?Sized>(
    dom: &D,
    container: NodeId,
    defaults: &GridDefaults,
) -> GridSettings {
    let cell_width = or_default(read_positive(dom, CELL_WIDTH_VAR), defaults.cell_width);
    let cell_height = or_default(read_positive(dom, CELL_HEIGHT_VAR), defaults.cell_height);
    let gap = or_default(read_non_negative(dom, GAP_VAR), defaults.gap);
    let border_radius = or_default(read_non_negative(dom, BORDER_RADIUS_VAR), defaults.border_radius);
    let badge_offset_x = or_default(read_number(dom, BADGE_OFFSET_X_VAR), defaults.badge_offset_x);

    build(dom, container, cell_width, cell_height, gap, border_radius, badge_offset_x)
}

fn build<D: CalendarDom + ?Sized>(
    dom: &D,
    container: NodeId,
    cell_width: f64,
    cell_height: f64,
    gap: f64,
    border_radius: f64,
    badge_offset_x: f64,
) -> GridSettings {
    let container_width = dom.bounding_rect(container).width.max(0.0);
    let contract = GridLayoutContract {
        cell_width,
        cell_height,
        gap,
    };

    GridSettings {
        cell_width,
        cell_height,
        gap,
        container_width,
        events_per_row: contract.columns_for_width(container_width),
        border_radius,
        badge_offset_x,
    }
}

/// Custom properties the stylesheet publishes on `:root`, in the form the
/// readers above parse back.
pub fn grid_css_variables(defaults: &GridDefaults) -> Vec<(&'static str, String)> {
    vec![
        (CELL_WIDTH_VAR, format!("{}px", defaults.cell_width)),
        (CELL_HEIGHT_VAR, format!("{}px", defaults.cell_height)),
        (GAP_VAR, format!("{}px", defaults.gap)),
        (BORDER_RADIUS_VAR, format!("{}px", defaults.border_radius)),
        (BADGE_OFFSET_X_VAR, format!("{}px", defaults.badge_offset_x)),
    ]
}

/// Grid stylesheet: the `:root` custom properties plus the content grid rule,
/// both built from the same values so the rendered columns match
/// `events_per_row`.
pub fn grid_stylesheet(defaults: &GridDefaults) -> String {
    let mut css = String::from(":root {\n");
    for (name, value) in grid_css_variables(defaults) {
        css.push_str(&format!("  {}: {};\n", name, value));
    }
    css.push_str("}\n\n");
    css.push_str(&format!(
        ".{} {{\n  {}\n}}\n",
        classes::CONTENT,
        defaults.contract().css_declarations()
    ));
    css
}

fn or_default(value: Result<f64, GridMetricsError>, default: f64) -> f64 {
    match value {
        Ok(value) => value,
        Err(err) => {
            log::warn!("{}; using default {}px", err, default);
            default
        }
    }
}

fn read_number<D: CalendarDom + ?Sized>(dom: &D, name: &'static str) -> Result<f64, GridMetricsError> {
    let raw = dom
        .root_css_variable(name)
        .ok_or(GridMetricsError::Missing(name))?;
    parse_px(&raw).ok_or(GridMetricsError::Malformed { name, value: raw })
}

fn read_positive<D: CalendarDom + ?Sized>(dom: &D, name: &'static str) -> Result<f64, GridMetricsError> {
    let value = read_number(dom, name)?;
    if value <= 0.0 {
        return Err(GridMetricsError::NotPositive { name, value });
    }
    Ok(value)
}

fn read_non_negative<D: CalendarDom + ?Sized>(dom: &D, name: &'static str) -> Result<f64, GridMetricsError> {
    let value = read_number(dom, name)?;
    if value < 0.0 {
        return Err(GridMetricsError::Negative { name, value });
    }
    Ok(value)
}
