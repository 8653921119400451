// Settings module
// Tunable constants of the outline engine, loadable from TOML

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::models::grid::GridDefaults;

/// Engine settings. Every field has a default so a partial TOML file works.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineSettings {
    /// Space between the cards and the outline, on every edge
    pub padding: f64,
    /// Width of the top-edge opening the day badge sits in
    pub badge_gap_width: f64,
    /// How far above the outline's top edge the badge is lifted
    pub badge_vertical_inset: f64,
    /// Connector overshoot past each corner curve, as a multiple of the radius
    pub connector_overshoot: f64,
    pub resize_debounce_ms: u64,
    pub refresh_debounce_ms: u64,
    pub client_search_debounce_ms: u64,
    pub server_search_debounce_ms: u64,
    /// Base URL of the site serving the calendar REST route
    pub rest_base_url: Option<String>,
    pub grid_defaults: GridDefaults,
}

impl Default for OutlineSettings {
    fn default() -> Self {
        Self {
            padding: 8.0,
            badge_gap_width: 140.0,
            badge_vertical_inset: 12.0,
            connector_overshoot: 1.5,
            resize_debounce_ms: 300,
            refresh_debounce_ms: 50,
            client_search_debounce_ms: 300,
            server_search_debounce_ms: 500,
            rest_base_url: None,
            grid_defaults: GridDefaults::default(),
        }
    }
}

impl OutlineSettings {
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn refresh_debounce(&self) -> Duration {
        Duration::from_millis(self.refresh_debounce_ms)
    }

    pub fn client_search_debounce(&self) -> Duration {
        Duration::from_millis(self.client_search_debounce_ms)
    }

    pub fn server_search_debounce(&self) -> Duration {
        Duration::from_millis(self.server_search_debounce_ms)
    }

    pub fn validate(&self) -> Result<(), SettingsValidationError> {
        let non_negative = [
            ("padding", self.padding),
            ("badge_gap_width", self.badge_gap_width),
            ("badge_vertical_inset", self.badge_vertical_inset),
            ("connector_overshoot", self.connector_overshoot),
            ("grid_defaults.border_radius", self.grid_defaults.border_radius),
            ("grid_defaults.badge_offset_x", self.grid_defaults.badge_offset_x),
            ("grid_defaults.gap", self.grid_defaults.gap),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsValidationError::Negative { field, value });
            }
        }

        let positive = [
            ("grid_defaults.cell_width", self.grid_defaults.cell_width),
            ("grid_defaults.cell_height", self.grid_defaults.cell_height),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsValidationError::NotPositive { field, value });
            }
        }

        if let Some(url) = &self.rest_base_url {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(SettingsValidationError::InvalidBaseUrl(url.clone()));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsValidationError {
    #[error("{field} must be zero or positive (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("rest_base_url must be an http(s) URL (got {0})")]
    InvalidBaseUrl(String),
}
