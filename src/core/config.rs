//! Configuration for map construction
//!
//! Every recognised option is a named field with its default spelled out in
//! the `Default` impl. Options deserialize from JSON with missing fields
//! falling back to those defaults, so a front end can send only what it
//! changes.

use serde::{Deserialize, Serialize};

use crate::{
    controls::Position,
    core::constants::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM},
    MapError, Result,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    /// Zoom with the mouse wheel.
    pub scroll_wheel_zoom: bool,
    /// Attach a layer selector at construction.
    pub layers_control: bool,
    /// Attach a fullscreen toggle at construction.
    pub fullscreen_control: bool,
    pub attribution_control: bool,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub layers_control_position: Position,
    pub fullscreen_control_position: Position,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            scroll_wheel_zoom: true,
            layers_control: true,
            fullscreen_control: true,
            attribution_control: true,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            layers_control_position: Position::TopRight,
            fullscreen_control_position: Position::TopLeft,
        }
    }
}

impl MapOptions {
    /// Parse options from a JSON object, filling gaps with defaults.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        let options: Self = serde_json::from_value(value)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min_zoom.is_finite() || !self.max_zoom.is_finite() || self.min_zoom > self.max_zoom {
            return Err(MapError::InvalidArgument(format!(
                "zoom limits [{}, {}] are not a valid range",
                self.min_zoom, self.max_zoom
            )));
        }
        Ok(())
    }

    /// Check `zoom` against the configured limits.
    pub fn check_zoom(&self, zoom: f64) -> Result<()> {
        if !zoom.is_finite() || zoom < self.min_zoom || zoom > self.max_zoom {
            return Err(MapError::InvalidArgument(format!(
                "zoom {} outside [{}, {}]",
                zoom, self.min_zoom, self.max_zoom
            )));
        }
        Ok(())
    }
}
