//! Presentation defaults and construction-time attributes.
//!
//! [`ProgressStyle`] is the explicit table of default colors and thumb sizes a
//! host hands to a new progress bar. [`ProgressAttrs`] is the optional
//! per-placement override set, typically loaded from a YAML or JSON file.

use crate::error::StyleError;
use progressview_core::Color;
use serde::{Deserialize, Serialize};

/// Colors and thumb sizing for a progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressStyle {
    /// Background bar color
    pub bar_color: Color,
    /// Primary fill color
    pub primary_color: Color,
    /// Secondary fill color
    pub secondary_color: Color,
    /// Thumb fill color
    pub thumb_fill_color: Color,
    /// Thumb border color
    pub thumb_border_color: Color,
    /// Thumb extent in pixels; see [`ProgressModel::thumb_radius`](crate::ProgressModel::thumb_radius)
    pub thumb_radius: f32,
    /// Thumb border stroke width in pixels
    pub thumb_border_width: f32,
}

impl Default for ProgressStyle {
    fn default() -> Self {
        Self {
            bar_color: Color::new(0.88, 0.88, 0.88, 1.0), // #E0E0E0
            primary_color: Color::new(0.13, 0.59, 0.95, 1.0), // #2196F3
            secondary_color: Color::new(0.56, 0.79, 0.98, 1.0), // #90CAF9
            thumb_fill_color: Color::WHITE,
            thumb_border_color: Color::new(0.10, 0.46, 0.82, 1.0), // #1976D2
            thumb_radius: 24.0,
            thumb_border_width: 2.0,
        }
    }
}

/// Construction-time attributes. Every field is optional; unset fields fall
/// back to the [`ProgressStyle`] passed at construction or to the value
/// defaults (`min 0`, `max 1`, everything else `0`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProgressAttrs {
    /// Bar color as hex
    pub bar_color: Option<String>,
    /// Primary fill color as hex
    pub primary_color: Option<String>,
    /// Secondary fill color as hex
    pub secondary_color: Option<String>,
    /// Thumb fill color as hex
    pub thumb_fill_color: Option<String>,
    /// Thumb border color as hex
    pub thumb_border_color: Option<String>,
    /// Thumb extent in pixels
    pub thumb_radius: Option<f32>,
    /// Thumb border width in pixels
    pub thumb_border_width: Option<f32>,
    /// Range minimum
    pub min_value: Option<f32>,
    /// Range maximum
    pub max_value: Option<f32>,
    /// Snap threshold in value units
    pub snap_threshold: Option<f32>,
    /// Initial primary progress
    pub primary_value: Option<f32>,
    /// Initial secondary progress
    pub secondary_value: Option<f32>,
}

impl ProgressAttrs {
    /// Parse attributes from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, StyleError> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Parse attributes from JSON.
    pub fn from_json(json: &str) -> Result<Self, StyleError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Overlay these attributes on `defaults`.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::Color`] naming the first color attribute that is
    /// not valid hex.
    pub fn resolve_style(&self, defaults: &ProgressStyle) -> Result<ProgressStyle, StyleError> {
        Ok(ProgressStyle {
            bar_color: color_or("bar_color", self.bar_color.as_deref(), defaults.bar_color)?,
            primary_color: color_or(
                "primary_color",
                self.primary_color.as_deref(),
                defaults.primary_color,
            )?,
            secondary_color: color_or(
                "secondary_color",
                self.secondary_color.as_deref(),
                defaults.secondary_color,
            )?,
            thumb_fill_color: color_or(
                "thumb_fill_color",
                self.thumb_fill_color.as_deref(),
                defaults.thumb_fill_color,
            )?,
            thumb_border_color: color_or(
                "thumb_border_color",
                self.thumb_border_color.as_deref(),
                defaults.thumb_border_color,
            )?,
            thumb_radius: self.thumb_radius.unwrap_or(defaults.thumb_radius),
            thumb_border_width: self
                .thumb_border_width
                .unwrap_or(defaults.thumb_border_width),
        })
    }
}

fn color_or(attr: &'static str, hex: Option<&str>, fallback: Color) -> Result<Color, StyleError> {
    hex.map_or(Ok(fallback), |hex| {
        Color::from_hex(hex).map_err(|source| StyleError::Color { attr, source })
    })
}
