use std::path::Path;
use std::time::Duration;

use riskplot_common::types::{parse_hex_color, Rgba};
use serde::{Deserialize, Serialize};

use crate::error::ChartError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 40.0,
            bottom: 100.0,
            left: 100.0,
            right: 100.0,
        }
    }
}

/// Layout and styling of the chart. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Size of the whole drawing
    pub width: f32,
    pub height: f32,
    pub margin: Margin,

    pub point_radius: f32,
    pub point_opacity: f32,
    pub point_fill: String,
    pub point_stroke: String,
    pub point_text_color: String,
    pub point_font_size: f32,

    pub label_font_size: f32,
    pub active_label_color: String,
    pub inactive_label_color: String,

    pub axis_font_size: f32,
    pub tick_count: f32,

    /// Tooltip shift as `[top, left]`
    pub tooltip_offset: [f32; 2],
    pub tooltip_font_size: f32,

    pub transition_ms: u64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 500.0,
            margin: Margin::default(),
            point_radius: 15.0,
            point_opacity: 0.75,
            point_fill: "#89bdd3".to_string(),
            point_stroke: "#e3e3e3".to_string(),
            point_text_color: "#ffffff".to_string(),
            point_font_size: 10.0,
            label_font_size: 16.0,
            active_label_color: "#000000".to_string(),
            inactive_label_color: "#c9c9c9".to_string(),
            axis_font_size: 10.0,
            tick_count: 10.0,
            tooltip_offset: [80.0, -60.0],
            tooltip_font_size: 12.0,
            transition_ms: 1000,
        }
    }
}

/// Resolved colors of a [`ChartConfig`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartColors {
    pub point_fill: Rgba,
    pub point_stroke: Rgba,
    pub point_text: Rgba,
    pub active_label: Rgba,
    pub inactive_label: Rgba,
}

impl ChartConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ChartError> {
        let config: Self = serde_json::from_str(json)?;
        config.colors()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ChartError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Size of the plotting area inside the margins
    pub fn plot_dimensions(&self) -> [f32; 2] {
        [
            self.width - self.margin.left - self.margin.right,
            self.height - self.margin.top - self.margin.bottom,
        ]
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn colors(&self) -> Result<ChartColors, ChartError> {
        let color = |hex: &str| parse_hex_color(hex).ok_or_else(|| ChartError::InvalidColor(hex.to_string()));
        Ok(ChartColors {
            point_fill: color(&self.point_fill)?,
            point_stroke: color(&self.point_stroke)?,
            point_text: color(&self.point_text_color)?,
            active_label: color(&self.active_label_color)?,
            inactive_label: color(&self.inactive_label_color)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = ChartConfig::default();
        assert_eq!(config.plot_dimensions(), [760.0, 360.0]);
        assert_eq!(config.transition_duration(), Duration::from_millis(1000));
        assert!(config.colors().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ChartConfig::from_json_str(
            r#"{"width": 800, "margin": {"left": 80}, "transition_ms": 250}"#,
        )
        .unwrap();
        assert_eq!(config.width, 800.0);
        assert_eq!(config.margin.left, 80.0);
        assert_eq!(config.margin.top, 40.0);
        assert_eq!(config.point_radius, 15.0);
        assert_eq!(config.plot_dimensions(), [620.0, 360.0]);
        assert_eq!(config.transition_duration(), Duration::from_millis(250));
    }

    #[test]
    fn test_bad_color_rejected() {
        let err = ChartConfig::from_json_str(r##"{"point_fill": "#nothex"}"##).unwrap_err();
        assert!(matches!(err, ChartError::InvalidColor(c) if c == "#nothex"));

        let err = ChartConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, ChartError::Config(_)));
    }
}
