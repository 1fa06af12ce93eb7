//! Chart Configuration Module
//! Fixed layout dimensions, colors and animation timing for the bar chart.
//!
//! All values are logical pixels unless noted otherwise. A configuration is
//! immutable once handed to the renderer; load it once at startup.

use crate::charts::Easing;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Environment variable pointing at a JSON configuration file.
pub const CONFIG_ENV_VAR: &str = "COMMIT_STATS_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// RGB color triple, kept backend-neutral so both egui and plotters can use it.
pub type Rgb = [u8; 3];

/// Layout and styling constants for the commit chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Height of the bar area
    pub chart_height: f32,
    pub bar_width: f32,
    /// Radius of the two top corners of each bar
    pub bar_corner_radius: f32,
    /// The tallest bar is `chart_height - bar_height_inset` tall
    pub bar_height_inset: f32,
    /// Gap between the bar area and the x-axis scale
    pub bar_bottom_padding: f32,
    /// Height of the strip below the bars (connector + month label)
    pub x_axis_scale_height: f32,
    pub connector_width: f32,
    pub connector_height: f32,
    pub baseline_thickness: f32,
    /// Gap between the baseline band and the x-axis scale strip
    pub baseline_bottom_gap: f32,
    /// Horizontal centre of the y-axis tick labels
    pub y_axis_label_x: f32,
    /// Top inset of the y-axis ticks; also the gridline left inset
    pub y_axis_scale_spacing: f32,
    /// Horizontal space reserved for the y-axis labels
    pub y_axis_text_width: f32,
    /// Left offset of the bar plot area
    pub plot_start_padding: f32,
    /// Bottom padding of the y-axis canvas
    pub axis_canvas_bottom_padding: f32,
    pub tick_font_size: f32,
    pub label_font_size: f32,
    pub gridline_width: f32,
    /// Alternating on/off lengths of the gridline stroke
    pub gridline_dash: Vec<f32>,
    /// Bar growth duration in milliseconds
    pub animation_duration_ms: u64,
    pub easing: Easing,
    /// Anchor the y-axis at zero instead of the series minimum
    pub axis_from_zero: bool,
    pub bar_color: Rgb,
    pub gridline_color: Rgb,
    pub axis_color: Rgb,
    pub text_color: Rgb,
    pub error_color: Rgb,
    pub background_color: Rgb,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            chart_height: 300.0,
            bar_width: 20.0,
            bar_corner_radius: 5.0,
            bar_height_inset: 10.0,
            bar_bottom_padding: 5.0,
            x_axis_scale_height: 40.0,
            connector_width: 5.0,
            connector_height: 10.0,
            baseline_thickness: 5.0,
            baseline_bottom_gap: 3.0,
            y_axis_label_x: 30.0,
            y_axis_scale_spacing: 100.0,
            y_axis_text_width: 100.0,
            plot_start_padding: 50.0,
            axis_canvas_bottom_padding: 10.0,
            tick_font_size: 12.0,
            label_font_size: 14.0,
            gridline_width: 5.0,
            gridline_dash: vec![10.0, 10.0],
            animation_duration_ms: 1000,
            easing: Easing::FastOutSlowIn,
            axis_from_zero: false,
            bar_color: [52, 152, 219],
            gridline_color: [136, 136, 136],
            axis_color: [136, 136, 136],
            text_color: [0, 0, 0],
            error_color: [176, 0, 32],
            background_color: [255, 255, 255],
        }
    }
}

impl ChartConfig {
    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        tracing::info!(path = %path.display(), "loaded chart config");
        Ok(config)
    }

    /// Resolve the configuration from an explicit path, then the
    /// `COMMIT_STATS_CONFIG` environment variable, then the defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => {
                tracing::debug!("no chart config given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Reject dimensions the layout cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("chart_height", self.chart_height),
            ("bar_width", self.bar_width),
            ("x_axis_scale_height", self.x_axis_scale_height),
            ("tick_font_size", self.tick_font_size),
            ("label_font_size", self.label_font_size),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        let non_negative = [
            ("bar_corner_radius", self.bar_corner_radius),
            ("bar_bottom_padding", self.bar_bottom_padding),
            ("connector_width", self.connector_width),
            ("connector_height", self.connector_height),
            ("baseline_thickness", self.baseline_thickness),
            ("baseline_bottom_gap", self.baseline_bottom_gap),
            ("y_axis_scale_spacing", self.y_axis_scale_spacing),
            ("y_axis_text_width", self.y_axis_text_width),
            ("plot_start_padding", self.plot_start_padding),
            ("axis_canvas_bottom_padding", self.axis_canvas_bottom_padding),
            ("gridline_width", self.gridline_width),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
        }

        if self.bar_height_inset < 0.0 || self.bar_height_inset >= self.chart_height {
            return Err(ConfigError::Invalid(format!(
                "bar_height_inset must be in [0, chart_height), got {}",
                self.bar_height_inset
            )));
        }
        if self.axis_canvas_bottom_padding >= self.chart_height {
            return Err(ConfigError::Invalid(
                "axis_canvas_bottom_padding leaves no room for the axis".to_string(),
            ));
        }
        if self.gridline_dash.is_empty()
            || self.gridline_dash.iter().any(|d| !(d.is_finite() && *d > 0.0))
        {
            return Err(ConfigError::Invalid(
                "gridline_dash needs at least one positive length".to_string(),
            ));
        }
        if self.animation_duration_ms == 0 {
            return Err(ConfigError::Invalid(
                "animation_duration_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Height of the tallest bar.
    pub fn max_bar_height(&self) -> f32 {
        self.chart_height - self.bar_height_inset
    }

    /// Height of the y-axis canvas the tick positions are computed against.
    pub fn axis_canvas_height(&self) -> f32 {
        self.chart_height - self.axis_canvas_bottom_padding
    }

    /// Space reserved above the bar area for the top y-axis tick.
    ///
    /// The top tick sits `y_axis_scale_spacing` above the axis canvas, which
    /// itself starts `x_axis_scale_height` below the bar area top. Its label
    /// needs another `tick_font_size` above that.
    pub fn axis_headroom(&self) -> f32 {
        (self.y_axis_scale_spacing + self.tick_font_size - self.x_axis_scale_height).max(0.0)
    }

    /// Total widget height: axis headroom, bar area and the x-axis scale strip.
    pub fn total_height(&self) -> f32 {
        self.axis_headroom() + self.chart_height + self.x_axis_scale_height
    }

    pub fn animation_duration_secs(&self) -> f64 {
        self.animation_duration_ms as f64 / 1000.0
    }
}
