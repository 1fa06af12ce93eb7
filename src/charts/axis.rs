//! Axis Scaler Module
//! Derives the y-axis tick labels, their positions and the dotted gridlines.
//!
//! Coordinates are in the y-axis canvas space: origin at the canvas top-left,
//! y growing downwards.

use crate::config::ChartConfig;
use crate::data::SeriesError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("{0}")]
    InvalidInput(#[from] SeriesError),
    #[error("Invalid input: value {value} at index {index} is not a non-negative number")]
    InvalidValue { index: usize, value: f64 },
    #[error("Invalid input: {name} must be positive, got {value}")]
    InvalidDimension { name: &'static str, value: f32 },
}

/// One y-axis reference label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub index: usize,
    /// Rounded tick value
    pub value: i64,
    pub label: String,
    /// Canvas y-coordinate
    pub y: f32,
    /// Distance above the canvas bottom
    pub elevation: f32,
}

/// Horizontal gridline drawn at a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gridline {
    pub tick_index: usize,
    pub y: f32,
    pub x_start: f32,
    pub x_end: f32,
}

impl Gridline {
    /// The visible dash spans of this line.
    pub fn dashes(&self, pattern: &DashPattern) -> Vec<(f32, f32)> {
        pattern.segments(self.x_start, self.x_end)
    }
}

/// Alternating on/off stroke lengths, starting with "on".
#[derive(Debug, Clone, PartialEq)]
pub struct DashPattern {
    lengths: Vec<f32>,
}

impl DashPattern {
    /// Returns `None` when no positive length is given.
    pub fn new(lengths: Vec<f32>) -> Option<Self> {
        if lengths.is_empty() || lengths.iter().any(|l| !(l.is_finite() && *l > 0.0)) {
            return None;
        }
        Some(Self { lengths })
    }

    pub fn dashed(on: f32, off: f32) -> Option<Self> {
        Self::new(vec![on, off])
    }

    pub fn from_config(config: &ChartConfig) -> Self {
        Self::new(config.gridline_dash.clone()).unwrap_or_default()
    }

    pub fn cycle_length(&self) -> f32 {
        self.lengths.iter().sum()
    }

    /// Split `[start, end]` into the "on" spans of the pattern.
    pub fn segments(&self, start: f32, end: f32) -> Vec<(f32, f32)> {
        let mut spans = Vec::new();
        if end <= start {
            return spans;
        }

        let mut x = start;
        let mut on = true;
        for length in self.lengths.iter().cycle() {
            if x >= end {
                break;
            }
            let next = (x + length).min(end);
            if on {
                spans.push((x, next));
            }
            x = next;
            // Odd-length patterns alternate on/off across cycles.
            on = !on;
        }
        spans
    }
}

impl Default for DashPattern {
    fn default() -> Self {
        Self {
            lengths: vec![10.0, 10.0],
        }
    }
}

/// Ticks and gridline positions for one series.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisScale {
    pub ticks: Vec<Tick>,
    pub canvas_height: f32,
    /// Value distance between neighbouring ticks
    pub step: f64,
}

impl AxisScale {
    /// Gridlines for ticks 1..=3. Tick 0 sits on the baseline and gets none.
    pub fn gridlines(&self, x_start: f32, x_end: f32) -> Vec<Gridline> {
        self.ticks
            .iter()
            .skip(1)
            .map(|tick| Gridline {
                tick_index: tick.index,
                y: tick.y,
                x_start,
                x_end,
            })
            .collect()
    }

    /// True when every tick carries the same label.
    pub fn is_degenerate(&self) -> bool {
        self.step == 0.0
    }
}

/// Evenly spaced y-axis reference labels.
///
/// `label[i] = round(min + i * max / 3)` and
/// `y[i] = canvas_height - top_inset - i * canvas_height / 3`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScaler {
    top_inset: f32,
    from_zero: bool,
}

impl AxisScaler {
    pub const TICK_COUNT: usize = 4;

    pub fn new(top_inset: f32) -> Self {
        Self {
            top_inset,
            from_zero: false,
        }
    }

    pub fn from_config(config: &ChartConfig) -> Self {
        Self::new(config.y_axis_scale_spacing).anchored_at_zero(config.axis_from_zero)
    }

    /// Take the minimum as zero regardless of the data.
    pub fn anchored_at_zero(mut self, from_zero: bool) -> Self {
        self.from_zero = from_zero;
        self
    }

    pub fn scale(&self, values: &[f64], canvas_height: f32) -> Result<AxisScale, ChartError> {
        if values.is_empty() {
            return Err(SeriesError::Empty.into());
        }
        if !(canvas_height.is_finite() && canvas_height > 0.0) {
            return Err(ChartError::InvalidDimension {
                name: "canvas_height",
                value: canvas_height,
            });
        }
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(v.is_finite() && **v >= 0.0))
        {
            return Err(ChartError::InvalidValue { index, value });
        }

        let max = values.iter().copied().fold(0.0_f64, f64::max);
        let min = if self.from_zero {
            0.0
        } else {
            values.iter().copied().fold(f64::INFINITY, f64::min)
        };

        let segments = (Self::TICK_COUNT - 1) as f64;
        let step = max / segments;
        let row_height = canvas_height / (Self::TICK_COUNT - 1) as f32;

        let ticks = (0..Self::TICK_COUNT)
            .map(|i| {
                let value = (min + step * i as f64).round_ties_even() as i64;
                let elevation = self.top_inset + i as f32 * row_height;
                Tick {
                    index: i,
                    value,
                    label: value.to_string(),
                    y: canvas_height - elevation,
                    elevation,
                }
            })
            .collect();

        Ok(AxisScale {
            ticks,
            canvas_height,
            step,
        })
    }
}
