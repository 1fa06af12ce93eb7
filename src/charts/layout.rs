//! Chart Layout Module
//! Pixel geometry of the commit bar chart, independent of any drawing backend.
//!
//! Layout (widget space, origin top-left, y down):
//! - Bar plot area starts at `plot_start_padding` and spans the available width
//!   minus the y-axis text width. Bars are distributed space-evenly.
//! - Each bar grows upward from `max_bar_height`; below it sit a short
//!   connector and the month label.
//! - A baseline band runs under all bars.
//! - The y-axis canvas starts `x_axis_scale_height` below the bar area top;
//!   tick labels and dotted gridlines are placed on it.
//! - The top tick lies above the bar area, so everything is shifted down by
//!   `ChartConfig::axis_headroom` to keep it inside the widget.

use super::axis::{AxisScale, AxisScaler, ChartError, DashPattern, Gridline};
use crate::config::ChartConfig;
use crate::data::SampleSeries;

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// Geometry of one bar and its x-axis decoration.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    pub index: usize,
    pub label: String,
    pub count: u32,
    /// Target height as a fraction of the tallest bar
    pub normalized: f32,
    pub center_x: f32,
    /// Bottom edge every bar grows from
    pub floor: f32,
    /// Height of a bar at normalized value 1
    pub full_height: f32,
    /// Horizontal extent allotted to this bar
    pub slot: (f32, f32),
    /// Bar at its settled height
    pub target: Rect,
    pub connector: Rect,
    /// Top-centre anchor of the month label
    pub label_anchor: (f32, f32),
}

impl BarGeometry {
    /// Bar rectangle at an animation progress given as a fraction of the
    /// tallest bar; bottom edge stays on the bar floor.
    pub fn bar_rect(&self, progress: f32) -> Rect {
        let height = self.full_height * progress.clamp(0.0, 1.0);
        Rect::new(self.target.x, self.floor - height, self.target.width, height)
    }
}

/// Y-axis label positioned in widget space.
#[derive(Debug, Clone, PartialEq)]
pub struct TickLabel {
    pub index: usize,
    pub text: String,
    /// Horizontal centre of the text
    pub x: f32,
    /// Text baseline
    pub y: f32,
}

/// Everything needed to draw the chart for one series.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    pub width: f32,
    pub height: f32,
    pub plot: Rect,
    pub bars: Vec<BarGeometry>,
    pub baseline: Rect,
    pub ticks: Vec<TickLabel>,
    pub gridlines: Vec<Gridline>,
    pub dash: DashPattern,
    /// Space between neighbouring bars and at both ends
    pub gap: f32,
    pub axis: AxisScale,
}

impl ChartGeometry {
    /// Lay out `series` in a widget of width `available_width`.
    ///
    /// Deterministic: the same inputs always give the same geometry.
    pub fn compute(
        series: &SampleSeries,
        config: &ChartConfig,
        available_width: f32,
    ) -> Result<Self, ChartError> {
        if !(available_width.is_finite() && available_width > 0.0) {
            return Err(ChartError::InvalidDimension {
                name: "available_width",
                value: available_width,
            });
        }
        let plot_width = available_width - config.y_axis_text_width;
        if plot_width <= 0.0 {
            return Err(ChartError::InvalidDimension {
                name: "plot_width",
                value: plot_width,
            });
        }

        let top = config.axis_headroom();
        let total_height = config.total_height();
        let plot = Rect::new(
            config.plot_start_padding,
            top,
            plot_width,
            config.chart_height + config.x_axis_scale_height,
        );

        // Axis
        let axis_top = top + config.x_axis_scale_height;
        let axis = AxisScaler::from_config(config)
            .scale(&series.values(), config.axis_canvas_height())?;
        let ticks = axis
            .ticks
            .iter()
            .map(|tick| TickLabel {
                index: tick.index,
                text: tick.label.clone(),
                x: config.y_axis_label_x,
                y: axis_top + tick.y,
            })
            .collect();
        let gridlines = axis
            .gridlines(
                config.y_axis_scale_spacing + config.y_axis_label_x,
                available_width,
            )
            .into_iter()
            .map(|line| Gridline {
                y: axis_top + line.y,
                ..line
            })
            .collect();

        // Bars
        let n = series.len() as f32;
        let gap = ((plot.width - n * config.bar_width) / (n + 1.0)).max(0.0);
        let max_bar_height = config.max_bar_height();
        let floor = top + max_bar_height;
        let connector_top = floor + config.bar_bottom_padding;

        let bars = series
            .iter()
            .zip(series.normalized_heights())
            .enumerate()
            .map(|(index, ((label, count), normalized))| {
                let left = plot.x + gap * (index as f32 + 1.0) + config.bar_width * index as f32;
                let center_x = left + config.bar_width / 2.0;
                let height = max_bar_height * normalized;
                BarGeometry {
                    index,
                    label: label.to_string(),
                    count,
                    normalized,
                    center_x,
                    floor,
                    full_height: max_bar_height,
                    slot: (left - gap / 2.0, left + config.bar_width + gap / 2.0),
                    target: Rect::new(left, floor - height, config.bar_width, height),
                    connector: Rect::new(
                        center_x - config.connector_width / 2.0,
                        connector_top,
                        config.connector_width,
                        config.connector_height,
                    ),
                    label_anchor: (center_x, connector_top + config.connector_height),
                }
            })
            .collect();

        let baseline_bottom = top + config.chart_height - config.baseline_bottom_gap;
        let baseline = Rect::new(
            plot.x,
            baseline_bottom - config.baseline_thickness,
            plot.width,
            config.baseline_thickness,
        );

        Ok(Self {
            width: available_width,
            height: total_height,
            plot,
            bars,
            baseline,
            ticks,
            gridlines,
            dash: DashPattern::from_config(config),
            gap,
            axis,
        })
    }

    pub fn bar_count(&self) -> usize {
        self.bars.len()
    }

    /// One month label per bar.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.bars.iter().map(|bar| bar.label.as_str())
    }

    /// Bar rectangles at the given per-bar progress. Missing entries draw at zero.
    pub fn bar_rects(&self, progress: &[f32]) -> Vec<Rect> {
        self.bars
            .iter()
            .enumerate()
            .map(|(i, bar)| bar.bar_rect(progress.get(i).copied().unwrap_or(0.0)))
            .collect()
    }

    /// Bar rectangles with every bar settled at its target.
    pub fn settled_rects(&self) -> Vec<Rect> {
        self.bars.iter().map(|bar| bar.target).collect()
    }
}
