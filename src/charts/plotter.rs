//! Chart Plotter Module
//! Paints the commit bar chart with the egui painter.

use super::layout::{ChartGeometry, Rect};
use crate::config::{ChartConfig, Rgb};
use egui::{Align2, Color32, FontId, Pos2, Rounding, Sense, Stroke};

/// Convert a config color to egui.
pub fn to_color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

/// What one `ChartPlotter::draw` call actually put inside the chart widget.
///
/// Elements whose anchor falls outside the painter's clip rect are not
/// counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaintedCounts {
    /// Bar slots, including bars currently at zero height
    pub bars: usize,
    pub month_labels: usize,
    pub tick_labels: usize,
    /// Gridlines with at least one visible dash
    pub gridlines: usize,
    pub dashes: usize,
}

/// Draws a laid-out chart into an egui `Ui`.
pub struct ChartPlotter<'a> {
    config: &'a ChartConfig,
}

impl<'a> ChartPlotter<'a> {
    pub fn new(config: &'a ChartConfig) -> Self {
        Self { config }
    }

    /// Allocate the chart's space and paint it. `progress` holds the current
    /// height of each bar as a fraction of the tallest bar.
    pub fn draw(
        &self,
        ui: &mut egui::Ui,
        geometry: &ChartGeometry,
        progress: &[f32],
    ) -> (egui::Response, PaintedCounts) {
        let (response, painter) =
            ui.allocate_painter(egui::vec2(geometry.width, geometry.height), Sense::hover());
        let origin = response.rect.min;
        let clip = painter.clip_rect();
        let to_screen = |x: f32, y: f32| Pos2::new(origin.x + x, origin.y + y);
        let to_rect = |r: Rect| {
            egui::Rect::from_min_size(to_screen(r.x, r.y), egui::vec2(r.width, r.height))
        };
        let mut counts = PaintedCounts::default();

        let text_color = to_color32(self.config.text_color);
        let axis_color = to_color32(self.config.axis_color);

        // Y-axis scale text
        for tick in &geometry.ticks {
            let anchor = to_screen(tick.x, tick.y);
            painter.text(
                anchor,
                Align2::CENTER_BOTTOM,
                &tick.text,
                FontId::proportional(self.config.tick_font_size),
                text_color,
            );
            if clip.contains(anchor) {
                counts.tick_labels += 1;
            }
        }

        // Dotted gridlines
        let grid_stroke = Stroke::new(
            self.config.gridline_width,
            to_color32(self.config.gridline_color),
        );
        for line in &geometry.gridlines {
            let mut visible = 0;
            for (start, end) in line.dashes(&geometry.dash) {
                let ends = [to_screen(start, line.y), to_screen(end, line.y)];
                painter.line_segment(ends, grid_stroke);
                if clip.contains(ends[0]) {
                    visible += 1;
                }
            }
            if visible > 0 {
                counts.gridlines += 1;
                counts.dashes += visible;
            }
        }

        // Bars with rounded top corners
        let radius = self.config.bar_corner_radius;
        let bar_rounding = Rounding {
            nw: radius,
            ne: radius,
            sw: 0.0,
            se: 0.0,
        };
        let bar_color = to_color32(self.config.bar_color);
        for rect in geometry.bar_rects(progress) {
            let rect = to_rect(rect);
            if rect.height() > 0.0 {
                painter.rect_filled(rect, bar_rounding, bar_color);
            }
            if clip.contains(rect.min) && clip.contains(rect.max) {
                counts.bars += 1;
            }
        }

        // Connectors and month labels
        let connector_rounding = Rounding {
            nw: 0.0,
            ne: 0.0,
            sw: 2.0,
            se: 2.0,
        };
        for bar in &geometry.bars {
            painter.rect_filled(to_rect(bar.connector), connector_rounding, axis_color);
            let anchor = to_screen(bar.label_anchor.0, bar.label_anchor.1);
            painter.text(
                anchor,
                Align2::CENTER_TOP,
                &bar.label,
                FontId::proportional(self.config.label_font_size),
                text_color,
            );
            if clip.contains(anchor) {
                counts.month_labels += 1;
            }
        }

        // Baseline under all bars
        painter.rect_filled(to_rect(geometry.baseline), Rounding::same(2.0), axis_color);

        (response, counts)
    }
}
