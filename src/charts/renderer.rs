//! Static Chart Renderer
//! Renders the settled commit chart to a bitmap with plotters.
//!
//! Same geometry as the interactive chart, with every bar at its final
//! height:
//! 1. Y-axis tick labels and dotted gridlines
//! 2. Bars
//! 3. Connectors, month labels and the baseline

use super::axis::ChartError;
use super::layout::{ChartGeometry, Rect};
use crate::config::{ChartConfig, Rgb};
use crate::data::SampleSeries;
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("{0}")]
    Chart(#[from] ChartError),
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid image size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color[0], color[1], color[2])
}

fn drawing_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Drawing(e.to_string())
}

/// Renders charts to RGB buffers, PNG bytes or PNG files.
pub struct StaticChartRenderer<'a> {
    config: &'a ChartConfig,
    draw_text: bool,
}

impl<'a> StaticChartRenderer<'a> {
    pub fn new(config: &'a ChartConfig) -> Self {
        Self {
            config,
            draw_text: true,
        }
    }

    /// Skip tick and month labels. Text needs a system font; shapes do not.
    pub fn without_text(mut self) -> Self {
        self.draw_text = false;
        self
    }

    /// Pixel size of a chart rendered at `width`, axis headroom included.
    pub fn image_size(&self, width: u32) -> (u32, u32) {
        (width, self.config.total_height().ceil() as u32)
    }

    fn layout(&self, series: &SampleSeries, width: u32) -> Result<ChartGeometry, RenderError> {
        let (w, h) = self.image_size(width);
        if w == 0 || h == 0 {
            return Err(RenderError::InvalidSize {
                width: w,
                height: h,
            });
        }
        Ok(ChartGeometry::compute(series, self.config, w as f32)?)
    }

    /// Render into a tightly packed RGB8 buffer.
    pub fn render_to_buffer(
        &self,
        series: &SampleSeries,
        width: u32,
    ) -> Result<(Vec<u8>, (u32, u32)), RenderError> {
        let geometry = self.layout(series, width)?;
        let (w, h) = self.image_size(width);
        let mut buffer = vec![0u8; (w as usize) * (h as usize) * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (w, h)).into_drawing_area();
            self.draw(&root, &geometry)?;
            root.present().map_err(drawing_err)?;
        }
        tracing::debug!(
            width = w,
            height = h,
            bars = geometry.bar_count(),
            "rendered chart buffer"
        );
        Ok((buffer, (w, h)))
    }

    /// Render and encode as PNG in memory.
    pub fn render_to_png_bytes(
        &self,
        series: &SampleSeries,
        width: u32,
    ) -> Result<Vec<u8>, RenderError> {
        let (buffer, (w, h)) = self.render_to_buffer(series, width)?;
        let image = RgbImage::from_raw(w, h, buffer).ok_or(RenderError::InvalidSize {
            width: w,
            height: h,
        })?;
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Render straight to a PNG file.
    pub fn render_to_file(
        &self,
        series: &SampleSeries,
        width: u32,
        path: &Path,
    ) -> Result<(), RenderError> {
        let geometry = self.layout(series, width)?;
        let size = self.image_size(width);
        let root = BitMapBackend::new(path, size).into_drawing_area();
        self.draw(&root, &geometry)?;
        root.present().map_err(drawing_err)?;
        tracing::info!(
            path = %path.display(),
            bars = geometry.bar_count(),
            "exported chart image"
        );
        Ok(())
    }

    fn draw(&self, area: &Area<'_>, geometry: &ChartGeometry) -> Result<(), RenderError> {
        area.fill(&rgb(self.config.background_color)).map_err(drawing_err)?;

        let text_color = rgb(self.config.text_color);
        let axis_color = rgb(self.config.axis_color);

        // Y-axis scale text
        let tick_style = ("sans-serif", self.config.tick_font_size as f64)
            .into_font()
            .color(&text_color)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        for tick in geometry.ticks.iter().filter(|_| self.draw_text) {
            area.draw(&Text::new(
                tick.text.clone(),
                (tick.x.round() as i32, tick.y.round() as i32),
                tick_style.clone(),
            ))
            .map_err(drawing_err)?;
        }

        // Dotted gridlines
        let grid_style = ShapeStyle {
            color: rgb(self.config.gridline_color).to_rgba(),
            filled: false,
            stroke_width: self.config.gridline_width.round().max(1.0) as u32,
        };
        for line in &geometry.gridlines {
            let y = line.y.round() as i32;
            for (start, end) in line.dashes(&geometry.dash) {
                area.draw(&PathElement::new(
                    vec![(start.round() as i32, y), (end.round() as i32, y)],
                    grid_style,
                ))
                .map_err(drawing_err)?;
            }
        }

        // Bars at full height
        let bar_style = rgb(self.config.bar_color).filled();
        for rect in geometry.settled_rects() {
            if rect.height > 0.0 {
                area.draw(&Rectangle::new(corners(rect), bar_style))
                    .map_err(drawing_err)?;
            }
        }

        // Connectors and month labels
        let label_style = ("sans-serif", self.config.label_font_size as f64)
            .into_font()
            .color(&text_color)
            .pos(Pos::new(HPos::Center, VPos::Top));
        for bar in &geometry.bars {
            area.draw(&Rectangle::new(corners(bar.connector), axis_color.filled()))
                .map_err(drawing_err)?;
            if !self.draw_text {
                continue;
            }
            area.draw(&Text::new(
                bar.label.clone(),
                (
                    bar.label_anchor.0.round() as i32,
                    bar.label_anchor.1.round() as i32,
                ),
                label_style.clone(),
            ))
            .map_err(drawing_err)?;
        }

        // Baseline
        area.draw(&Rectangle::new(corners(geometry.baseline), axis_color.filled()))
            .map_err(drawing_err)?;

        Ok(())
    }
}

fn corners(rect: Rect) -> [(i32, i32); 2] {
    [
        (rect.x.round() as i32, rect.y.round() as i32),
        (rect.right().round() as i32, rect.bottom().round() as i32),
    ]
}
