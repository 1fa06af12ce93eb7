//! Commit Stats Screen
//! Shows exactly one of: progress indicator, error text, or the animated chart.

use crate::charts::{
    to_color32, ChartAnimator, ChartError, ChartGeometry, ChartPlotter, PaintedCounts,
    SyncOutcome,
};
use crate::config::ChartConfig;
use crate::data::{SampleSeries, ScreenState};
use egui::{RichText, Spinner};

/// What the screen put on screen for a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenView {
    Spinner,
    ErrorText(String),
    /// Elements the plotter actually painted inside the widget
    Chart(PaintedCounts),
    Nothing,
}

/// Single-screen commit chart: owns the per-bar animations across frames.
pub struct CommitStatsScreen {
    config: ChartConfig,
    animator: ChartAnimator,
    last_layout_error: Option<ChartError>,
}

impl CommitStatsScreen {
    pub fn new(config: ChartConfig) -> Self {
        let animator = ChartAnimator::new(&config);
        Self {
            config,
            animator,
            last_layout_error: None,
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// True while any bar is still growing.
    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    /// Draw the screen for `state`.
    pub fn show(&mut self, ui: &mut egui::Ui, state: &ScreenState) -> ScreenView {
        match state {
            ScreenState::Loading => {
                self.teardown();
                ui.centered_and_justified(|ui| {
                    ui.add(Spinner::new().size(36.0));
                });
                ScreenView::Spinner
            }
            ScreenState::Error(message) => {
                self.teardown();
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new(message)
                            .size(16.0)
                            .color(to_color32(self.config.error_color)),
                    );
                });
                ScreenView::ErrorText(message.clone())
            }
            ScreenState::Ready(series) => self.show_chart(ui, series),
            ScreenState::Idle => {
                self.teardown();
                ScreenView::Nothing
            }
        }
    }

    fn teardown(&mut self) {
        if self.animator.teardown() {
            tracing::debug!("tore down bar animations");
        }
    }

    fn show_chart(&mut self, ui: &mut egui::Ui, series: &SampleSeries) -> ScreenView {
        let geometry = match ChartGeometry::compute(series, &self.config, ui.available_width()) {
            Ok(geometry) => {
                self.last_layout_error = None;
                geometry
            }
            Err(e) => {
                if self.last_layout_error.as_ref() != Some(&e) {
                    tracing::warn!(error = %e, "chart layout failed, drawing nothing");
                    self.last_layout_error = Some(e);
                }
                return ScreenView::Nothing;
            }
        };

        let now = ui.input(|i| i.time);
        match self.animator.sync(series, now) {
            SyncOutcome::Remounted => {
                tracing::debug!(bars = self.animator.bar_count(), "mounted bar animations");
            }
            SyncOutcome::Retargeted => {
                tracing::debug!(bars = self.animator.bar_count(), "retargeted bar animations");
            }
            SyncOutcome::Unchanged => {}
        }
        let progress = self.animator.tick(now);

        let painted = ui
            .vertical_centered(|ui| {
                let (_, painted) = ChartPlotter::new(&self.config).draw(ui, &geometry, &progress);
                painted
            })
            .inner;

        if self.animator.is_running() {
            ui.ctx().request_repaint();
        }

        ScreenView::Chart(painted)
    }
}
