//! Commit Stats Main Application
//! Title bar over the commit stats screen, fed by a background data source.

use crate::config::ChartConfig;
use crate::data::{SampleSeries, ScreenState, ViewModelState};
use crate::gui::CommitStatsScreen;
use egui::{RichText, TopBottomPanel};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

pub const APP_TITLE: &str = "Commit Statistics";

/// Where the demo data source reads its series from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesSource {
    /// Built-in twelve month sample
    Sample,
    /// JSON file: `{ "months": [...], "commit_counts": [...] }`
    File(PathBuf),
}

impl SeriesSource {
    /// Load the series synchronously.
    pub fn load(&self) -> anyhow::Result<SampleSeries> {
        match self {
            SeriesSource::Sample => Ok(sample_series()?),
            SeriesSource::File(path) => {
                let contents = std::fs::read_to_string(path)
                    .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
                let series = serde_json::from_str(&contents)
                    .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
                Ok(series)
            }
        }
    }
}

/// Twelve months of commit counts used when no data file is given.
pub fn sample_series() -> Result<SampleSeries, crate::data::SeriesError> {
    SampleSeries::from_pairs([
        ("Jan", 12),
        ("Feb", 30),
        ("Mar", 18),
        ("Apr", 42),
        ("May", 27),
        ("Jun", 9),
        ("Jul", 35),
        ("Aug", 22),
        ("Sep", 48),
        ("Oct", 31),
        ("Nov", 16),
        ("Dec", 25),
    ])
}

/// Run the data source on a background thread.
///
/// Publishes a loading snapshot first, then either the series or the error
/// text, the way the view-model would.
pub fn spawn_series_loader(source: SeriesSource) -> Receiver<ViewModelState> {
    let (tx, rx) = channel();
    thread::spawn(move || {
        let _ = tx.send(ViewModelState::loading());
        let snapshot = match source.load() {
            Ok(series) => {
                tracing::info!(months = series.len(), "commit series loaded");
                ViewModelState::loaded(&series)
            }
            Err(e) => {
                tracing::warn!(error = %e, "commit series failed to load");
                ViewModelState::failed(e.to_string())
            }
        };
        let _ = tx.send(snapshot);
    });
    rx
}

/// Main application window.
pub struct CommitStatsApp {
    screen: CommitStatsScreen,
    state: ScreenState,
    state_rx: Option<Receiver<ViewModelState>>,
}

impl CommitStatsApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: ChartConfig,
        state_rx: Receiver<ViewModelState>,
    ) -> Self {
        Self::with_receiver(config, state_rx)
    }

    /// Build without an eframe creation context.
    pub fn with_receiver(config: ChartConfig, state_rx: Receiver<ViewModelState>) -> Self {
        Self {
            screen: CommitStatsScreen::new(config),
            state: ScreenState::Idle,
            state_rx: Some(state_rx),
        }
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    /// Drain pending view-model snapshots; the last one wins.
    pub fn poll_state(&mut self) {
        let rx = self.state_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            loop {
                match rx.try_recv() {
                    Ok(snapshot) => self.apply(&snapshot),
                    Err(std::sync::mpsc::TryRecvError::Empty) => break,
                    Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                        should_keep_receiver = false;
                        break;
                    }
                }
            }

            if should_keep_receiver {
                self.state_rx = Some(rx);
            }
        }
    }

    /// Resolve one snapshot. A malformed series is never drawn.
    pub fn apply(&mut self, snapshot: &ViewModelState) {
        match ScreenState::resolve(snapshot) {
            Ok(state) => self.state = state,
            Err(e) => {
                tracing::error!(error = %e, "rejected malformed commit series");
                self.state = ScreenState::Idle;
            }
        }
    }

    /// Draw one frame.
    pub fn ui(&mut self, ctx: &egui::Context) {
        self.poll_state();

        // Keep polling until the source hangs up.
        if self.state_rx.is_some() {
            ctx.request_repaint();
        }

        TopBottomPanel::top("app_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.label(RichText::new(APP_TITLE).size(20.0).strong());
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(30.0);
            self.screen.show(ui, &self.state);
        });
    }
}

impl eframe::App for CommitStatsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}
