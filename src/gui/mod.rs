//! GUI module - User interface components

mod app;
mod chart_viewer;

pub use app::{sample_series, spawn_series_loader, CommitStatsApp, SeriesSource, APP_TITLE};
pub use chart_viewer::{CommitStatsScreen, ScreenView};
