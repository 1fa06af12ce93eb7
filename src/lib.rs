//! Commit Stats Chart - Animated monthly commit bar chart
//!
//! Turns a series of monthly commit counts into a laid-out, animated bar
//! chart with y-axis ticks and dotted gridlines, drawn with egui or exported
//! as a PNG with plotters.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod logging;

pub use charts::{ChartAnimator, ChartError, ChartGeometry, RenderError, StaticChartRenderer};
pub use config::{ChartConfig, ConfigError};
pub use data::{SampleSeries, ScreenState, SeriesError, ViewModelState};
