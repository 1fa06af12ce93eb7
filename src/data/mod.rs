//! Data module - Sample series and screen state

mod series;
mod state;

pub use series::{SampleSeries, SeriesError};
pub use state::{ScreenState, ViewModelState};
