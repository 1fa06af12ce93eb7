//! Screen State Module
//! Maps the view-model's loose flags onto one exclusive display state.

use super::series::{SampleSeries, SeriesError};

/// Snapshot published by the data-fetching collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewModelState {
    pub is_loading: bool,
    pub error: String,
    pub month_labels: Vec<String>,
    pub commit_counts: Vec<u32>,
}

impl ViewModelState {
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Default::default()
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            ..Default::default()
        }
    }

    pub fn loaded(series: &SampleSeries) -> Self {
        Self {
            month_labels: series.labels().to_vec(),
            commit_counts: series.counts().to_vec(),
            ..Default::default()
        }
    }
}

/// What the commit stats screen shows. Exactly one case is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenState {
    /// Progress indicator
    Loading,
    /// Error text, shown verbatim
    Error(String),
    /// The bar chart
    Ready(SampleSeries),
    /// Nothing to show yet
    Idle,
}

impl Default for ScreenState {
    fn default() -> Self {
        ScreenState::Idle
    }
}

impl ScreenState {
    /// Resolve a view-model snapshot.
    ///
    /// Precedence is loading, then error, then data. Data that is present but
    /// has mismatched lengths is rejected rather than partially drawn.
    pub fn resolve(state: &ViewModelState) -> Result<Self, SeriesError> {
        if state.is_loading {
            return Ok(ScreenState::Loading);
        }
        if !state.error.is_empty() {
            return Ok(ScreenState::Error(state.error.clone()));
        }
        if state.month_labels.is_empty() && state.commit_counts.is_empty() {
            return Ok(ScreenState::Idle);
        }
        SampleSeries::new(state.month_labels.clone(), state.commit_counts.clone())
            .map(ScreenState::Ready)
    }

    pub fn series(&self) -> Option<&SampleSeries> {
        match self {
            ScreenState::Ready(series) => Some(series),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ScreenState::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_wins_over_everything() {
        let state = ViewModelState {
            is_loading: true,
            error: "boom".to_string(),
            month_labels: vec!["Jan".to_string()],
            commit_counts: vec![1],
        };
        assert_eq!(ScreenState::resolve(&state).unwrap(), ScreenState::Loading);
    }

    #[test]
    fn test_error_wins_over_data() {
        let state = ViewModelState {
            error: "Network unreachable".to_string(),
            month_labels: vec!["Jan".to_string()],
            commit_counts: vec![1],
            ..Default::default()
        };
        assert_eq!(
            ScreenState::resolve(&state).unwrap(),
            ScreenState::Error("Network unreachable".to_string())
        );
    }

    #[test]
    fn test_empty_state_is_idle() {
        let state = ViewModelState::default();
        assert_eq!(ScreenState::resolve(&state).unwrap(), ScreenState::Idle);
    }

    #[test]
    fn test_mismatched_data_is_rejected() {
        let state = ViewModelState {
            month_labels: vec!["Jan".to_string(), "Feb".to_string()],
            commit_counts: vec![3],
            ..Default::default()
        };
        assert!(matches!(
            ScreenState::resolve(&state),
            Err(SeriesError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_loaded_round_trips_series() {
        let series = SampleSeries::from_pairs([("Jan", 2), ("Feb", 5)]).unwrap();
        let resolved = ScreenState::resolve(&ViewModelState::loaded(&series)).unwrap();
        assert_eq!(resolved.series(), Some(&series));
        assert!(!resolved.is_loading());
        assert_eq!(resolved.error(), None);
    }
}
