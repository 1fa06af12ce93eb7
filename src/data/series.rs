//! Sample Series Module
//! Monthly commit counts paired with their month labels.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Malformed input handed to the chart. Never recovered from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    #[error("Invalid input: sample series is empty")]
    Empty,
    #[error("Invalid input: {labels} month labels but {values} commit counts")]
    LengthMismatch { labels: usize, values: usize },
}

#[derive(Deserialize)]
struct RawSeries {
    months: Vec<String>,
    commit_counts: Vec<u32>,
}

/// Ordered, non-empty list of (month, commit count) pairs.
///
/// Insertion order is chronological order. A series is immutable; the chart
/// only re-renders when it is handed a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSeries")]
pub struct SampleSeries {
    months: Vec<String>,
    commit_counts: Vec<u32>,
}

impl TryFrom<RawSeries> for SampleSeries {
    type Error = SeriesError;

    fn try_from(raw: RawSeries) -> Result<Self, Self::Error> {
        Self::new(raw.months, raw.commit_counts)
    }
}

impl SampleSeries {
    /// Build a series, rejecting empty and mismatched input.
    pub fn new(months: Vec<String>, commit_counts: Vec<u32>) -> Result<Self, SeriesError> {
        if months.len() != commit_counts.len() {
            return Err(SeriesError::LengthMismatch {
                labels: months.len(),
                values: commit_counts.len(),
            });
        }
        if months.is_empty() {
            return Err(SeriesError::Empty);
        }
        Ok(Self {
            months,
            commit_counts,
        })
    }

    /// Convenience constructor from `(label, count)` pairs.
    pub fn from_pairs<S: Into<String>>(
        pairs: impl IntoIterator<Item = (S, u32)>,
    ) -> Result<Self, SeriesError> {
        let (months, counts): (Vec<String>, Vec<u32>) =
            pairs.into_iter().map(|(m, c)| (m.into(), c)).unzip();
        Self::new(months, counts)
    }

    pub fn len(&self) -> usize {
        self.commit_counts.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.commit_counts.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.months
    }

    pub fn counts(&self) -> &[u32] {
        &self.commit_counts
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.months
            .iter()
            .map(String::as_str)
            .zip(self.commit_counts.iter().copied())
    }

    pub fn min(&self) -> u32 {
        self.commit_counts.iter().copied().min().unwrap_or(0)
    }

    pub fn max(&self) -> u32 {
        self.commit_counts.iter().copied().max().unwrap_or(0)
    }

    /// Count values as floats, the form the axis scaler consumes.
    pub fn values(&self) -> Vec<f64> {
        self.commit_counts.iter().map(|&c| c as f64).collect()
    }

    /// Each count divided by the series maximum, in `[0, 1]`.
    ///
    /// An all-zero series normalizes to all zeros.
    pub fn normalized_heights(&self) -> Vec<f32> {
        normalize(&self.commit_counts)
    }

    /// True when two series draw the same set of bars (same months, same order).
    pub fn same_bars(&self, other: &SampleSeries) -> bool {
        self.months == other.months
    }
}

/// `value / max(values)`, or 0 for every value when the maximum is 0.
pub(crate) fn normalize(values: &[u32]) -> Vec<f32> {
    let max = values.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return vec![0.0; values.len()];
    }
    let max = max as f64;
    values.iter().map(|&v| (v as f64 / max) as f32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn months(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalized_heights() {
        let series =
            SampleSeries::new(months(&["Jan", "Feb", "Mar", "Apr"]), vec![5, 10, 2, 8]).unwrap();
        assert_eq!(series.normalized_heights(), vec![0.5, 1.0, 0.2, 0.8]);
    }

    #[test]
    fn test_all_zero_series_normalizes_to_zero() {
        let series = SampleSeries::new(months(&["Jan", "Feb", "Mar"]), vec![0, 0, 0]).unwrap();
        assert_eq!(series.normalized_heights(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(
            SampleSeries::new(Vec::new(), Vec::new()).unwrap_err(),
            SeriesError::Empty
        );
    }

    #[test]
    fn test_rejects_mismatched_lengths() {
        let err = SampleSeries::new(months(&["Jan", "Feb"]), vec![1]).unwrap_err();
        assert_eq!(
            err,
            SeriesError::LengthMismatch {
                labels: 2,
                values: 1
            }
        );
    }

    #[test]
    fn test_min_max() {
        let series = SampleSeries::from_pairs([("Jan", 7), ("Feb", 3), ("Mar", 12)]).unwrap();
        assert_eq!(series.min(), 3);
        assert_eq!(series.max(), 12);
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: SampleSeries =
            serde_json::from_str(r#"{ "months": ["Jan"], "commit_counts": [4] }"#).unwrap();
        assert_eq!(ok.counts(), &[4]);

        let bad = serde_json::from_str::<SampleSeries>(
            r#"{ "months": ["Jan", "Feb"], "commit_counts": [4] }"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_same_bars_ignores_values() {
        let a = SampleSeries::from_pairs([("Jan", 1), ("Feb", 2)]).unwrap();
        let b = SampleSeries::from_pairs([("Jan", 9), ("Feb", 0)]).unwrap();
        let c = SampleSeries::from_pairs([("Feb", 1), ("Mar", 2)]).unwrap();
        assert!(a.same_bars(&b));
        assert!(!a.same_bars(&c));
    }
}
