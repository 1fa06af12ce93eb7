// tests/chart_properties.rs

use commit_stats_chart::charts::{AxisScaler, ChartGeometry};
use commit_stats_chart::{ChartConfig, ChartError, SampleSeries, SeriesError};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Deterministic spread of series shapes: lengths 1..=12, mixed magnitudes.
fn sample_series_set() -> Vec<SampleSeries> {
    let mut all = Vec::new();
    let mut seed: u32 = 7;
    for len in 1..=12 {
        for _ in 0..4 {
            let counts: Vec<u32> = (0..len)
                .map(|_| {
                    seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                    (seed >> 16) % 500
                })
                .collect();
            let months = MONTHS[..len].iter().map(|m| m.to_string()).collect();
            if let Ok(series) = SampleSeries::new(months, counts) {
                all.push(series);
            }
        }
    }
    all
}

#[test]
fn normalization_peaks_at_one() {
    for series in sample_series_set() {
        if series.max() == 0 {
            continue;
        }
        let heights = series.normalized_heights();
        let max = heights.iter().copied().fold(f32::MIN, f32::max);
        let min = heights.iter().copied().fold(f32::MAX, f32::min);
        assert_eq!(max, 1.0, "series {:?}", series.counts());
        assert!(min >= 0.0);
    }
}

#[test]
fn all_zero_series_has_flat_defined_heights() {
    let series = SampleSeries::from_pairs([("Jan", 0), ("Feb", 0), ("Mar", 0)]).unwrap();
    assert_eq!(series.normalized_heights(), vec![0.0, 0.0, 0.0]);

    let config = ChartConfig::default();
    let geometry = ChartGeometry::compute(&series, &config, 480.0).unwrap();
    assert_eq!(geometry.bar_count(), 3);
    assert!(geometry.settled_rects().iter().all(|r| r.height == 0.0));
}

#[test]
fn tick_elevations_increase_bottom_to_top() {
    let scaler = AxisScaler::new(100.0);
    for series in sample_series_set() {
        if series.max() == 0 {
            continue;
        }
        let scale = scaler.scale(&series.values(), 290.0).unwrap();
        assert_eq!(scale.ticks.len(), AxisScaler::TICK_COUNT);
        for pair in scale.ticks.windows(2) {
            assert!(pair[1].elevation > pair[0].elevation);
        }
    }
}

#[test]
fn tick_labels_follow_min_plus_step() {
    let scale = AxisScaler::new(100.0).scale(&[5.0, 10.0, 2.0, 8.0], 290.0).unwrap();
    let expected: Vec<i64> = (0..4)
        .map(|i| (2.0 + i as f64 * 10.0 / 3.0).round_ties_even() as i64)
        .collect();
    let actual: Vec<i64> = scale.ticks.iter().map(|t| t.value).collect();
    assert_eq!(actual, expected);
}

#[test]
fn bar_and_label_counts_match_months() {
    let config = ChartConfig::default();
    for series in sample_series_set() {
        let geometry = ChartGeometry::compute(&series, &config, 480.0).unwrap();
        assert_eq!(geometry.bar_count(), series.len());
        assert_eq!(geometry.labels().count(), series.len());
        let labels: Vec<&str> = geometry.labels().collect();
        assert_eq!(labels, series.labels().iter().map(String::as_str).collect::<Vec<_>>());
    }
}

#[test]
fn layout_is_idempotent() {
    let config = ChartConfig::default();
    for series in sample_series_set() {
        let first = ChartGeometry::compute(&series, &config, 480.0).unwrap();
        let second = ChartGeometry::compute(&series, &config, 480.0).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn scenario_a_feb_reaches_full_height() {
    let config = ChartConfig::default();
    let series =
        SampleSeries::from_pairs([("Jan", 5), ("Feb", 10), ("Mar", 2), ("Apr", 8)]).unwrap();
    assert_eq!(series.normalized_heights(), vec![0.5, 1.0, 0.2, 0.8]);

    let geometry = ChartGeometry::compute(&series, &config, 480.0).unwrap();
    assert_eq!(geometry.bar_count(), 4);

    let feb = &geometry.bars[1];
    assert_eq!(feb.label, "Feb");
    assert_eq!(feb.bar_rect(1.0).height, config.max_bar_height());
    assert_eq!(feb.target.height, config.max_bar_height());
    for bar in &geometry.bars {
        assert!(bar.target.height <= feb.target.height);
    }
}

#[test]
fn empty_input_is_invalid() {
    assert_eq!(
        SampleSeries::new(Vec::new(), Vec::new()).unwrap_err(),
        SeriesError::Empty
    );
    assert_eq!(
        AxisScaler::new(100.0).scale(&[], 290.0).unwrap_err(),
        ChartError::InvalidInput(SeriesError::Empty)
    );
}

#[test]
fn gridlines_are_dashed_ten_on_ten_off() {
    let config = ChartConfig::default();
    let series = SampleSeries::from_pairs([("Jan", 3), ("Feb", 6)]).unwrap();
    let geometry = ChartGeometry::compute(&series, &config, 480.0).unwrap();

    assert_eq!(geometry.gridlines.len(), 3);
    for line in &geometry.gridlines {
        let dashes = line.dashes(&geometry.dash);
        assert!(!dashes.is_empty());
        assert_eq!(dashes[0].0, line.x_start);
        for (start, end) in &dashes {
            assert!(end - start <= 10.0 + 1e-3);
        }
        for pair in dashes.windows(2) {
            assert!((pair[1].0 - pair[0].1 - 10.0).abs() < 1e-3);
        }
    }
}
