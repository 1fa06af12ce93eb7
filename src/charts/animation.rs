//! Bar Animation Module
//! One-shot growth animation per bar, driven by the host's frame clock.
//!
//! Each bar owns its own progress; bars never share mutable state. Time is
//! passed in explicitly as seconds so the host decides what "now" is.

use crate::config::ChartConfig;
use crate::data::SampleSeries;
use serde::{Deserialize, Serialize};

/// Interpolation curves for bar growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Cubic Bézier (0.4, 0.0, 0.2, 1.0): quick start, long settle
    #[default]
    FastOutSlowIn,
    /// Cubic Bézier (0.42, 0.0, 0.58, 1.0)
    EaseInOut,
}

impl Easing {
    /// Map linear time in `[0, 1]` to eased progress in `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
        }
    }
}

/// Evaluate a CSS-style cubic Bézier timing curve at `x`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    fn component(p1: f32, p2: f32, s: f32) -> f32 {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
    }

    // x(s) is monotonic for control points inside [0, 1]; bisect for s.
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    let mut s = x;
    for _ in 0..32 {
        let value = component(x1, x2, s);
        if (value - x).abs() < 1e-6 {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) * 0.5;
    }
    component(y1, y2, s)
}

/// Lifecycle of a single bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarPhase {
    Unmounted,
    Animating,
    Settled,
}

/// Growth animation of one bar, from its displayed height to its target.
#[derive(Debug, Clone, PartialEq)]
pub struct BarAnimation {
    phase: BarPhase,
    from: f32,
    target: f32,
    current: f32,
    started_at: f64,
    duration: f64,
    easing: Easing,
}

impl BarAnimation {
    /// `duration` is in seconds.
    pub fn new(target: f32, duration: f64, easing: Easing) -> Self {
        Self {
            phase: BarPhase::Unmounted,
            from: 0.0,
            target,
            current: 0.0,
            started_at: 0.0,
            duration,
            easing,
        }
    }

    pub fn phase(&self) -> BarPhase {
        self.phase
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Displayed height as a fraction of the tallest bar.
    pub fn current(&self) -> f32 {
        self.current
    }

    /// First appearance. Only an unmounted bar starts growing; later calls do nothing.
    pub fn mount(&mut self, now: f64) {
        if self.phase != BarPhase::Unmounted {
            return;
        }
        self.from = 0.0;
        self.current = 0.0;
        self.start(now);
    }

    /// Restart from the displayed height toward a new target.
    pub fn retarget(&mut self, target: f32, now: f64) {
        if self.phase == BarPhase::Unmounted {
            self.target = target;
            return;
        }
        if (self.target - target).abs() <= f32::EPSILON {
            return;
        }
        self.from = self.current;
        self.target = target;
        self.start(now);
    }

    /// Teardown: drop any in-flight transition and return to unmounted.
    pub fn cancel(&mut self) {
        self.phase = BarPhase::Unmounted;
        self.from = 0.0;
        self.current = 0.0;
    }

    /// Advance to `now` and return the displayed height.
    pub fn tick(&mut self, now: f64) -> f32 {
        if self.phase != BarPhase::Animating {
            return self.current;
        }

        let elapsed = (now - self.started_at).max(0.0);
        if self.duration <= 0.0 || elapsed >= self.duration {
            self.current = self.target;
            self.phase = BarPhase::Settled;
            return self.current;
        }

        let t = (elapsed / self.duration) as f32;
        let eased = self.easing.apply(t);
        self.current = self.from + (self.target - self.from) * eased;
        self.current
    }

    fn start(&mut self, now: f64) {
        self.started_at = now;
        self.phase = BarPhase::Animating;
    }
}

/// What `ChartAnimator::sync` did with a new series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Different bars: everything torn down and grown again from zero
    Remounted,
    /// Same bars, new values: each bar restarts from where it is
    Retargeted,
    Unchanged,
}

/// Per-bar animations for the whole chart.
#[derive(Debug, Clone)]
pub struct ChartAnimator {
    bars: Vec<BarAnimation>,
    series: Option<SampleSeries>,
    duration: f64,
    easing: Easing,
}

impl ChartAnimator {
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            bars: Vec::new(),
            series: None,
            duration: config.animation_duration_secs(),
            easing: config.easing,
        }
    }

    /// Bring the animations in line with `series`.
    pub fn sync(&mut self, series: &SampleSeries, now: f64) -> SyncOutcome {
        let targets = series.normalized_heights();

        let same_bars = self
            .series
            .as_ref()
            .is_some_and(|current| current.same_bars(series));

        if !same_bars {
            self.teardown();
            self.bars = targets
                .iter()
                .map(|&target| BarAnimation::new(target, self.duration, self.easing))
                .collect();
            for bar in &mut self.bars {
                bar.mount(now);
            }
            self.series = Some(series.clone());
            return SyncOutcome::Remounted;
        }

        if self.series.as_ref() == Some(series) {
            return SyncOutcome::Unchanged;
        }

        for (bar, &target) in self.bars.iter_mut().zip(&targets) {
            bar.retarget(target, now);
        }
        self.series = Some(series.clone());
        SyncOutcome::Retargeted
    }

    /// Advance every bar and return the displayed heights.
    pub fn tick(&mut self, now: f64) -> Vec<f32> {
        self.bars.iter_mut().map(|bar| bar.tick(now)).collect()
    }

    pub fn progress(&self) -> Vec<f32> {
        self.bars.iter().map(BarAnimation::current).collect()
    }

    pub fn phases(&self) -> Vec<BarPhase> {
        self.bars.iter().map(BarAnimation::phase).collect()
    }

    pub fn is_running(&self) -> bool {
        self.bars.iter().any(|bar| bar.phase() == BarPhase::Animating)
    }

    pub fn bar_count(&self) -> usize {
        self.bars.len()
    }

    /// Cancel every bar and forget the series. Returns false when there was
    /// nothing mounted.
    pub fn teardown(&mut self) -> bool {
        if self.bars.is_empty() {
            return false;
        }
        for bar in &mut self.bars {
            bar.cancel();
        }
        self.bars.clear();
        self.series = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::FastOutSlowIn, Easing::EaseInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
        }
    }

    #[test]
    fn test_fast_out_slow_in_is_monotonic() {
        let mut last = 0.0;
        for i in 1..=100 {
            let v = Easing::FastOutSlowIn.apply(i as f32 / 100.0);
            assert!(v >= last);
            last = v;
        }
        // Front-loaded: past the halfway mark well before half the time.
        assert!(Easing::FastOutSlowIn.apply(0.5) > 0.7);
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        assert!(approx(Easing::EaseInOut.apply(0.5), 0.5));
    }

    #[test]
    fn test_bar_lifecycle() {
        let mut bar = BarAnimation::new(0.8, 1.0, Easing::Linear);
        assert_eq!(bar.phase(), BarPhase::Unmounted);
        assert_eq!(bar.tick(5.0), 0.0);

        bar.mount(10.0);
        assert_eq!(bar.phase(), BarPhase::Animating);
        assert!(approx(bar.tick(10.5), 0.4));

        assert_eq!(bar.tick(11.0), 0.8);
        assert_eq!(bar.phase(), BarPhase::Settled);
    }

    #[test]
    fn test_mount_is_one_shot() {
        let mut bar = BarAnimation::new(1.0, 1.0, Easing::Linear);
        bar.mount(0.0);
        bar.tick(2.0);
        bar.mount(3.0);
        assert_eq!(bar.phase(), BarPhase::Settled);
        assert_eq!(bar.current(), 1.0);
    }

    #[test]
    fn test_retarget_starts_from_current() {
        let mut bar = BarAnimation::new(1.0, 1.0, Easing::Linear);
        bar.mount(0.0);
        bar.tick(0.5);
        bar.retarget(0.0, 0.5);
        assert!(approx(bar.tick(0.5), 0.5));
        assert!(approx(bar.tick(1.0), 0.25));
        assert_eq!(bar.tick(1.5), 0.0);
    }

    #[test]
    fn test_cancel_unmounts() {
        let mut bar = BarAnimation::new(1.0, 1.0, Easing::Linear);
        bar.mount(0.0);
        bar.tick(0.3);
        bar.cancel();
        assert_eq!(bar.phase(), BarPhase::Unmounted);
        assert_eq!(bar.current(), 0.0);
    }

    #[test]
    fn test_animator_remounts_on_new_bars() {
        let config = ChartConfig::default();
        let mut animator = ChartAnimator::new(&config);
        let first = SampleSeries::from_pairs([("Jan", 5), ("Feb", 10)]).unwrap();
        assert_eq!(animator.sync(&first, 0.0), SyncOutcome::Remounted);
        assert!(animator.is_running());

        let heights = animator.tick(1.0);
        assert_eq!(heights, vec![0.5, 1.0]);
        assert!(!animator.is_running());

        let second = SampleSeries::from_pairs([("Mar", 1), ("Apr", 2), ("May", 4)]).unwrap();
        assert_eq!(animator.sync(&second, 2.0), SyncOutcome::Remounted);
        assert_eq!(animator.progress(), vec![0.0, 0.0, 0.0]);
        assert_eq!(animator.phases(), vec![BarPhase::Animating; 3]);
    }

    #[test]
    fn test_animator_retargets_on_new_values() {
        let config = ChartConfig::default();
        let mut animator = ChartAnimator::new(&config);
        let first = SampleSeries::from_pairs([("Jan", 5), ("Feb", 10)]).unwrap();
        animator.sync(&first, 0.0);
        animator.tick(1.0);

        assert_eq!(animator.sync(&first, 1.0), SyncOutcome::Unchanged);

        let refreshed = SampleSeries::from_pairs([("Jan", 10), ("Feb", 10)]).unwrap();
        assert_eq!(animator.sync(&refreshed, 1.0), SyncOutcome::Retargeted);
        assert_eq!(animator.phases(), vec![BarPhase::Animating, BarPhase::Settled]);
        assert_eq!(animator.tick(2.0), vec![1.0, 1.0]);
    }

    #[test]
    fn test_teardown_clears() {
        let config = ChartConfig::default();
        let mut animator = ChartAnimator::new(&config);
        let series = SampleSeries::from_pairs([("Jan", 5)]).unwrap();
        animator.sync(&series, 0.0);
        assert!(animator.teardown());
        assert!(!animator.teardown());
        assert!(animator.progress().is_empty());
        assert!(!animator.is_running());
        assert_eq!(animator.sync(&series, 1.0), SyncOutcome::Remounted);
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_animator_emits_no_events() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let config = ChartConfig::default();
            let mut animator = ChartAnimator::new(&config);
            let first = SampleSeries::from_pairs([("Jan", 5), ("Feb", 10)]).unwrap();
            let refreshed = SampleSeries::from_pairs([("Jan", 8), ("Feb", 10)]).unwrap();
            animator.sync(&first, 0.0);
            animator.sync(&refreshed, 0.5);
            animator.tick(2.0);
            animator.teardown();
        });

        assert!(captured.0.lock().unwrap().is_empty());
    }
}
