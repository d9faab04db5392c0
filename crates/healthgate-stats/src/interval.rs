//! Exact time-above-threshold integration over step functions.

use crate::step::{Sample, value_at};

/// Returns the total time in `[start, end)` during which the step function
/// described by `samples` is strictly greater than `threshold`.
///
/// The window is cut at every sample timestamp strictly inside it. On each
/// resulting sub-interval `[a, b)` the function is constant with the value
/// `value_at(samples, a)`, so the integration is exact regardless of how
/// sparse or irregular the sampling is.
///
/// A value equal to `threshold` does not count. An empty or inverted window
/// (`end <= start`) yields `0`.
///
/// `samples` must be sorted by timestamp in ascending order.
///
/// # Examples
///
/// ```
/// # use healthgate_stats::{interval::duration_above_threshold, step::Sample};
/// let series = [
///     Sample::new(0, 100.0),
///     Sample::new(1000, 80.0),
///     Sample::new(2000, 95.0),
/// ];
/// assert_eq!(duration_above_threshold(&series, 0, 2000, 90.0), 1000);
/// assert_eq!(duration_above_threshold(&series, 1500, 2000, 90.0), 0);
/// ```
#[must_use]
pub fn duration_above_threshold(samples: &[Sample], start: i64, end: i64, threshold: f64) -> i64 {
    if end <= start {
        return 0;
    }

    let mut breakpoints = Vec::with_capacity(samples.len() + 2);
    breakpoints.push(start);
    breakpoints.extend(
        samples
            .iter()
            .map(|s| s.time)
            .filter(|&t| start < t && t < end),
    );
    breakpoints.push(end);
    breakpoints.sort_unstable();
    breakpoints.dedup();

    breakpoints
        .windows(2)
        .filter(|w| value_at(samples, w[0]) > threshold)
        .map(|w| w[1] - w[0])
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(i64, f64)]) -> Vec<Sample> {
        points.iter().copied().map(Sample::from).collect()
    }

    fn scenario() -> Vec<Sample> {
        series(&[(0, 100.0), (1000, 80.0), (2000, 95.0)])
    }

    #[test]
    fn test_full_window() {
        // 100 on [0, 1000) counts, 80 on [1000, 2000) does not
        assert_eq!(duration_above_threshold(&scenario(), 0, 2000, 90.0), 1000);
    }

    #[test]
    fn test_window_starting_between_samples() {
        assert_eq!(duration_above_threshold(&scenario(), 1500, 2000, 90.0), 0);
        assert_eq!(duration_above_threshold(&scenario(), 500, 1500, 90.0), 500);
    }

    #[test]
    fn test_window_past_last_sample() {
        assert_eq!(
            duration_above_threshold(&scenario(), 1000, 5000, 90.0),
            3000
        );
    }

    #[test]
    fn test_empty_series_never_above_positive_threshold() {
        assert_eq!(duration_above_threshold(&[], 0, 5000, 1.0), 0);
        assert_eq!(duration_above_threshold(&[], 0, 5000, 0.0), 0);
    }

    #[test]
    fn test_empty_or_inverted_window() {
        for (start, end) in [(0, 0), (1000, 1000), (2000, 1000), (5, -5)] {
            assert_eq!(duration_above_threshold(&scenario(), start, end, 0.0), 0);
        }
    }

    #[test]
    fn test_value_equal_to_threshold_is_not_above() {
        let s = series(&[(0, 90.0), (1000, 90.5)]);
        assert_eq!(duration_above_threshold(&s, 0, 2000, 90.0), 1000);
    }

    #[test]
    fn test_out_of_range_thresholds() {
        let s = scenario();
        assert_eq!(duration_above_threshold(&s, 0, 3000, -1.0), 3000);
        assert_eq!(duration_above_threshold(&s, 0, 3000, 100.0), 0);
        assert_eq!(duration_above_threshold(&s, 0, 3000, 250.0), 0);
    }

    #[test]
    fn test_time_before_first_sample_counts_as_zero() {
        let s = series(&[(1000, 100.0)]);
        assert_eq!(duration_above_threshold(&s, 0, 3000, 50.0), 2000);
        assert_eq!(duration_above_threshold(&s, 0, 3000, -0.5), 3000);
    }

    #[test]
    fn test_samples_outside_window_only_affect_initial_value() {
        let s = series(&[(-500, 99.0), (100, 10.0), (9000, 99.0)]);
        assert_eq!(duration_above_threshold(&s, 0, 1000, 50.0), 100);
    }

    #[test]
    fn test_tied_timestamps() {
        let s = series(&[(0, 100.0), (500, 10.0), (500, 100.0)]);
        assert_eq!(duration_above_threshold(&s, 0, 1000, 50.0), 1000);
    }

    #[test]
    fn test_monotonic_in_threshold() {
        let s = series(&[
            (0, 100.0),
            (130, 87.0),
            (420, 92.5),
            (900, 40.0),
            (1333, 91.0),
            (2100, 100.0),
            (2500, 0.0),
        ]);
        let mut previous = i64::MAX;
        for threshold in 0..=100 {
            let duration = duration_above_threshold(&s, 50, 2600, f64::from(threshold));
            assert!(duration <= previous, "threshold {threshold}");
            previous = duration;
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn test_duration_is_bounded_by_window() {
        let s = scenario();
        for (start, end) in [(0, 2000), (-1000, 10_000), (1999, 2001)] {
            let duration = duration_above_threshold(&s, start, end, -1.0);
            assert!(duration <= end - start);
        }
    }
}
