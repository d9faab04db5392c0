//! Right-continuous step functions over sparse samples.
//!
//! A series is a slice of [`Sample`]s sorted by timestamp. The value recorded by
//! a sample holds until the next sample, so the function changes value only at
//! sample timestamps. Before the first sample the value is `0.0`.

use serde::{Deserialize, Serialize};

/// A single observation of a step function.
///
/// Serialized as the two-element array `[time, value]`. The time may be given
/// as a whole-number float (see [`crate::millis`]).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(from = "SampleRepr", into = "(i64, f64)")]
pub struct Sample {
    /// Timestamp in milliseconds.
    pub time: i64,
    /// Observed value (a health percentage in this workspace).
    pub value: f64,
}

impl Sample {
    #[must_use]
    pub const fn new(time: i64, value: f64) -> Self {
        Self { time, value }
    }
}

impl From<(i64, f64)> for Sample {
    fn from((time, value): (i64, f64)) -> Self {
        Self { time, value }
    }
}

#[derive(Deserialize)]
struct SampleRepr(#[serde(deserialize_with = "crate::millis::deserialize")] i64, f64);

impl From<SampleRepr> for Sample {
    fn from(SampleRepr(time, value): SampleRepr) -> Self {
        Self { time, value }
    }
}

impl From<Sample> for (i64, f64) {
    fn from(sample: Sample) -> Self {
        (sample.time, sample.value)
    }
}

/// Returns the value of the step function at `time`.
///
/// This is the value of the last sample whose timestamp is less than or equal
/// to `time`. Samples sharing a timestamp resolve to the last one. If `time`
/// precedes every sample (or the series is empty) the value is `0.0`.
///
/// `samples` must be sorted by timestamp in ascending order.
///
/// # Examples
///
/// ```
/// # use healthgate_stats::step::{Sample, value_at};
/// let series = [Sample::new(0, 100.0), Sample::new(1000, 80.0)];
/// assert_eq!(value_at(&series, -1), 0.0);
/// assert_eq!(value_at(&series, 999), 100.0);
/// assert_eq!(value_at(&series, 1000), 80.0);
/// ```
#[must_use]
pub fn value_at(samples: &[Sample], time: i64) -> f64 {
    debug_assert!(
        samples.is_sorted_by_key(|s| s.time),
        "samples must be sorted by time"
    );

    let idx = samples.partition_point(|s| s.time <= time);
    match idx {
        0 => 0.0,
        _ => samples[idx - 1].value,
    }
}

/// Restricts a series to the window `[start, end]`, anchored at `start`.
///
/// The result starts with a synthesized sample `(start, value_at(start))`,
/// followed by every sample with `start < time <= end`. The anchor gives the
/// clipped series a defined value at the start of the window even when no
/// sample falls exactly there.
///
/// # Examples
///
/// ```
/// # use healthgate_stats::step::{Sample, anchored_window};
/// let series = [
///     Sample::new(0, 100.0),
///     Sample::new(1000, 80.0),
///     Sample::new(2000, 95.0),
///     Sample::new(3000, 50.0),
/// ];
/// let clipped = anchored_window(&series, 1500, 2000);
/// assert_eq!(clipped, vec![Sample::new(1500, 80.0), Sample::new(2000, 95.0)]);
/// ```
#[must_use]
pub fn anchored_window(samples: &[Sample], start: i64, end: i64) -> Vec<Sample> {
    let first = samples.partition_point(|s| s.time <= start);
    let last = samples.partition_point(|s| s.time <= end).max(first);

    let mut window = Vec::with_capacity(last - first + 1);
    window.push(Sample::new(start, value_at(samples, start)));
    window.extend_from_slice(&samples[first..last]);
    window
}

/// Extends a series with a trailing sample at `end` holding the last value.
///
/// Step charts need an explicit point at the end of the plotted range. The
/// series is returned unchanged if it is empty or already reaches `end`.
///
/// # Examples
///
/// ```
/// # use healthgate_stats::step::{Sample, extend_to};
/// let series = [Sample::new(0, 100.0), Sample::new(500, 60.0)];
/// let padded = extend_to(&series, 2000);
/// assert_eq!(padded.last(), Some(&Sample::new(2000, 60.0)));
/// ```
#[must_use]
pub fn extend_to(samples: &[Sample], end: i64) -> Vec<Sample> {
    let mut extended = samples.to_vec();
    if let Some(last) = samples.last()
        && last.time < end
    {
        extended.push(Sample::new(end, last.value));
    }
    extended
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(i64, f64)]) -> Vec<Sample> {
        points.iter().copied().map(Sample::from).collect()
    }

    #[test]
    fn test_value_before_first_sample_is_zero() {
        let s = series(&[(100, 50.0), (200, 75.0)]);
        for t in [-1000, 0, 99] {
            assert_eq!(value_at(&s, t), 0.0);
        }
    }

    #[test]
    fn test_value_after_last_sample_holds() {
        let s = series(&[(100, 50.0), (200, 75.0)]);
        for t in [200, 201, 10_000, i64::MAX] {
            assert_eq!(value_at(&s, t), 75.0);
        }
    }

    #[test]
    fn test_value_between_samples_holds_previous() {
        let s = series(&[(0, 100.0), (1000, 80.0), (2000, 95.0)]);
        assert_eq!(value_at(&s, 0), 100.0);
        assert_eq!(value_at(&s, 999), 100.0);
        assert_eq!(value_at(&s, 1000), 80.0);
        assert_eq!(value_at(&s, 1999), 80.0);
        assert_eq!(value_at(&s, 2000), 95.0);
    }

    #[test]
    fn test_value_of_empty_series() {
        assert_eq!(value_at(&[], 0), 0.0);
        assert_eq!(value_at(&[], 12345), 0.0);
    }

    #[test]
    fn test_tied_timestamps_resolve_to_last() {
        let s = series(&[(0, 10.0), (500, 20.0), (500, 30.0), (900, 40.0)]);
        assert_eq!(value_at(&s, 500), 30.0);
        assert_eq!(value_at(&s, 899), 30.0);
    }

    #[test]
    fn test_anchored_window_synthesizes_start() {
        let s = series(&[(0, 100.0), (1000, 80.0), (2000, 95.0)]);
        let w = anchored_window(&s, 500, 2000);
        assert_eq!(w, series(&[(500, 100.0), (1000, 80.0), (2000, 95.0)]));
    }

    #[test]
    fn test_anchored_window_skips_sample_at_start() {
        // The sample at `start` is represented by the anchor only.
        let s = series(&[(0, 100.0), (1000, 80.0), (2000, 95.0)]);
        let w = anchored_window(&s, 1000, 1500);
        assert_eq!(w, series(&[(1000, 80.0)]));
    }

    #[test]
    fn test_anchored_window_before_first_sample() {
        let s = series(&[(1000, 80.0)]);
        let w = anchored_window(&s, 0, 1000);
        assert_eq!(w, series(&[(0, 0.0), (1000, 80.0)]));
    }

    #[test]
    fn test_anchored_window_of_empty_series() {
        let w = anchored_window(&[], 100, 200);
        assert_eq!(w, series(&[(100, 0.0)]));
    }

    #[test]
    fn test_anchored_window_inverted_range() {
        let s = series(&[(0, 100.0), (1000, 80.0)]);
        let w = anchored_window(&s, 1500, 500);
        assert_eq!(w, series(&[(1500, 80.0)]));
    }

    #[test]
    fn test_extend_to() {
        let s = series(&[(0, 100.0), (500, 60.0)]);
        assert_eq!(
            extend_to(&s, 1000),
            series(&[(0, 100.0), (500, 60.0), (1000, 60.0)])
        );
        assert_eq!(extend_to(&s, 500), s);
        assert_eq!(extend_to(&s, 100), s);
        assert!(extend_to(&[], 1000).is_empty());
    }

    #[test]
    fn test_sample_serializes_as_pair() {
        let sample = Sample::new(1500, 87.5);
        let json = serde_json::to_string(&sample).unwrap();
        assert_eq!(json, "[1500,87.5]");

        let parsed: Vec<Sample> = serde_json::from_str("[[0,100.0],[250,99]]").unwrap();
        assert_eq!(parsed, series(&[(0, 100.0), (250, 99.0)]));
    }

    #[test]
    fn test_sample_accepts_whole_number_float_times() {
        let parsed: Vec<Sample> = serde_json::from_str("[[0.0,100.0],[1000.0,50]]").unwrap();
        assert_eq!(parsed, series(&[(0, 100.0), (1000, 50.0)]));

        assert!(serde_json::from_str::<Sample>("[999.5,50]").is_err());
    }
}
