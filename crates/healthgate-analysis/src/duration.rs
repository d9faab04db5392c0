//! Human-readable durations

/// Formats a millisecond count as `M:SS.mmm`.
///
/// Negative durations are shown as zero.
///
/// # Examples
///
/// ```
/// # use healthgate_analysis::duration::format_duration;
/// assert_eq!(format_duration(0), "0:00.000");
/// assert_eq!(format_duration(65_250), "1:05.250");
/// assert_eq!(format_duration(-10), "0:00.000");
/// ```
#[must_use]
pub fn format_duration(ms: i64) -> String {
    let ms = ms.max(0);
    let minutes = ms / 60_000;
    let seconds = ms % 60_000 / 1000;
    let millis = ms % 1000;
    format!("{minutes}:{seconds:02}.{millis:03}")
}

/// Like [`format_duration`], for averaged (fractional) durations.
#[expect(clippy::cast_possible_truncation)]
#[must_use]
pub fn format_average_duration(ms: f64) -> String {
    if ms.is_nan() {
        return format_duration(0);
    }
    format_duration(ms.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(999), "0:00.999");
        assert_eq!(format_duration(1000), "0:01.000");
        assert_eq!(format_duration(59_999), "0:59.999");
        assert_eq!(format_duration(60_000), "1:00.000");
        assert_eq!(format_duration(183_042), "3:03.042");
        assert_eq!(format_duration(3_600_000), "60:00.000");
    }

    #[test]
    fn test_format_average_duration() {
        assert_eq!(format_average_duration(1499.6), "0:01.500");
        assert_eq!(format_average_duration(-3.0), "0:00.000");
        assert_eq!(format_average_duration(f64::NAN), "0:00.000");
    }
}
