//! Lenient deserialization of millisecond timestamps.
//!
//! Log parsers emit timestamps as JSON numbers, sometimes written as
//! whole-number floats (`1000.0`). These are accepted as integers; floats with
//! a fractional part, non-finite values and out-of-range values are rejected.
//!
//! Use with `#[serde(deserialize_with = "healthgate_stats::millis::deserialize")]`.

use std::fmt;

use serde::{
    Deserializer,
    de::{self, Unexpected, Visitor},
};

struct MillisVisitor;

impl Visitor<'_> for MillisVisitor {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer millisecond count")
    }

    fn visit_i64<E>(self, v: i64) -> Result<i64, E>
    where
        E: de::Error,
    {
        Ok(v)
    }

    fn visit_u64<E>(self, v: u64) -> Result<i64, E>
    where
        E: de::Error,
    {
        i64::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    #[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn visit_f64<E>(self, v: f64) -> Result<i64, E>
    where
        E: de::Error,
    {
        // i64::MAX as f64 rounds up to 2^63, which is out of range
        if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
            Ok(v as i64)
        } else {
            Err(E::invalid_value(Unexpected::Float(v), &self))
        }
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(MillisVisitor)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Stamp(#[serde(deserialize_with = "super::deserialize")] i64);

    fn parse(json: &str) -> Result<i64, serde_json::Error> {
        serde_json::from_str::<Stamp>(json).map(|s| s.0)
    }

    #[test]
    fn test_integers() {
        assert_eq!(parse("0").unwrap(), 0);
        assert_eq!(parse("183042").unwrap(), 183_042);
        assert_eq!(parse("-250").unwrap(), -250);
    }

    #[test]
    fn test_whole_number_floats() {
        assert_eq!(parse("0.0").unwrap(), 0);
        assert_eq!(parse("1000.0").unwrap(), 1000);
        assert_eq!(parse("-5.0").unwrap(), -5);
        assert_eq!(parse("1e3").unwrap(), 1000);
    }

    #[test]
    fn test_rejects_fractions_and_other_types() {
        for json in ["0.5", "1000.25", "1e300", "18446744073709551615", "\"10\"", "null"] {
            assert!(parse(json).is_err(), "{json}");
        }
    }
}
