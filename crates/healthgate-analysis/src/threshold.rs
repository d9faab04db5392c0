//! Health threshold percentages

use std::str::FromStr;

use serde::Serialize;

/// A health threshold in whole percent, always within `0..=100`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct Threshold(u8);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ThresholdError {
    #[display("threshold '{input}' is not an integer")]
    NotAnInteger { input: String },
    #[display("threshold {value} is outside 0..=100")]
    OutOfRange { value: i64 },
}

impl Threshold {
    pub const DEFAULT: Self = Self(90);
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Result<Self, ThresholdError> {
        if value > Self::MAX {
            return Err(ThresholdError::OutOfRange {
                value: i64::from(value),
            });
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }

    /// Parses user input, falling back to [`Threshold::DEFAULT`] when the
    /// input is not a valid threshold.
    ///
    /// ```
    /// # use healthgate_analysis::threshold::Threshold;
    /// assert_eq!(Threshold::from_input_lossy("75").get(), 75);
    /// assert_eq!(Threshold::from_input_lossy("150"), Threshold::DEFAULT);
    /// assert_eq!(Threshold::from_input_lossy("abc"), Threshold::DEFAULT);
    /// ```
    #[must_use]
    pub fn from_input_lossy(input: &str) -> Self {
        input.parse().unwrap_or(Self::DEFAULT)
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for Threshold {
    type Err = ThresholdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|_| ThresholdError::NotAnInteger {
                input: s.to_owned(),
            })?;
        u8::try_from(value)
            .map_err(|_| ThresholdError::OutOfRange { value })
            .and_then(Self::new)
    }
}

impl From<Threshold> for f64 {
    fn from(threshold: Threshold) -> Self {
        threshold.as_f64()
    }
}
