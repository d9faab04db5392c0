//! Step-function sampling and threshold integration for sparse time series.
//!
//! This crate provides the numeric building blocks of healthgate:
//!
//! - **Step functions** ([`step`]): last-observed-value-held sampling over a sorted
//!   series of [`step::Sample`]s, plus window clipping helpers
//! - **Threshold integration** ([`interval`]): exact time spent strictly above a
//!   threshold within a window
//! - **Timestamps** ([`millis`]): lenient millisecond deserialization
//! - **Descriptive statistics** ([`descriptive`]): mean, median and range of a dataset
//!
//! # Examples
//!
//! ```
//! use healthgate_stats::{interval::duration_above_threshold, step::Sample};
//!
//! let series = [Sample::new(0, 100.0), Sample::new(1000, 80.0)];
//! assert_eq!(duration_above_threshold(&series, 0, 2000, 90.0), 1000);
//! ```

pub mod descriptive;
pub mod interval;
pub mod millis;
pub mod step;
