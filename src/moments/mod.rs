//! Moment-based statistics
//!
//! Mean, variance, standard deviation, skewness and kurtosis, built on a
//! chain of moment accumulators where each level also maintains the levels
//! below it:
//!
//! [`FirstMoment`] → [`SumOfSquaredDeviations`] → [`SumOfCubedDeviations`]
//! → [`SumOfFourthDeviations`]
//!
//! Every level can be merged with another of the same kind, so statistics
//! can be computed on partitions and combined. Non-finite inputs poison the
//! variance and higher moments to NaN.
//!
//! Integer data (`i32`, `i64`) has exact variants of the mean and variance
//! built on wide integer sums.
//!
//! # Example
//!
//! ```
//! use numstats::moments::{Skewness, Variance};
//! use numstats::traits::{Accumulator, StatisticResult};
//!
//! let mut left = Variance::of(&[1.0, 2.0, 3.0]);
//! let right = Variance::of(&[4.0, 5.0]);
//! left.combine(&right);
//! assert!((left.as_f64() - 2.5).abs() < 1e-15);
//!
//! let skew = Skewness::of(&[1.0, 2.0, 3.0, 10.0]);
//! assert!(skew.as_f64() > 0.0);
//! ```

mod deviations;
mod first;
mod integer;
mod mean;
mod shape;
mod variance;

pub use deviations::{SumOfCubedDeviations, SumOfFourthDeviations, SumOfSquaredDeviations};
pub use first::FirstMoment;
pub use integer::{
    IntMean, IntStandardDeviation, IntVariance, IntegerMean, IntegerStandardDeviation,
    IntegerVariance, LongMean, LongStandardDeviation, LongVariance,
};
pub use mean::Mean;
pub use shape::{Kurtosis, Skewness};
pub use variance::{StandardDeviation, Variance};

pub(crate) use integer::{integer_mean, integer_variance};
