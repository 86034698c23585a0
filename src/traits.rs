//! Core traits for streaming statistics
//!
//! Every accumulator implements [`Accumulator`] (incremental `accept`,
//! bulk `of`, associative `combine`) and [`StatisticResult`] (the current
//! value readable as `f64`, `i32`, `i64` or an arbitrary-precision integer).

use core::fmt::Debug;

use num_bigint::BigInt;

use crate::result::Value;

#[cfg(feature = "std")]
use std::string::String;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::string::String;

/// Error raised by statistic construction, evaluation or conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatisticsError {
    /// An argument is outside its valid domain (probability, count, statistic set)
    InvalidArgument(String),
    /// A sub-range `[from, to)` does not lie within `[0, length]`
    IndexOutOfBounds {
        from: usize,
        to: usize,
        length: usize,
    },
    /// A result cannot be represented in the requested numeric type
    Arithmetic(String),
    /// The aggregator was not built to compute the statistic
    UnsupportedStatistic(&'static str),
    /// Two aggregators track statistic sets that cannot be merged
    IncompatibleCombine {
        expected: String,
        found: String,
    },
    /// NaN found in the input while the NaN policy is `Error`
    NanNotAllowed { index: usize },
}

impl core::fmt::Display for StatisticsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StatisticsError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            StatisticsError::IndexOutOfBounds { from, to, length } => {
                write!(
                    f,
                    "range [{}, {}) out of bounds for length {}",
                    from, to, length
                )
            }
            StatisticsError::Arithmetic(msg) => write!(f, "arithmetic error: {}", msg),
            StatisticsError::UnsupportedStatistic(name) => {
                write!(f, "unsupported statistic: {}", name)
            }
            StatisticsError::IncompatibleCombine { expected, found } => {
                write!(
                    f,
                    "incompatible combine: expected at least {}, found {}",
                    expected, found
                )
            }
            StatisticsError::NanNotAllowed { index } => {
                write!(f, "NaN value at index {}", index)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StatisticsError {}

/// Result alias used throughout the crate
pub type Result<T> = core::result::Result<T, StatisticsError>;

/// Check that `[from, to)` is a valid sub-range of a sequence of `length` elements
pub fn check_range(from: usize, to: usize, length: usize) -> Result<()> {
    if from > to || to > length {
        return Err(StatisticsError::IndexOutOfBounds { from, to, length });
    }
    Ok(())
}

/// A statistic value that can be read back in several numeric types
///
/// Implementors only provide [`value`](StatisticResult::value); the typed
/// accessors share the conversion rules of [`Value`].
pub trait StatisticResult {
    /// Current value of the statistic
    fn value(&self) -> Value;

    /// Value as `f64`
    fn as_f64(&self) -> f64 {
        self.value().as_f64()
    }

    /// Value as `i32`, rounding floating results half-up
    fn as_i32(&self) -> Result<i32> {
        self.value().as_i32()
    }

    /// Value as `i64`, rounding floating results half-up
    fn as_i64(&self) -> Result<i64> {
        self.value().as_i64()
    }

    /// Value as an arbitrary-precision integer, rounding floating results half-up
    fn as_big_int(&self) -> Result<BigInt> {
        self.value().as_big_int()
    }
}

/// Core trait for all statistic accumulators
///
/// An accumulator holds enough state to compute one statistic incrementally.
/// Accumulators over disjoint partitions of a dataset can be merged with
/// [`combine`](Accumulator::combine), which is associative and leaves the
/// right-hand operand untouched.
pub trait Accumulator: StatisticResult + Clone + Debug + Default {
    /// Element type consumed by the accumulator
    type Item: Copy;

    /// Create an accumulator over all `values`
    ///
    /// Equivalent to accepting each value in order, but may use a more
    /// accurate algorithm for the whole array.
    fn of(values: &[Self::Item]) -> Self;

    /// Create an accumulator over `values[from..to]`
    fn of_range(values: &[Self::Item], from: usize, to: usize) -> Result<Self> {
        check_range(from, to, values.len())?;
        Ok(Self::of(&values[from..to]))
    }

    /// Add a value
    fn accept(&mut self, value: Self::Item);

    /// Merge the state of `other` into this accumulator and return it
    fn combine(&mut self, other: &Self) -> &mut Self;

    /// Number of values seen
    fn count(&self) -> u64;

    /// Add every value of a slice
    fn accept_all(&mut self, values: &[Self::Item]) {
        for &v in values {
            self.accept(v);
        }
    }

    /// Check if no value has been seen
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}
