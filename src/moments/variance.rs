//! Variance and standard deviation

use super::deviations::SumOfSquaredDeviations;
use crate::math;
use crate::result::Value;
use crate::traits::{Accumulator, StatisticResult};

/// Variance of doubles
///
/// Keeps the mean and the sum of squared deviations. The divisor is chosen
/// when the value is read: `n - 1` (unbiased, the default) or `n` (biased).
/// The variance of one value is 0 in both modes and of no values is NaN.
///
/// Arrays use the corrected two-pass algorithm, which stays accurate for
/// badly conditioned data such as values that are all but one equal.
///
/// # Example
///
/// ```
/// use numstats::moments::Variance;
/// use numstats::traits::{Accumulator, StatisticResult};
///
/// let mut var = Variance::of(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
/// assert!((var.as_f64() - 32.0 / 7.0).abs() < 1e-15);
/// assert_eq!(var.set_biased(true).as_f64(), 4.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variance {
    moments: SumOfSquaredDeviations,
    biased: bool,
}

impl Variance {
    /// Create an empty variance
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose the divisor: `n` when `biased`, `n - 1` otherwise
    pub fn set_biased(&mut self, biased: bool) -> &mut Self {
        self.biased = biased;
        self
    }

    /// Check if the biased divisor is used
    pub fn is_biased(&self) -> bool {
        self.biased
    }

    /// Current variance
    pub fn get(&self) -> f64 {
        self.moments.variance(self.biased)
    }

    /// Current mean
    pub fn mean(&self) -> f64 {
        self.moments.mean()
    }
}

impl StatisticResult for Variance {
    fn value(&self) -> Value {
        Value::Float(self.get())
    }
}

impl Accumulator for Variance {
    type Item = f64;

    fn of(values: &[f64]) -> Self {
        Self {
            moments: SumOfSquaredDeviations::of(values),
            biased: false,
        }
    }

    #[inline]
    fn accept(&mut self, value: f64) {
        self.moments.accept(value);
    }

    fn combine(&mut self, other: &Self) -> &mut Self {
        self.moments.combine(&other.moments);
        self
    }

    fn count(&self) -> u64 {
        self.moments.n()
    }
}

/// Standard deviation of doubles, the square root of [`Variance`]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StandardDeviation {
    moments: SumOfSquaredDeviations,
    biased: bool,
}

impl StandardDeviation {
    /// Create an empty standard deviation
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose the variance divisor: `n` when `biased`, `n - 1` otherwise
    pub fn set_biased(&mut self, biased: bool) -> &mut Self {
        self.biased = biased;
        self
    }

    /// Check if the biased divisor is used
    pub fn is_biased(&self) -> bool {
        self.biased
    }

    /// Current standard deviation
    pub fn get(&self) -> f64 {
        math::sqrt(self.moments.variance(self.biased))
    }
}

impl StatisticResult for StandardDeviation {
    fn value(&self) -> Value {
        Value::Float(self.get())
    }
}

impl Accumulator for StandardDeviation {
    type Item = f64;

    fn of(values: &[f64]) -> Self {
        Self {
            moments: SumOfSquaredDeviations::of(values),
            biased: false,
        }
    }

    #[inline]
    fn accept(&mut self, value: f64) {
        self.moments.accept(value);
    }

    fn combine(&mut self, other: &Self) -> &mut Self {
        self.moments.combine(&other.moments);
        self
    }

    fn count(&self) -> u64 {
        self.moments.n()
    }
}
