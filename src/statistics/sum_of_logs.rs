//! Sum of logarithms and geometric mean

use core::marker::PhantomData;

use crate::arithmetic::ExtendedSum;
use crate::element::Element;
use crate::math;
use crate::result::Value;
use crate::traits::{Accumulator, StatisticResult};

/// Sum of natural logarithms
///
/// A negative input gives NaN and a zero input gives `-inf`. The logarithms
/// are summed with extended precision, so values spread over a wide range of
/// magnitudes keep their contribution. Array and streaming computation
/// perform the same steps and agree bit for bit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SumOfLogs<T> {
    sum: ExtendedSum,
    count: u64,
    #[cfg_attr(feature = "serde", serde(skip))]
    _marker: PhantomData<T>,
}

/// Sum of logarithms of `i32` values
pub type IntSumOfLogs = SumOfLogs<i32>;
/// Sum of logarithms of `i64` values
pub type LongSumOfLogs = SumOfLogs<i64>;

impl<T: Element> SumOfLogs<T> {
    /// Create an empty sum
    pub fn new() -> Self {
        Self {
            sum: ExtendedSum::new(),
            count: 0,
            _marker: PhantomData,
        }
    }

    /// Current sum of logarithms
    pub fn get(&self) -> f64 {
        self.sum.value()
    }
}

impl<T: Element> Default for SumOfLogs<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> StatisticResult for SumOfLogs<T> {
    fn value(&self) -> Value {
        Value::Float(self.get())
    }
}

impl<T: Element> Accumulator for SumOfLogs<T> {
    type Item = T;

    fn of(values: &[T]) -> Self {
        let mut s = Self::new();
        s.accept_all(values);
        s
    }

    #[inline]
    fn accept(&mut self, value: T) {
        self.sum.add(math::ln(value.to_f64()));
        self.count += 1;
    }

    fn combine(&mut self, other: &Self) -> &mut Self {
        self.sum.combine(&other.sum);
        self.count += other.count;
        self
    }

    fn count(&self) -> u64 {
        self.count
    }
}

/// Geometric mean, `exp(sum(ln x) / n)`
///
/// NaN when empty or when any input is negative; 0 when any input is 0.
///
/// # Example
///
/// ```
/// use numstats::statistics::GeometricMean;
/// use numstats::traits::{Accumulator, StatisticResult};
///
/// let g = GeometricMean::of(&[1e300, 1e-300, 1e300, 1e-300]);
/// assert!((g.as_f64() - 1.0).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometricMean<T> {
    logs: SumOfLogs<T>,
}

/// Geometric mean of `i32` values
pub type IntGeometricMean = GeometricMean<i32>;
/// Geometric mean of `i64` values
pub type LongGeometricMean = GeometricMean<i64>;

impl<T: Element> GeometricMean<T> {
    /// Create an empty geometric mean
    pub fn new() -> Self {
        Self {
            logs: SumOfLogs::new(),
        }
    }

    /// Geometric mean of a sum of logarithms
    pub(crate) fn compute(sum_of_logs: f64, n: u64) -> f64 {
        if n == 0 {
            return f64::NAN;
        }
        math::exp(sum_of_logs / n as f64)
    }

    /// Current geometric mean
    pub fn get(&self) -> f64 {
        Self::compute(self.logs.get(), self.logs.count())
    }
}

impl<T: Element> Default for GeometricMean<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> StatisticResult for GeometricMean<T> {
    fn value(&self) -> Value {
        Value::Float(self.get())
    }
}

impl<T: Element> Accumulator for GeometricMean<T> {
    type Item = T;

    fn of(values: &[T]) -> Self {
        Self {
            logs: SumOfLogs::of(values),
        }
    }

    #[inline]
    fn accept(&mut self, value: T) {
        self.logs.accept(value);
    }

    fn combine(&mut self, other: &Self) -> &mut Self {
        self.logs.combine(&other.logs);
        self
    }

    fn count(&self) -> u64 {
        self.logs.count()
    }
}
