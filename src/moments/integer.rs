//! Exact moments of integer data
//!
//! Sums and sums of squares of `i32`/`i64` values are kept exactly in wide
//! accumulators; rounding happens once, when the value is read. The mean and
//! variance are therefore independent of input order and of how the data was
//! partitioned before combining, and the variance is exactly invariant under
//! shifting every value by a constant.

use core::marker::PhantomData;

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::arithmetic::{Int128, UInt192};
use crate::element::IntegerElement;
use crate::math;
use crate::result::Value;
use crate::traits::{Accumulator, StatisticResult};

/// Mean of integers
///
/// ```
/// use numstats::moments::LongMean;
/// use numstats::traits::{Accumulator, StatisticResult};
///
/// // a naive i64 sum would overflow
/// let mean = LongMean::of(&[i64::MAX, i64::MAX, 1 - i64::MAX]);
/// assert_eq!(mean.as_f64(), (i64::MAX as f64 + 1.0) / 3.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntegerMean<T> {
    sum: Int128,
    n: u64,
    #[cfg_attr(feature = "serde", serde(skip))]
    _marker: PhantomData<T>,
}

/// Mean of `i32` values
pub type IntMean = IntegerMean<i32>;
/// Mean of `i64` values
pub type LongMean = IntegerMean<i64>;

/// Mean of an exact sum over `n` values; NaN when `n` is 0
pub(crate) fn integer_mean(sum: &Int128, n: u64) -> f64 {
    sum.divide_to_f64(n)
}

impl<T: IntegerElement> IntegerMean<T> {
    /// Create an empty mean
    pub fn new() -> Self {
        Self {
            sum: Int128::new(),
            n: 0,
            _marker: PhantomData,
        }
    }

    /// Current mean
    pub fn get(&self) -> f64 {
        integer_mean(&self.sum, self.n)
    }
}

impl<T: IntegerElement> Default for IntegerMean<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: IntegerElement> StatisticResult for IntegerMean<T> {
    fn value(&self) -> Value {
        Value::Float(self.get())
    }
}

impl<T: IntegerElement> Accumulator for IntegerMean<T> {
    type Item = T;

    fn of(values: &[T]) -> Self {
        let mut m = Self::new();
        m.accept_all(values);
        m
    }

    #[inline]
    fn accept(&mut self, value: T) {
        self.sum.add_i64(value.into());
        self.n += 1;
    }

    fn combine(&mut self, other: &Self) -> &mut Self {
        self.sum.add(other.sum);
        self.n += other.n;
        self
    }

    fn count(&self) -> u64 {
        self.n
    }
}

/// Variance from exact sums
///
/// Computes `n * sum(x^2) - sum(x)^2`, which equals `n` times the sum of
/// squared deviations, exactly. Uses 128-bit arithmetic when it fits and
/// arbitrary precision otherwise.
pub(crate) fn integer_variance(sum: &Int128, sum_sq: &UInt192, n: u64, biased: bool) -> f64 {
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return 0.0;
    }
    let n_ss = scaled_sum_of_squared_deviations(sum, sum_sq, n);
    let denom = if biased { n } else { n - 1 };
    n_ss / n as f64 / denom as f64
}

fn scaled_sum_of_squared_deviations(sum: &Int128, sum_sq: &UInt192, n: u64) -> f64 {
    let s = sum.value().unsigned_abs();
    let fast = sum_sq.to_u128().and_then(|sq| {
        let a = sq.checked_mul(n as u128)?;
        let b = s.checked_mul(s)?;
        a.checked_sub(b)
    });
    if let Some(v) = fast {
        return v as f64;
    }
    let s = sum.to_big_int();
    let v: BigInt = sum_sq.to_big_int() * BigInt::from(n) - &s * &s;
    v.to_f64().unwrap_or(f64::NAN)
}

/// Variance of integers
///
/// The divisor is `n - 1` (unbiased, the default) or `n` (biased). One value
/// gives 0; no values give NaN.
///
/// ```
/// use numstats::moments::LongVariance;
/// use numstats::traits::{Accumulator, StatisticResult};
///
/// let mut v = LongVariance::of(&[1]);
/// assert_eq!(v.set_biased(true).as_f64(), 0.0);
///
/// let shifted = LongVariance::of(&[i64::MAX - 2, i64::MAX - 1, i64::MAX]);
/// assert_eq!(shifted.as_f64(), 1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntegerVariance<T> {
    sum: Int128,
    sum_sq: UInt192,
    n: u64,
    biased: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    _marker: PhantomData<T>,
}

/// Variance of `i32` values
pub type IntVariance = IntegerVariance<i32>;
/// Variance of `i64` values
pub type LongVariance = IntegerVariance<i64>;

impl<T: IntegerElement> IntegerVariance<T> {
    /// Create an empty variance
    pub fn new() -> Self {
        Self {
            sum: Int128::new(),
            sum_sq: UInt192::new(),
            n: 0,
            biased: false,
            _marker: PhantomData,
        }
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
        integer_variance(&self.sum, &self.sum_sq, self.n, self.biased)
    }

    /// Current mean
    pub fn mean(&self) -> f64 {
        integer_mean(&self.sum, self.n)
    }
}

impl<T: IntegerElement> Default for IntegerVariance<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: IntegerElement> StatisticResult for IntegerVariance<T> {
    fn value(&self) -> Value {
        Value::Float(self.get())
    }
}

impl<T: IntegerElement> Accumulator for IntegerVariance<T> {
    type Item = T;

    fn of(values: &[T]) -> Self {
        let mut v = Self::new();
        v.accept_all(values);
        v
    }

    #[inline]
    fn accept(&mut self, value: T) {
        self.sum.add_i64(value.into());
        value.add_square(&mut self.sum_sq);
        self.n += 1;
    }

    fn combine(&mut self, other: &Self) -> &mut Self {
        self.sum.add(other.sum);
        self.sum_sq.add(&other.sum_sq);
        self.n += other.n;
        self
    }

    fn count(&self) -> u64 {
        self.n
    }
}

/// Standard deviation of integers, the square root of [`IntegerVariance`]
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntegerStandardDeviation<T> {
    variance: IntegerVariance<T>,
}

/// Standard deviation of `i32` values
pub type IntStandardDeviation = IntegerStandardDeviation<i32>;
/// Standard deviation of `i64` values
pub type LongStandardDeviation = IntegerStandardDeviation<i64>;

impl<T: IntegerElement> IntegerStandardDeviation<T> {
    /// Create an empty standard deviation
    pub fn new() -> Self {
        Self {
            variance: IntegerVariance::new(),
        }
    }

    /// Choose the variance divisor: `n` when `biased`, `n - 1` otherwise
    pub fn set_biased(&mut self, biased: bool) -> &mut Self {
        self.variance.set_biased(biased);
        self
    }

    /// Check if the biased divisor is used
    pub fn is_biased(&self) -> bool {
        self.variance.is_biased()
    }

    /// Current standard deviation
    pub fn get(&self) -> f64 {
        math::sqrt(self.variance.get())
    }
}

impl<T: IntegerElement> Default for IntegerStandardDeviation<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: IntegerElement> StatisticResult for IntegerStandardDeviation<T> {
    fn value(&self) -> Value {
        Value::Float(self.get())
    }
}

impl<T: IntegerElement> Accumulator for IntegerStandardDeviation<T> {
    type Item = T;

    fn of(values: &[T]) -> Self {
        Self {
            variance: IntegerVariance::of(values),
        }
    }

    #[inline]
    fn accept(&mut self, value: T) {
        self.variance.accept(value);
    }

    fn combine(&mut self, other: &Self) -> &mut Self {
        self.variance.combine(&other.variance);
        self
    }

    fn count(&self) -> u64 {
        self.variance.count()
    }
}
