//! Sums of squares

use core::marker::PhantomData;

use crate::arithmetic::{ExtendedSum, UInt192};
use crate::element::IntegerElement;
use crate::result::Value;
use crate::traits::{Accumulator, StatisticResult};

/// Sum of squared doubles with extended-precision accumulation
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SumOfSquares {
    sum: ExtendedSum,
    count: u64,
}

impl SumOfSquares {
    /// Create an empty sum of squares
    pub fn new() -> Self {
        Self::default()
    }

    /// Current sum of squares
    pub fn get(&self) -> f64 {
        self.sum.value()
    }
}

impl StatisticResult for SumOfSquares {
    fn value(&self) -> Value {
        Value::Float(self.get())
    }
}

impl Accumulator for SumOfSquares {
    type Item = f64;

    fn of(values: &[f64]) -> Self {
        let mut s = Self::new();
        s.accept_all(values);
        s
    }

    #[inline]
    fn accept(&mut self, value: f64) {
        self.sum.add(value * value);
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

/// Exact sum of squared integers
///
/// Squares are summed in a 192-bit accumulator and never overflow for
/// fewer than 2^63 values. The result is an exact unsigned integer.
///
/// ```
/// use numstats::statistics::LongSumOfSquares;
/// use numstats::traits::{Accumulator, StatisticResult};
///
/// let s = LongSumOfSquares::of(&[i64::MIN, i64::MIN]);
/// assert_eq!(s.as_big_int().unwrap(), num_bigint::BigInt::from(1) << 127u32);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntegerSumOfSquares<T> {
    sum: UInt192,
    count: u64,
    #[cfg_attr(feature = "serde", serde(skip))]
    _marker: PhantomData<T>,
}

/// Sum of squares of `i32` values
pub type IntSumOfSquares = IntegerSumOfSquares<i32>;
/// Sum of squares of `i64` values
pub type LongSumOfSquares = IntegerSumOfSquares<i64>;

impl<T: IntegerElement> IntegerSumOfSquares<T> {
    /// Create an empty sum of squares
    pub fn new() -> Self {
        Self {
            sum: UInt192::new(),
            count: 0,
            _marker: PhantomData,
        }
    }

    /// Current sum of squares as a wide accumulator
    pub fn sum(&self) -> UInt192 {
        self.sum
    }
}

impl<T: IntegerElement> Default for IntegerSumOfSquares<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: IntegerElement> StatisticResult for IntegerSumOfSquares<T> {
    fn value(&self) -> Value {
        Value::Unsigned(self.sum)
    }
}

impl<T: IntegerElement> Accumulator for IntegerSumOfSquares<T> {
    type Item = T;

    fn of(values: &[T]) -> Self {
        let mut s = Self::new();
        s.accept_all(values);
        s
    }

    #[inline]
    fn accept(&mut self, value: T) {
        value.add_square(&mut self.sum);
        self.count += 1;
    }

    fn combine(&mut self, other: &Self) -> &mut Self {
        self.sum.add(&other.sum);
        self.count += other.count;
        self
    }

    fn count(&self) -> u64 {
        self.count
    }
}
