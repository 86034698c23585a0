//! Sums of doubles and integers

use core::marker::PhantomData;

use crate::arithmetic::{ExtendedSum, Int128};
use crate::element::IntegerElement;
use crate::result::Value;
use crate::traits::{Accumulator, StatisticResult};

/// Sum of doubles using extended-precision accumulation
///
/// Rounding errors are tracked in a second double, so large terms that
/// cancel do not swallow the small ones. Overflow to infinity is kept as is.
/// [`Sum::of`] performs the same additions as [`Sum::accept`] in input
/// order, so array and streaming results are bit-identical.
///
/// # Example
///
/// ```
/// use numstats::statistics::Sum;
/// use numstats::traits::{Accumulator, StatisticResult};
///
/// let sum = Sum::of(&[1.0, f64::MAX, -7.0, -f64::MAX, 2.0, 3.0]);
/// assert_eq!(sum.as_f64(), -1.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sum {
    sum: ExtendedSum,
    count: u64,
}

impl Sum {
    /// Create an empty sum
    pub fn new() -> Self {
        Self::default()
    }

    /// Current sum
    pub fn get(&self) -> f64 {
        self.sum.value()
    }
}

impl StatisticResult for Sum {
    fn value(&self) -> Value {
        Value::Float(self.get())
    }
}

impl Accumulator for Sum {
    type Item = f64;

    fn of(values: &[f64]) -> Self {
        Self {
            sum: ExtendedSum::of(values),
            count: values.len() as u64,
        }
    }

    #[inline]
    fn accept(&mut self, value: f64) {
        self.sum.add(value);
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

/// Exact sum of integers
///
/// Held in a 128-bit accumulator: the sum of up to 2^63 `i64` values is never
/// truncated. The result converts exactly to `i64` or [`BigInt`](num_bigint::BigInt).
///
/// # Example
///
/// ```
/// use numstats::statistics::LongSum;
/// use numstats::traits::{Accumulator, StatisticResult};
///
/// let sum = LongSum::of(&[i64::MAX, i64::MAX, -5]);
/// assert!(sum.as_i64().is_err());
/// assert_eq!(sum.get(), 2 * i64::MAX as i128 - 5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntegerSum<T> {
    sum: Int128,
    count: u64,
    #[cfg_attr(feature = "serde", serde(skip))]
    _marker: PhantomData<T>,
}

/// Sum of `i32` values
pub type IntSum = IntegerSum<i32>;
/// Sum of `i64` values
pub type LongSum = IntegerSum<i64>;

impl<T: IntegerElement> IntegerSum<T> {
    /// Create an empty sum
    pub fn new() -> Self {
        Self {
            sum: Int128::new(),
            count: 0,
            _marker: PhantomData,
        }
    }

    /// Exact current sum
    pub fn get(&self) -> i128 {
        self.sum.value()
    }

    /// Current sum as a wide accumulator
    pub fn sum(&self) -> Int128 {
        self.sum
    }
}

impl<T: IntegerElement> Default for IntegerSum<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: IntegerElement> StatisticResult for IntegerSum<T> {
    fn value(&self) -> Value {
        Value::Integer(self.sum.value())
    }
}

impl<T: IntegerElement> Accumulator for IntegerSum<T> {
    type Item = T;

    fn of(values: &[T]) -> Self {
        let mut sum = Self::new();
        sum.accept_all(values);
        sum
    }

    #[inline]
    fn accept(&mut self, value: T) {
        self.sum.add_i64(value.into());
        self.count += 1;
    }

    fn combine(&mut self, other: &Self) -> &mut Self {
        self.sum.add(other.sum);
        self.count += other.count;
        self
    }

    fn count(&self) -> u64 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(Sum::new().as_f64(), 0.0);
        assert_eq!(IntSum::new().as_i32().unwrap(), 0);
        assert_eq!(LongSum::new().as_big_int().unwrap(), BigInt::from(0));
    }

    #[test]
    fn test_cancellation_streaming() {
        let mut s = Sum::new();
        for &x in &[1.0, f64::MAX, -7.0, -f64::MAX, 2.0, 3.0] {
            s.accept(x);
        }
        assert_eq!(s.as_f64(), -1.0);
        assert_eq!(s.count(), 6);
    }

    #[test]
    fn test_overflow_and_nan() {
        assert_eq!(Sum::of(&[f64::MAX, f64::MAX]).as_f64(), f64::INFINITY);
        assert!(Sum::of(&[f64::INFINITY, f64::NEG_INFINITY]).as_f64().is_nan());
        let mut s = Sum::of(&[f64::NAN]);
        s.accept(1.0);
        assert!(s.as_f64().is_nan());
    }

    #[test]
    fn test_integer_sum_conversions() {
        let s = IntSum::of(&[i32::MAX, i32::MAX]);
        assert!(s.as_i32().is_err());
        assert_eq!(s.as_i64().unwrap(), 2 * i32::MAX as i64);
        assert_eq!(s.as_f64(), 2.0 * i32::MAX as f64);
    }

    #[test]
    fn test_repeated_self_combine_is_exact() {
        let x = i64::MAX - 12345;
        let y = i64::MAX / 3;
        let mut s = LongSum::of(&[x, y]);
        let mut expected = BigInt::from(x) + BigInt::from(y);
        for _ in 0..61 {
            let copy = s;
            s.combine(&copy);
            expected *= 2;
            assert_eq!(s.as_big_int().unwrap(), expected);
        }
        assert_eq!(s.count(), 2u64 << 61);
    }

    #[test]
    fn test_combine_leaves_other_untouched() {
        let mut a = Sum::of(&[0.5, 0.25]);
        let b = Sum::of(&[1e100, -1e100, 0.125]);
        a.combine(&b);
        assert_eq!(a.as_f64(), 0.875);
        assert_eq!(b.as_f64(), 0.125);
        assert_eq!(b.count(), 3);
    }

    #[test]
    fn test_array_matches_streaming_bitwise() {
        let data = [1e100, 1.0, -1e100, 3.3, 0.1, 1e-20, -7.25];
        let mut streamed = Sum::new();
        for &x in &data {
            streamed.accept(x);
        }
        let array = Sum::of(&data);
        assert_eq!(streamed, array);
        assert_eq!(streamed.as_f64().to_bits(), array.as_f64().to_bits());
    }
}
