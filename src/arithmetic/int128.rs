//! Signed 128-bit accumulator for exact sums of 64-bit integers

use num_bigint::BigInt;

use crate::traits::{Result, StatisticsError};

/// Exact signed sum of 64-bit values
///
/// The sum of up to 2^63 `i64` values has magnitude below 2^126 and is always
/// represented exactly. Arithmetic past the 128-bit range wraps (modular
/// arithmetic), matching an arbitrary-precision sum truncated to 128 bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Int128 {
    value: i128,
}

impl Int128 {
    /// Create a zero accumulator
    pub fn new() -> Self {
        Self { value: 0 }
    }

    /// Create an accumulator holding `x`
    pub fn of(x: i64) -> Self {
        Self { value: x as i128 }
    }

    /// Create from a full 128-bit value
    pub fn from_i128(value: i128) -> Self {
        Self { value }
    }

    /// Add a 64-bit value
    #[inline]
    pub fn add_i64(&mut self, x: i64) {
        self.value = self.value.wrapping_add(x as i128);
    }

    /// Add another accumulator
    #[inline]
    pub fn add(&mut self, other: Int128) {
        self.value = self.value.wrapping_add(other.value);
    }

    /// Exact value
    pub fn value(&self) -> i128 {
        self.value
    }

    /// Nearest double (ties to even)
    pub fn to_f64(&self) -> f64 {
        self.value as f64
    }

    /// Exact value as `i64`, failing if it does not fit
    pub fn to_i64(&self) -> Result<i64> {
        i64::try_from(self.value).map_err(|_| {
            StatisticsError::Arithmetic(fmt!("value {} cannot be converted to long", self.value))
        })
    }

    /// Exact value as `i32`, failing if it does not fit
    pub fn to_i32(&self) -> Result<i32> {
        i32::try_from(self.value).map_err(|_| {
            StatisticsError::Arithmetic(fmt!("value {} cannot be converted to int", self.value))
        })
    }

    /// Exact value as an arbitrary-precision integer
    pub fn to_big_int(&self) -> BigInt {
        BigInt::from(self.value)
    }

    /// Divide by a positive count, rounding the quotient to a double
    ///
    /// The result is within 1 ULP of the exact quotient and correctly rounded
    /// when both operands are exactly representable as doubles. Division by
    /// zero returns NaN.
    pub fn divide_to_f64(&self, divisor: u64) -> f64 {
        if divisor == 0 {
            return f64::NAN;
        }
        const EXACT: u128 = 1 << 53;
        if self.value.unsigned_abs() < EXACT && (divisor as u128) < EXACT {
            return self.value as f64 / divisor as f64;
        }
        let d = divisor as i128;
        let q = self.value / d;
        let r = self.value % d;
        q as f64 + r as f64 / divisor as f64
    }
}

impl From<i64> for Int128 {
    fn from(x: i64) -> Self {
        Self::of(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_sum_past_long_range() {
        let mut s = Int128::new();
        for _ in 0..10 {
            s.add_i64(i64::MAX);
        }
        s.add_i64(i64::MIN);
        assert_eq!(s.to_big_int(), BigInt::from(i64::MAX) * 10 + BigInt::from(i64::MIN));
        assert!(s.to_i64().is_err());
        assert!(s.to_i32().is_err());
    }

    #[test]
    fn test_conversions() {
        let s = Int128::of(-42);
        assert_eq!(s.to_i32().unwrap(), -42);
        assert_eq!(s.to_i64().unwrap(), -42);
        assert_eq!(s.to_f64(), -42.0);

        let s = Int128::of(i64::MAX);
        assert!(s.to_i32().is_err());
        assert_eq!(s.to_i64().unwrap(), i64::MAX);
    }

    #[test]
    fn test_add_wraps() {
        let mut s = Int128::from_i128(i128::MAX);
        s.add(Int128::of(1));
        assert_eq!(s.value(), i128::MIN);
    }

    #[test]
    fn test_divide_small() {
        assert_eq!(Int128::of(10).divide_to_f64(4), 2.5);
        assert_eq!(Int128::of(-1).divide_to_f64(3), -1.0 / 3.0);
        assert!(Int128::of(1).divide_to_f64(0).is_nan());
    }

    #[test]
    fn test_divide_large() {
        // (2^63 - 1) * 3 / 3 must recover the exact long value as a double
        let mut s = Int128::new();
        for _ in 0..3 {
            s.add_i64(i64::MAX);
        }
        assert_eq!(s.divide_to_f64(3), i64::MAX as f64);

        // 2^100 + 1 over 2 is 2^99 to double precision
        let s = Int128::from_i128((1i128 << 100) + 1);
        assert_eq!(s.divide_to_f64(2), 2f64.powi(99));

        let s = Int128::from_i128(-(1i128 << 70) - 3);
        let expected = -(2f64.powi(70)) / 7.0;
        let actual = s.divide_to_f64(7);
        assert!(((actual - expected) / expected).abs() <= 2.0 * f64::EPSILON);
    }
}
