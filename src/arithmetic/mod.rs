//! Extended-precision arithmetic kernel
//!
//! Fixed-width wide integers and compensated floating-point summation used by
//! the accumulators to sum long sequences without overflow or cancellation.
//!
//! - [`Int128`]: exact signed sum of 64-bit values
//! - [`UInt192`]: exact unsigned sum of 128-bit squares
//! - [`ExtendedSum`]: double-double (`hi + lo`) floating-point sum
//!
//! The free functions expose the exact word-level operations and the
//! rounding conversions shared by every statistic result.
//!
//! # Example
//!
//! ```
//! use numstats::arithmetic::{to_int_exact, ExtendedSum, Int128};
//!
//! let mut sum = Int128::new();
//! sum.add_i64(i64::MAX);
//! sum.add_i64(i64::MAX);
//! assert_eq!(sum.value(), 2 * i64::MAX as i128);
//!
//! let s = ExtendedSum::of(&[1e100, 1.0, -1e100]);
//! assert_eq!(s.value(), 1.0);
//!
//! assert_eq!(to_int_exact(2.5).unwrap(), 3);
//! assert_eq!(to_int_exact(-2.5).unwrap(), -2);
//! ```

mod extended;
mod int128;
mod uint192;

pub use extended::ExtendedSum;
pub use int128::Int128;
pub use uint192::UInt192;

use num_bigint::BigInt;
use num_traits::FromPrimitive;

use crate::math;
use crate::traits::{Result, StatisticsError};

#[cfg(feature = "std")]
use std::string::{String, ToString};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};

/// 2^63 as a double; the first value above the `i64` range
const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

/// High 64 bits of the exact 128-bit square of `a`
///
/// Equal to `(a as i128 * a as i128) >> 64`. The square is non-negative so
/// the result is always in `[0, 2^62]`.
#[inline]
pub fn square_high(a: i64) -> i64 {
    let sq = (a as i128) * (a as i128);
    (sq >> 64) as i64
}

/// High 64 bits of the unsigned 128-bit product `a * b`
#[inline]
pub fn unsigned_multiply_high(a: u64, b: u64) -> u64 {
    (((a as u128) * (b as u128)) >> 64) as u64
}

/// Unsigned 128-bit product `a * b` rounded to the nearest double
///
/// Every bit of the product takes part in the rounding decision.
#[inline]
pub fn unsigned_multiply_to_f64(a: u64, b: u64) -> f64 {
    ((a as u128) * (b as u128)) as f64
}

/// Unsigned 128-bit value `hi * 2^64 + lo` rounded to the nearest double (ties to even)
#[inline]
pub fn uint128_to_f64(hi: u64, lo: u64) -> f64 {
    (((hi as u128) << 64) | lo as u128) as f64
}

/// Round to the nearest integer with ties toward positive infinity
///
/// Matches `floor(x + 0.5)` evaluated exactly, so `round_half_up(x + k)`
/// equals `round_half_up(x) + k` for any integer `k` where both are exact.
/// NaN and infinities are returned unchanged.
#[inline]
pub fn round_half_up(x: f64) -> f64 {
    let f = math::floor(x);
    // x - floor(x) is exact for finite x
    if x - f >= 0.5 {
        f + 1.0
    } else {
        f
    }
}

/// Round `x` half-up and convert to `i32`
///
/// Fails with [`StatisticsError::Arithmetic`] for NaN and when the rounded
/// value lies outside the `i32` range (including infinities).
pub fn to_int_exact(x: f64) -> Result<i32> {
    let r = round_half_up(x);
    if r.is_nan() {
        return Err(StatisticsError::Arithmetic(
            "NaN cannot be converted to int".to_string(),
        ));
    }
    if r < i32::MIN as f64 || r > i32::MAX as f64 {
        return Err(StatisticsError::Arithmetic(format_overflow("int", x)));
    }
    Ok(r as i32)
}

/// Round `x` half-up and convert to `i64`
///
/// Fails with [`StatisticsError::Arithmetic`] for NaN and when the rounded
/// value lies outside the `i64` range (including infinities).
pub fn to_long_exact(x: f64) -> Result<i64> {
    let r = round_half_up(x);
    if r.is_nan() {
        return Err(StatisticsError::Arithmetic(
            "NaN cannot be converted to long".to_string(),
        ));
    }
    if r < -TWO_POW_63 || r >= TWO_POW_63 {
        return Err(StatisticsError::Arithmetic(format_overflow("long", x)));
    }
    Ok(r as i64)
}

/// Round `x` half-up and convert to an arbitrary-precision integer
///
/// Fails with [`StatisticsError::Arithmetic`] for NaN and infinities.
pub fn to_big_int_exact(x: f64) -> Result<BigInt> {
    let r = round_half_up(x);
    if !r.is_finite() {
        return Err(StatisticsError::Arithmetic(format_overflow("BigInteger", x)));
    }
    BigInt::from_f64(r).ok_or_else(|| StatisticsError::Arithmetic(format_overflow("BigInteger", x)))
}

fn format_overflow(target: &str, x: f64) -> String {
    fmt!("value {} cannot be converted to {}", x, target)
}
