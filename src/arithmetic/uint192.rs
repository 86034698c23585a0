//! Unsigned 192-bit accumulator for exact sums of squares

use num_bigint::BigInt;

use super::{square_high, uint128_to_f64};
use crate::math;

/// Exact unsigned sum held in three 64-bit limbs
///
/// Used to sum squares of 64-bit integers: each square is below 2^127 and
/// up to 2^63 of them sum below 2^190. Carries are propagated explicitly
/// between limbs; arithmetic past 2^192 wraps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UInt192 {
    hi: u64,
    mid: u64,
    lo: u64,
}

impl UInt192 {
    /// Create a zero accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a 128-bit value
    pub fn from_u128(x: u128) -> Self {
        Self {
            hi: 0,
            mid: (x >> 64) as u64,
            lo: x as u64,
        }
    }

    /// Add a value interpreted as an unsigned 64-bit integer
    #[inline]
    pub fn add_positive(&mut self, x: u64) {
        let (lo, carry) = self.lo.overflowing_add(x);
        self.lo = lo;
        if carry {
            let (mid, carry) = self.mid.overflowing_add(1);
            self.mid = mid;
            self.hi = self.hi.wrapping_add(carry as u64);
        }
    }

    /// Add the exact square of a signed 64-bit integer
    #[inline]
    pub fn add_square(&mut self, x: i64) {
        let high = square_high(x) as u64;
        let low = x.wrapping_mul(x) as u64;
        self.add(&Self {
            hi: 0,
            mid: high,
            lo: low,
        });
    }

    /// Add another accumulator
    #[inline]
    pub fn add(&mut self, other: &UInt192) {
        let (lo, c1) = self.lo.overflowing_add(other.lo);
        let (mid, c2) = self.mid.overflowing_add(other.mid);
        let (mid, c3) = mid.overflowing_add(c1 as u64);
        self.lo = lo;
        self.mid = mid;
        // c2 and c3 cannot both be set
        self.hi = self
            .hi
            .wrapping_add(other.hi)
            .wrapping_add((c2 | c3) as u64);
    }

    /// Check for zero
    pub fn is_zero(&self) -> bool {
        self.hi == 0 && self.mid == 0 && self.lo == 0
    }

    /// Value as `u128` if the upper limb is zero
    pub fn to_u128(&self) -> Option<u128> {
        if self.hi == 0 {
            Some(((self.mid as u128) << 64) | self.lo as u128)
        } else {
            None
        }
    }

    /// Nearest double (ties to even), rounding on all 192 bits
    pub fn to_f64(&self) -> f64 {
        if self.hi == 0 {
            return uint128_to_f64(self.mid, self.lo);
        }
        let shift = self.hi.leading_zeros();
        // Top 128 significant bits, with discarded low bits folded into a sticky bit
        let (mut top, rest) = if shift == 0 {
            (((self.hi as u128) << 64) | self.mid as u128, self.lo)
        } else {
            (
                ((self.hi as u128) << (64 + shift))
                    | ((self.mid as u128) << shift)
                    | (self.lo >> (64 - shift)) as u128,
                self.lo << shift,
            )
        };
        if rest != 0 {
            top |= 1;
        }
        (top as f64) * math::pow2(64 - shift as i32)
    }

    /// Exact value as an arbitrary-precision integer
    pub fn to_big_int(&self) -> BigInt {
        (BigInt::from(self.hi) << 128u32) + (BigInt::from(self.mid) << 64u32) + BigInt::from(self.lo)
    }
}
