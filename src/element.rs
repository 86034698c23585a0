//! Numeric element domains
//!
//! Accumulators and order statistics are generic over the element type of
//! their input. Three domains are supported: `f64`, `i32` and `i64`.
//! The traits are sealed; the set of domains is closed.

use core::cmp::Ordering;
use core::fmt::Debug;

use crate::arithmetic::UInt192;
use crate::result::Value;

mod private {
    pub trait Sealed {}

    impl Sealed for f64 {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
}

/// Element type of a statistic input
pub trait Element:
    private::Sealed + Copy + Debug + PartialEq + Default + Send + Sync + 'static
{
    /// Value of an empty minimum (`+inf` for doubles, `MAX` for integers)
    const MIN_IDENTITY: Self;
    /// Value of an empty maximum (`-inf` for doubles, `MIN` for integers)
    const MAX_IDENTITY: Self;

    /// Nearest double
    fn to_f64(self) -> f64;

    /// Check for NaN; always false for integers
    fn is_nan(self) -> bool;

    /// Total order used for sorting; for doubles `-0.0 < 0.0`
    fn total_cmp(&self, other: &Self) -> Ordering;

    /// Smaller of two values; NaN wins and `-0.0` is below `0.0`
    fn min_of(self, other: Self) -> Self;

    /// Larger of two values; NaN wins and `0.0` is above `-0.0`
    fn max_of(self, other: Self) -> Self;

    /// `self - other` rounded to a double; may overflow to infinity for doubles
    fn difference(self, other: Self) -> f64;

    /// Exact result value
    fn to_value(self) -> Value;
}

impl Element for f64 {
    const MIN_IDENTITY: Self = f64::INFINITY;
    const MAX_IDENTITY: Self = f64::NEG_INFINITY;

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }

    #[inline]
    fn total_cmp(&self, other: &Self) -> Ordering {
        f64::total_cmp(self, other)
    }

    #[inline]
    fn min_of(self, other: Self) -> Self {
        if self.is_nan() || other.is_nan() {
            f64::NAN
        } else if f64::total_cmp(&self, &other) == Ordering::Greater {
            other
        } else {
            self
        }
    }

    #[inline]
    fn max_of(self, other: Self) -> Self {
        if self.is_nan() || other.is_nan() {
            f64::NAN
        } else if f64::total_cmp(&self, &other) == Ordering::Less {
            other
        } else {
            self
        }
    }

    #[inline]
    fn difference(self, other: Self) -> f64 {
        self - other
    }

    fn to_value(self) -> Value {
        Value::Float(self)
    }
}

macro_rules! impl_integer_element {
    ($t:ty) => {
        impl Element for $t {
            const MIN_IDENTITY: Self = <$t>::MAX;
            const MAX_IDENTITY: Self = <$t>::MIN;

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn is_nan(self) -> bool {
                false
            }

            #[inline]
            fn total_cmp(&self, other: &Self) -> Ordering {
                Ord::cmp(self, other)
            }

            #[inline]
            fn min_of(self, other: Self) -> Self {
                Ord::min(self, other)
            }

            #[inline]
            fn max_of(self, other: Self) -> Self {
                Ord::max(self, other)
            }

            #[inline]
            fn difference(self, other: Self) -> f64 {
                (self as i128 - other as i128) as f64
            }

            fn to_value(self) -> Value {
                Value::Integer(self as i128)
            }
        }
    };
}

impl_integer_element!(i32);
impl_integer_element!(i64);

/// Integer element type, summed exactly
pub trait IntegerElement: Element + Ord + Into<i64> {
    /// Add the exact square of the value to a wide accumulator
    fn add_square(self, acc: &mut UInt192);
}

impl IntegerElement for i32 {
    #[inline]
    fn add_square(self, acc: &mut UInt192) {
        let x = self as i64;
        // |x| <= 2^31 so the square fits in 63 bits
        acc.add_positive((x * x) as u64);
    }
}

impl IntegerElement for i64 {
    #[inline]
    fn add_square(self, acc: &mut UInt192) {
        acc.add_square(self);
    }
}
