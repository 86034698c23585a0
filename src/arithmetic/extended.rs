//! Double-double floating-point summation

/// Extended-precision floating-point sum
///
/// Holds the running sum as an unevaluated pair `hi + lo`. Each addition
/// captures its exact rounding error with Knuth's two-sum and folds it into
/// `lo`, so cancellation between large terms does not lose the small ones:
///
/// ```
/// use numstats::arithmetic::ExtendedSum;
///
/// let s = ExtendedSum::of(&[1.0, f64::MAX, -7.0, -f64::MAX, 2.0, 3.0]);
/// assert_eq!(s.value(), -1.0);
/// ```
///
/// Once `hi` becomes non-finite the error term is no longer tracked and the
/// value is the IEEE sum of the non-finite contributions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtendedSum {
    hi: f64,
    lo: f64,
}

/// Low part of `a + b` where `s = fl(a + b)`
#[inline]
fn two_sum_low(a: f64, b: f64, s: f64) -> f64 {
    let bb = s - a;
    (a - (s - bb)) + (b - bb)
}

impl ExtendedSum {
    /// Create a zero sum
    pub fn new() -> Self {
        Self { hi: 0.0, lo: 0.0 }
    }

    /// Sum every value of a slice
    pub fn of(values: &[f64]) -> Self {
        let mut s = Self::new();
        for &v in values {
            s.add(v);
        }
        s
    }

    /// Add a value
    #[inline]
    pub fn add(&mut self, x: f64) {
        let s = self.hi + x;
        if s.is_finite() {
            self.lo += two_sum_low(self.hi, x, s);
        }
        self.hi = s;
    }

    /// Add another sum
    ///
    /// The result does not depend on the order of the operands.
    #[inline]
    pub fn combine(&mut self, other: &ExtendedSum) {
        let s = self.hi + other.hi;
        let err = if s.is_finite() {
            two_sum_low(self.hi, other.hi, s)
        } else {
            0.0
        };
        self.lo = (self.lo + other.lo) + err;
        self.hi = s;
    }

    /// Current sum rounded to a double
    pub fn value(&self) -> f64 {
        if self.hi.is_finite() {
            self.hi + self.lo
        } else {
            self.hi
        }
    }
}
