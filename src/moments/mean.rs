//! Arithmetic mean

use super::first::FirstMoment;
use crate::result::Value;
use crate::traits::{Accumulator, StatisticResult};

/// Arithmetic mean of doubles
///
/// Streaming updates use the online formula `m += (x - m) / n` on half values
/// so intermediate terms cannot overflow. Arrays are summed with extended
/// precision and corrected with a second pass.
///
/// The mean of an empty set is NaN. A non-finite input makes the mean the
/// IEEE sum of all non-finite inputs.
///
/// # Example
///
/// ```
/// use numstats::moments::Mean;
/// use numstats::traits::{Accumulator, StatisticResult};
///
/// let mut mean = Mean::of(&[1.0, 2.0]);
/// mean.accept(6.0);
/// assert_eq!(mean.as_f64(), 3.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mean {
    first: FirstMoment,
}

impl Mean {
    /// Create an empty mean
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mean
    pub fn get(&self) -> f64 {
        self.first.mean()
    }
}

impl StatisticResult for Mean {
    fn value(&self) -> Value {
        Value::Float(self.get())
    }
}

impl Accumulator for Mean {
    type Item = f64;

    fn of(values: &[f64]) -> Self {
        Self {
            first: FirstMoment::of(values),
        }
    }

    #[inline]
    fn accept(&mut self, value: f64) {
        self.first.accept(value);
    }

    fn combine(&mut self, other: &Self) -> &mut Self {
        self.first.combine(&other.first);
        self
    }

    fn count(&self) -> u64 {
        self.first.n()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_nan() {
        assert!(Mean::new().as_f64().is_nan());
        assert!(Mean::new().as_i64().is_err());
    }

    #[test]
    fn test_shift_invariance() {
        let values = [1.5, 2.5, 3.25, -0.75, 8.0];
        let base = Mean::of(&values).get();
        let shift = 1e6;
        let shifted: Vec<f64> = values.iter().map(|x| x + shift).collect();
        let m = Mean::of(&shifted).get();
        assert!((m - shift - base).abs() < 1e-9);
    }

    #[test]
    fn test_large_opposite_values() {
        let m = Mean::of(&[f64::MAX, -f64::MAX]);
        assert_eq!(m.get(), 0.0);
        let mut s = Mean::new();
        s.accept(-f64::MAX);
        s.accept(f64::MAX);
        assert_eq!(s.get(), 0.0);
    }

    #[test]
    fn test_combine_identity() {
        let a = Mean::of(&[3.0, 4.0, 8.0]);
        let mut e = Mean::new();
        e.combine(&a);
        assert_eq!(e.get(), a.get());
        let mut a2 = a;
        a2.combine(&Mean::new());
        assert_eq!(a2.get(), a.get());
        assert_eq!(a2.count(), 3);
    }

    #[test]
    fn test_non_finite() {
        let mut m = Mean::of(&[1.0, f64::NAN]);
        m.accept(2.0);
        assert!(m.get().is_nan());
        assert_eq!(Mean::of(&[f64::INFINITY, 5.0]).get(), f64::INFINITY);
    }
}
