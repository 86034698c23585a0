//! Skewness and kurtosis

use super::deviations::{SumOfCubedDeviations, SumOfFourthDeviations};
use crate::result::Value;
use crate::traits::{Accumulator, StatisticResult};

/// Skewness of doubles
///
/// The biased value is `g1 = m3 / m2^(3/2)` with `mk` the k-th central
/// moment; the unbiased (default) value is the adjusted Fisher-Pearson
/// coefficient `G1 = g1 * sqrt(n (n - 1)) / (n - 2)`.
///
/// NaN with fewer than 3 values (1 when biased) or after a non-finite input.
/// 0 when every value is equal.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skewness {
    moments: SumOfCubedDeviations,
    biased: bool,
}

impl Skewness {
    /// Create an empty skewness
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose between the population (`true`) and sample (`false`) estimate
    pub fn set_biased(&mut self, biased: bool) -> &mut Self {
        self.biased = biased;
        self
    }

    /// Check if the biased estimate is used
    pub fn is_biased(&self) -> bool {
        self.biased
    }

    /// Current skewness
    pub fn get(&self) -> f64 {
        self.moments.skewness(self.biased)
    }
}

impl StatisticResult for Skewness {
    fn value(&self) -> Value {
        Value::Float(self.get())
    }
}

impl Accumulator for Skewness {
    type Item = f64;

    fn of(values: &[f64]) -> Self {
        Self {
            moments: SumOfCubedDeviations::of(values),
            biased: false,
        }
    }

    #[inline]
    fn accept(&mut self, value: f64) {
        self.moments.accept(value);
    }

    fn combine(&mut self, other: &Self) -> &mut Self {
        self.moments.combine(&other.moments);
        self
    }

    fn count(&self) -> u64 {
        self.moments.n()
    }
}

/// Excess kurtosis of doubles
///
/// The biased value is `g2 = m4 / m2^2 - 3`; the unbiased (default) value is
/// `G2 = ((n + 1) g2 + 6) (n - 1) / ((n - 2) (n - 3))`.
///
/// NaN with fewer than 4 values (1 when biased) or after a non-finite input.
/// 0 when every value is equal.
///
/// # Example
///
/// ```
/// use numstats::moments::Kurtosis;
/// use numstats::traits::{Accumulator, StatisticResult};
///
/// let mut k = Kurtosis::of(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
/// assert!((k.as_f64() - 0.940625).abs() < 1e-12);
/// assert!((k.set_biased(true).as_f64() + 0.21875).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kurtosis {
    moments: SumOfFourthDeviations,
    biased: bool,
}

impl Kurtosis {
    /// Create an empty kurtosis
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose between the population (`true`) and sample (`false`) estimate
    pub fn set_biased(&mut self, biased: bool) -> &mut Self {
        self.biased = biased;
        self
    }

    /// Check if the biased estimate is used
    pub fn is_biased(&self) -> bool {
        self.biased
    }

    /// Current excess kurtosis
    pub fn get(&self) -> f64 {
        self.moments.kurtosis(self.biased)
    }
}

impl StatisticResult for Kurtosis {
    fn value(&self) -> Value {
        Value::Float(self.get())
    }
}

impl Accumulator for Kurtosis {
    type Item = f64;

    fn of(values: &[f64]) -> Self {
        Self {
            moments: SumOfFourthDeviations::of(values),
            biased: false,
        }
    }

    #[inline]
    fn accept(&mut self, value: f64) {
        self.moments.accept(value);
    }

    fn combine(&mut self, other: &Self) -> &mut Self {
        self.moments.combine(&other.moments);
        self
    }

    fn count(&self) -> u64 {
        self.moments.n()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: [f64; 8] = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];

    #[test]
    fn test_skewness() {
        let mut s = Skewness::of(&DATA);
        assert!((s.get() - 0.8184875533567997).abs() < 1e-14);
        assert!((s.set_biased(true).get() - 0.65625).abs() < 1e-14);
    }

    #[test]
    fn test_streaming_matches_array() {
        let mut s = Skewness::new();
        let mut k = Kurtosis::new();
        for &x in &DATA {
            s.accept(x);
            k.accept(x);
        }
        assert!((s.get() - Skewness::of(&DATA).get()).abs() < 1e-13);
        assert!((k.get() - Kurtosis::of(&DATA).get()).abs() < 1e-13);
    }

    #[test]
    fn test_minimum_counts() {
        let mut s = Skewness::of(&[1.0, 2.0]);
        assert!(s.get().is_nan());
        assert_eq!(s.set_biased(true).get(), 0.0);
        let mut k = Kurtosis::of(&[1.0, 2.0, 4.0]);
        assert!(k.get().is_nan());
        assert!((k.set_biased(true).get() + 1.5).abs() < 1e-14);
        assert!(Skewness::new().set_biased(true).get().is_nan());
    }

    #[test]
    fn test_constant_values() {
        assert_eq!(Skewness::of(&[3.0; 5]).get(), 0.0);
        assert_eq!(Kurtosis::of(&[3.0; 5]).get(), 0.0);
    }

    #[test]
    fn test_combine_symmetric() {
        let a = Kurtosis::of(&DATA[..3]);
        let b = Kurtosis::of(&DATA[3..]);
        let mut ab = a;
        ab.combine(&b);
        let mut ba = b;
        ba.combine(&a);
        assert_eq!(ab.get(), ba.get());
        assert!((ab.get() - 0.940625).abs() < 1e-13);
    }
}
