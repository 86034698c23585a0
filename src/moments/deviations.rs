//! Sums of central powers of deviations from the mean
//!
//! Each level wraps the one below it and updates it on every value, so a
//! single accumulator provides all lower moments. Streaming updates follow
//! Welford and Pébay; merges use the pairwise formulas of Chan et al.
//! generalised to the third and fourth power by Pébay (2008).

use super::first::{combine_terms, Deviation, FirstMoment};

/// Sum of squared deviations from the mean (`M2`)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SumOfSquaredDeviations {
    first: FirstMoment,
    ss: f64,
}

impl SumOfSquaredDeviations {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute from `values` with the corrected two-pass algorithm
    ///
    /// The sum of residuals from the first pass is used to remove the
    /// error of the computed mean from the sum of squares.
    pub fn of(values: &[f64]) -> Self {
        let n = values.len();
        if n == 0 {
            return Self::new();
        }
        let first = FirstMoment::of(values);
        if !first.is_finite() {
            return Self {
                first,
                ss: f64::NAN,
            };
        }
        let m = first.raw_mean();
        let mut s = 0.0;
        let mut ss = 0.0;
        for &x in values {
            let d = x - m;
            s += d;
            ss += d * d;
        }
        ss -= s * s / n as f64;
        Self { first, ss }
    }

    #[inline]
    pub(crate) fn update(&mut self, x: f64) -> Deviation {
        let n0 = self.first.n() as f64;
        let d = self.first.update(x);
        self.ss += n0 * d.dev * d.n_dev;
        d
    }

    /// Add a value
    #[inline]
    pub fn accept(&mut self, x: f64) {
        self.update(x);
    }

    /// Merge another accumulator into this one
    pub fn combine(&mut self, other: &SumOfSquaredDeviations) {
        let (n1, n2) = (self.first.n(), other.first.n());
        if n2 == 0 {
            return;
        }
        if n1 == 0 {
            *self = *other;
            return;
        }
        let (delta, w) = combine_terms(self.first.raw_mean(), other.first.raw_mean(), n1, n2);
        self.ss = (self.ss + other.ss) + delta * delta * w;
        self.first.combine(&other.first);
    }

    /// Mean accumulator
    pub fn first(&self) -> &FirstMoment {
        &self.first
    }

    /// Number of values
    pub fn n(&self) -> u64 {
        self.first.n()
    }

    /// Current mean
    pub fn mean(&self) -> f64 {
        self.first.mean()
    }

    /// Sum of squared deviations; NaN when empty or after a non-finite value
    pub fn sum_of_squared_deviations(&self) -> f64 {
        if self.first.n() == 0 || !self.first.is_finite() {
            f64::NAN
        } else {
            self.ss
        }
    }

    /// Sample or population variance
    pub(crate) fn variance(&self, biased: bool) -> f64 {
        let n = self.first.n();
        if n == 0 || !self.first.is_finite() {
            return f64::NAN;
        }
        if n == 1 {
            return 0.0;
        }
        let denom = if biased { n } else { n - 1 };
        self.ss / denom as f64
    }
}

/// Sum of cubed deviations from the mean (`M3`)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SumOfCubedDeviations {
    second: SumOfSquaredDeviations,
    sc: f64,
}

impl SumOfCubedDeviations {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute from `values` with the corrected two-pass algorithm
    ///
    /// Residuals are taken around the computed mean `m` and the sum is
    /// shifted to the exact mean `m + s / n`, where `s` is the residual sum.
    pub fn of(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::new();
        }
        let second = SumOfSquaredDeviations::of(values);
        if !second.first.is_finite() {
            return Self {
                second,
                sc: f64::NAN,
            };
        }
        let m = second.first.raw_mean();
        let (mut s, mut s2, mut s3) = (0.0, 0.0, 0.0);
        for &x in values {
            let d = x - m;
            let d2 = d * d;
            s += d;
            s2 += d2;
            s3 += d2 * d;
        }
        let c = s / values.len() as f64;
        let sc = s3 - c * (3.0 * s2 - 2.0 * c * s);
        Self { second, sc }
    }

    #[inline]
    pub(crate) fn update(&mut self, x: f64) -> Deviation {
        let m2 = self.second.ss;
        let d = self.second.update(x);
        let n0 = (d.n - 1) as f64;
        let n = d.n as f64;
        let term1 = d.dev * d.n_dev * n0;
        self.sc += term1 * d.n_dev * (n - 2.0) - 3.0 * d.n_dev * m2;
        d
    }

    /// Add a value
    #[inline]
    pub fn accept(&mut self, x: f64) {
        self.update(x);
    }

    /// Merge another accumulator into this one
    pub fn combine(&mut self, other: &SumOfCubedDeviations) {
        let (na, nb) = (self.second.n(), other.second.n());
        if nb == 0 {
            return;
        }
        if na == 0 {
            *self = *other;
            return;
        }
        let (delta, w) = combine_terms(
            self.second.first.raw_mean(),
            other.second.first.raw_mean(),
            na,
            nb,
        );
        let n = (na + nb) as f64;
        let (fa, fb) = (na as f64, nb as f64);
        let (m2a, m2b) = (self.second.ss, other.second.ss);
        self.sc = (self.sc + other.sc)
            + delta * delta * delta * w * ((fa - fb) / n)
            + 3.0 * delta * ((fa * m2b - fb * m2a) / n);
        self.second.combine(&other.second);
    }

    /// Lower moments
    pub fn second(&self) -> &SumOfSquaredDeviations {
        &self.second
    }

    /// Number of values
    pub fn n(&self) -> u64 {
        self.second.n()
    }

    /// Sample or population skewness
    ///
    /// NaN when fewer than 3 values (1 when biased) or after a non-finite
    /// value; 0 when all values are equal.
    pub(crate) fn skewness(&self, biased: bool) -> f64 {
        let n = self.second.n();
        let min = if biased { 1 } else { 3 };
        if n < min || !self.second.first.is_finite() {
            return f64::NAN;
        }
        let nf = n as f64;
        let m2 = self.second.ss / nf;
        if m2 == 0.0 {
            return 0.0;
        }
        let m3 = self.sc / nf;
        let g1 = m3 / (m2 * crate::math::sqrt(m2));
        if biased {
            g1
        } else {
            g1 * crate::math::sqrt(nf * (nf - 1.0)) / (nf - 2.0)
        }
    }
}

/// Sum of fourth powers of deviations from the mean (`M4`)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SumOfFourthDeviations {
    third: SumOfCubedDeviations,
    sq: f64,
}

impl SumOfFourthDeviations {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute from `values` with the corrected two-pass algorithm
    pub fn of(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::new();
        }
        let third = SumOfCubedDeviations::of(values);
        if !third.second.first.is_finite() {
            return Self {
                third,
                sq: f64::NAN,
            };
        }
        let m = third.second.first.raw_mean();
        let (mut s, mut s2, mut s3, mut s4) = (0.0, 0.0, 0.0, 0.0);
        for &x in values {
            let d = x - m;
            let d2 = d * d;
            s += d;
            s2 += d2;
            s3 += d2 * d;
            s4 += d2 * d2;
        }
        let c = s / values.len() as f64;
        let sq = s4 - c * (4.0 * s3 - c * (6.0 * s2 - 3.0 * c * s));
        Self { third, sq }
    }

    #[inline]
    pub(crate) fn update(&mut self, x: f64) -> Deviation {
        let m2 = self.third.second.ss;
        let m3 = self.third.sc;
        let d = self.third.update(x);
        let n0 = (d.n - 1) as f64;
        let n = d.n as f64;
        let term1 = d.dev * d.n_dev * n0;
        let n_dev2 = d.n_dev * d.n_dev;
        self.sq += term1 * n_dev2 * (n * n - 3.0 * n + 3.0) + 6.0 * n_dev2 * m2
            - 4.0 * d.n_dev * m3;
        d
    }

    /// Add a value
    #[inline]
    pub fn accept(&mut self, x: f64) {
        self.update(x);
    }

    /// Merge another accumulator into this one
    pub fn combine(&mut self, other: &SumOfFourthDeviations) {
        let (na, nb) = (self.third.n(), other.third.n());
        if nb == 0 {
            return;
        }
        if na == 0 {
            *self = *other;
            return;
        }
        let (delta, w) = combine_terms(
            self.third.second.first.raw_mean(),
            other.third.second.first.raw_mean(),
            na,
            nb,
        );
        let n = (na + nb) as f64;
        let (fa, fb) = (na as f64, nb as f64);
        let (m2a, m2b) = (self.third.second.ss, other.third.second.ss);
        let (m3a, m3b) = (self.third.sc, other.third.sc);
        let delta2 = delta * delta;
        self.sq = (self.sq + other.sq)
            + delta2 * delta2 * w * ((fa * fa + fb * fb - fa * fb) / (n * n))
            + 6.0 * delta2 * ((fa * fa * m2b + fb * fb * m2a) / (n * n))
            + 4.0 * delta * ((fa * m3b - fb * m3a) / n);
        self.third.combine(&other.third);
    }

    /// Lower moments
    pub fn third(&self) -> &SumOfCubedDeviations {
        &self.third
    }

    /// Number of values
    pub fn n(&self) -> u64 {
        self.third.n()
    }

    /// Sample or population excess kurtosis
    ///
    /// NaN when fewer than 4 values (1 when biased) or after a non-finite
    /// value; 0 when all values are equal.
    pub(crate) fn kurtosis(&self, biased: bool) -> f64 {
        let n = self.third.n();
        let min = if biased { 1 } else { 4 };
        if n < min || !self.third.second.first.is_finite() {
            return f64::NAN;
        }
        let nf = n as f64;
        let m2 = self.third.second.ss / nf;
        if m2 == 0.0 {
            return 0.0;
        }
        let m4 = self.sq / nf;
        let g2 = m4 / (m2 * m2) - 3.0;
        if biased {
            g2
        } else {
            ((nf + 1.0) * g2 + 6.0) * (nf - 1.0) / ((nf - 2.0) * (nf - 3.0))
        }
    }
}
