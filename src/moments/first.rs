//! First moment (mean) accumulator
//!
//! All updates work on half values, `x * 0.5 - m * 0.5`, so the difference
//! between a value and the running mean cannot overflow even when both are
//! close to `f64::MAX` with opposite signs.

use crate::arithmetic::{unsigned_multiply_to_f64, ExtendedSum};

/// Deviation of an accepted value from the previous mean
#[derive(Clone, Copy, Debug)]
pub(crate) struct Deviation {
    /// `x - mean_before`
    pub dev: f64,
    /// `dev / n` where `n` includes the new value
    pub n_dev: f64,
    /// Count including the new value
    pub n: u64,
}

/// Running mean with count
///
/// Base of the moment chain. Non-finite inputs are summed separately: once
/// one is seen the mean reports their IEEE sum and never becomes finite again.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FirstMoment {
    n: u64,
    m1: f64,
    non_finite: f64,
}

impl FirstMoment {
    /// Create an empty moment
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the mean of `values`
    ///
    /// Sums the values with extended precision, then applies a second pass
    /// correction with the mean of the residuals.
    pub fn of(values: &[f64]) -> Self {
        let n = values.len() as u64;
        if n == 0 {
            return Self::new();
        }
        let mut half_sum = ExtendedSum::new();
        let mut non_finite = 0.0;
        for &x in values {
            half_sum.add(x * 0.5);
            if !x.is_finite() {
                non_finite += x;
            }
        }
        let nf = n as f64;
        let mut m1 = half_sum.value() / nf * 2.0;
        if m1.is_finite() {
            let mut residual = ExtendedSum::new();
            for &x in values {
                residual.add(x * 0.5 - m1 * 0.5);
            }
            m1 += residual.value() / nf * 2.0;
        }
        Self { n, m1, non_finite }
    }

    /// Add a value and return its deviation from the previous mean
    #[inline]
    pub(crate) fn update(&mut self, x: f64) -> Deviation {
        if !x.is_finite() {
            self.non_finite += x;
        }
        let half_dev = x * 0.5 - self.m1 * 0.5;
        self.n += 1;
        let half_n_dev = half_dev / self.n as f64;
        self.m1 += half_n_dev * 2.0;
        Deviation {
            dev: half_dev * 2.0,
            n_dev: half_n_dev * 2.0,
            n: self.n,
        }
    }

    /// Add a value
    #[inline]
    pub fn accept(&mut self, x: f64) {
        self.update(x);
    }

    /// Merge another moment into this one
    ///
    /// The larger partition is used as the base of the update, so the result
    /// does not depend on the order of the operands.
    pub fn combine(&mut self, other: &FirstMoment) {
        let (n1, n2) = (self.n, other.n);
        if n2 == 0 {
            return;
        }
        if n1 == 0 {
            *self = *other;
            return;
        }
        let (m1, m2) = (self.m1, other.m1);
        let n = n1 + n2;
        self.m1 = if n1 == n2 {
            m1 * 0.5 + m2 * 0.5
        } else if n1 > n2 {
            m1 + (m2 * 0.5 - m1 * 0.5) * (2.0 * n2 as f64 / n as f64)
        } else {
            m2 + (m1 * 0.5 - m2 * 0.5) * (2.0 * n1 as f64 / n as f64)
        };
        self.n = n;
        self.non_finite += other.non_finite;
    }

    /// Number of values
    pub fn n(&self) -> u64 {
        self.n
    }

    /// Current mean; NaN when empty
    pub fn mean(&self) -> f64 {
        if self.n == 0 {
            f64::NAN
        } else if self.non_finite.is_finite() {
            self.m1
        } else {
            self.non_finite
        }
    }

    /// Check that every value seen was finite
    pub fn is_finite(&self) -> bool {
        self.non_finite.is_finite()
    }

    /// Running mean of the finite updates, without the non-finite override
    pub(crate) fn raw_mean(&self) -> f64 {
        self.m1
    }
}

/// Mean shift term shared by the higher moment combines
///
/// Returns `(delta, n1 * n2 / n)` for partitions of size `n1` and `n2` with
/// means `m1` and `m2`, where `delta = m2 - m1`.
#[inline]
pub(crate) fn combine_terms(m1: f64, m2: f64, n1: u64, n2: u64) -> (f64, f64) {
    let delta = (m2 * 0.5 - m1 * 0.5) * 2.0;
    let n = (n1 + n2) as f64;
    (delta, unsigned_multiply_to_f64(n1, n2) / n)
}
