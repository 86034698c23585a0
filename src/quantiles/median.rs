//! Median of a sample

use super::method::{interpolate, NanPolicy};
use super::selection::{prepare, select, select_pair};
use crate::element::Element;
use crate::traits::{check_range, Result, StatisticsError};

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Median of `f64`, `i32` or `i64` data
///
/// Shares the NaN and copy semantics of [`Quantile`](super::Quantile) but
/// locates only the middle element, or the middle pair for an even count.
/// The mean of a middle pair cannot overflow. Results agree with
/// `Quantile::evaluate(values, 0.5)` to within rounding, though not
/// necessarily bit for bit.
///
/// ```
/// use numstats::quantiles::Median;
///
/// let median = Median::with_defaults();
/// assert!(median.evaluate::<f64>(&mut []).unwrap().is_nan());
/// assert_eq!(median.evaluate(&mut [4.0, 1.0, 3.0, 2.0]).unwrap(), 2.5);
/// assert_eq!(median.evaluate(&mut [i64::MAX, i64::MAX - 2]).unwrap(), i64::MAX as f64);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Median {
    nan_policy: NanPolicy,
    copy: bool,
}

impl Default for Median {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Median {
    /// Default configuration: [`NanPolicy::Include`], copy enabled
    pub const fn with_defaults() -> Self {
        Self {
            nan_policy: NanPolicy::Include,
            copy: true,
        }
    }

    pub const fn with_nan_policy(self, nan_policy: NanPolicy) -> Self {
        Self { nan_policy, ..self }
    }

    pub const fn with_copy(self, copy: bool) -> Self {
        Self { copy, ..self }
    }

    pub fn nan_policy(&self) -> NanPolicy {
        self.nan_policy
    }

    pub fn is_copy(&self) -> bool {
        self.copy
    }

    /// Median of `values`; NaN when empty
    pub fn evaluate<T: Element>(&self, values: &mut [T]) -> Result<f64> {
        let mut prepared = prepare(values, self.nan_policy, self.copy)?;
        let finite = prepared.finite;
        let data = prepared.work.as_mut_slice();
        let n = data.len();
        if n == 0 {
            return Ok(f64::NAN);
        }
        let hi = n / 2;
        if hi >= finite {
            return Ok(f64::NAN);
        }
        let data = &mut data[..finite];
        if n % 2 == 1 {
            select(data, &[hi]);
            return Ok(data[hi].to_f64());
        }
        let (lower, upper) = select_pair(data, hi);
        Ok(interpolate(lower, upper, 0.5))
    }

    /// Median of the sub-range `[from, to)` of `values`
    pub fn evaluate_range<T: Element>(&self, values: &mut [T], from: usize, to: usize) -> Result<f64> {
        check_range(from, to, values.len())?;
        self.evaluate(&mut values[from..to])
    }

    /// Median of the sequence `f(0), f(1), ..., f(n - 1)`; fails if `n` is 0
    pub fn evaluate_fn<F>(&self, n: usize, f: F) -> Result<f64>
    where
        F: Fn(usize) -> f64,
    {
        if n == 0 {
            return Err(StatisticsError::InvalidArgument(fmt!(
                "sequence length must be positive: {}",
                n
            )));
        }
        let mut values: Vec<f64> = (0..n).map(f).collect();
        self.with_copy(false).evaluate(&mut values)
    }
}
