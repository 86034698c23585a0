//! Quantiles of a sample

use super::method::{interpolate, EstimationMethod, NanPolicy};
use super::selection::{prepare, select};
use crate::element::Element;
use crate::math;
use crate::traits::{check_range, Result, StatisticsError};

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

/// Quantile of `f64`, `i32` or `i64` data
///
/// A `Quantile` is an immutable configuration: the NaN policy, the
/// estimation method and whether the input is copied before it is
/// partitioned. With `copy` disabled the evaluated slice is reordered in
/// place; nothing outside it is touched.
///
/// Defaults: [`NanPolicy::Include`], [`EstimationMethod::Hf8`], copy enabled.
///
/// # Example
///
/// ```
/// use numstats::quantiles::{EstimationMethod, Quantile};
///
/// let q = Quantile::with_defaults().with_method(EstimationMethod::Hf7);
/// let mut data = [3.0, 1.0, 2.0];
/// assert_eq!(q.evaluate(&mut data, 0.75).unwrap(), 2.5);
/// assert_eq!(data, [3.0, 1.0, 2.0]);
///
/// let quartiles = q.evaluate_many(&mut data, &[0.25, 0.5, 0.75]).unwrap();
/// assert_eq!(quartiles, vec![1.5, 2.0, 2.5]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quantile {
    nan_policy: NanPolicy,
    method: EstimationMethod,
    copy: bool,
}

impl Default for Quantile {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Quantile {
    /// Default configuration
    pub const fn with_defaults() -> Self {
        Self {
            nan_policy: NanPolicy::Include,
            method: EstimationMethod::Hf8,
            copy: true,
        }
    }

    /// Return a copy using the given NaN policy
    pub const fn with_nan_policy(self, nan_policy: NanPolicy) -> Self {
        Self { nan_policy, ..self }
    }

    /// Return a copy using the given estimation method
    pub const fn with_method(self, method: EstimationMethod) -> Self {
        Self { method, ..self }
    }

    /// Return a copy that evaluates on a copy of the input (`true`) or in place
    pub const fn with_copy(self, copy: bool) -> Self {
        Self { copy, ..self }
    }

    pub fn nan_policy(&self) -> NanPolicy {
        self.nan_policy
    }

    pub fn method(&self) -> EstimationMethod {
        self.method
    }

    pub fn is_copy(&self) -> bool {
        self.copy
    }

    /// Quantile `p` of `values`
    ///
    /// Returns NaN for empty input. Fails if `p` is not in `[0, 1]`, or with
    /// [`NanPolicy::Error`] if the input contains NaN; in both cases `values`
    /// is left unchanged.
    pub fn evaluate<T: Element>(&self, values: &mut [T], p: f64) -> Result<f64> {
        let q = self.evaluate_many(values, &[p])?;
        Ok(q[0])
    }

    /// Quantiles of `values` for each probability in `probabilities`
    ///
    /// The data is partitioned once for all requested ranks; each result equals
    /// the corresponding single [`evaluate`](Self::evaluate).
    pub fn evaluate_many<T: Element>(&self, values: &mut [T], probabilities: &[f64]) -> Result<Vec<f64>> {
        check_probabilities(probabilities)?;
        let mut prepared = prepare(values, self.nan_policy, self.copy)?;
        let finite = prepared.finite;
        let data = prepared.work.as_mut_slice();
        let n = data.len();
        if n == 0 {
            return Ok(vec![f64::NAN; probabilities.len()]);
        }

        let positions: Vec<f64> = probabilities
            .iter()
            .map(|&p| self.method.position(p, n))
            .collect();

        let mut indices = Vec::with_capacity(2 * positions.len());
        for &pos in &positions {
            let j = math::floor(pos) as usize;
            indices.push(j);
            if pos > j as f64 {
                indices.push(j + 1);
            }
        }
        indices.retain(|&i| i < finite);
        indices.sort_unstable();
        indices.dedup();
        select(&mut data[..finite], &indices);

        Ok(positions
            .iter()
            .map(|&pos| order_statistic(data, finite, pos))
            .collect())
    }

    /// Quantile `p` of the sub-range `[from, to)` of `values`
    ///
    /// The range is checked before anything else; with copy disabled only
    /// the elements inside it are reordered.
    pub fn evaluate_range<T: Element>(&self, values: &mut [T], from: usize, to: usize, p: f64) -> Result<f64> {
        check_range(from, to, values.len())?;
        self.evaluate(&mut values[from..to], p)
    }

    /// Quantiles of the sub-range `[from, to)` of `values`
    pub fn evaluate_range_many<T: Element>(
        &self,
        values: &mut [T],
        from: usize,
        to: usize,
        probabilities: &[f64],
    ) -> Result<Vec<f64>> {
        check_range(from, to, values.len())?;
        self.evaluate_many(&mut values[from..to], probabilities)
    }

    /// Quantiles of the sequence `f(0), f(1), ..., f(n - 1)`
    ///
    /// Fails if `n` is 0 or no probabilities are given.
    ///
    /// ```
    /// use numstats::quantiles::{EstimationMethod, Quantile};
    ///
    /// let q = Quantile::with_defaults().with_method(EstimationMethod::Hf7);
    /// let r = q.evaluate_fn(5, |i| (i * i) as f64, &[0.5]).unwrap();
    /// assert_eq!(r, vec![4.0]);
    /// assert!(q.evaluate_fn(0, |i| i as f64, &[0.5]).is_err());
    /// ```
    pub fn evaluate_fn<F>(&self, n: usize, f: F, probabilities: &[f64]) -> Result<Vec<f64>>
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
        self.with_copy(false).evaluate_many(&mut values, probabilities)
    }

    /// `n` evenly spaced probabilities `i / (n + 1)` for `i = 1..=n`
    ///
    /// ```
    /// use numstats::quantiles::Quantile;
    ///
    /// assert_eq!(Quantile::probabilities(3).unwrap(), vec![0.25, 0.5, 0.75]);
    /// ```
    pub fn probabilities(n: usize) -> Result<Vec<f64>> {
        check_count(n)?;
        let d = (n + 1) as f64;
        Ok((1..=n).map(|i| i as f64 / d).collect())
    }

    /// `n` evenly spaced probabilities strictly inside `(p1, p2)`
    pub fn probabilities_between(n: usize, p1: f64, p2: f64) -> Result<Vec<f64>> {
        check_count(n)?;
        check_probability(p1)?;
        check_probability(p2)?;
        if p1 >= p2 {
            return Err(StatisticsError::InvalidArgument(fmt!(
                "invalid probability range: [{}, {}]",
                p1,
                p2
            )));
        }
        let d = (n + 1) as f64;
        Ok((1..=n)
            .map(|i| {
                let q = i as f64 / d;
                (1.0 - q) * p1 + q * p2
            })
            .collect())
    }
}

/// Value at a zero-based real position of partially sorted data
///
/// `data[..finite]` holds the selected order statistics; positions reaching
/// past it fall on NaN.
fn order_statistic<T: Element>(data: &[T], finite: usize, pos: f64) -> f64 {
    let j = math::floor(pos) as usize;
    if j >= finite {
        return f64::NAN;
    }
    let t = pos - j as f64;
    if t == 0.0 {
        return data[j].to_f64();
    }
    if j + 1 >= finite {
        return f64::NAN;
    }
    interpolate(data[j], data[j + 1], t)
}

fn check_probability(p: f64) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(StatisticsError::InvalidArgument(fmt!(
            "invalid probability: {}",
            p
        )))
    }
}

fn check_probabilities(probabilities: &[f64]) -> Result<()> {
    if probabilities.is_empty() {
        return Err(StatisticsError::InvalidArgument(
            "no probabilities specified".into(),
        ));
    }
    probabilities.iter().try_for_each(|&p| check_probability(p))
}

fn check_count(n: usize) -> Result<()> {
    if n < 1 {
        return Err(StatisticsError::InvalidArgument(fmt!(
            "number of probabilities must be strictly positive: {}",
            n
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn hf(method: EstimationMethod) -> Quantile {
        Quantile::with_defaults().with_method(method)
    }

    #[test]
    fn test_defaults() {
        let q = Quantile::default();
        assert_eq!(q.nan_policy(), NanPolicy::Include);
        assert_eq!(q.method(), EstimationMethod::Hf8);
        assert!(q.is_copy());
        let q = q.with_copy(false).with_nan_policy(NanPolicy::Error);
        assert!(!q.is_copy());
        assert_eq!(q.nan_policy(), NanPolicy::Error);
        assert_eq!(q.method(), EstimationMethod::Hf8);
    }

    #[test]
    fn test_known_values() {
        assert_eq!(hf(EstimationMethod::Hf7).evaluate(&mut [1.0, 2.0, 3.0], 0.75), Ok(2.5));
        assert_eq!(hf(EstimationMethod::Hf6).evaluate(&mut [1.0, 2.0, 3.0], 0.75), Ok(3.0));
    }

    #[test]
    fn test_empty_is_nan() {
        let q = Quantile::with_defaults();
        assert!(q.evaluate::<f64>(&mut [], 0.5).unwrap().is_nan());
        let r = q.evaluate_many::<i32>(&mut [], &[0.1, 0.9]).unwrap();
        assert!(r.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_invalid_probability_does_not_mutate() {
        let q = Quantile::with_defaults().with_copy(false);
        let mut data = [3.0, 2.0, 1.0];
        for p in [-0.1, 1.5, f64::NAN] {
            assert!(matches!(
                q.evaluate(&mut data, p),
                Err(StatisticsError::InvalidArgument(_))
            ));
            assert_eq!(data, [3.0, 2.0, 1.0]);
        }
        assert!(q.evaluate_many(&mut data, &[]).is_err());
    }

    #[test]
    fn test_many_matches_single() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut data: Vec<f64> = (0..500).map(|i| ((i * 37) % 101) as f64 * 0.5 - 10.0).collect();
        let ps = [0.0, 0.01, 0.25, 0.5, 0.5, 0.75, 0.99, 1.0];
        for &method in EstimationMethod::ALL.iter() {
            data.shuffle(&mut rng);
            let q = hf(method);
            let many = q.evaluate_many(&mut data, &ps).unwrap();
            for (&p, &m) in ps.iter().zip(many.iter()) {
                assert_eq!(q.evaluate(&mut data, p).unwrap(), m, "{:?} p={}", method, p);
            }
        }
    }

    #[test]
    fn test_selection_agrees_with_sort() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut data: Vec<i64> = (0..2000).map(|i| (i * 104_729) % 3001 - 1500).collect();
        let mut sorted = data.clone();
        sorted.sort_unstable();
        let q = hf(EstimationMethod::Hf1).with_copy(false);
        for p in [0.001, 0.3, 0.5, 0.999] {
            data.shuffle(&mut rng);
            let pos = EstimationMethod::Hf1.position(p, sorted.len()) as usize;
            assert_eq!(q.evaluate(&mut data, p).unwrap(), sorted[pos] as f64);
        }
    }

    #[test]
    fn test_nan_policies() {
        let data = [4.0, f64::NAN, 1.0, 3.0, 2.0];
        let q = hf(EstimationMethod::Hf7);

        // NaN ranks above every value
        let mut d = data;
        assert_eq!(q.evaluate(&mut d, 0.5).unwrap(), 3.0);
        assert!(q.evaluate(&mut d, 1.0).unwrap().is_nan());
        // interpolating towards the NaN slot
        assert!(q.evaluate(&mut d, 0.9).unwrap().is_nan());

        let q = q.with_nan_policy(NanPolicy::Exclude).with_copy(false);
        let mut d = data;
        assert_eq!(q.evaluate(&mut d, 0.5).unwrap(), 2.5);
        assert_eq!(q.evaluate(&mut d, 1.0).unwrap(), 4.0);
        assert_eq!(d.map(f64::to_bits), data.map(f64::to_bits));

        let q = q.with_nan_policy(NanPolicy::Error);
        let mut d = data;
        assert_eq!(
            q.evaluate(&mut d, 0.5),
            Err(StatisticsError::NanNotAllowed { index: 1 })
        );
        assert_eq!(d.map(f64::to_bits), data.map(f64::to_bits));
    }

    #[test]
    fn test_range() {
        let q = hf(EstimationMethod::Hf7).with_copy(false);
        let mut data = [100.0, 5.0, 3.0, 4.0, 1.0, 2.0, -100.0];
        assert_eq!(q.evaluate_range(&mut data, 1, 6, 0.5).unwrap(), 3.0);
        assert_eq!(data[0], 100.0);
        assert_eq!(data[6], -100.0);
        let mut inner = data[1..6].to_vec();
        inner.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(inner, vec![1.0, 2.0, 3.0, 4.0, 5.0]);

        let before = data;
        assert_eq!(
            q.evaluate_range(&mut data, 4, 2, 0.5),
            Err(StatisticsError::IndexOutOfBounds { from: 4, to: 2, length: 7 })
        );
        assert!(q.evaluate_range_many(&mut data, 0, 8, &[0.5]).is_err());
        assert_eq!(data, before);
    }

    #[test]
    fn test_copy_leaves_input() {
        let q = Quantile::with_defaults();
        let mut data = [5, 4, 3, 2, 1];
        assert_eq!(q.evaluate_range(&mut data, 0, 5, 0.5).unwrap(), 3.0);
        assert_eq!(data, [5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_integer_interpolation() {
        let q = hf(EstimationMethod::Hf7);
        assert_eq!(q.evaluate(&mut [i64::MAX, i64::MAX - 1], 0.5).unwrap(), i64::MAX as f64);
        assert_eq!(q.evaluate(&mut [i32::MIN, i32::MAX], 0.5).unwrap(), -0.5);
        assert_eq!(q.evaluate(&mut [7, 1, 4], 0.5).unwrap(), 4.0);
    }

    #[test]
    fn test_evaluate_fn() {
        let q = hf(EstimationMethod::Hf7);
        let r = q.evaluate_fn(4, |i| 10.0 - i as f64, &[0.0, 0.5, 1.0]).unwrap();
        assert_eq!(r, vec![7.0, 8.5, 10.0]);
        assert!(matches!(
            q.evaluate_fn(0, |_| 0.0, &[0.5]),
            Err(StatisticsError::InvalidArgument(_))
        ));
        assert!(q.evaluate_fn(3, |_| 0.0, &[]).is_err());
    }

    #[test]
    fn test_probabilities() {
        assert!(Quantile::probabilities(0).is_err());
        assert_eq!(Quantile::probabilities(1).unwrap(), vec![0.5]);

        let p = Quantile::probabilities_between(3, 0.2, 0.6).unwrap();
        let expected = [0.3, 0.4, 0.5];
        for (a, b) in p.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-15);
        }
        assert!(Quantile::probabilities_between(0, 0.2, 0.6).is_err());
        assert!(Quantile::probabilities_between(3, 0.6, 0.6).is_err());
        assert!(Quantile::probabilities_between(3, 0.7, 0.6).is_err());
        assert!(Quantile::probabilities_between(3, f64::NAN, 0.6).is_err());
        assert!(Quantile::probabilities_between(3, 0.1, 1.1).is_err());
    }
}
