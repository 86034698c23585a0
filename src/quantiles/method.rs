//! NaN policies and quantile estimation methods

use crate::element::Element;
use crate::math;

/// Treatment of NaN values in the input of an order statistic
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NanPolicy {
    /// NaN sorts above every other value; a statistic that lands on a NaN is NaN
    #[default]
    Include,
    /// NaN values are removed before the statistic is computed
    Exclude,
    /// Any NaN value is an error
    Error,
}

/// Sample quantile definitions of Hyndman and Fan (1996)
///
/// For a sorted sample `x[1..=n]` each method maps the probability `p` to a
/// real rank `h`; the quantile is `x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])`,
/// with `h` clamped to `[1, n]`.
///
/// | Method | Rank `h` |
/// |---|---|
/// | `Hf1` | `ceil(n p)` (inverse of the empirical CDF) |
/// | `Hf2` | `n p + 0.5`, averaging at discontinuities |
/// | `Hf3` | `rint(n p)` (nearest even order statistic) |
/// | `Hf4` | `n p` |
/// | `Hf5` | `n p + 0.5` |
/// | `Hf6` | `(n + 1) p` |
/// | `Hf7` | `(n - 1) p + 1` |
/// | `Hf8` | `(n + 1/3) p + 1/3` (median-unbiased) |
/// | `Hf9` | `(n + 1/4) p + 3/8` (normal-unbiased) |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EstimationMethod {
    Hf1,
    Hf2,
    Hf3,
    Hf4,
    Hf5,
    Hf6,
    Hf7,
    #[default]
    Hf8,
    Hf9,
}

impl EstimationMethod {
    /// All methods in order
    pub const ALL: [EstimationMethod; 9] = [
        EstimationMethod::Hf1,
        EstimationMethod::Hf2,
        EstimationMethod::Hf3,
        EstimationMethod::Hf4,
        EstimationMethod::Hf5,
        EstimationMethod::Hf6,
        EstimationMethod::Hf7,
        EstimationMethod::Hf8,
        EstimationMethod::Hf9,
    ];

    /// Zero-based position of the quantile `p` in a sorted sample of `n > 0` values
    ///
    /// The result lies in `[0, n - 1]`; a fractional part asks for linear
    /// interpolation between neighbouring order statistics. The median
    /// position `(n - 1) / 2` is exact for every continuous method.
    pub fn position(self, p: f64, n: usize) -> f64 {
        let nf = n as f64;
        let pos = match self {
            EstimationMethod::Hf1 => math::ceil(nf * p) - 1.0,
            EstimationMethod::Hf2 => {
                let i = nf * p;
                let j = math::floor(i);
                if i == j {
                    j - 0.5
                } else {
                    j
                }
            }
            EstimationMethod::Hf3 => math::rint(nf * p) - 1.0,
            EstimationMethod::Hf4 => nf * p - 1.0,
            EstimationMethod::Hf5 => nf * p - 0.5,
            EstimationMethod::Hf6 => (nf + 1.0) * p - 1.0,
            EstimationMethod::Hf7 => (nf - 1.0) * p,
            EstimationMethod::Hf8 => nf * p + (p - 2.0) / 3.0,
            EstimationMethod::Hf9 => nf * p + (p - 2.5) * 0.25,
        };
        pos.clamp(0.0, nf - 1.0)
    }
}

/// Linear interpolation `a + t (b - a)` for `0 < t < 1`
///
/// Equal bounds return `b`, so interpolating between `-0.0` and `0.0`
/// keeps the sign of the upper bound. A difference that overflows falls
/// back to the weighted form.
pub(crate) fn interpolate<T: Element>(a: T, b: T, t: f64) -> f64 {
    if a == b {
        return b.to_f64();
    }
    let d = b.difference(a);
    if d.is_infinite() {
        a.to_f64() * (1.0 - t) + b.to_f64() * t
    } else {
        a.to_f64() + t * d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quantile_of_sorted(method: EstimationMethod, x: &[f64], p: f64) -> f64 {
        let pos = method.position(p, x.len());
        let j = math::floor(pos) as usize;
        let t = pos - j as f64;
        if t == 0.0 {
            x[j]
        } else {
            interpolate(x[j], x[j + 1], t)
        }
    }

    #[test]
    fn test_known_values() {
        let x = [1.0, 2.0, 3.0];
        assert_eq!(quantile_of_sorted(EstimationMethod::Hf7, &x, 0.75), 2.5);
        assert_eq!(quantile_of_sorted(EstimationMethod::Hf6, &x, 0.75), 3.0);
    }

    #[test]
    fn test_reference_quantiles() {
        // quantile(c(1, 2, 3, 4, 5, 10), 0.3, type = k) in R
        let x = [1.0, 2.0, 3.0, 4.0, 5.0, 10.0];
        let expected = [2.0, 2.0, 2.0, 1.8, 2.3, 2.1, 2.5, 2.2333333333333334, 2.25];
        for (method, &e) in EstimationMethod::ALL.iter().zip(expected.iter()) {
            let q = quantile_of_sorted(*method, &x, 0.3);
            assert!((q - e).abs() < 1e-12, "{:?}: {} != {}", method, q, e);
        }
    }

    #[test]
    fn test_extreme_probabilities_clamp() {
        let x = [4.0, 5.0, 6.0, 7.0];
        for &method in EstimationMethod::ALL.iter() {
            assert_eq!(quantile_of_sorted(method, &x, 0.0), 4.0, "{:?}", method);
            assert_eq!(quantile_of_sorted(method, &x, 1.0), 7.0, "{:?}", method);
        }
    }

    #[test]
    fn test_median_position_is_exact() {
        for n in 1..200 {
            let mid = (n - 1) as f64 / 2.0;
            for &method in &EstimationMethod::ALL[4..] {
                assert_eq!(method.position(0.5, n), mid, "{:?} n={}", method, n);
            }
        }
    }

    #[test]
    fn test_hf2_averages_at_discontinuity() {
        let x = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_of_sorted(EstimationMethod::Hf2, &x, 0.5), 2.5);
        assert_eq!(quantile_of_sorted(EstimationMethod::Hf2, &x, 0.6), 3.0);
    }

    #[test]
    fn test_interpolate_edge_cases() {
        assert!(interpolate(-0.0, 0.0, 0.5).is_sign_positive());
        assert!(interpolate(0.0, -0.0, 0.5).is_sign_negative());
        assert_eq!(interpolate(-f64::MAX, f64::MAX, 0.5), 0.0);
        assert_eq!(interpolate(f64::NEG_INFINITY, 1.0, 0.5), f64::NEG_INFINITY);
        assert!(interpolate(1.0, f64::NAN, 0.5).is_nan());
        assert_eq!(interpolate(i64::MAX - 1, i64::MAX, 0.5), i64::MAX as f64);
        assert_eq!(interpolate(2i32, 3, 0.25), 2.25);
    }
}
