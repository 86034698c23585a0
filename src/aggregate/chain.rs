//! The shared moment chain of an aggregator

use super::components::Components;
use crate::moments::{FirstMoment, SumOfCubedDeviations, SumOfFourthDeviations, SumOfSquaredDeviations};

/// Highest moment accumulator an aggregator needs
///
/// Lower moments are read through the higher ones, so a single chain serves
/// every moment statistic requested together.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Moments {
    None,
    First(FirstMoment),
    Second(SumOfSquaredDeviations),
    Third(SumOfCubedDeviations),
    Fourth(SumOfFourthDeviations),
}

impl Moments {
    pub(crate) fn new(components: Components) -> Self {
        match components.moment_order() {
            0 => Moments::None,
            1 => Moments::First(FirstMoment::new()),
            2 => Moments::Second(SumOfSquaredDeviations::new()),
            3 => Moments::Third(SumOfCubedDeviations::new()),
            _ => Moments::Fourth(SumOfFourthDeviations::new()),
        }
    }

    /// Compute from an array with the two-pass algorithms
    pub(crate) fn of(components: Components, values: &[f64]) -> Self {
        match components.moment_order() {
            0 => Moments::None,
            1 => Moments::First(FirstMoment::of(values)),
            2 => Moments::Second(SumOfSquaredDeviations::of(values)),
            3 => Moments::Third(SumOfCubedDeviations::of(values)),
            _ => Moments::Fourth(SumOfFourthDeviations::of(values)),
        }
    }

    #[inline]
    pub(crate) fn accept(&mut self, x: f64) {
        match self {
            Moments::None => {}
            Moments::First(m) => m.accept(x),
            Moments::Second(m) => m.accept(x),
            Moments::Third(m) => m.accept(x),
            Moments::Fourth(m) => m.accept(x),
        }
    }

    /// Merge `other`, which must hold at least the moments of `self`
    pub(crate) fn combine(&mut self, other: &Moments) {
        match self {
            Moments::None => {}
            Moments::First(m) => {
                if let Some(o) = other.first() {
                    m.combine(o);
                }
            }
            Moments::Second(m) => {
                if let Some(o) = other.second() {
                    m.combine(o);
                }
            }
            Moments::Third(m) => {
                if let Some(o) = other.third() {
                    m.combine(o);
                }
            }
            Moments::Fourth(m) => {
                if let Moments::Fourth(o) = other {
                    m.combine(o);
                }
            }
        }
    }

    pub(crate) fn first(&self) -> Option<&FirstMoment> {
        match self {
            Moments::None => None,
            Moments::First(m) => Some(m),
            Moments::Second(m) => Some(m.first()),
            Moments::Third(m) => Some(m.second().first()),
            Moments::Fourth(m) => Some(m.third().second().first()),
        }
    }

    pub(crate) fn second(&self) -> Option<&SumOfSquaredDeviations> {
        match self {
            Moments::Second(m) => Some(m),
            Moments::Third(m) => Some(m.second()),
            Moments::Fourth(m) => Some(m.third().second()),
            _ => None,
        }
    }

    pub(crate) fn third(&self) -> Option<&SumOfCubedDeviations> {
        match self {
            Moments::Third(m) => Some(m),
            Moments::Fourth(m) => Some(m.third()),
            _ => None,
        }
    }

    pub(crate) fn mean(&self) -> Option<f64> {
        self.first().map(FirstMoment::mean)
    }

    pub(crate) fn variance(&self, biased: bool) -> Option<f64> {
        self.second().map(|m| m.variance(biased))
    }

    pub(crate) fn skewness(&self, biased: bool) -> Option<f64> {
        self.third().map(|m| m.skewness(biased))
    }

    pub(crate) fn kurtosis(&self, biased: bool) -> Option<f64> {
        match self {
            Moments::Fourth(m) => Some(m.kurtosis(biased)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: [f64; 7] = [1.0, 2.0, 3.0, 4.0, 10.0, -2.5, 0.25];

    #[test]
    fn test_levels() {
        let m = Moments::of(Components::MOMENT_1.union(Components::MOMENT_2), &DATA);
        assert!(matches!(m, Moments::Second(_)));
        assert!(m.mean().is_some());
        assert!(m.variance(false).is_some());
        assert!(m.skewness(false).is_none());
        assert!(Moments::new(Components::MIN).mean().is_none());
    }

    #[test]
    fn test_combine_projects_higher_chain() {
        let mut low = Moments::of(Components::MOMENT_1, &DATA[..3]);
        let high = Moments::of(Components::MOMENT_4, &DATA[3..]);
        low.combine(&high);
        let expected = FirstMoment::of(&DATA).mean();
        let mean = low.mean().unwrap_or(f64::NAN);
        assert!((mean - expected).abs() < 1e-15);
        assert_eq!(low.first().map(FirstMoment::n), Some(7));
    }

    #[test]
    fn test_streaming_matches_array() {
        let c = Components::MOMENT_4;
        let mut m = Moments::new(c);
        for &x in DATA.iter() {
            m.accept(x);
        }
        let a = Moments::of(c, &DATA);
        let k1 = m.kurtosis(true).unwrap_or(f64::NAN);
        let k2 = a.kurtosis(true).unwrap_or(f64::NAN);
        assert!((k1 - 0.17813214430345914).abs() < 1e-12);
        assert!((k2 - 0.17813214430345914).abs() < 1e-12);
    }
}
