//! Aggregated statistics of `i32` and `i64` values

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use super::aggregator::{Aggregator, Builder, State};
use super::chain::Moments;
use super::components::{Components, Requirements, INTEGER};
use super::handle::{Query, StatisticValue};
use super::statistic::{Statistic, StatisticsConfiguration};
use crate::element::IntegerElement;
use crate::math;
use crate::moments::{integer_mean, integer_variance};
use crate::result::Value;
use crate::statistics::{GeometricMean, IntegerSum, IntegerSumOfSquares, Max, Min, Product, SumOfLogs};
use crate::traits::{Accumulator, Result, StatisticResult};

use num_bigint::BigInt;

#[derive(Clone, Debug)]
pub(crate) struct IntegerState<T> {
    components: Components,
    count: u64,
    min: Option<Min<T>>,
    max: Option<Max<T>>,
    sum: Option<IntegerSum<T>>,
    product: Option<Product<T>>,
    sum_of_squares: Option<IntegerSumOfSquares<T>>,
    sum_of_logs: Option<SumOfLogs<T>>,
    moments: Moments,
}

fn combine_part<A: Accumulator>(a: &mut Option<A>, b: &Option<A>) {
    if let (Some(a), Some(b)) = (a.as_mut(), b.as_ref()) {
        a.combine(b);
    }
}

fn build_part<A: Accumulator>(c: Components, bit: Components, values: &[A::Item]) -> Option<A> {
    c.contains(bit).then(|| A::of(values))
}

impl<T: IntegerElement> IntegerState<T> {
    fn variance(&self, biased: bool) -> Option<f64> {
        let sum = self.sum.as_ref()?.sum();
        let sum_sq = self.sum_of_squares.as_ref()?.sum();
        Some(integer_variance(&sum, &sum_sq, self.count, biased))
    }
}

impl<T: IntegerElement> State for IntegerState<T> {
    type Item = T;

    const REQUIREMENTS: &'static Requirements = &INTEGER;

    fn new(c: Components) -> Self {
        Self::of(c, &[])
    }

    fn of(c: Components, values: &[T]) -> Self {
        // the moment chain works on doubles
        let moments = if c.moment_order() > 0 {
            let doubles: Vec<f64> = values.iter().map(|v| v.to_f64()).collect();
            Moments::of(c, &doubles)
        } else {
            Moments::None
        };
        Self {
            components: c,
            count: values.len() as u64,
            min: build_part(c, Components::MIN, values),
            max: build_part(c, Components::MAX, values),
            sum: build_part(c, Components::SUM, values),
            product: build_part(c, Components::PRODUCT, values),
            sum_of_squares: build_part(c, Components::SUM_OF_SQUARES, values),
            sum_of_logs: build_part(c, Components::SUM_OF_LOGS, values),
            moments,
        }
    }

    #[inline]
    fn accept(&mut self, x: T) {
        self.count += 1;
        if let Some(s) = self.min.as_mut() {
            s.accept(x);
        }
        if let Some(s) = self.max.as_mut() {
            s.accept(x);
        }
        if let Some(s) = self.sum.as_mut() {
            s.accept(x);
        }
        if let Some(s) = self.product.as_mut() {
            s.accept(x);
        }
        if let Some(s) = self.sum_of_squares.as_mut() {
            s.accept(x);
        }
        if let Some(s) = self.sum_of_logs.as_mut() {
            s.accept(x);
        }
        self.moments.accept(x.to_f64());
    }

    fn combine(&mut self, other: &Self) {
        self.count += other.count;
        combine_part(&mut self.min, &other.min);
        combine_part(&mut self.max, &other.max);
        combine_part(&mut self.sum, &other.sum);
        combine_part(&mut self.product, &other.product);
        combine_part(&mut self.sum_of_squares, &other.sum_of_squares);
        combine_part(&mut self.sum_of_logs, &other.sum_of_logs);
        self.moments.combine(&other.moments);
    }

    fn components(&self) -> Components {
        self.components
    }

    fn count(&self) -> u64 {
        self.count
    }
}

impl<T: IntegerElement> Query for IntegerState<T> {
    fn query(&self, statistic: Statistic, configuration: &StatisticsConfiguration) -> Option<Value> {
        let biased = configuration.is_biased();
        let value = match statistic {
            Statistic::Min => self.min.as_ref()?.value(),
            Statistic::Max => self.max.as_ref()?.value(),
            Statistic::Sum => self.sum.as_ref()?.value(),
            Statistic::SumOfSquares => self.sum_of_squares.as_ref()?.value(),
            Statistic::Mean => {
                Value::Float(integer_mean(&self.sum.as_ref()?.sum(), self.count))
            }
            Statistic::Variance => Value::Float(self.variance(biased)?),
            Statistic::StandardDeviation => Value::Float(math::sqrt(self.variance(biased)?)),
            Statistic::Skewness => Value::Float(self.moments.skewness(biased)?),
            Statistic::Kurtosis => Value::Float(self.moments.kurtosis(biased)?),
            Statistic::Product => Value::Float(self.product.as_ref()?.get()),
            Statistic::SumOfLogs => Value::Float(self.sum_of_logs.as_ref()?.get()),
            Statistic::GeometricMean => {
                let logs = self.sum_of_logs.as_ref()?;
                Value::Float(GeometricMean::<T>::compute(logs.get(), logs.count()))
            }
        };
        Some(value)
    }
}

/// Several statistics of integer values computed together
///
/// The sum, sum of squares, mean and variance are exact: they come from
/// 128-bit and 192-bit integer sums and are rounded once when read. Skewness
/// and kurtosis use the floating-point moment chain on the converted values.
///
/// # Example
///
/// ```
/// use numstats::aggregate::{LongStatistics, Statistic};
///
/// let stats = LongStatistics::of(&[Statistic::Variance], &[i64::MAX, i64::MAX - 2]).unwrap();
/// // the sums behind the variance come for free
/// assert!(stats.is_supported(Statistic::Sum));
/// assert!(stats.is_supported(Statistic::SumOfSquares));
/// assert_eq!(stats.get_as_f64(Statistic::Variance).unwrap(), 2.0);
/// assert!(stats.get_as_i64(Statistic::Sum).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct IntegerStatistics<T: IntegerElement> {
    inner: Aggregator<IntegerState<T>>,
}

/// Statistics of `i32` values
pub type IntStatistics = IntegerStatistics<i32>;
/// Statistics of `i64` values
pub type LongStatistics = IntegerStatistics<i64>;

/// Builder of [`IntegerStatistics`] for a fixed statistic set
#[derive(Clone, Debug)]
pub struct IntegerStatisticsBuilder<T: IntegerElement> {
    inner: Builder<IntegerState<T>>,
}

impl<T: IntegerElement> IntegerStatisticsBuilder<T> {
    /// Configuration of the aggregators built from now on
    pub fn set_configuration(mut self, configuration: StatisticsConfiguration) -> Self {
        self.inner.set_configuration(configuration);
        self
    }

    pub fn build(&self, values: &[T]) -> IntegerStatistics<T> {
        IntegerStatistics {
            inner: self.inner.build(values),
        }
    }

    pub fn build_empty(&self) -> IntegerStatistics<T> {
        IntegerStatistics {
            inner: self.inner.build_empty(),
        }
    }

    pub fn build_range(&self, values: &[T], from: usize, to: usize) -> Result<IntegerStatistics<T>> {
        Ok(IntegerStatistics {
            inner: self.inner.build_range(values, from, to)?,
        })
    }
}

impl<T: IntegerElement> IntegerStatistics<T> {
    /// Builder for `statistics`; fails if none are given
    pub fn builder(statistics: &[Statistic]) -> Result<IntegerStatisticsBuilder<T>> {
        Ok(IntegerStatisticsBuilder {
            inner: Builder::new(statistics)?,
        })
    }

    pub fn new(statistics: &[Statistic]) -> Result<Self> {
        Ok(Self::builder(statistics)?.build_empty())
    }

    pub fn of(statistics: &[Statistic], values: &[T]) -> Result<Self> {
        Ok(Self::builder(statistics)?.build(values))
    }

    #[inline]
    pub fn accept(&mut self, value: T) {
        self.inner.accept(value);
    }

    pub fn accept_all(&mut self, values: &[T]) {
        self.inner.accept_all(values);
    }

    pub fn count(&self) -> u64 {
        self.inner.count()
    }

    pub fn is_supported(&self, statistic: Statistic) -> bool {
        self.inner.is_supported(statistic)
    }

    pub fn get(&self, statistic: Statistic) -> Result<Value> {
        self.inner.value(statistic)
    }

    pub fn get_as_f64(&self, statistic: Statistic) -> Result<f64> {
        self.inner.value(statistic).map(|v| v.as_f64())
    }

    pub fn get_as_i32(&self, statistic: Statistic) -> Result<i32> {
        self.inner.value(statistic)?.as_i32()
    }

    pub fn get_as_i64(&self, statistic: Statistic) -> Result<i64> {
        self.inner.value(statistic)?.as_i64()
    }

    pub fn get_as_big_int(&self, statistic: Statistic) -> Result<BigInt> {
        self.inner.value(statistic)?.as_big_int()
    }

    pub fn get_result(&self, statistic: Statistic) -> Result<StatisticValue> {
        self.inner.get_result(statistic)
    }

    pub fn get_supplier(&self, statistic: Statistic) -> Result<impl Fn() -> f64 + Send + Sync> {
        let handle = self.inner.get_result(statistic)?;
        Ok(move || handle.as_f64())
    }

    /// Merge `other` into `self`; see [`DoubleStatistics::combine`](super::DoubleStatistics::combine)
    pub fn combine(&mut self, other: &IntegerStatistics<T>) -> Result<&mut Self> {
        self.inner.combine(&other.inner)?;
        Ok(self)
    }

    pub fn set_configuration(&mut self, configuration: StatisticsConfiguration) -> &mut Self {
        self.inner.set_configuration(configuration);
        self
    }

    pub fn configuration(&self) -> StatisticsConfiguration {
        self.inner.configuration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::StatisticsError;

    #[test]
    fn test_exact_results() {
        let values = [i64::MAX, i64::MAX, i64::MIN, 5];
        let s = LongStatistics::of(&Statistic::ALL, &values).unwrap();
        assert_eq!(s.get(Statistic::Sum).unwrap(), Value::Integer(i64::MAX as i128 + 4));
        assert_eq!(s.get_as_i64(Statistic::Min).unwrap(), i64::MIN);
        assert_eq!(s.get_as_i64(Statistic::Max).unwrap(), i64::MAX);
        let expected_sq = BigInt::from(i64::MAX).pow(2) * 2 + BigInt::from(i64::MIN).pow(2) + 25;
        assert_eq!(s.get_as_big_int(Statistic::SumOfSquares).unwrap(), expected_sq);
        assert!(s.get_as_i64(Statistic::SumOfSquares).is_err());
        assert!(s.is_supported(Statistic::Kurtosis));
    }

    #[test]
    fn test_mean_and_variance_match_accumulators() {
        use crate::moments::{IntMean, IntVariance};
        let values = [3, -7, 12, 0, 5, 5, i32::MAX, i32::MIN];
        let mut s = IntStatistics::of(&[Statistic::Variance], &values).unwrap();
        assert_eq!(s.get_as_f64(Statistic::Mean).unwrap(), IntMean::of(&values).as_f64());
        assert_eq!(s.get_as_f64(Statistic::Variance).unwrap(), IntVariance::of(&values).as_f64());
        s.set_configuration(StatisticsConfiguration::with_defaults().with_biased(true));
        let mut v = IntVariance::of(&values);
        v.set_biased(true);
        assert_eq!(s.get_as_f64(Statistic::Variance).unwrap(), v.as_f64());
        assert_eq!(
            s.get_as_f64(Statistic::StandardDeviation).unwrap(),
            v.as_f64().sqrt()
        );
    }

    #[test]
    fn test_partitioned_equals_whole() {
        let values: Vec<i32> = (0..100).map(|i| (i * 7919) % 211 - 100).collect();
        let stats = [Statistic::Sum, Statistic::Variance, Statistic::Min, Statistic::Max];
        let builder = IntStatistics::builder(&stats).unwrap();
        let whole = builder.build(&values);
        let mut parts = builder.build_empty();
        for chunk in values.chunks(13) {
            parts.combine(&builder.build(chunk)).unwrap();
        }
        for s in stats {
            assert_eq!(parts.get(s).unwrap(), whole.get(s).unwrap(), "{}", s);
        }
        assert_eq!(parts.count(), 100);
    }

    #[test]
    fn test_combine_requires_superset() {
        let mut sum = LongStatistics::of(&[Statistic::Sum], &[1, 2]).unwrap();
        let mut variance = LongStatistics::of(&[Statistic::Variance], &[3, 4]).unwrap();
        assert!(matches!(
            variance.combine(&sum),
            Err(StatisticsError::IncompatibleCombine { .. })
        ));
        assert_eq!(variance.count(), 2);
        sum.combine(&variance).unwrap();
        assert_eq!(sum.get_as_i64(Statistic::Sum).unwrap(), 10);
        assert!(!sum.is_supported(Statistic::Variance));
    }

    #[test]
    fn test_supplier_is_live() {
        let mut s = IntStatistics::new(&[Statistic::Max, Statistic::GeometricMean]).unwrap();
        let max = s.get_supplier(Statistic::Max).unwrap();
        let gm = s.get_result(Statistic::GeometricMean).unwrap();
        assert_eq!(max(), i32::MIN as f64);
        assert!(gm.as_f64().is_nan());
        s.accept_all(&[1, 4]);
        assert_eq!(max(), 4.0);
        assert!((gm.as_f64() - 2.0).abs() < 1e-15);
        assert!(s.get_supplier(Statistic::Mean).is_err());
    }
}
