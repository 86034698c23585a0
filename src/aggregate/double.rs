//! Aggregated statistics of `f64` values

use super::aggregator::{Aggregator, Builder, State};
use super::chain::Moments;
use super::components::{Components, Requirements, DOUBLE};
use super::handle::{Query, StatisticValue};
use super::statistic::{Statistic, StatisticsConfiguration};
use crate::math;
use crate::result::Value;
use crate::statistics::{GeometricMean, Max, Min, Product, Sum, SumOfLogs, SumOfSquares};
use crate::traits::{Accumulator, Result, StatisticResult};

use num_bigint::BigInt;

#[derive(Clone, Debug)]
pub(crate) struct DoubleState {
    components: Components,
    count: u64,
    min: Option<Min<f64>>,
    max: Option<Max<f64>>,
    sum: Option<Sum>,
    product: Option<Product<f64>>,
    sum_of_squares: Option<SumOfSquares>,
    sum_of_logs: Option<SumOfLogs<f64>>,
    moments: Moments,
}

fn combine_part<A: Accumulator>(a: &mut Option<A>, b: &Option<A>) {
    if let (Some(a), Some(b)) = (a.as_mut(), b.as_ref()) {
        a.combine(b);
    }
}

impl State for DoubleState {
    type Item = f64;

    const REQUIREMENTS: &'static Requirements = &DOUBLE;

    fn new(c: Components) -> Self {
        Self {
            components: c,
            count: 0,
            min: c.contains(Components::MIN).then(Min::new),
            max: c.contains(Components::MAX).then(Max::new),
            sum: c.contains(Components::SUM).then(Sum::new),
            product: c.contains(Components::PRODUCT).then(Product::new),
            sum_of_squares: c.contains(Components::SUM_OF_SQUARES).then(SumOfSquares::new),
            sum_of_logs: c.contains(Components::SUM_OF_LOGS).then(SumOfLogs::new),
            moments: Moments::new(c),
        }
    }

    fn of(c: Components, values: &[f64]) -> Self {
        Self {
            components: c,
            count: values.len() as u64,
            min: c.contains(Components::MIN).then(|| Min::of(values)),
            max: c.contains(Components::MAX).then(|| Max::of(values)),
            sum: c.contains(Components::SUM).then(|| Sum::of(values)),
            product: c.contains(Components::PRODUCT).then(|| Product::of(values)),
            sum_of_squares: c
                .contains(Components::SUM_OF_SQUARES)
                .then(|| SumOfSquares::of(values)),
            sum_of_logs: c
                .contains(Components::SUM_OF_LOGS)
                .then(|| SumOfLogs::of(values)),
            moments: Moments::of(c, values),
        }
    }

    #[inline]
    fn accept(&mut self, x: f64) {
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
        self.moments.accept(x);
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

impl Query for DoubleState {
    fn query(&self, statistic: Statistic, configuration: &StatisticsConfiguration) -> Option<Value> {
        let biased = configuration.is_biased();
        let value = match statistic {
            Statistic::Min => return self.min.as_ref().map(StatisticResult::value),
            Statistic::Max => return self.max.as_ref().map(StatisticResult::value),
            Statistic::Mean => self.moments.mean()?,
            Statistic::Variance => self.moments.variance(biased)?,
            Statistic::StandardDeviation => math::sqrt(self.moments.variance(biased)?),
            Statistic::Skewness => self.moments.skewness(biased)?,
            Statistic::Kurtosis => self.moments.kurtosis(biased)?,
            Statistic::Product => self.product.as_ref()?.get(),
            Statistic::Sum => self.sum.as_ref()?.get(),
            Statistic::SumOfSquares => self.sum_of_squares.as_ref()?.get(),
            Statistic::SumOfLogs => self.sum_of_logs.as_ref()?.get(),
            Statistic::GeometricMean => {
                let logs = self.sum_of_logs.as_ref()?;
                GeometricMean::<f64>::compute(logs.get(), logs.count())
            }
        };
        Some(Value::Float(value))
    }
}

/// Several statistics of `f64` values computed together
///
/// Only the accumulators the requested statistics need are maintained, and
/// statistics that share state share one accumulator: the mean, variance,
/// skewness and kurtosis all read a single moment chain. Statistics whose
/// state comes for free with the requested ones are supported as well, so
/// requesting the variance also makes the mean available.
///
/// # Example
///
/// ```
/// use numstats::aggregate::{DoubleStatistics, Statistic};
///
/// let mut stats = DoubleStatistics::of(
///     &[Statistic::Min, Statistic::Variance],
///     &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0],
/// ).unwrap();
/// assert!(stats.is_supported(Statistic::Mean));
/// assert!(!stats.is_supported(Statistic::Sum));
/// assert_eq!(stats.get_as_f64(Statistic::Mean).unwrap(), 5.0);
/// assert_eq!(stats.get_as_i64(Statistic::Min).unwrap(), 2);
/// assert!(stats.get_as_f64(Statistic::Sum).is_err());
///
/// stats.accept(-1.0);
/// assert_eq!(stats.get_as_f64(Statistic::Min).unwrap(), -1.0);
/// ```
#[derive(Clone, Debug)]
pub struct DoubleStatistics {
    inner: Aggregator<DoubleState>,
}

/// Builder of [`DoubleStatistics`] for a fixed statistic set
#[derive(Clone, Debug)]
pub struct DoubleStatisticsBuilder {
    inner: Builder<DoubleState>,
}

impl DoubleStatisticsBuilder {
    /// Configuration of the aggregators built from now on
    pub fn set_configuration(mut self, configuration: StatisticsConfiguration) -> Self {
        self.inner.set_configuration(configuration);
        self
    }

    /// Aggregator over `values`
    pub fn build(&self, values: &[f64]) -> DoubleStatistics {
        DoubleStatistics {
            inner: self.inner.build(values),
        }
    }

    /// Aggregator with no values
    pub fn build_empty(&self) -> DoubleStatistics {
        DoubleStatistics {
            inner: self.inner.build_empty(),
        }
    }

    /// Aggregator over the sub-range `[from, to)` of `values`
    pub fn build_range(&self, values: &[f64], from: usize, to: usize) -> Result<DoubleStatistics> {
        Ok(DoubleStatistics {
            inner: self.inner.build_range(values, from, to)?,
        })
    }
}

impl DoubleStatistics {
    /// Builder for `statistics`; fails if none are given
    pub fn builder(statistics: &[Statistic]) -> Result<DoubleStatisticsBuilder> {
        Ok(DoubleStatisticsBuilder {
            inner: Builder::new(statistics)?,
        })
    }

    /// Empty aggregator for `statistics`
    pub fn new(statistics: &[Statistic]) -> Result<Self> {
        Ok(Self::builder(statistics)?.build_empty())
    }

    /// Aggregator for `statistics` over `values`
    pub fn of(statistics: &[Statistic], values: &[f64]) -> Result<Self> {
        Ok(Self::builder(statistics)?.build(values))
    }

    #[inline]
    pub fn accept(&mut self, value: f64) {
        self.inner.accept(value);
    }

    pub fn accept_all(&mut self, values: &[f64]) {
        self.inner.accept_all(values);
    }

    /// Number of values seen
    pub fn count(&self) -> u64 {
        self.inner.count()
    }

    /// Check if `statistic` can be read from this aggregator
    pub fn is_supported(&self, statistic: Statistic) -> bool {
        self.inner.is_supported(statistic)
    }

    /// Current value of `statistic`
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

    /// Handle following this aggregator, bound to the current configuration
    pub fn get_result(&self, statistic: Statistic) -> Result<StatisticValue> {
        self.inner.get_result(statistic)
    }

    /// Function returning the current value of `statistic`
    ///
    /// Like [`get_result`](Self::get_result) it follows later updates but
    /// keeps the configuration in effect now.
    pub fn get_supplier(&self, statistic: Statistic) -> Result<impl Fn() -> f64 + Send + Sync> {
        let handle = self.inner.get_result(statistic)?;
        Ok(move || handle.as_f64())
    }

    /// Merge `other` into `self`
    ///
    /// Fails without changing either side unless `other` computes every
    /// statistic `self` does.
    pub fn combine(&mut self, other: &DoubleStatistics) -> Result<&mut Self> {
        self.inner.combine(&other.inner)?;
        Ok(self)
    }

    /// Change the configuration used by later reads
    ///
    /// Handles obtained earlier keep the configuration they were created with.
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
    use crate::moments::{Kurtosis, Mean, Skewness, Variance};
    use crate::traits::StatisticsError;

    const DATA: [f64; 7] = [1.0, 2.0, 3.0, 4.0, 10.0, -2.5, 0.25];

    #[test]
    fn test_shareable_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DoubleStatistics>();
        assert_send_sync::<DoubleStatisticsBuilder>();
        assert_send_sync::<StatisticValue>();
        assert_send_sync::<crate::aggregate::LongStatistics>();
    }

    #[test]
    fn test_empty_statistics_rejected() {
        assert!(matches!(
            DoubleStatistics::new(&[]),
            Err(StatisticsError::InvalidArgument(_))
        ));
        assert!(DoubleStatistics::builder(&[]).is_err());
    }

    #[test]
    fn test_supported_closure() {
        let s = DoubleStatistics::new(&[Statistic::Kurtosis]).unwrap();
        for stat in [
            Statistic::Mean,
            Statistic::Variance,
            Statistic::StandardDeviation,
            Statistic::Skewness,
            Statistic::Kurtosis,
        ] {
            assert!(s.is_supported(stat), "{}", stat);
        }
        assert!(!s.is_supported(Statistic::Min));
        assert_eq!(
            s.get_as_f64(Statistic::Min),
            Err(StatisticsError::UnsupportedStatistic("min"))
        );

        let s = DoubleStatistics::new(&[Statistic::GeometricMean]).unwrap();
        assert!(s.is_supported(Statistic::SumOfLogs));
    }

    #[test]
    fn test_matches_individual_statistics() {
        let s = DoubleStatistics::of(&Statistic::ALL, &DATA).unwrap();
        assert_eq!(s.count(), 7);
        assert_eq!(s.get_as_f64(Statistic::Mean).unwrap(), Mean::of(&DATA).as_f64());
        assert_eq!(s.get_as_f64(Statistic::Variance).unwrap(), Variance::of(&DATA).as_f64());
        assert_eq!(s.get_as_f64(Statistic::Skewness).unwrap(), Skewness::of(&DATA).as_f64());
        assert_eq!(s.get_as_f64(Statistic::Kurtosis).unwrap(), Kurtosis::of(&DATA).as_f64());
        assert_eq!(s.get_as_f64(Statistic::Sum).unwrap(), 17.75);
        assert_eq!(s.get_as_f64(Statistic::Min).unwrap(), -2.5);
        assert_eq!(s.get_as_f64(Statistic::Max).unwrap(), 10.0);
        assert_eq!(s.get_as_f64(Statistic::Product).unwrap(), -150.0);
        assert!(s.get_as_f64(Statistic::GeometricMean).unwrap().is_nan());
    }

    #[test]
    fn test_accessors_agree() {
        let s = DoubleStatistics::of(&[Statistic::Sum], &[1.5, 1.0]).unwrap();
        assert_eq!(s.get_as_f64(Statistic::Sum).unwrap(), 2.5);
        assert_eq!(s.get_as_i32(Statistic::Sum).unwrap(), 3);
        assert_eq!(s.get_as_i64(Statistic::Sum).unwrap(), 3);
        assert_eq!(s.get_as_big_int(Statistic::Sum).unwrap(), BigInt::from(3));
        assert_eq!(s.get(Statistic::Sum).unwrap(), Value::Float(2.5));

        let s = DoubleStatistics::of(&[Statistic::Mean], &[f64::NAN]).unwrap();
        assert!(s.get_as_i64(Statistic::Mean).is_err());
    }

    #[test]
    fn test_streaming_and_combine() {
        let stats = [Statistic::Min, Statistic::Max, Statistic::Sum, Statistic::Variance];
        let builder = DoubleStatistics::builder(&stats).unwrap();
        let mut left = builder.build(&DATA[..4]);
        let right = builder.build_range(&DATA, 4, 7).unwrap();
        left.combine(&right).unwrap();
        let mut streamed = builder.build_empty();
        streamed.accept_all(&DATA);

        let all = builder.build(&DATA);
        for s in stats {
            let expected = all.get_as_f64(s).unwrap();
            for agg in [&left, &streamed] {
                let v = agg.get_as_f64(s).unwrap();
                assert!((v - expected).abs() <= 1e-14 * expected.abs(), "{}", s);
            }
        }
        assert_eq!(left.count(), 7);
        assert!(builder.build_range(&DATA, 5, 8).is_err());
    }

    #[test]
    fn test_combine_compatibility() {
        let mut mean = DoubleStatistics::of(&[Statistic::Mean], &[1.0, 2.0]).unwrap();
        let mut variance = DoubleStatistics::of(&[Statistic::Variance], &[3.0, 4.0]).unwrap();

        let before = variance.get_as_f64(Statistic::Variance).unwrap();
        assert!(matches!(
            variance.combine(&mean),
            Err(StatisticsError::IncompatibleCombine { .. })
        ));
        assert_eq!(variance.get_as_f64(Statistic::Variance).unwrap(), before);
        assert_eq!(variance.count(), 2);

        mean.combine(&variance).unwrap();
        assert_eq!(mean.get_as_f64(Statistic::Mean).unwrap(), 2.5);
        assert_eq!(mean.count(), 4);
    }

    #[test]
    fn test_self_combine() {
        let mut s = DoubleStatistics::of(&[Statistic::Sum, Statistic::Mean], &[1.0, 2.0]).unwrap();
        let copy = s.clone();
        s.combine(&copy).unwrap();
        assert_eq!(s.get_as_f64(Statistic::Sum).unwrap(), 6.0);
        assert_eq!(copy.get_as_f64(Statistic::Sum).unwrap(), 3.0);
    }

    #[test]
    fn test_handles_follow_updates_and_keep_configuration() {
        let builder = DoubleStatistics::builder(&[Statistic::Variance])
            .unwrap()
            .set_configuration(StatisticsConfiguration::with_defaults().with_biased(true));
        let mut s = builder.build(&[1.0, 3.0]);
        let population = s.get_supplier(Statistic::Variance).unwrap();
        assert_eq!(population(), 1.0);

        s.set_configuration(StatisticsConfiguration::with_defaults());
        let sample = s.get_supplier(Statistic::Variance).unwrap();
        assert_eq!(population(), 1.0);
        assert_eq!(sample(), 2.0);

        s.accept(5.0);
        assert_eq!(population(), 8.0 / 3.0);
        assert_eq!(sample(), 4.0);

        let other = builder.build(&[3.0]);
        s.combine(&other).unwrap();
        assert_eq!(population(), 2.0);
        assert!(!s.configuration().is_biased());

        let handle = s.get_result(Statistic::Variance).unwrap();
        assert_eq!(handle.statistic(), Statistic::Variance);
        assert!(!handle.configuration().is_biased());
        assert!(s.get_result(Statistic::Min).is_err());
    }
}
