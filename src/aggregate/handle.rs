//! Live result handles

#[cfg(feature = "std")]
use parking_lot::RwLock;
#[cfg(feature = "std")]
use std::sync::Arc;

#[cfg(not(feature = "std"))]
use alloc::sync::Arc;
#[cfg(not(feature = "std"))]
use spin::RwLock;

use super::statistic::{Statistic, StatisticsConfiguration};
use crate::result::Value;
use crate::traits::StatisticResult;

/// Read access to aggregator state
pub(crate) trait Query: core::fmt::Debug + Send + Sync {
    /// Current value of `statistic`, or `None` if it is not computed
    fn query(&self, statistic: Statistic, configuration: &StatisticsConfiguration) -> Option<Value>;
}

/// A statistic of an aggregator that follows its updates
///
/// The handle shares the aggregator state, so values accepted or combined
/// after it was created are reflected when it is read. The configuration is
/// captured when the handle is created: later calls to `set_configuration`
/// on the aggregator do not change it. Handles can be read from other
/// threads.
///
/// ```
/// use numstats::aggregate::{DoubleStatistics, Statistic, StatisticsConfiguration};
/// use numstats::traits::StatisticResult;
///
/// let mut stats = DoubleStatistics::of(&[Statistic::Variance], &[1.0, 2.0, 3.0, 4.0]).unwrap();
/// let sample = stats.get_result(Statistic::Variance).unwrap();
///
/// stats.set_configuration(StatisticsConfiguration::with_defaults().with_biased(true));
/// let population = stats.get_result(Statistic::Variance).unwrap();
///
/// assert!((sample.as_f64() - 5.0 / 3.0).abs() < 1e-15);
/// assert_eq!(population.as_f64(), 1.25);
///
/// stats.accept(2.5);
/// assert_eq!(population.as_f64(), 1.0);
/// ```
#[derive(Clone, Debug)]
pub struct StatisticValue {
    state: Arc<RwLock<dyn Query>>,
    statistic: Statistic,
    configuration: StatisticsConfiguration,
}

impl StatisticValue {
    pub(crate) fn new(
        state: Arc<RwLock<dyn Query>>,
        statistic: Statistic,
        configuration: StatisticsConfiguration,
    ) -> Self {
        Self {
            state,
            statistic,
            configuration,
        }
    }

    pub fn statistic(&self) -> Statistic {
        self.statistic
    }

    /// Configuration captured when the handle was created
    pub fn configuration(&self) -> StatisticsConfiguration {
        self.configuration
    }
}

impl StatisticResult for StatisticValue {
    fn value(&self) -> Value {
        self.state
            .read()
            .query(self.statistic, &self.configuration)
            .unwrap_or(Value::Float(f64::NAN))
    }
}
