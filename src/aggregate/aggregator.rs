//! Shared machinery of the double and integer aggregators

use core::marker::PhantomData;

#[cfg(feature = "std")]
use parking_lot::RwLock;
#[cfg(feature = "std")]
use std::sync::Arc;

#[cfg(not(feature = "std"))]
use alloc::sync::Arc;
#[cfg(not(feature = "std"))]
use spin::RwLock;

use super::components::{Components, Requirements};
use super::handle::{Query, StatisticValue};
use super::statistic::{Statistic, StatisticsConfiguration};
use crate::result::Value;
use crate::traits::{check_range, Result, StatisticsError};

/// Accumulated state of one aggregator domain
pub(crate) trait State: Query + Clone + Send + Sync + 'static {
    type Item: Copy;

    /// Accumulators each statistic reads in this domain
    const REQUIREMENTS: &'static Requirements;

    fn new(components: Components) -> Self;

    fn of(components: Components, values: &[Self::Item]) -> Self;

    fn accept(&mut self, value: Self::Item);

    /// Merge `other`, whose components include those of `self`
    fn combine(&mut self, other: &Self);

    fn components(&self) -> Components;

    fn count(&self) -> u64;
}

/// Resolve the accumulators needed for `statistics`
pub(crate) fn resolve<S: State>(statistics: &[Statistic]) -> Result<Components> {
    if statistics.is_empty() {
        return Err(StatisticsError::InvalidArgument(
            "no statistics requested".into(),
        ));
    }
    let components = Components::resolve(statistics, S::REQUIREMENTS);
    log::debug!("statistics {:?} resolved to components {}", statistics, components);
    Ok(components)
}

/// Statistics computed over one shared state
///
/// The state sits behind a shared lock so that result handles keep
/// following it after they are handed out, on any thread.
#[derive(Debug)]
pub(crate) struct Aggregator<S> {
    state: Arc<RwLock<S>>,
    configuration: StatisticsConfiguration,
}

impl<S: State> Clone for Aggregator<S> {
    fn clone(&self) -> Self {
        Self::from_state(self.state.read().clone(), self.configuration)
    }
}

impl<S: State> Aggregator<S> {
    fn from_state(state: S, configuration: StatisticsConfiguration) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            configuration,
        }
    }

    #[inline]
    pub(crate) fn accept(&mut self, value: S::Item) {
        self.state.write().accept(value);
    }

    pub(crate) fn accept_all(&mut self, values: &[S::Item]) {
        let mut state = self.state.write();
        for &v in values {
            state.accept(v);
        }
    }

    pub(crate) fn count(&self) -> u64 {
        self.state.read().count()
    }

    pub(crate) fn is_supported(&self, statistic: Statistic) -> bool {
        self.state
            .read()
            .components()
            .contains(S::REQUIREMENTS.of(statistic))
    }

    fn check_supported(&self, statistic: Statistic) -> Result<()> {
        if self.is_supported(statistic) {
            Ok(())
        } else {
            Err(StatisticsError::UnsupportedStatistic(statistic.name()))
        }
    }

    pub(crate) fn value(&self, statistic: Statistic) -> Result<Value> {
        self.check_supported(statistic)?;
        self.state
            .read()
            .query(statistic, &self.configuration)
            .ok_or(StatisticsError::UnsupportedStatistic(statistic.name()))
    }

    pub(crate) fn get_result(&self, statistic: Statistic) -> Result<StatisticValue> {
        self.check_supported(statistic)?;
        let state: Arc<RwLock<dyn Query>> = self.state.clone();
        Ok(StatisticValue::new(state, statistic, self.configuration))
    }

    /// Merge `other` into `self`
    ///
    /// `other` must compute at least everything `self` computes. Both sides
    /// are left unchanged on failure.
    pub(crate) fn combine(&mut self, other: &Self) -> Result<()> {
        let other = other.state.read().clone();
        let mut state = self.state.write();
        let (expected, found) = (state.components(), other.components());
        if !found.contains(expected) {
            return Err(StatisticsError::IncompatibleCombine {
                expected: fmt!("{}", expected),
                found: fmt!("{}", found),
            });
        }
        state.combine(&other);
        Ok(())
    }

    pub(crate) fn set_configuration(&mut self, configuration: StatisticsConfiguration) {
        log::debug!(
            "aggregator configuration changed from {:?} to {:?}",
            self.configuration,
            configuration
        );
        self.configuration = configuration;
    }

    pub(crate) fn configuration(&self) -> StatisticsConfiguration {
        self.configuration
    }
}

/// Resolved components and configuration for building aggregators
#[derive(Debug)]
pub(crate) struct Builder<S> {
    components: Components,
    configuration: StatisticsConfiguration,
    _state: PhantomData<S>,
}

impl<S> Clone for Builder<S> {
    fn clone(&self) -> Self {
        Self {
            components: self.components,
            configuration: self.configuration,
            _state: PhantomData,
        }
    }
}

impl<S: State> Builder<S> {
    pub(crate) fn new(statistics: &[Statistic]) -> Result<Self> {
        Ok(Self {
            components: resolve::<S>(statistics)?,
            configuration: StatisticsConfiguration::default(),
            _state: PhantomData,
        })
    }

    pub(crate) fn set_configuration(&mut self, configuration: StatisticsConfiguration) {
        self.configuration = configuration;
    }

    pub(crate) fn build(&self, values: &[S::Item]) -> Aggregator<S> {
        Aggregator::from_state(S::of(self.components, values), self.configuration)
    }

    pub(crate) fn build_empty(&self) -> Aggregator<S> {
        Aggregator::from_state(S::new(self.components), self.configuration)
    }

    pub(crate) fn build_range(&self, values: &[S::Item], from: usize, to: usize) -> Result<Aggregator<S>> {
        check_range(from, to, values.len())?;
        Ok(self.build(&values[from..to]))
    }
}
