//! Several statistics over one stream
//!
//! An aggregator is built for a set of [`Statistic`]s and maintains only the
//! accumulators they need, sharing state between statistics that depend on
//! the same sums. Which accumulator serves which statistic is a lookup table
//! per data domain, resolved once when the aggregator is built.
//!
//! # Aggregators
//!
//! - [`DoubleStatistics`]: `f64` data
//! - [`IntStatistics`] / [`LongStatistics`]: `i32` / `i64` data with exact
//!   integer sums
//!
//! # Example
//!
//! ```
//! use numstats::aggregate::{LongStatistics, Statistic, StatisticsConfiguration};
//!
//! let builder = LongStatistics::builder(&[Statistic::Mean, Statistic::StandardDeviation])
//!     .unwrap()
//!     .set_configuration(StatisticsConfiguration::with_defaults().with_biased(true));
//!
//! // partial results from two workers
//! let mut total = builder.build(&[2, 4, 4, 4]);
//! let other = builder.build(&[5, 5, 7, 9]);
//! total.combine(&other).unwrap();
//!
//! assert_eq!(total.get_as_f64(Statistic::Mean).unwrap(), 5.0);
//! assert_eq!(total.get_as_f64(Statistic::StandardDeviation).unwrap(), 2.0);
//! ```

mod aggregator;
mod chain;
mod components;
mod double;
mod handle;
mod integer;
mod statistic;

pub use double::{DoubleStatistics, DoubleStatisticsBuilder};
pub use handle::StatisticValue;
pub use integer::{IntStatistics, IntegerStatistics, IntegerStatisticsBuilder, LongStatistics};
pub use statistic::{Statistic, StatisticsConfiguration};
