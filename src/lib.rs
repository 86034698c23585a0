//! # Numstats
//!
//! Mergeable streaming descriptive statistics for Rust.
//!
//! Numstats computes summary statistics over streams and arrays in a single
//! pass with constant memory, using extended-precision accumulation so long
//! sums do not overflow or lose their small terms, and exact order statistics
//! with configurable interpolation and NaN handling.
//!
//! ## Features
//!
//! - **Single-pass statistics**: Min, Max, Sum, Product, SumOfSquares, SumOfLogs, GeometricMean
//! - **Moments**: Mean, Variance, StandardDeviation, Skewness, Kurtosis with a biased/unbiased toggle
//! - **Integer domains**: exact 128/192-bit sums for `i32` and `i64` data
//! - **Order statistics**: Quantile (nine Hyndman-Fan estimation methods) and Median
//! - **Aggregation**: compute several statistics at once with shared state
//! - **Full Mergeability**: every accumulator supports `combine` for distributed reduction
//!
//! ## Quick Start
//!
//! ```rust
//! use numstats::prelude::*;
//!
//! let mut var = Variance::new();
//! for x in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
//!     var.accept(x);
//! }
//! var.set_biased(true);
//! assert_eq!(var.as_f64(), 4.0);
//!
//! let mut data = [1.0, 2.0, 3.0, 4.0];
//! assert_eq!(Median::with_defaults().evaluate(&mut data).unwrap(), 2.5);
//! ```
//!
//! ## Distributed Computing
//!
//! All accumulators implement the [`Accumulator`](traits::Accumulator) trait
//! which includes a `combine` operation, allowing partial results to be merged
//! across workers:
//!
//! ```rust
//! use numstats::prelude::*;
//!
//! let mut worker1 = LongSum::of(&[i64::MAX, i64::MAX]);
//! let worker2 = LongSum::of(&[i64::MAX]);
//!
//! worker1.combine(&worker2);
//! assert!(worker1.as_i64().is_err());
//! assert_eq!(worker1.as_big_int().unwrap(), num_bigint::BigInt::from(i64::MAX) * 3);
//! ```
//!
//! ## Feature Flags
//!
//! Families:
//! - `quantiles` (default): Quantile and Median
//! - `aggregate` (default): multi-statistic aggregators
//! - `full`: Enable all families and serde
//!
//! Platform features:
//! - `std` (default): Standard library support
//! - `serde`: Enable serialization of accumulator state

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Helper macro for format! in both std and no_std
macro_rules! fmt {
    ($($arg:tt)*) => {{
        #[cfg(feature = "std")]
        { format!($($arg)*) }
        #[cfg(not(feature = "std"))]
        { alloc::format!($($arg)*) }
    }};
}

mod math;

// Core traits always available
pub mod traits;

pub mod arithmetic;
pub mod element;
pub mod moments;
pub mod result;
pub mod statistics;

#[cfg(feature = "quantiles")]
#[cfg_attr(docsrs, doc(cfg(feature = "quantiles")))]
pub mod quantiles;

#[cfg(feature = "aggregate")]
#[cfg_attr(docsrs, doc(cfg(feature = "aggregate")))]
pub mod aggregate;

pub mod prelude {
    pub use crate::element::{Element, IntegerElement};
    pub use crate::moments::*;
    pub use crate::result::Value;
    pub use crate::statistics::*;
    pub use crate::traits::{Accumulator, StatisticResult, StatisticsError};

    #[cfg(feature = "quantiles")]
    pub use crate::quantiles::{EstimationMethod, Median, NanPolicy, Quantile};

    #[cfg(feature = "aggregate")]
    pub use crate::aggregate::{
        DoubleStatistics, IntStatistics, IntegerStatistics, LongStatistics, Statistic,
        StatisticsConfiguration,
    };
}

pub use result::Value;
pub use traits::{Accumulator, Result, StatisticResult, StatisticsError};

#[cfg(feature = "quantiles")]
pub use quantiles::{Median, Quantile};

#[cfg(feature = "aggregate")]
pub use aggregate::{DoubleStatistics, IntStatistics, LongStatistics, Statistic};
