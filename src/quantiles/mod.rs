//! Order statistics
//!
//! Exact quantiles and medians of in-memory data, found by partial
//! selection rather than a full sort where that is cheaper.
//!
//! # Types
//!
//! - [`Quantile`]: any quantile, with nine [`EstimationMethod`]s
//! - [`Median`]: the middle value, with a dedicated selection path
//! - [`NanPolicy`]: how NaN values in the input are treated
//!
//! Both evaluators are immutable configurations. By default they work on a
//! copy of the input; `with_copy(false)` partitions the caller's slice (or
//! sub-range) in place instead.
//!
//! # Example
//!
//! ```
//! use numstats::quantiles::{Median, NanPolicy, Quantile};
//!
//! let mut data = [5.0, f64::NAN, 1.0, 3.0];
//!
//! let median = Median::with_defaults().with_nan_policy(NanPolicy::Exclude);
//! assert_eq!(median.evaluate(&mut data).unwrap(), 3.0);
//!
//! let strict = Quantile::with_defaults().with_nan_policy(NanPolicy::Error);
//! assert!(strict.evaluate(&mut data, 0.9).is_err());
//! ```

mod median;
mod method;
mod quantile;
mod selection;

pub use median::Median;
pub use method::{EstimationMethod, NanPolicy};
pub use quantile::Quantile;
