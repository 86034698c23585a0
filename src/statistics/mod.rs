//! Single-pass statistics
//!
//! Accumulators that need one pass over the data and constant memory:
//! [`Min`], [`Max`], [`Sum`], [`Product`], [`SumOfSquares`], [`SumOfLogs`]
//! and [`GeometricMean`]. Each is available for doubles and for `i32`/`i64`
//! data; integer sums and sums of squares are exact.
//!
//! # Example
//!
//! ```
//! use numstats::statistics::{IntSum, Max, Sum};
//! use numstats::traits::{Accumulator, StatisticResult};
//!
//! let mut sum = Sum::new();
//! let mut max = Max::new();
//! for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
//!     sum.accept(value);
//!     max.accept(value);
//! }
//! assert_eq!(sum.as_f64(), 15.0);
//! assert_eq!(max.get(), 5.0);
//!
//! let ints = IntSum::of(&[i32::MAX, 1]);
//! assert_eq!(ints.as_i64().unwrap(), 1 << 31);
//! ```

mod min_max;
mod product;
mod sum;
mod sum_of_logs;
mod sum_of_squares;

pub use min_max::{IntMax, IntMin, LongMax, LongMin, Max, Min};
pub use product::{IntProduct, LongProduct, Product};
pub use sum::{IntSum, IntegerSum, LongSum, Sum};
pub use sum_of_logs::{
    GeometricMean, IntGeometricMean, IntSumOfLogs, LongGeometricMean, LongSumOfLogs, SumOfLogs,
};
pub use sum_of_squares::{IntSumOfSquares, IntegerSumOfSquares, LongSumOfSquares, SumOfSquares};
