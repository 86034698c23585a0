//! Uniform numeric result type
//!
//! A statistic produces one of a small closed set of values: a double, an
//! exact signed integer (sums, minima and maxima of integer data) or an exact
//! wide unsigned integer (sums of squares of 64-bit data). Each can be read
//! back as `f64`, `i32`, `i64` or [`BigInt`].
//!
//! Integer values convert exactly or fail. Double values are rounded to the
//! nearest integer with ties toward positive infinity (see
//! [`round_half_up`](crate::arithmetic::round_half_up)) and then range
//! checked; NaN never converts to an integer.

use num_bigint::BigInt;

use crate::arithmetic::{self, UInt192};
use crate::traits::{Result, StatisticResult, StatisticsError};

/// Value of a statistic
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    /// Floating-point result
    Float(f64),
    /// Exact signed integer result
    Integer(i128),
    /// Exact unsigned integer result wider than 128 bits
    Unsigned(UInt192),
}

impl Value {
    /// Value as `f64`; integers are rounded to nearest, ties to even
    pub fn as_f64(&self) -> f64 {
        match self {
            Value::Float(x) => *x,
            Value::Integer(x) => *x as f64,
            Value::Unsigned(x) => x.to_f64(),
        }
    }

    /// Value as `i32`
    pub fn as_i32(&self) -> Result<i32> {
        match self {
            Value::Float(x) => arithmetic::to_int_exact(*x),
            Value::Integer(x) => i32::try_from(*x).map_err(|_| overflow(*x, "int")),
            Value::Unsigned(x) => x
                .to_u128()
                .and_then(|v| i32::try_from(v).ok())
                .ok_or_else(|| overflow(x.to_f64(), "int")),
        }
    }

    /// Value as `i64`
    pub fn as_i64(&self) -> Result<i64> {
        match self {
            Value::Float(x) => arithmetic::to_long_exact(*x),
            Value::Integer(x) => i64::try_from(*x).map_err(|_| overflow(*x, "long")),
            Value::Unsigned(x) => x
                .to_u128()
                .and_then(|v| i64::try_from(v).ok())
                .ok_or_else(|| overflow(x.to_f64(), "long")),
        }
    }

    /// Value as an arbitrary-precision integer
    pub fn as_big_int(&self) -> Result<BigInt> {
        match self {
            Value::Float(x) => arithmetic::to_big_int_exact(*x),
            Value::Integer(x) => Ok(BigInt::from(*x)),
            Value::Unsigned(x) => Ok(x.to_big_int()),
        }
    }
}

impl StatisticResult for Value {
    fn value(&self) -> Value {
        *self
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

fn overflow<T: core::fmt::Display>(x: T, target: &str) -> StatisticsError {
    StatisticsError::Arithmetic(fmt!("value {} cannot be converted to {}", x, target))
}
