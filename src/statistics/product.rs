//! Product of values

use core::marker::PhantomData;

use crate::element::Element;
use crate::result::Value;
use crate::traits::{Accumulator, StatisticResult};

/// Running product, accumulated in a double
///
/// The empty product is 1. No extended precision is used; the result may
/// overflow to infinity or underflow to zero. Computing from an array
/// multiplies in input order, bit-identical to accepting the same values.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Product<T> {
    product: f64,
    count: u64,
    #[cfg_attr(feature = "serde", serde(skip))]
    _marker: PhantomData<T>,
}

/// Product of `i32` values
pub type IntProduct = Product<i32>;
/// Product of `i64` values
pub type LongProduct = Product<i64>;

impl<T: Element> Product<T> {
    /// Create an empty product
    pub fn new() -> Self {
        Self {
            product: 1.0,
            count: 0,
            _marker: PhantomData,
        }
    }

    /// Current product
    pub fn get(&self) -> f64 {
        self.product
    }
}

impl<T: Element> Default for Product<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> StatisticResult for Product<T> {
    fn value(&self) -> Value {
        Value::Float(self.product)
    }
}

impl<T: Element> Accumulator for Product<T> {
    type Item = T;

    fn of(values: &[T]) -> Self {
        let mut p = Self::new();
        p.accept_all(values);
        p
    }

    #[inline]
    fn accept(&mut self, value: T) {
        self.product *= value.to_f64();
        self.count += 1;
    }

    fn combine(&mut self, other: &Self) -> &mut Self {
        self.product *= other.product;
        self.count += other.count;
        self
    }

    fn count(&self) -> u64 {
        self.count
    }
}
