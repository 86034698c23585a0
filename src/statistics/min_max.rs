//! Minimum and maximum

use crate::element::Element;
use crate::result::Value;
use crate::traits::{Accumulator, StatisticResult};

/// Running minimum
///
/// An empty minimum is `+inf` for doubles and `MAX` for integers. For doubles
/// NaN is sticky and `-0.0` is below `0.0`.
///
/// # Example
///
/// ```
/// use numstats::statistics::{LongMin, Min};
/// use numstats::traits::{Accumulator, StatisticResult};
///
/// let min = Min::of(&[3.0, 0.0, -0.0, 7.0]);
/// assert!(min.get().is_sign_negative());
///
/// let ints = LongMin::of(&[5, -9, 2]);
/// assert_eq!(ints.as_i64().unwrap(), -9);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Min<T> {
    value: T,
    count: u64,
}

/// Running maximum
///
/// An empty maximum is `-inf` for doubles and `MIN` for integers. For doubles
/// NaN is sticky and `0.0` is above `-0.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Max<T> {
    value: T,
    count: u64,
}

/// Minimum of `i32` values
pub type IntMin = Min<i32>;
/// Minimum of `i64` values
pub type LongMin = Min<i64>;
/// Maximum of `i32` values
pub type IntMax = Max<i32>;
/// Maximum of `i64` values
pub type LongMax = Max<i64>;

impl<T: Element> Min<T> {
    /// Create an empty minimum
    pub fn new() -> Self {
        Self {
            value: T::MIN_IDENTITY,
            count: 0,
        }
    }

    /// Current minimum
    pub fn get(&self) -> T {
        self.value
    }
}

impl<T: Element> Max<T> {
    /// Create an empty maximum
    pub fn new() -> Self {
        Self {
            value: T::MAX_IDENTITY,
            count: 0,
        }
    }

    /// Current maximum
    pub fn get(&self) -> T {
        self.value
    }
}

impl<T: Element> Default for Min<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> Default for Max<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> StatisticResult for Min<T> {
    fn value(&self) -> Value {
        self.value.to_value()
    }
}

impl<T: Element> StatisticResult for Max<T> {
    fn value(&self) -> Value {
        self.value.to_value()
    }
}

impl<T: Element> Accumulator for Min<T> {
    type Item = T;

    fn of(values: &[T]) -> Self {
        let mut min = Self::new();
        min.accept_all(values);
        min
    }

    #[inline]
    fn accept(&mut self, value: T) {
        self.value = self.value.min_of(value);
        self.count += 1;
    }

    fn combine(&mut self, other: &Self) -> &mut Self {
        self.value = self.value.min_of(other.value);
        self.count += other.count;
        self
    }

    fn count(&self) -> u64 {
        self.count
    }
}

impl<T: Element> Accumulator for Max<T> {
    type Item = T;

    fn of(values: &[T]) -> Self {
        let mut max = Self::new();
        max.accept_all(values);
        max
    }

    #[inline]
    fn accept(&mut self, value: T) {
        self.value = self.value.max_of(value);
        self.count += 1;
    }

    fn combine(&mut self, other: &Self) -> &mut Self {
        self.value = self.value.max_of(other.value);
        self.count += other.count;
        self
    }

    fn count(&self) -> u64 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(Min::<f64>::new().as_f64(), f64::INFINITY);
        assert_eq!(Max::<f64>::new().as_f64(), f64::NEG_INFINITY);
        assert_eq!(IntMin::new().as_i32().unwrap(), i32::MAX);
        assert_eq!(LongMax::new().as_i64().unwrap(), i64::MIN);
        assert!(Min::<f64>::new().is_empty());
    }

    #[test]
    fn test_nan_is_sticky() {
        let mut min = Min::of(&[1.0, f64::NAN]);
        min.accept(-5.0);
        assert!(min.get().is_nan());

        let mut max = Max::of(&[f64::NAN]);
        max.accept(f64::INFINITY);
        assert!(max.get().is_nan());
    }

    #[test]
    fn test_signed_zero() {
        assert!(Min::of(&[0.0, -0.0]).get().is_sign_negative());
        assert!(Min::of(&[-0.0, 0.0]).get().is_sign_negative());
        assert!(Max::of(&[-0.0, 0.0]).get().is_sign_positive());
        assert!(Max::of(&[0.0, -0.0]).get().is_sign_positive());
    }

    #[test]
    fn test_combine() {
        let mut a = LongMin::of(&[4, 8]);
        let b = LongMin::of(&[i64::MIN + 1, 9]);
        a.combine(&b);
        assert_eq!(a.get(), i64::MIN + 1);
        assert_eq!(a.count(), 4);
        assert_eq!(b.get(), i64::MIN + 1);
        assert_eq!(b.count(), 2);

        let mut c = IntMax::new();
        c.combine(&IntMax::of(&[-3, -1]));
        assert_eq!(c.get(), -1);
    }

    #[test]
    fn test_of_range() {
        let values = [9.0, 1.0, 5.0, 3.0];
        let max = Max::of_range(&values, 1, 3).unwrap();
        assert_eq!(max.get(), 5.0);
        assert!(Max::of_range(&values, 3, 5).is_err());
        assert_eq!(Max::of_range(&values, 2, 2).unwrap().get(), f64::NEG_INFINITY);
    }
}
