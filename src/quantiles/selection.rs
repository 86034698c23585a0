//! Working buffers and partial selection for order statistics

use super::method::NanPolicy;
use crate::element::Element;
use crate::traits::{Result, StatisticsError};

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Below this length a full sort is cheaper than repeated partitioning
const SORT_THRESHOLD: usize = 32;

/// At least this many requested ranks makes a full sort cheaper
const SORT_INDEX_COUNT: usize = 16;

/// Data an order statistic is computed on: the caller's slice or a copy
pub(crate) enum Workspace<'a, T> {
    InPlace(&'a mut [T]),
    Copied(Vec<T>),
}

impl<T> Workspace<'_, T> {
    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        match self {
            Workspace::InPlace(values) => values,
            Workspace::Copied(values) => values.as_mut_slice(),
        }
    }
}

/// Prepared input: the working data and the number of non-NaN values
///
/// Non-NaN values occupy `[0, finite)` of the working data and any NaN
/// values follow them.
pub(crate) struct Prepared<'a, T> {
    pub(crate) work: Workspace<'a, T>,
    pub(crate) finite: usize,
}

/// Apply the NaN policy and copy flag to `values`
///
/// With [`NanPolicy::Error`] the input is scanned before anything is moved,
/// so a failure leaves it untouched. [`NanPolicy::Exclude`] always works on a
/// filtered copy.
pub(crate) fn prepare<T: Element>(
    values: &mut [T],
    policy: NanPolicy,
    copy: bool,
) -> Result<Prepared<'_, T>> {
    match policy {
        NanPolicy::Error => {
            if let Some(index) = values.iter().position(|v| v.is_nan()) {
                return Err(StatisticsError::NanNotAllowed { index });
            }
            let finite = values.len();
            let work = if copy {
                Workspace::Copied(values.to_vec())
            } else {
                Workspace::InPlace(values)
            };
            Ok(Prepared { work, finite })
        }
        NanPolicy::Exclude => {
            let kept: Vec<T> = values.iter().copied().filter(|v| !v.is_nan()).collect();
            let finite = kept.len();
            Ok(Prepared {
                work: Workspace::Copied(kept),
                finite,
            })
        }
        NanPolicy::Include => {
            let mut work = if copy {
                Workspace::Copied(values.to_vec())
            } else {
                Workspace::InPlace(values)
            };
            let finite = move_nan_last(work.as_mut_slice());
            Ok(Prepared { work, finite })
        }
    }
}

/// Move NaN values to the end and return the count of the others
fn move_nan_last<T: Element>(data: &mut [T]) -> usize {
    let mut k = 0;
    for i in 0..data.len() {
        if !data[i].is_nan() {
            data.swap(k, i);
            k += 1;
        }
    }
    k
}

/// Place the order statistics at every index of `indices` into position
///
/// `indices` must be sorted, unique and below `data.len()`. After the call
/// `data[i]` holds the `i`-th smallest value for each requested `i`.
pub(crate) fn select<T: Element>(data: &mut [T], indices: &[usize]) {
    if indices.is_empty() {
        return;
    }
    if data.len() <= SORT_THRESHOLD || indices.len() >= SORT_INDEX_COUNT {
        log::trace!(
            "full sort of {} values for {} ranks",
            data.len(),
            indices.len()
        );
        data.sort_unstable_by(|a, b| a.total_cmp(b));
    } else {
        log::trace!(
            "partial selection of {} ranks in {} values",
            indices.len(),
            data.len()
        );
        multi_select(data, indices, 0);
    }
}

fn multi_select<T: Element>(data: &mut [T], indices: &[usize], offset: usize) {
    if indices.is_empty() {
        return;
    }
    let mid = indices.len() / 2;
    let target = indices[mid] - offset;
    let (left, _, right) = data.select_nth_unstable_by(target, |a, b| a.total_cmp(b));
    multi_select(left, &indices[..mid], offset);
    multi_select(right, &indices[mid + 1..], offset + target + 1);
}

/// Select the two middle order statistics of `data`
///
/// Places the `hi`-th smallest value at `data[hi]` and returns it with the
/// `hi - 1`-th smallest, the maximum of the left partition.
pub(crate) fn select_pair<T: Element>(data: &mut [T], hi: usize) -> (T, T) {
    let (left, upper, _) = data.select_nth_unstable_by(hi, |a, b| a.total_cmp(b));
    let upper = *upper;
    let lower = left
        .iter()
        .copied()
        .reduce(|a, b| if b.total_cmp(&a).is_gt() { b } else { a })
        .unwrap_or(upper);
    (lower, upper)
}
