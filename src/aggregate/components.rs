//! Internal accumulator sets and the statistic dependency tables

use super::statistic::Statistic;

/// Set of internal accumulators, one bit each
///
/// The moment bits form a chain: an accumulator for moment `k` also holds
/// every lower moment, so a resolved set always contains the lower bits of
/// its highest moment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub(crate) struct Components(u16);

impl Components {
    pub(crate) const NONE: Components = Components(0);
    pub(crate) const MIN: Components = Components(1 << 0);
    pub(crate) const MAX: Components = Components(1 << 1);
    pub(crate) const SUM: Components = Components(1 << 2);
    pub(crate) const PRODUCT: Components = Components(1 << 3);
    pub(crate) const SUM_OF_SQUARES: Components = Components(1 << 4);
    pub(crate) const SUM_OF_LOGS: Components = Components(1 << 5);
    pub(crate) const MOMENT_1: Components = Components(1 << 6);
    pub(crate) const MOMENT_2: Components = Components(1 << 7);
    pub(crate) const MOMENT_3: Components = Components(1 << 8);
    pub(crate) const MOMENT_4: Components = Components(1 << 9);

    const MOMENTS: [Components; 4] = [
        Components::MOMENT_1,
        Components::MOMENT_2,
        Components::MOMENT_3,
        Components::MOMENT_4,
    ];

    const NAMES: [(Components, &'static str); 10] = [
        (Components::MIN, "min"),
        (Components::MAX, "max"),
        (Components::SUM, "sum"),
        (Components::PRODUCT, "product"),
        (Components::SUM_OF_SQUARES, "sum of squares"),
        (Components::SUM_OF_LOGS, "sum of logs"),
        (Components::MOMENT_1, "moment 1"),
        (Components::MOMENT_2, "moment 2"),
        (Components::MOMENT_3, "moment 3"),
        (Components::MOMENT_4, "moment 4"),
    ];

    pub(crate) const fn union(self, other: Components) -> Components {
        Components(self.0 | other.0)
    }

    /// Check if every bit of `other` is set in `self`
    pub(crate) const fn contains(self, other: Components) -> bool {
        self.0 & other.0 == other.0
    }

    /// Highest moment held, 0 when there is none
    pub(crate) fn moment_order(self) -> usize {
        Self::MOMENTS
            .iter()
            .rposition(|&m| self.contains(m))
            .map_or(0, |i| i + 1)
    }

    /// Add the lower moments implied by the highest one
    fn close(self) -> Components {
        Self::MOMENTS[..self.moment_order()]
            .iter()
            .fold(self, |c, &m| c.union(m))
    }

    /// Minimal accumulator set computing every statistic in `statistics`
    pub(crate) fn resolve(statistics: &[Statistic], table: &Requirements) -> Components {
        statistics
            .iter()
            .fold(Components::NONE, |c, &s| c.union(table.of(s)))
            .close()
    }
}

impl core::fmt::Display for Components {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("[")?;
        let mut first = true;
        for &(bit, name) in Self::NAMES.iter() {
            if self.contains(bit) {
                if !first {
                    f.write_str(", ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        f.write_str("]")
    }
}

/// Accumulators each statistic reads, indexed by [`Statistic`] order
pub(crate) struct Requirements([Components; 12]);

impl Requirements {
    pub(crate) fn of(&self, statistic: Statistic) -> Components {
        self.0[statistic as usize]
    }
}

/// Floating-point data: the mean and higher moments come from one moment chain
pub(crate) const DOUBLE: Requirements = Requirements([
    Components::MIN,
    Components::MAX,
    Components::MOMENT_1,
    Components::MOMENT_2,
    Components::MOMENT_2,
    Components::MOMENT_3,
    Components::MOMENT_4,
    Components::PRODUCT,
    Components::SUM,
    Components::SUM_OF_LOGS,
    Components::SUM_OF_SQUARES,
    Components::SUM_OF_LOGS,
]);

/// Integer data: the mean and variance come from the exact sums
pub(crate) const INTEGER: Requirements = Requirements([
    Components::MIN,
    Components::MAX,
    Components::SUM,
    Components::SUM.union(Components::SUM_OF_SQUARES),
    Components::SUM.union(Components::SUM_OF_SQUARES),
    Components::MOMENT_3,
    Components::MOMENT_4,
    Components::PRODUCT,
    Components::SUM,
    Components::SUM_OF_LOGS,
    Components::SUM_OF_SQUARES,
    Components::SUM_OF_LOGS,
]);
