//! Statistic identifiers and aggregator configuration

/// A statistic an aggregator can compute
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Statistic {
    Min,
    Max,
    Mean,
    StandardDeviation,
    Variance,
    Skewness,
    Kurtosis,
    Product,
    Sum,
    SumOfLogs,
    SumOfSquares,
    GeometricMean,
}

impl Statistic {
    /// Every statistic, in declaration order
    pub const ALL: [Statistic; 12] = [
        Statistic::Min,
        Statistic::Max,
        Statistic::Mean,
        Statistic::StandardDeviation,
        Statistic::Variance,
        Statistic::Skewness,
        Statistic::Kurtosis,
        Statistic::Product,
        Statistic::Sum,
        Statistic::SumOfLogs,
        Statistic::SumOfSquares,
        Statistic::GeometricMean,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Statistic::Min => "min",
            Statistic::Max => "max",
            Statistic::Mean => "mean",
            Statistic::StandardDeviation => "standard deviation",
            Statistic::Variance => "variance",
            Statistic::Skewness => "skewness",
            Statistic::Kurtosis => "kurtosis",
            Statistic::Product => "product",
            Statistic::Sum => "sum",
            Statistic::SumOfLogs => "sum of logs",
            Statistic::SumOfSquares => "sum of squares",
            Statistic::GeometricMean => "geometric mean",
        }
    }

    /// Check if the statistic reads the biased flag of the configuration
    pub fn is_configurable(self) -> bool {
        matches!(
            self,
            Statistic::StandardDeviation
                | Statistic::Variance
                | Statistic::Skewness
                | Statistic::Kurtosis
        )
    }
}

impl core::fmt::Display for Statistic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Settings read when an aggregator statistic is evaluated
///
/// The biased flag selects the `n` divisor (population) over `n - 1`
/// (sample) for the variance and standard deviation, and the biased
/// estimators of skewness and kurtosis. It is applied when a value is read,
/// so changing it never requires recomputing the accumulated state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatisticsConfiguration {
    biased: bool,
}

impl StatisticsConfiguration {
    /// Unbiased estimators
    pub const fn with_defaults() -> Self {
        Self { biased: false }
    }

    /// Return a copy with the given biased flag
    pub const fn with_biased(self, biased: bool) -> Self {
        Self { biased }
    }

    pub const fn is_biased(&self) -> bool {
        self.biased
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration() {
        let c = StatisticsConfiguration::with_defaults();
        assert!(!c.is_biased());
        assert!(c.with_biased(true).is_biased());
        assert_eq!(c, StatisticsConfiguration::default());
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = Statistic::ALL.iter().map(|s| s.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Statistic::ALL.len());
        assert_eq!(Statistic::GeometricMean.to_string(), "geometric mean");
    }
}
