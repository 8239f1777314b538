//! Experiment result types

use serde::Serialize;

use crate::domain::estimate::ValueWithInterval;

/// Outcome of comparing one variation against the baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VariationResult {
    /// Observed success rate with its Agresti–Coull interval width
    pub proportion: ValueWithInterval,
    /// `(variation - baseline) / baseline`; infinite when the baseline rate is
    /// zero, which consumers must show as not applicable
    pub relative_improvement: ValueWithInterval,
    /// Two-sided p-value, adjusted for the number of comparisons
    pub p_value: f64,
}

impl VariationResult {
    /// Whether the p-value falls below `alpha`.
    ///
    /// The p-value already accounts for multiple comparisons, so `alpha` is
    /// the family-wise level, not a per-comparison one.
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }

    /// Whether the relative improvement has a finite value
    pub fn has_finite_improvement(&self) -> bool {
        self.relative_improvement.value.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(p_value: f64, improvement: f64) -> VariationResult {
        VariationResult {
            proportion: ValueWithInterval::new(0.1, 0.08, 0.12),
            relative_improvement: ValueWithInterval::new(
                improvement,
                improvement - 0.1,
                improvement + 0.1,
            ),
            p_value,
        }
    }

    #[test]
    fn test_is_significant() {
        assert!(result(0.01, 0.2).is_significant(0.05));
        assert!(!result(0.05, 0.2).is_significant(0.05));
    }

    #[test]
    fn test_has_finite_improvement() {
        assert!(result(0.5, 0.2).has_finite_improvement());
        assert!(!result(0.5, f64::INFINITY).has_finite_improvement());
        assert!(!result(0.5, f64::NAN).has_finite_improvement());
    }

    #[test]
    fn test_serializes_non_finite_as_null() {
        let json = serde_json::to_value(result(0.5, f64::INFINITY)).unwrap();

        assert_eq!(json["p_value"], 0.5);
        assert!(json["relative_improvement"]["value"].is_null());
        assert_eq!(json["proportion"]["lower_bound"], 0.08);
    }
}
