//! Report types for a labelled experiment analysis

use serde::Serialize;

use super::arm::ArmCounts;
use crate::domain::{ValueWithInterval, VariationResult};

// ============================================================================
// Outcome
// ============================================================================

/// Direction of a variation's relative improvement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Positive,
    Negative,
    Neutral,
}

impl Outcome {
    /// Classify by the sign of the relative improvement; NaN is neutral.
    pub fn from_improvement(improvement: f64) -> Self {
        if improvement > 0.0 {
            Self::Positive
        } else if improvement < 0.0 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

// ============================================================================
// RateBounds
// ============================================================================

/// Range spanned by every arm's success-rate interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateBounds {
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl RateBounds {
    pub fn from_interval(interval: &ValueWithInterval) -> Self {
        Self {
            lower_bound: interval.lower_bound,
            upper_bound: interval.upper_bound,
        }
    }

    /// Widen to cover `interval`
    pub fn include(&mut self, interval: &ValueWithInterval) {
        self.lower_bound = self.lower_bound.min(interval.lower_bound);
        self.upper_bound = self.upper_bound.max(interval.upper_bound);
    }
}

// ============================================================================
// Arm summaries
// ============================================================================

/// Baseline arm with its success-rate interval clamped to [0, 1]
#[derive(Debug, Clone, Serialize)]
pub struct ArmSummary {
    #[serde(flatten)]
    pub counts: ArmCounts,
    pub proportion: ValueWithInterval,
}

/// A variation compared against the baseline
#[derive(Debug, Clone, Serialize)]
pub struct VariationSummary {
    #[serde(flatten)]
    pub counts: ArmCounts,
    /// Success rate with its interval clamped to [0, 1]
    pub proportion: ValueWithInterval,
    /// Relative improvement over the baseline; non-finite values serialize as null
    pub relative_improvement: ValueWithInterval,
    pub p_value: f64,
    pub outcome: Outcome,
    /// `p_value < base_alpha`
    pub significant: bool,
}

impl VariationSummary {
    pub fn new(counts: ArmCounts, result: VariationResult, base_alpha: f64) -> Self {
        Self {
            counts,
            proportion: result.proportion.clamped(0.0, 1.0),
            relative_improvement: result.relative_improvement,
            p_value: result.p_value,
            outcome: Outcome::from_improvement(result.relative_improvement.value),
            significant: result.is_significant(base_alpha),
        }
    }
}

// ============================================================================
// AnalysisReport
// ============================================================================

/// Complete results for one baseline and its variations
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Family-wise significance level
    pub base_alpha: f64,
    /// Two-tailed critical value shared by every interval
    pub critical_value: f64,
    pub baseline: ArmSummary,
    pub variations: Vec<VariationSummary>,
    /// Smallest lower and largest upper bound over all success-rate intervals
    pub overall_bounds: RateBounds,
}

impl AnalysisReport {
    /// Get the summary for a variation by label
    pub fn get_variation(&self, label: &str) -> Option<&VariationSummary> {
        self.variations.iter().find(|v| v.counts.label == label)
    }

    /// Check if any variation differs significantly from the baseline
    pub fn has_significant_result(&self) -> bool {
        self.variations.iter().any(|v| v.significant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_improvement() {
        assert_eq!(Outcome::from_improvement(0.2), Outcome::Positive);
        assert_eq!(Outcome::from_improvement(-0.01), Outcome::Negative);
        assert_eq!(Outcome::from_improvement(0.0), Outcome::Neutral);
        assert_eq!(Outcome::from_improvement(f64::NAN), Outcome::Neutral);
        assert_eq!(Outcome::from_improvement(f64::INFINITY), Outcome::Positive);
    }

    #[test]
    fn test_rate_bounds_include() {
        let mut bounds = RateBounds::from_interval(&ValueWithInterval::new(0.1, 0.08, 0.12));
        bounds.include(&ValueWithInterval::new(0.13, 0.11, 0.15));
        bounds.include(&ValueWithInterval::new(0.05, 0.03, 0.07));

        assert_eq!(bounds.lower_bound, 0.03);
        assert_eq!(bounds.upper_bound, 0.15);
    }

    #[test]
    fn test_variation_summary_clamps_rate() {
        let result = VariationResult {
            proportion: ValueWithInterval::new(0.01, -0.01, 0.03),
            relative_improvement: ValueWithInterval::new(-0.5, -0.9, -0.1),
            p_value: 0.02,
        };
        let summary =
            VariationSummary::new(ArmCounts::new("B", 1, 100).unwrap(), result, 0.05);

        assert_eq!(summary.proportion.lower_bound, 0.0);
        assert_eq!(summary.outcome, Outcome::Negative);
        assert!(summary.significant);
    }

    #[test]
    fn test_summary_serializes_flat_counts() {
        let summary = ArmSummary {
            counts: ArmCounts::new("Control", 10, 100).unwrap(),
            proportion: ValueWithInterval::new(0.1, 0.05, 0.15),
        };
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["label"], "Control");
        assert_eq!(json["num_trials"], 100);
        assert_eq!(json["proportion"]["value"], 0.1);
    }
}
