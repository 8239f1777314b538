//! Experiment domain entity

use tracing::debug;

use super::result::VariationResult;
use crate::domain::StatsError;
use crate::domain::comparison::{ProportionComparison, TestSettings};
use crate::domain::distribution::{Distribution, NormalDistribution};
use crate::domain::error::ensure_open_unit_interval;
use crate::domain::estimate::ValueWithInterval;
use crate::domain::proportion::Proportion;

/// One baseline compared against `num_variations` variations.
///
/// Every variation shares the same critical value, derived from the
/// Bonferroni-corrected alpha, so their intervals are comparable. Immutable
/// once built; results for different variations can be computed
/// independently.
#[derive(Debug, Clone)]
pub struct Experiment {
    num_variations: u32,
    baseline: Proportion,
    num_comparisons: u32,
    z_critical_value: f64,
    settings: TestSettings,
}

impl Experiment {
    pub fn new(
        num_variations: u32,
        baseline_successes: u64,
        baseline_trials: u64,
        base_alpha: f64,
    ) -> Result<Self, StatsError> {
        Self::with_settings(
            num_variations,
            baseline_successes,
            baseline_trials,
            base_alpha,
            TestSettings::default(),
        )
    }

    pub fn with_settings(
        num_variations: u32,
        baseline_successes: u64,
        baseline_trials: u64,
        base_alpha: f64,
        settings: TestSettings,
    ) -> Result<Self, StatsError> {
        ensure_open_unit_interval("base_alpha", base_alpha)?;
        settings.validate()?;

        let baseline = Proportion::new(baseline_successes, baseline_trials)?;

        let num_comparisons = num_variations.max(1);
        // Bonferroni correction
        let alpha = base_alpha / num_comparisons as f64;
        // all z-values are two-tailed
        let z_critical_value = NormalDistribution::standard().inverse_survival(alpha / 2.0)?;

        debug!(
            num_variations,
            base_alpha,
            alpha,
            z_critical_value,
            "Created experiment"
        );

        Ok(Self {
            num_variations,
            baseline,
            num_comparisons,
            z_critical_value,
            settings,
        })
    }

    pub fn num_variations(&self) -> u32 {
        self.num_variations
    }

    pub fn num_comparisons(&self) -> u32 {
        self.num_comparisons
    }

    pub fn z_critical_value(&self) -> f64 {
        self.z_critical_value
    }

    pub fn baseline(&self) -> &Proportion {
        &self.baseline
    }

    /// Baseline success rate, reported at the observed rate with an interval
    /// width from the adjusted estimate.
    pub fn baseline_proportion(&self) -> ValueWithInterval {
        estimate_with_interval(&self.baseline, self.z_critical_value)
    }

    /// Compare a variation with `num_successes` out of `num_trials` against
    /// the baseline.
    pub fn results(
        &self,
        num_successes: u64,
        num_trials: u64,
    ) -> Result<VariationResult, StatsError> {
        let variation = Proportion::new(num_successes, num_trials)?;
        let comparison =
            ProportionComparison::with_settings(&self.baseline, &variation, self.settings);

        let relative_improvement = comparison
            .difference_ratio(self.z_critical_value)
            .value_with_interval(
                self.z_critical_value,
                Some(comparison.difference_ratio(0.0).value),
            );
        let p_value =
            comparison.iterated_test(self.num_comparisons, self.settings.p_value_precision)?;

        Ok(VariationResult {
            proportion: estimate_with_interval(&variation, self.z_critical_value),
            relative_improvement,
            p_value,
        })
    }
}

fn estimate_with_interval(proportion: &Proportion, z_critical_value: f64) -> ValueWithInterval {
    proportion
        .p_estimate(z_critical_value)
        .value_with_interval(z_critical_value, Some(proportion.p_estimate(0.0).value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_critical_value_single_variation() {
        let experiment = Experiment::new(1, 50, 1000, 0.05).unwrap();

        assert_eq!(experiment.num_comparisons(), 1);
        assert!((experiment.z_critical_value() - 1.959_964).abs() < 1e-5);
    }

    #[test]
    fn test_critical_value_is_bonferroni_corrected() {
        let experiment = Experiment::new(3, 50, 1000, 0.05).unwrap();

        // alpha = 0.05 / 3, two-tailed
        assert_eq!(experiment.num_comparisons(), 3);
        assert!((experiment.z_critical_value() - 2.393_980).abs() < 1e-4);
    }

    #[test]
    fn test_zero_variations_counts_as_one_comparison() {
        let experiment = Experiment::new(0, 50, 1000, 0.05).unwrap();

        assert_eq!(experiment.num_variations(), 0);
        assert_eq!(experiment.num_comparisons(), 1);
    }

    #[test]
    fn test_baseline_proportion() {
        let experiment = Experiment::new(1, 50, 1000, 0.05).unwrap();
        let baseline = experiment.baseline_proportion();

        assert!((baseline.value - 0.05).abs() < 1e-12);
        assert!(baseline.lower_bound < 0.05 && 0.05 < baseline.upper_bound);
        // Agresti-Coull error at z = 1.96 is about 0.00699
        let half_width = (baseline.upper_bound - baseline.lower_bound) / 2.0;
        assert!((half_width - 1.96 * 0.006_99).abs() < 1e-3, "got {half_width}");
    }

    #[test]
    fn test_results_end_to_end() {
        let experiment = Experiment::new(1, 100, 1000, 0.05).unwrap();
        let results = experiment.results(130, 1000).unwrap();

        assert!((results.proportion.value - 0.13).abs() < 1e-12);
        assert!(results.proportion.contains(0.13));
        assert!((results.relative_improvement.value - 0.30).abs() < 1e-9);
        assert!(results.relative_improvement.lower_bound > 0.0);
        assert!(results.p_value < 0.05, "got {}", results.p_value);
        assert!(results.p_value > 0.0);
        assert!(results.is_significant(0.05));
    }

    #[test]
    fn test_results_for_identical_arms() {
        let experiment = Experiment::new(2, 10, 100, 0.05).unwrap();
        let results = experiment.results(10, 100).unwrap();

        assert_eq!(results.p_value, 1.0);
        assert_eq!(results.relative_improvement.value, 0.0);
    }

    #[test]
    fn test_zero_baseline_rate_gives_infinite_improvement() {
        let experiment = Experiment::new(1, 0, 100, 0.05).unwrap();
        let results = experiment.results(5, 100).unwrap();

        assert_eq!(results.relative_improvement.value, f64::INFINITY);
        assert!(!results.has_finite_improvement());
        assert!(results.p_value > 0.0 && results.p_value <= 1.0);
    }

    #[test]
    fn test_more_variations_raise_p_value() {
        let single = Experiment::new(1, 100, 1000, 0.05).unwrap();
        let many = Experiment::new(4, 100, 1000, 0.05).unwrap();

        let single_p = single.results(130, 1000).unwrap().p_value;
        let many_p = many.results(130, 1000).unwrap().p_value;
        assert!(many_p > single_p);

        // and widen the intervals
        let width = |interval: ValueWithInterval| interval.upper_bound - interval.lower_bound;
        assert!(width(many.baseline_proportion()) > width(single.baseline_proportion()));
    }

    #[test]
    fn test_custom_settings() {
        let settings = TestSettings {
            small_sample_max_trials: 2000,
            ..TestSettings::default()
        };
        let experiment = Experiment::with_settings(1, 100, 1000, 0.05, settings).unwrap();
        let p_value = experiment.results(130, 1000).unwrap().p_value;

        assert!(p_value > 0.01 && p_value < 0.05, "got {p_value}");
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        assert!(Experiment::new(1, 10, 0, 0.05).is_err());
        assert!(Experiment::new(1, 10, 100, 0.0).is_err());
        assert!(Experiment::new(1, 10, 100, 1.0).is_err());

        let experiment = Experiment::new(1, 10, 100, 0.05).unwrap();
        assert!(experiment.results(1, 0).is_err());
        assert!(experiment.results(101, 100).is_err());
    }
}
