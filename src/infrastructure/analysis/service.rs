//! Analysis of a labelled baseline against labelled variations

use std::collections::HashSet;

use tracing::{debug, info};

use super::arm::ArmCounts;
use super::report::{AnalysisReport, ArmSummary, RateBounds, VariationSummary};
use crate::domain::{Experiment, StatsError, TestSettings};

/// One baseline arm and the variations compared against it
#[derive(Debug, Clone)]
pub struct ExperimentAnalysis {
    baseline: ArmCounts,
    variations: Vec<ArmCounts>,
}

impl ExperimentAnalysis {
    pub fn new(baseline: ArmCounts) -> Self {
        Self {
            baseline,
            variations: Vec::new(),
        }
    }

    /// Add a variation
    pub fn with_variation(mut self, variation: ArmCounts) -> Self {
        self.add_variation(variation);
        self
    }

    pub fn add_variation(&mut self, variation: ArmCounts) {
        self.variations.push(variation);
    }

    pub fn baseline(&self) -> &ArmCounts {
        &self.baseline
    }

    pub fn variations(&self) -> &[ArmCounts] {
        &self.variations
    }

    /// Compare every variation against the baseline at family-wise level
    /// `base_alpha`.
    pub fn analyze(
        &self,
        base_alpha: f64,
        settings: TestSettings,
    ) -> Result<AnalysisReport, StatsError> {
        self.validate_labels()?;

        let num_variations = u32::try_from(self.variations.len())
            .map_err(|_| StatsError::invalid_argument("too many variations"))?;
        let experiment = Experiment::with_settings(
            num_variations,
            self.baseline.num_successes,
            self.baseline.num_trials,
            base_alpha,
            settings,
        )?;

        let baseline_proportion = experiment.baseline_proportion().clamped(0.0, 1.0);
        let mut overall_bounds = RateBounds::from_interval(&baseline_proportion);

        let mut variations = Vec::with_capacity(self.variations.len());
        for variation in &self.variations {
            let result = experiment.results(variation.num_successes, variation.num_trials)?;
            let summary = VariationSummary::new(variation.clone(), result, base_alpha);

            debug!(
                label = %variation.label,
                p_value = summary.p_value,
                improvement = summary.relative_improvement.value,
                "Compared variation against baseline"
            );

            overall_bounds.include(&summary.proportion);
            variations.push(summary);
        }

        let report = AnalysisReport {
            base_alpha,
            critical_value: experiment.z_critical_value(),
            baseline: ArmSummary {
                counts: self.baseline.clone(),
                proportion: baseline_proportion,
            },
            variations,
            overall_bounds,
        };

        info!(
            baseline = %self.baseline.label,
            num_variations,
            significant = report.has_significant_result(),
            "Experiment analyzed"
        );

        Ok(report)
    }

    fn validate_labels(&self) -> Result<(), StatsError> {
        let mut seen = HashSet::new();
        seen.insert(self.baseline.label.as_str());

        for variation in &self.variations {
            if !seen.insert(variation.label.as_str()) {
                return Err(StatsError::invalid_argument(format!(
                    "duplicate arm label: '{}'",
                    variation.label
                )));
            }
        }

        Ok(())
    }
}
