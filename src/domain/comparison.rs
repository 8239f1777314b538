//! Comparison of a variation's success rate against a baseline's

use tracing::{debug, trace};

use super::StatsError;
use super::distribution::{BinomialDistribution, Distribution, SMALL_SAMPLE_MAX_TRIALS};
use super::error::ensure_open_unit_interval;
use super::estimate::ValueWithError;
use super::proportion::Proportion;

/// Default truncation error allowed in the iterated test
pub const P_VALUE_PRECISION: f64 = 1e-5;

/// Below this many baseline trials the iterated test sums over the whole
/// baseline support instead of a coverage interval.
pub const EXHAUSTIVE_MAX_TRIALS: u64 = 1000;

// ============================================================================
// TestSettings
// ============================================================================

/// Numerical tuning for proportion tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestSettings {
    /// Largest trial count for exact binomial computation
    pub small_sample_max_trials: u64,
    /// Largest baseline trial count summed without truncation
    pub exhaustive_max_trials: u64,
    /// Coverage alpha handed to [`ProportionComparison::iterated_test`]
    pub p_value_precision: f64,
}

impl Default for TestSettings {
    fn default() -> Self {
        Self {
            small_sample_max_trials: SMALL_SAMPLE_MAX_TRIALS,
            exhaustive_max_trials: EXHAUSTIVE_MAX_TRIALS,
            p_value_precision: P_VALUE_PRECISION,
        }
    }
}

impl TestSettings {
    pub fn validate(&self) -> Result<(), StatsError> {
        if !(self.p_value_precision > 0.0 && self.p_value_precision < 1.0) {
            return Err(StatsError::configuration(format!(
                "p_value_precision must be in (0, 1), got {}",
                self.p_value_precision
            )));
        }

        Ok(())
    }
}

// ============================================================================
// ProportionComparison
// ============================================================================

/// Compares a variation's [`Proportion`] against a baseline's
#[derive(Debug, Clone, Copy)]
pub struct ProportionComparison<'a> {
    baseline: &'a Proportion,
    variation: &'a Proportion,
    settings: TestSettings,
}

impl<'a> ProportionComparison<'a> {
    pub fn new(baseline: &'a Proportion, variation: &'a Proportion) -> Self {
        Self::with_settings(baseline, variation, TestSettings::default())
    }

    pub fn with_settings(
        baseline: &'a Proportion,
        variation: &'a Proportion,
        settings: TestSettings,
    ) -> Self {
        Self {
            baseline,
            variation,
            settings,
        }
    }

    pub fn baseline(&self) -> &'a Proportion {
        self.baseline
    }

    pub fn variation(&self) -> &'a Proportion {
        self.variation
    }

    /// Estimated difference in success rates, variation minus baseline.
    ///
    /// The standard errors combine as for independent samples.
    pub fn difference_estimate(&self, z_critical_value: f64) -> ValueWithError {
        let baseline_p = self.baseline.p_estimate(z_critical_value);
        let variation_p = self.variation.p_estimate(z_critical_value);

        let difference = variation_p.value - baseline_p.value;
        let standard_error = (baseline_p.error.powi(2) + variation_p.error.powi(2)).sqrt();

        ValueWithError::new(difference, standard_error)
    }

    /// Difference in success rates as a proportion of the baseline rate.
    ///
    /// A zero baseline estimate yields a signed infinity (or NaN when the
    /// difference is zero too); callers display those as not applicable.
    pub fn difference_ratio(&self, z_critical_value: f64) -> ValueWithError {
        let baseline_value = self.baseline.p_estimate(z_critical_value).value;
        let difference = self.difference_estimate(z_critical_value);

        ValueWithError::new(
            difference.value / baseline_value,
            difference.error / baseline_value,
        )
    }

    /// P-value of H0: pBaseline == pVariation against H1: pBaseline != pVariation.
    ///
    /// Sums p-values conditioned on each baseline success count. Conditioning
    /// makes the `num_tests` comparisons independent, so the multiple-testing
    /// adjustment per count is exact. Cost grows like the width of the
    /// baseline's coverage interval, roughly `sqrt(baseline trials)`.
    ///
    /// Lower `coverage_alpha` is more accurate and slower: the result is
    /// within about `coverage_alpha` of the truth, ignoring the error of the
    /// normal approximation.
    pub fn iterated_test(&self, num_tests: u32, coverage_alpha: f64) -> Result<f64, StatsError> {
        ensure_open_unit_interval("coverage_alpha", coverage_alpha)?;
        if num_tests == 0 {
            return Err(StatsError::invalid_argument("num_tests must be positive"));
        }

        let observed_delta =
            (self.variation.p_estimate(0.0).value - self.baseline.p_estimate(0.0).value).abs();
        if observed_delta == 0.0 {
            // the summation below does not handle ties well
            return Ok(1.0);
        }

        let baseline_trials = self.baseline.num_trials() as f64;
        let variation_trials = self.variation.num_trials() as f64;

        let pooled_proportion = (self.baseline.num_successes() + self.variation.num_successes())
            as f64
            / (baseline_trials + variation_trials);
        let variation_distribution = self.pooled_distribution(variation_trials, pooled_proportion);
        let baseline_distribution = self.pooled_distribution(baseline_trials, pooled_proportion);

        let (first, last) = self.binomial_coverage_interval(&baseline_distribution, coverage_alpha)?;
        debug!(
            observed_delta,
            pooled_proportion,
            first,
            last,
            num_tests,
            "Running iterated proportion test"
        );

        let mut p_value = 0.0;
        for baseline_successes in first..=last {
            let baseline_proportion = baseline_successes as f64 / baseline_trials;
            let lower_count =
                ((baseline_proportion - observed_delta) * variation_trials).floor() as i64;
            let upper_count =
                ((baseline_proportion + observed_delta) * variation_trials).ceil() as i64;

            // variation counts at least as extreme, given this baseline count
            let p_value_at_baseline = variation_distribution.cdf(lower_count)
                + variation_distribution.survival(upper_count - 1);
            let adjusted_p_value = probability_union(p_value_at_baseline, num_tests);

            p_value += baseline_distribution.mass(baseline_successes) * adjusted_p_value;
        }
        trace!(p_value, "Summed conditional p-values");

        // baseline counts outside the interval hold less than coverage_alpha of
        // the mass, so adding it gives a conservative bound
        Ok((p_value + coverage_alpha).min(1.0))
    }

    fn pooled_distribution(&self, num_trials: f64, pooled_proportion: f64) -> BinomialDistribution {
        BinomialDistribution::from_parts(
            num_trials,
            pooled_proportion,
            self.settings.small_sample_max_trials,
        )
    }

    /// Interval holding at least `1 - coverage_alpha` of the distribution's
    /// mass, centered on the expectation unless clipped at the boundary.
    fn binomial_coverage_interval(
        &self,
        distribution: &BinomialDistribution,
        coverage_alpha: f64,
    ) -> Result<(i64, i64), StatsError> {
        let num_trials = distribution.num_trials();
        if num_trials < self.settings.exhaustive_max_trials as f64 {
            return Ok((0, num_trials as i64));
        }

        Ok((
            distribution.inverse_cdf(coverage_alpha / 2.0)?.floor() as i64,
            distribution.inverse_survival(coverage_alpha / 2.0)?.ceil() as i64,
        ))
    }
}

/// Probability that an event with per-test probability `probability` happens
/// at least once in `num_tests` independent tests.
///
/// Applied to alpha instead of a p-value this is the Šidák correction.
pub fn probability_union(probability: f64, num_tests: u32) -> f64 {
    1.0 - (1.0 - probability).powf(num_tests as f64)
}
