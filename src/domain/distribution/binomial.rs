use statrs::distribution::{Binomial, Discrete, DiscreteCDF};

use super::{Distribution, NormalDistribution};
use crate::domain::StatsError;

/// Largest trial count for which mass and CDF are computed exactly.
///
/// Above it the normal approximation is used. Accuracy of the approximation
/// is worst just past this threshold, so it is tunable through
/// [`BinomialDistribution::with_small_sample_max_trials`].
pub const SMALL_SAMPLE_MAX_TRIALS: u64 = 100;

/// Binomial distribution with exact results for small samples and a
/// normal approximation for large ones.
///
/// The trial count is real-valued so the Agresti–Coull pseudo-trial model can
/// be represented; non-integral counts always use the approximation.
#[derive(Debug, Clone)]
pub struct BinomialDistribution {
    num_trials: f64,
    probability: f64,
    expectation: f64,
    standard_deviation: f64,
    normal: NormalDistribution,
    lower_tail_probability: f64,
    upper_tail_probability: f64,
    exact: Option<Binomial>,
}

impl BinomialDistribution {
    pub fn new(num_trials: f64, probability: f64) -> Result<Self, StatsError> {
        Self::with_small_sample_max_trials(num_trials, probability, SMALL_SAMPLE_MAX_TRIALS)
    }

    pub fn with_small_sample_max_trials(
        num_trials: f64,
        probability: f64,
        small_sample_max_trials: u64,
    ) -> Result<Self, StatsError> {
        if !(num_trials >= 0.0 && num_trials.is_finite()) {
            return Err(StatsError::invalid_argument(format!(
                "num_trials must be finite and non-negative, got {num_trials}"
            )));
        }
        if !(0.0..=1.0).contains(&probability) {
            return Err(StatsError::invalid_argument(format!(
                "probability must be in [0, 1], got {probability}"
            )));
        }

        Ok(Self::from_parts(
            num_trials,
            probability,
            small_sample_max_trials,
        ))
    }

    /// Builds without validation; callers guarantee `num_trials >= 0` and
    /// `probability` in `[0, 1]`.
    pub(crate) fn from_parts(
        num_trials: f64,
        probability: f64,
        small_sample_max_trials: u64,
    ) -> Self {
        let expectation = num_trials * probability;
        let standard_deviation = (expectation * (1.0 - probability)).sqrt();

        let normal = NormalDistribution::from_parts(expectation, standard_deviation);
        let lower_tail_probability = normal.cdf(-0.5);
        let upper_tail_probability = normal.survival(num_trials + 0.5);

        let exact = if num_trials.fract() == 0.0 && num_trials <= small_sample_max_trials as f64 {
            Binomial::new(probability, num_trials as u64).ok()
        } else {
            None
        };

        Self {
            num_trials,
            probability,
            expectation,
            standard_deviation,
            normal,
            lower_tail_probability,
            upper_tail_probability,
            exact,
        }
    }

    pub fn num_trials(&self) -> f64 {
        self.num_trials
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn expectation(&self) -> f64 {
        self.expectation
    }

    pub fn standard_deviation(&self) -> f64 {
        self.standard_deviation
    }

    /// Whether mass and CDF are computed exactly rather than approximated
    pub fn is_exact(&self) -> bool {
        self.exact.is_some()
    }

    /// `P(X = count)`
    pub fn mass(&self, count: i64) -> f64 {
        match &self.exact {
            Some(_) if count < 0 => 0.0,
            Some(exact) => exact.pmf(count as u64),
            None => self.normal.density(count as f64),
        }
    }

    // The normal approximation puts some mass outside [0, num_trials]; divide
    // it back out so the approximate CDF still spans [0, 1].
    fn rescale_probability(&self, probability: f64) -> f64 {
        probability / (1.0 - self.lower_tail_probability - self.upper_tail_probability)
    }
}

impl Distribution for BinomialDistribution {
    type Point = i64;

    fn density(&self, count: i64) -> f64 {
        self.mass(count)
    }

    fn cdf(&self, count: i64) -> f64 {
        if count < 0 {
            return 0.0;
        }
        if count as f64 >= self.num_trials {
            return 1.0;
        }

        match &self.exact {
            Some(exact) => exact.cdf(count as u64),
            None => self.rescale_probability(
                self.normal.cdf(count as f64 + 0.5) - self.lower_tail_probability,
            ),
        }
    }

    fn inverse_cdf(&self, probability: f64) -> Result<f64, StatsError> {
        Ok(self
            .normal
            .inverse_cdf(probability)?
            .clamp(0.0, self.num_trials))
    }

    fn inverse_survival(&self, probability: f64) -> Result<f64, StatsError> {
        Ok(self
            .normal
            .inverse_survival(probability)?
            .clamp(0.0, self.num_trials))
    }
}
