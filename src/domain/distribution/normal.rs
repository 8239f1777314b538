use std::f64::consts::{PI, SQRT_2};

use statrs::function::erf::{erfc, erfc_inv};

use super::Distribution;
use crate::domain::StatsError;
use crate::domain::error::ensure_open_unit_interval;

/// Normal distribution with the given mean and standard deviation.
///
/// A standard deviation of zero is accepted and treated as a point mass at
/// the mean. Binomial models with a success probability of exactly 0 or 1
/// produce such a degenerate approximation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalDistribution {
    mean: f64,
    standard_deviation: f64,
}

impl Default for NormalDistribution {
    fn default() -> Self {
        Self::standard()
    }
}

impl NormalDistribution {
    pub fn new(mean: f64, standard_deviation: f64) -> Result<Self, StatsError> {
        if !mean.is_finite() {
            return Err(StatsError::invalid_argument(format!(
                "mean must be finite, got {mean}"
            )));
        }
        if !(standard_deviation >= 0.0 && standard_deviation.is_finite()) {
            return Err(StatsError::invalid_argument(format!(
                "standard deviation must be finite and non-negative, got {standard_deviation}"
            )));
        }

        Ok(Self::from_parts(mean, standard_deviation))
    }

    /// N(0, 1)
    pub fn standard() -> Self {
        Self::from_parts(0.0, 1.0)
    }

    /// Builds without validation; callers guarantee finite, non-negative parameters.
    pub(crate) fn from_parts(mean: f64, standard_deviation: f64) -> Self {
        Self {
            mean,
            standard_deviation,
        }
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn standard_deviation(&self) -> f64 {
        self.standard_deviation
    }

    fn is_degenerate(&self) -> bool {
        self.standard_deviation == 0.0
    }
}

impl Distribution for NormalDistribution {
    type Point = f64;

    fn density(&self, x: f64) -> f64 {
        if self.is_degenerate() {
            return if x == self.mean { f64::INFINITY } else { 0.0 };
        }

        let z = (x - self.mean) / self.standard_deviation;
        (-0.5 * z * z).exp() / (self.standard_deviation * (2.0 * PI).sqrt())
    }

    fn cdf(&self, x: f64) -> f64 {
        if self.is_degenerate() {
            return if x < self.mean { 0.0 } else { 1.0 };
        }

        0.5 * erfc(-(x - self.mean) / (self.standard_deviation * SQRT_2))
    }

    fn inverse_cdf(&self, probability: f64) -> Result<f64, StatsError> {
        ensure_open_unit_interval("probability", probability)?;

        if self.is_degenerate() {
            return Ok(self.mean);
        }

        Ok(self.mean - self.standard_deviation * SQRT_2 * erfc_inv(2.0 * probability))
    }

    // Reflect around the mean instead of inverting a second time.
    fn inverse_survival(&self, probability: f64) -> Result<f64, StatsError> {
        Ok(self.mean - (self.inverse_cdf(probability)? - self.mean))
    }
}
