//! Probability distributions used by the proportion tests
//!
//! Both distributions expose the same shape through [`Distribution`]. The
//! binomial distribution owns a normal approximation of itself rather than
//! sharing one.

mod binomial;
mod normal;

pub use binomial::{BinomialDistribution, SMALL_SAMPLE_MAX_TRIALS};
pub use normal::NormalDistribution;

use super::StatsError;

/// Common interface of a univariate distribution
pub trait Distribution {
    /// Type of a point in the support (`f64` for continuous, `i64` counts
    /// for discrete distributions).
    type Point: Copy;

    /// Probability density (or mass) at `x`
    fn density(&self, x: Self::Point) -> f64;

    /// `P(X <= x)`
    fn cdf(&self, x: Self::Point) -> f64;

    /// `P(X > x)`
    fn survival(&self, x: Self::Point) -> f64 {
        1.0 - self.cdf(x)
    }

    /// Returns `z` with `P(X <= z) = probability`; `probability` must be in (0, 1)
    fn inverse_cdf(&self, probability: f64) -> Result<f64, StatsError>;

    /// Returns `z` with `P(X > z) = probability`; `probability` must be in (0, 1)
    fn inverse_survival(&self, probability: f64) -> Result<f64, StatsError>;
}
