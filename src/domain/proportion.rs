use super::StatsError;
use super::distribution::{BinomialDistribution, SMALL_SAMPLE_MAX_TRIALS};
use super::estimate::ValueWithError;

/// A binomial proportion: `num_successes` successful trials out of `num_trials`
#[derive(Debug, Clone)]
pub struct Proportion {
    num_successes: u64,
    num_trials: u64,
    binomial: BinomialDistribution,
}

impl Proportion {
    pub fn new(num_successes: u64, num_trials: u64) -> Result<Self, StatsError> {
        if num_trials == 0 {
            return Err(StatsError::invalid_argument(
                "num_trials must be positive",
            ));
        }
        if num_successes > num_trials {
            return Err(StatsError::invalid_argument(format!(
                "num_successes ({num_successes}) cannot exceed num_trials ({num_trials})"
            )));
        }

        let binomial = BinomialDistribution::from_parts(
            num_trials as f64,
            num_successes as f64 / num_trials as f64,
            SMALL_SAMPLE_MAX_TRIALS,
        );

        Ok(Self {
            num_successes,
            num_trials,
            binomial,
        })
    }

    pub fn num_successes(&self) -> u64 {
        self.num_successes
    }

    pub fn num_trials(&self) -> u64 {
        self.num_trials
    }

    /// Binomial model at the observed success rate
    pub fn distribution(&self) -> &BinomialDistribution {
        &self.binomial
    }

    /// Estimate the underlying probability of success.
    ///
    /// Uses the Agresti–Coull ("adjusted Wald") interval: a Wald interval with
    /// `z^2 / 2` pseudo-observations added to both successes and failures. The
    /// estimate is the center of that interval, so it is not
    /// `num_successes / num_trials`, but coverage is much better than the
    /// plain Wald interval, especially near 0 or 1. See Agresti, *Categorical
    /// Data Analysis* (2002), section 1.4.2 and problem 1.24.
    ///
    /// Passing `z_critical_value = 0` gives the ordinary Wald estimate.
    pub fn p_estimate(&self, z_critical_value: f64) -> ValueWithError {
        let squared_z = z_critical_value * z_critical_value;
        let adjusted_trials = self.num_trials as f64 + squared_z;
        let adjusted_probability = (self.num_successes as f64 + squared_z / 2.0) / adjusted_trials;

        let adjusted = BinomialDistribution::from_parts(
            adjusted_trials,
            adjusted_probability,
            SMALL_SAMPLE_MAX_TRIALS,
        );

        ValueWithError::new(
            adjusted.probability(),
            adjusted.standard_deviation() / adjusted.num_trials(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_trials() {
        let err = Proportion::new(0, 0).unwrap_err();
        assert!(matches!(err, StatsError::InvalidArgument { .. }));
    }

    #[test]
    fn test_rejects_successes_above_trials() {
        assert!(Proportion::new(11, 10).is_err());
        assert!(Proportion::new(10, 10).is_ok());
    }

    #[test]
    fn test_wald_estimate_at_zero_critical_value() {
        for (successes, trials) in [(0_u64, 100_u64), (7, 13), (50, 1000), (999, 1000), (3, 3)] {
            let proportion = Proportion::new(successes, trials).unwrap();
            let estimate = proportion.p_estimate(0.0);

            assert_eq!(estimate.value, successes as f64 / trials as f64);
        }
    }

    #[test]
    fn test_wald_error() {
        let estimate = Proportion::new(100, 1000).unwrap().p_estimate(0.0);
        assert!((estimate.error - (0.1_f64 * 0.9 / 1000.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_agresti_coull_estimate() {
        let estimate = Proportion::new(50, 1000).unwrap().p_estimate(1.96);

        // (50 + 1.9208) / 1003.8416
        assert!((estimate.value - 0.051_722).abs() < 1e-5, "got {}", estimate.value);
        assert!((estimate.error - 0.006_990).abs() < 1e-5, "got {}", estimate.error);
    }

    #[test]
    fn test_agresti_coull_never_zero() {
        let estimate = Proportion::new(0, 100).unwrap().p_estimate(1.96);

        assert!(estimate.value > 0.0);
        assert!(estimate.error > 0.0);
    }

    #[test]
    fn test_agresti_coull_never_one() {
        let estimate = Proportion::new(100, 100).unwrap().p_estimate(1.96);
        assert!(estimate.value < 1.0);
    }

    #[test]
    fn test_observed_distribution() {
        let proportion = Proportion::new(30, 120).unwrap();

        assert_eq!(proportion.num_successes(), 30);
        assert_eq!(proportion.num_trials(), 120);
        assert_eq!(proportion.distribution().probability(), 0.25);
        assert_eq!(proportion.distribution().num_trials(), 120.0);
    }
}
