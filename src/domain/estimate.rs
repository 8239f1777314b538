//! Point estimates with confidence intervals or standard errors

use serde::Serialize;

// ============================================================================
// ValueWithInterval
// ============================================================================

/// A point estimate with a two-sided interval around it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueWithInterval {
    /// Point estimate
    pub value: f64,
    /// Lower end of the interval
    pub lower_bound: f64,
    /// Upper end of the interval
    pub upper_bound: f64,
}

impl ValueWithInterval {
    pub fn new(value: f64, lower_bound: f64, upper_bound: f64) -> Self {
        Self {
            value,
            lower_bound,
            upper_bound,
        }
    }

    /// Clamp both bounds into `[min, max]`, leaving the point estimate alone.
    ///
    /// Success rates are clamped to `[0, 1]` before display since the
    /// interval width can carry a bound past the boundary.
    pub fn clamped(&self, min: f64, max: f64) -> Self {
        Self {
            value: self.value,
            lower_bound: self.lower_bound.clamp(min, max),
            upper_bound: self.upper_bound.clamp(min, max),
        }
    }

    /// Whether `value` lies inside the interval (bounds inclusive)
    pub fn contains(&self, value: f64) -> bool {
        self.lower_bound <= value && value <= self.upper_bound
    }
}

// ============================================================================
// ValueWithError
// ============================================================================

/// A point estimate with a standard error, from which confidence intervals
/// can be derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueWithError {
    pub value: f64,
    pub error: f64,
}

impl ValueWithError {
    pub fn new(value: f64, error: f64) -> Self {
        Self { value, error }
    }

    /// Half-width of the confidence interval.
    ///
    /// `z_critical_value` is the point where the right tail of a standard
    /// normal holds half the desired alpha, i.e. `P(Z > z) = alpha / 2`.
    /// `NormalDistribution::inverse_survival` computes it.
    pub fn confidence_interval_width(&self, z_critical_value: f64) -> f64 {
        z_critical_value * self.error
    }

    /// Build an interval of half-width `z_critical_value * error`.
    ///
    /// When `center` is given the interval is reported around it instead of
    /// `value`. This lets callers show the raw observed rate while the width
    /// still comes from the adjusted standard error.
    pub fn value_with_interval(
        &self,
        z_critical_value: f64,
        center: Option<f64>,
    ) -> ValueWithInterval {
        let width = self.confidence_interval_width(z_critical_value);
        let center = center.unwrap_or(self.value);
        ValueWithInterval::new(center, center - width, center + width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_confidence_interval_width() {
        let estimate = ValueWithError::new(0.5, 0.1);
        assert!((estimate.confidence_interval_width(2.0) - 0.2).abs() < EPSILON);
        assert_eq!(estimate.confidence_interval_width(0.0), 0.0);
    }

    #[test]
    fn test_value_with_interval_around_value() {
        let interval = ValueWithError::new(0.5, 0.1).value_with_interval(2.0, None);

        assert_eq!(interval.value, 0.5);
        assert!((interval.lower_bound - 0.3).abs() < EPSILON);
        assert!((interval.upper_bound - 0.7).abs() < EPSILON);
    }

    #[test]
    fn test_value_with_interval_around_center_override() {
        let interval = ValueWithError::new(0.5, 0.1).value_with_interval(2.0, Some(0.4));

        assert_eq!(interval.value, 0.4);
        assert!((interval.lower_bound - 0.2).abs() < EPSILON);
        assert!((interval.upper_bound - 0.6).abs() < EPSILON);
        assert!(interval.contains(0.4));
    }

    #[test]
    fn test_clamped_keeps_value() {
        let interval = ValueWithInterval::new(0.01, -0.02, 0.04).clamped(0.0, 1.0);

        assert_eq!(interval.value, 0.01);
        assert_eq!(interval.lower_bound, 0.0);
        assert_eq!(interval.upper_bound, 0.04);
    }

    #[test]
    fn test_contains() {
        let interval = ValueWithInterval::new(0.5, 0.4, 0.6);
        assert!(interval.contains(0.4));
        assert!(interval.contains(0.6));
        assert!(!interval.contains(0.61));
    }
}
