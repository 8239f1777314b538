use thiserror::Error;

/// Errors raised by the statistics engine
///
/// Only malformed inputs are errors. Degenerate but well-defined outcomes,
/// such as an infinite relative improvement over a zero baseline rate, are
/// returned as ordinary values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl StatsError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// Fails with [`StatsError::InvalidArgument`] unless `probability` lies in the
/// open interval (0, 1).
pub(crate) fn ensure_open_unit_interval(name: &str, probability: f64) -> Result<(), StatsError> {
    if probability > 0.0 && probability < 1.0 {
        Ok(())
    } else {
        Err(StatsError::invalid_argument(format!(
            "{name} must be in (0, 1), got {probability}"
        )))
    }
}
