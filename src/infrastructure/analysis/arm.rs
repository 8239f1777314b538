//! Observed counts for one labelled arm of an experiment

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::StatsError;

/// Successes and trials observed for one labelled arm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawArmCounts")]
pub struct ArmCounts {
    pub label: String,
    pub num_successes: u64,
    pub num_trials: u64,
}

impl ArmCounts {
    pub fn new(
        label: impl Into<String>,
        num_successes: u64,
        num_trials: u64,
    ) -> Result<Self, StatsError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(StatsError::invalid_argument("arm label cannot be empty"));
        }
        if num_trials == 0 {
            return Err(StatsError::invalid_argument(format!(
                "arm '{label}' must have at least one trial"
            )));
        }
        if num_successes > num_trials {
            return Err(StatsError::invalid_argument(format!(
                "arm '{label}' has more successes ({num_successes}) than trials ({num_trials})"
            )));
        }

        Ok(Self {
            label,
            num_successes,
            num_trials,
        })
    }
}

#[derive(Deserialize)]
struct RawArmCounts {
    label: String,
    num_successes: u64,
    num_trials: u64,
}

impl TryFrom<RawArmCounts> for ArmCounts {
    type Error = StatsError;

    fn try_from(raw: RawArmCounts) -> Result<Self, Self::Error> {
        Self::new(raw.label, raw.num_successes, raw.num_trials)
    }
}

/// Parses `label:successes:trials`. The label may itself contain colons.
impl FromStr for ArmCounts {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.rsplitn(3, ':');
        let (Some(trials), Some(successes), Some(label)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(StatsError::invalid_argument(format!(
                "expected 'label:successes:trials', got '{s}'"
            )));
        };

        let parse_count = |name: &str, value: &str| {
            value.trim().parse::<u64>().map_err(|e| {
                StatsError::invalid_argument(format!("invalid {name} '{value}' in '{s}': {e}"))
            })
        };

        Self::new(
            label.trim(),
            parse_count("successes", successes)?,
            parse_count("trials", trials)?,
        )
    }
}

impl fmt::Display for ArmCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.label, self.num_successes, self.num_trials)
    }
}
