//! Domain layer - inferential statistics for binomial proportions

pub mod comparison;
pub mod distribution;
pub mod error;
pub mod estimate;
pub mod experiment;
pub mod proportion;

pub use comparison::{
    probability_union, ProportionComparison, TestSettings, EXHAUSTIVE_MAX_TRIALS,
    P_VALUE_PRECISION,
};
pub use distribution::{
    BinomialDistribution, Distribution, NormalDistribution, SMALL_SAMPLE_MAX_TRIALS,
};
pub use error::StatsError;
pub use estimate::{ValueWithError, ValueWithInterval};
pub use experiment::{Experiment, VariationResult};
pub use proportion::Proportion;
