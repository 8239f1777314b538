//! abba
//!
//! Statistics for A/B tests on success rates:
//! - Normal and binomial distributions with exact small-sample handling
//! - Agresti-Coull estimates of success rates and their differences
//! - Multiple-comparison corrected p-values and confidence intervals
//! - Labelled multi-variation analysis with JSON and text reports

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    BinomialDistribution, Distribution, Experiment, NormalDistribution, Proportion,
    ProportionComparison, StatsError, TestSettings, ValueWithError, ValueWithInterval,
    VariationResult,
};
pub use infrastructure::analysis::{AnalysisReport, ArmCounts, ExperimentAnalysis};
