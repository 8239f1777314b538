//! Labelled multi-arm experiment analysis
//!
//! Wraps the domain [`Experiment`](crate::domain::Experiment) with arm
//! labels, validation and a serializable report.

mod arm;
pub mod format;
mod report;
mod service;

pub use arm::ArmCounts;
pub use report::{AnalysisReport, ArmSummary, Outcome, RateBounds, VariationSummary};
pub use service::ExperimentAnalysis;
