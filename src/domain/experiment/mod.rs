//! Experiment domain module for A/B testing
//!
//! An [`Experiment`] compares one baseline against any number of variations
//! with a shared, Bonferroni-corrected critical value.

mod entity;
mod result;

pub use entity::Experiment;
pub use result::VariationResult;
