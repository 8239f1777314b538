//! Infrastructure layer - logging and the labelled analysis service

pub mod analysis;
pub mod logging;
