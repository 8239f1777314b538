//! CLI module for abba
//!
//! Provides subcommands:
//! - `analyze`: compare variations against a baseline and print the report

pub mod analyze;

use clap::{Parser, Subcommand};

/// abba - A/B test analysis for success rates
#[derive(Parser)]
#[command(name = "abba")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare one or more variations against a baseline
    Analyze(analyze::AnalyzeArgs),
}
