//! Analyze command - compares variations against a baseline

use std::io::{self, Write};

use anyhow::Context;
use clap::{Args, ValueEnum};
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::analysis::format::{describe_number, p_value, percent};
use crate::infrastructure::analysis::{AnalysisReport, ArmCounts, ExperimentAnalysis};
use crate::infrastructure::logging;

/// Output format for the report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

/// Arguments for the analyze command
#[derive(Args, Clone, Debug)]
pub struct AnalyzeArgs {
    /// Baseline arm as LABEL:SUCCESSES:TRIALS
    #[arg(long)]
    pub baseline: ArmCounts,

    /// Variation arm as LABEL:SUCCESSES:TRIALS (repeatable)
    #[arg(long = "variation")]
    pub variations: Vec<ArmCounts>,

    /// Family-wise significance level (overrides config)
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Run the analysis and print the report to stdout
pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_logging(&config.logging);

    let settings = config.analysis.test_settings()?;
    let base_alpha = args.alpha.unwrap_or(config.analysis.base_alpha);

    let mut analysis = ExperimentAnalysis::new(args.baseline);
    for variation in args.variations {
        analysis.add_variation(variation);
    }

    info!(
        num_variations = analysis.variations().len(),
        base_alpha, "Analyzing experiment"
    );
    let report = analysis.analyze(base_alpha, settings)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
        OutputFormat::Text => write_text(&report, &mut out)?,
    }

    Ok(())
}

/// Write one line per arm
pub fn write_text(report: &AnalysisReport, out: &mut impl Write) -> io::Result<()> {
    let baseline = &report.baseline;
    writeln!(
        out,
        "{}: {} / {} = {} ({} - {}) [baseline]",
        baseline.counts.label,
        describe_number(baseline.counts.num_successes),
        describe_number(baseline.counts.num_trials),
        percent(baseline.proportion.value, None),
        percent(baseline.proportion.lower_bound, None),
        percent(baseline.proportion.upper_bound, None),
    )?;

    for variation in &report.variations {
        let improvement = &variation.relative_improvement;
        writeln!(
            out,
            "{}: {} / {} = {} ({} - {}), improvement {} ({} - {}), p = {}{}",
            variation.counts.label,
            describe_number(variation.counts.num_successes),
            describe_number(variation.counts.num_trials),
            percent(variation.proportion.value, None),
            percent(variation.proportion.lower_bound, None),
            percent(variation.proportion.upper_bound, None),
            percent(improvement.value, None),
            percent(improvement.lower_bound, None),
            percent(improvement.upper_bound, None),
            p_value(variation.p_value),
            if variation.significant { " *" } else { "" },
        )?;
    }

    Ok(())
}
