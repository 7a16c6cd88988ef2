//! # Evaluate Subcommand
//!
//! Checks a metric document against a requirement set and prints one
//! line per requirement. Exits 1 when any requirement fails.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use rfperf_compliance::{evaluate_metric_set, ComplianceResult};
use rfperf_core::RequirementSet;
use rfperf_metrics::MetricSet;

use crate::{load_document, write_json};

/// Arguments for `rfperf evaluate`.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Metric document produced by `rfperf compute`.
    #[arg(long)]
    pub metrics: PathBuf,

    /// Requirement set (JSON or YAML).
    #[arg(long)]
    pub requirements: PathBuf,

    /// Write the compliance result here.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Execute the evaluate subcommand.
pub fn run_evaluate(args: &EvaluateArgs) -> Result<u8> {
    let metrics: MetricSet = load_document(&args.metrics)?;
    let requirements: RequirementSet = load_document(&args.requirements)?;
    let hash = requirements
        .compute_hash()
        .context("failed to hash requirement set")?;
    let result = evaluate_metric_set(&metrics, &requirements)
        .with_context(|| format!("failed to evaluate {}", args.metrics.display()))?;

    println!("  requirement set: {} ({hash})", requirements.name());
    print_result(&result);

    if let Some(out) = &args.output {
        write_json(out, &result)?;
        println!("  wrote: {}", out.display());
    }
    Ok(if result.overall_pass() { 0 } else { 1 })
}

/// Print one line per outcome followed by the overall verdict.
pub fn print_result(result: &ComplianceResult) {
    for outcome in result.requirements() {
        let mark = if outcome.passed { "PASS" } else { "FAIL" };
        match &outcome.failure_reason {
            Some(reason) => println!("  [{mark}] {}: {reason}", outcome.requirement_name),
            None => println!(
                "  [{mark}] {}: {:.3}",
                outcome.requirement_name, outcome.computed_value
            ),
        }
    }
    let verdict = if result.overall_pass() { "PASS" } else { "FAIL" };
    println!("  overall: {verdict}");
}
