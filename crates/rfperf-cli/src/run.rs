//! # Run Subcommand
//!
//! Processes a batch of network documents against one device and one
//! requirement set, then applies the set's pass policy across files.
//! The full run record is written as JSON when `--output` is given.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use rfperf_compliance::{MeasurementFile, TestRun};
use rfperf_core::{DeviceConfig, NetworkDocument, RequirementSet};

use crate::evaluate::print_result;
use crate::{load_document, write_json};

/// Arguments for `rfperf run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Device configuration (JSON or YAML).
    #[arg(long)]
    pub device: PathBuf,

    /// Requirement set (JSON or YAML).
    #[arg(long)]
    pub requirements: PathBuf,

    /// Write the run record here.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Network documents to process, in order.
    #[arg(required = true, num_args = 1..)]
    pub networks: Vec<PathBuf>,
}

/// Execute the run subcommand.
pub fn run_run(args: &RunArgs) -> Result<u8> {
    let device: DeviceConfig = load_document(&args.device)?;
    let requirements: RequirementSet = load_document(&args.requirements)?;
    let files = args
        .networks
        .iter()
        .map(|p| load_file(p))
        .collect::<Result<Vec<_>>>()?;

    let mut run = TestRun::new(&device.name);
    run.mark_uploaded()?;
    let outcome = run.process(&files, &device, &requirements);

    if let Some(out) = &args.output {
        write_json(out, &run)?;
    }

    let verdict = outcome.with_context(|| format!("test run {} failed", run.id()))?;

    println!("  run:          {}", run.id());
    println!("  device:       {}", run.device_name());
    println!(
        "  requirements: {} ({})",
        requirements.name(),
        run.requirement_hash().unwrap_or("-")
    );
    for evaluation in run.evaluations() {
        match evaluation.path {
            Some(path) => println!("  file: {} [{path}]", evaluation.file_name),
            None => println!("  file: {}", evaluation.file_name),
        }
        print_result(&evaluation.compliance);
    }
    for reason in &verdict.failure_reasons {
        println!("  - {reason}");
    }
    println!("  verdict: {}", if verdict.passed { "PASS" } else { "FAIL" });
    if let Some(out) = &args.output {
        println!("  wrote: {}", out.display());
    }
    Ok(if verdict.passed { 0 } else { 1 })
}

fn load_file(path: &Path) -> Result<MeasurementFile> {
    let doc: NetworkDocument = load_document(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    MeasurementFile::from_document(name, &doc)
        .with_context(|| format!("invalid network: {}", path.display()))
}
