//! # Hash Subcommand
//!
//! Prints the traceability hash stored alongside every test run.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use rfperf_core::RequirementSet;

use crate::load_document;

/// Arguments for `rfperf hash`.
#[derive(Args, Debug)]
pub struct HashArgs {
    /// Requirement set document (JSON or YAML).
    #[arg(long)]
    pub requirements: PathBuf,
}

/// Execute the hash subcommand.
pub fn run_hash(args: &HashArgs) -> Result<u8> {
    let hash = requirement_hash(&args.requirements)?;
    println!("{hash}");
    Ok(0)
}

fn requirement_hash(path: &std::path::Path) -> Result<String> {
    let requirements: RequirementSet = load_document(path)?;
    requirements
        .compute_hash()
        .context("failed to hash requirement set")
}
