//! # Inspect Subcommand
//!
//! Prints port count, sweep size and frequency range of a network document.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use rfperf_core::NetworkDocument;

use crate::load_document;

/// Arguments for `rfperf inspect`.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Network document (JSON or YAML).
    pub network: PathBuf,
}

/// Execute the inspect subcommand.
pub fn run_inspect(args: &InspectArgs) -> Result<u8> {
    let doc: NetworkDocument = load_document(&args.network)?;
    let network = doc
        .to_network()
        .with_context(|| format!("invalid network: {}", args.network.display()))?;
    let freqs = network.frequencies();

    println!("  file:      {}", args.network.display());
    println!("  ports:     {}", network.port_count());
    println!("  points:    {}", network.len());
    println!(
        "  frequency: {:.2e} .. {:.2e} Hz",
        freqs[0],
        freqs[freqs.len() - 1]
    );
    if let Some(path) = doc.path {
        println!("  path:      {path}");
    }
    Ok(0)
}
