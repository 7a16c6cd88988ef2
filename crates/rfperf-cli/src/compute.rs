//! # Compute Subcommand
//!
//! Computes gain, VSWR, return loss and gain flatness for one network
//! using a device's S-parameter configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use rfperf_core::{DeviceConfig, MetricName, NetworkDocument};
use rfperf_metrics::{compute_all_metrics, reduce, MetricSet};

use crate::{load_document, write_json};

/// Arguments for `rfperf compute`.
#[derive(Args, Debug)]
pub struct ComputeArgs {
    /// Network document (JSON or YAML).
    #[arg(long)]
    pub network: PathBuf,

    /// Device configuration (JSON or YAML).
    #[arg(long)]
    pub device: PathBuf,

    /// Write the metric document here.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Execute the compute subcommand.
pub fn run_compute(args: &ComputeArgs) -> Result<u8> {
    let metrics = compute_metrics(args)?;

    for (metric, unit) in [
        (MetricName::Gain, "dB"),
        (MetricName::Vswr, ""),
        (MetricName::ReturnLoss, "dB"),
    ] {
        if let Some(values) = metrics.get(metric) {
            println!(
                "  {:<12} min {:>9.3} {unit:<2}  max {:>9.3} {unit}",
                metric.as_str(),
                reduce::min(values).unwrap_or(f64::NAN),
                reduce::max(values).unwrap_or(f64::NAN),
            );
        }
    }
    if let Some(flatness) = metrics.gain_flatness_operational() {
        println!("  flatness     {flatness:.3} dB (operational)");
    }
    if let Some(flatness) = metrics.gain_flatness_wideband() {
        println!("  flatness     {flatness:.3} dB (wideband)");
    }

    if let Some(out) = &args.output {
        write_json(out, &metrics)?;
        println!("  wrote:       {}", out.display());
    }
    Ok(0)
}

fn compute_metrics(args: &ComputeArgs) -> Result<MetricSet> {
    let doc: NetworkDocument = load_document(&args.network)?;
    let network = doc
        .to_network()
        .with_context(|| format!("invalid network: {}", args.network.display()))?;
    let device: DeviceConfig = load_document(&args.device)?;
    let config = device
        .s_parameter_config
        .as_ref()
        .with_context(|| format!("device '{}' has no s_parameter_config", device.name))?;
    compute_all_metrics(&network, config)
        .with_context(|| format!("failed to compute metrics for {}", args.network.display()))
}
