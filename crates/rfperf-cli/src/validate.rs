//! # Validate Subcommand
//!
//! Schema validation for device configurations and requirement sets, plus
//! an optional port-count check of every configured selector.

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgGroup, Args};

use rfperf_core::{DeviceConfig, RequirementSet, RfError, SParameterConfig, MAX_PORTS};

use crate::load_document;

/// Arguments for `rfperf validate`.
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("documents")
        .required(true)
        .multiple(true)
        .args(["device", "requirements"])
))]
pub struct ValidateArgs {
    /// Device configuration to validate.
    #[arg(long)]
    pub device: Option<PathBuf>,

    /// Check the device's selectors against this port count.
    #[arg(long, requires = "device", value_parser = clap::value_parser!(u8).range(1..=MAX_PORTS as i64))]
    pub ports: Option<u8>,

    /// Requirement set to validate.
    #[arg(long)]
    pub requirements: Option<PathBuf>,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let mut failures = 0usize;

    if let Some(path) = &args.device {
        match load_document::<DeviceConfig>(path) {
            Ok(device) => {
                println!("  device: VALID ({})", device.name);
                if let Some(ports) = args.ports {
                    failures += check_ports(&device, usize::from(ports));
                }
            }
            Err(e) => {
                eprintln!("  device: INVALID");
                eprintln!("    - {e:#}");
                failures += 1;
            }
        }
    }

    if let Some(path) = &args.requirements {
        match load_document::<RequirementSet>(path) {
            Ok(requirements) => match requirements_summary(&requirements) {
                Ok(summary) => println!("  requirements: VALID ({summary})"),
                Err(e) => {
                    eprintln!("  requirements: INVALID");
                    eprintln!("    - {e}");
                    failures += 1;
                }
            },
            Err(e) => {
                eprintln!("  requirements: INVALID");
                eprintln!("    - {e:#}");
                failures += 1;
            }
        }
    }

    Ok(if failures == 0 { 0 } else { 1 })
}

fn check_ports(device: &DeviceConfig, ports: usize) -> usize {
    let Some(config) = &device.s_parameter_config else {
        eprintln!("  ports: device '{}' has no s_parameter_config", device.name);
        return 1;
    };
    match port_check(config, ports) {
        Ok(()) => {
            println!("  ports: VALID for {ports}-port networks");
            0
        }
        Err(e) => {
            eprintln!("  ports: INVALID");
            eprintln!("    - {e}");
            1
        }
    }
}

fn port_check(config: &SParameterConfig, ports: usize) -> Result<(), RfError> {
    config.validate_against_port_count(ports)?;
    Ok(())
}

fn requirements_summary(requirements: &RequirementSet) -> Result<String, RfError> {
    let hash = requirements.compute_hash()?;
    Ok(format!(
        "{}, {} limits, hash {hash}",
        requirements.name(),
        requirements.metric_limits().len()
    ))
}
