//! # rfperf CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rfperf_cli::compute::{run_compute, ComputeArgs};
use rfperf_cli::evaluate::{run_evaluate, EvaluateArgs};
use rfperf_cli::hash::{run_hash, HashArgs};
use rfperf_cli::inspect::{run_inspect, InspectArgs};
use rfperf_cli::run::{run_run, RunArgs};
use rfperf_cli::validate::{run_validate, ValidateArgs};

/// RF performance analysis: S-parameter metrics and compliance checks.
#[derive(Parser, Debug)]
#[command(name = "rfperf", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print port count, sweep size and frequency range of a network.
    Inspect(InspectArgs),

    /// Compute gain, VSWR, return loss and gain flatness for a network.
    Compute(ComputeArgs),

    /// Evaluate a metric document against a requirement set.
    Evaluate(EvaluateArgs),

    /// Print the traceability hash of a requirement set.
    Hash(HashArgs),

    /// Validate device configurations and requirement sets.
    Validate(ValidateArgs),

    /// Process measurement files end to end and apply the pass policy.
    Run(RunArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Inspect(args) => run_inspect(&args),
        Commands::Compute(args) => run_compute(&args),
        Commands::Evaluate(args) => run_evaluate(&args),
        Commands::Hash(args) => run_hash(&args),
        Commands::Validate(args) => run_validate(&args),
        Commands::Run(args) => run_run(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
