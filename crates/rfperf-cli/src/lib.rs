//! # rfperf-cli: Command-Line Front End
//!
//! Thin handlers over the rfperf library crates. Each subcommand module
//! exposes an `Args` struct and a `run_*` handler returning the process
//! exit code.
//!
//! ## Subcommands
//!
//! - `rfperf inspect` prints the shape of a network document.
//! - `rfperf compute` derives metric arrays for one network.
//! - `rfperf evaluate` checks a metric document against a requirement set.
//! - `rfperf hash` prints a requirement set's traceability hash.
//! - `rfperf validate` checks device and requirement documents.
//! - `rfperf run` processes a batch of networks end to end.
//!
//! ```bash
//! rfperf compute --network lna.json --device lna.yaml --output lna.metrics.json
//! rfperf evaluate --metrics lna.metrics.json --requirements rx.yaml
//! rfperf run --device lna.yaml --requirements rx.yaml pri.json red.json
//! ```

pub mod compute;
pub mod evaluate;
pub mod hash;
pub mod inspect;
pub mod run;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Load a document, as YAML for `.yaml`/`.yml` and JSON otherwise.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    if is_yaml(path) {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML: {}", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON: {}", path.display()))
    }
}

/// Write `value` as pretty-printed JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize JSON")?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
}
