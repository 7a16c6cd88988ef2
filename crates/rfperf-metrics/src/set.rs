//! # Metric Set
//!
//! The per-file bundle of metric arrays handed to the compliance
//! evaluator, keyed by [`MetricName`] and aligned with one frequency axis.
//!
//! ## Serialized form
//!
//! ```json
//! {
//!   "frequencies": [1000000000.0, 2000000000.0],
//!   "metrics": {"gain": [-6.02, "-Infinity"], "vswr": [1.2, 1.3]},
//!   "gain_flatness_operational": 0.4
//! }
//! ```
//!
//! Non-finite samples are written as strings; see [`crate::ieee`].

use std::collections::BTreeMap;

use rfperf_core::{MetricName, Network, SParameterConfig};
use serde::{Deserialize, Serialize};

use crate::engine::{compute_gain, compute_gain_flatness, compute_return_loss, compute_vswr};
use crate::error::MetricsError;
use crate::ieee::Sample;

/// Metric arrays for one measurement, aligned with its frequency axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "MetricDocument", try_from = "MetricDocument")]
pub struct MetricSet {
    frequencies: Vec<f64>,
    series: BTreeMap<MetricName, Vec<f64>>,
    gain_flatness_operational: Option<f64>,
    gain_flatness_wideband: Option<f64>,
}

impl MetricSet {
    /// Empty set over `frequencies`.
    pub fn new(frequencies: Vec<f64>) -> Self {
        Self {
            frequencies,
            series: BTreeMap::new(),
            gain_flatness_operational: None,
            gain_flatness_wideband: None,
        }
    }

    /// Add or replace the array for `metric`.
    pub fn insert(&mut self, metric: MetricName, values: Vec<f64>) -> Result<(), MetricsError> {
        if values.len() != self.frequencies.len() {
            return Err(MetricsError::LengthMismatch {
                metric: metric.to_string(),
                expected: self.frequencies.len(),
                actual: values.len(),
            });
        }
        self.series.insert(metric, values);
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, metric: MetricName, values: Vec<f64>) -> Result<Self, MetricsError> {
        self.insert(metric, values)?;
        Ok(self)
    }

    /// Frequency axis in Hz.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Array for `metric`, if computed.
    pub fn get(&self, metric: MetricName) -> Option<&[f64]> {
        self.series.get(&metric).map(Vec::as_slice)
    }

    /// Metrics present, in name order.
    pub fn metric_names(&self) -> impl Iterator<Item = MetricName> + '_ {
        self.series.keys().copied()
    }

    /// Peak-to-peak gain over the operational band.
    pub fn gain_flatness_operational(&self) -> Option<f64> {
        self.gain_flatness_operational
    }

    /// Peak-to-peak gain over the wideband band.
    pub fn gain_flatness_wideband(&self) -> Option<f64> {
        self.gain_flatness_wideband
    }
}

/// Compute gain, VSWR, return loss and both flatness scalars for `network`.
///
/// Every selector in `config` is checked against the network's port count
/// before anything is computed. Gain flatness is reported as the two
/// scalars only; no `gain_flatness` series is added.
pub fn compute_all_metrics(
    network: &Network,
    config: &SParameterConfig,
) -> Result<MetricSet, MetricsError> {
    config.validate_against_port_count(network.port_count())?;

    let gain = compute_gain(network, config.gain_parameter)?;
    let vswr = compute_vswr(network, config.input_return_parameter)?;
    let return_loss = compute_return_loss(network, config.input_return_parameter)?;

    let operational = compute_gain_flatness(
        &gain,
        network.frequencies(),
        &config.operational_band_hz,
    )?;
    let wideband =
        compute_gain_flatness(&gain, network.frequencies(), &config.wideband_band_hz)?;

    tracing::debug!(
        points = network.len(),
        ports = network.port_count(),
        gain_parameter = %config.gain_parameter,
        flatness_operational = operational,
        flatness_wideband = wideband,
        "computed metric set"
    );

    let mut set = MetricSet::new(network.frequencies().to_vec())
        .with(MetricName::Gain, gain)?
        .with(MetricName::Vswr, vswr)?
        .with(MetricName::ReturnLoss, return_loss)?;
    set.gain_flatness_operational = Some(operational);
    set.gain_flatness_wideband = Some(wideband);
    Ok(set)
}

// ---------------------------------------------------------------------------
// Wire form
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
struct MetricDocument {
    frequencies: Vec<f64>,
    metrics: BTreeMap<MetricName, Vec<Sample>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gain_flatness_operational: Option<Sample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gain_flatness_wideband: Option<Sample>,
}

impl From<MetricSet> for MetricDocument {
    fn from(set: MetricSet) -> Self {
        Self {
            frequencies: set.frequencies,
            metrics: set
                .series
                .into_iter()
                .map(|(name, values)| (name, values.into_iter().map(Sample).collect()))
                .collect(),
            gain_flatness_operational: set.gain_flatness_operational.map(Sample),
            gain_flatness_wideband: set.gain_flatness_wideband.map(Sample),
        }
    }
}

impl TryFrom<MetricDocument> for MetricSet {
    type Error = MetricsError;

    fn try_from(doc: MetricDocument) -> Result<Self, Self::Error> {
        let mut set = MetricSet::new(doc.frequencies);
        for (name, samples) in doc.metrics {
            set.insert(name, samples.into_iter().map(|s| s.0).collect())?;
        }
        set.gain_flatness_operational = doc.gain_flatness_operational.map(|s| s.0);
        set.gain_flatness_wideband = doc.gain_flatness_wideband.map(|s| s.0);
        Ok(set)
    }
}
