//! Metric engine errors.

use rfperf_core::{format_float, ConfigurationError};
use thiserror::Error;

/// Gain flatness was requested over a band containing no sweep points.
///
/// Unlike the evaluator's empty-band outcome this is raised: the metric
/// engine has no result record to attach the gap to.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("No frequency points found in band {} to {} Hz", format_float(*.start_hz), format_float(*.stop_hz))]
pub struct EmptyBandError {
    /// Band start in Hz.
    pub start_hz: f64,
    /// Band stop in Hz.
    pub stop_hz: f64,
}

/// Errors raised while computing metrics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    /// Selector or device configuration does not fit the network.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Flatness band does not intersect the frequency axis.
    #[error(transparent)]
    EmptyBand(#[from] EmptyBandError),

    /// A metric array is not aligned with its frequency axis.
    #[error("{metric} has {actual} samples but the frequency axis has {expected}")]
    LengthMismatch {
        /// Metric name.
        metric: String,
        /// Frequency axis length.
        expected: usize,
        /// Array length supplied.
        actual: usize,
    },
}
