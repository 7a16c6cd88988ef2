//! # Error Types: Structured Error Hierarchy
//!
//! Defines the error types shared across rfperf. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Configuration errors are fatal for the call that hit them. They mean
//!   a requirement set or device configuration is wrong upstream.
//! - Network errors mean a loader produced a value violating the
//!   network invariants; they never reach the metric engine.
//! - Data gaps (missing metric, empty band during evaluation) are NOT
//!   errors. They are reported inside the compliance result.

use thiserror::Error;

/// Top-level error type for rfperf-core.
#[derive(Error, Debug)]
pub enum RfError {
    /// A requirement set, device configuration or selector is invalid.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A network value violates its shape or frequency invariants.
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    /// Canonical serialization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}

/// Invalid configuration detected before or during a computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Metric name outside the supported set.
    #[error("unknown metric name {0:?}; expected one of gain, vswr, return_loss, gain_flatness")]
    UnknownMetric(String),

    /// Aggregation outside the supported set.
    #[error("unknown aggregation method: {0:?}")]
    UnknownAggregation(String),

    /// Comparison operator outside the supported set.
    #[error("unknown operator: {0:?}")]
    UnknownOperator(String),

    /// Selector string does not match `S<i><j>` with single-digit ports 1-9.
    #[error("invalid S-parameter format: {0:?}")]
    InvalidSelector(String),

    /// Selector addresses a port the network does not have.
    #[error("port {port} is invalid for {port_count}-port device")]
    PortOutOfRange {
        /// The offending 1-based port index.
        port: u8,
        /// Port count of the target network.
        port_count: usize,
    },

    /// Frequency band bounds are not `0 < start_hz < stop_hz`.
    #[error("invalid frequency band [{start_hz}, {stop_hz}]: {reason}")]
    InvalidBand {
        /// Requested start frequency in Hz.
        start_hz: f64,
        /// Requested stop frequency in Hz.
        stop_hz: f64,
        /// Which constraint was violated.
        reason: &'static str,
    },

    /// Measurement path identifier outside `PRI`/`RED`.
    #[error("unknown measurement path {0:?}; expected PRI or RED")]
    UnknownPath(String),

    /// A name field that must be non-empty was empty.
    #[error("{0} must not be empty")]
    EmptyName(&'static str),

    /// A numeric field that must be finite was NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFiniteValue {
        /// Field name.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// A network value that violates the shape or frequency-axis invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// The frequency axis has no points.
    #[error("network has no frequency points")]
    Empty,

    /// Port count outside 1..=4.
    #[error("unsupported port count {0}; expected 1 to 4")]
    UnsupportedPortCount(usize),

    /// The S-matrix shape does not agree with the frequency axis.
    #[error("s-matrix shape {actual:?} does not match expected {expected:?}")]
    ShapeMismatch {
        /// Expected `(N, P, P)`.
        expected: (usize, usize, usize),
        /// Shape that was supplied.
        actual: (usize, usize, usize),
    },

    /// A frequency is not a positive finite number.
    #[error("frequency at index {index} is not positive and finite: {value}")]
    InvalidFrequency {
        /// Index into the frequency axis.
        index: usize,
        /// The rejected value.
        value: f64,
    },

    /// Frequencies are not strictly increasing.
    #[error("frequencies must be strictly increasing; index {index} ({value}) does not exceed its predecessor")]
    NotIncreasing {
        /// First index that breaks the ordering.
        index: usize,
        /// Frequency at that index.
        value: f64,
    },
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
