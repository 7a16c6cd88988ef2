//! Errors raised by the compliance evaluator and the test-run driver.

use rfperf_core::CanonicalizationError;
use rfperf_metrics::MetricsError;
use thiserror::Error;

use crate::run::TestRunStatus;

/// Fatal evaluator errors.
///
/// Data gaps are not represented here: they become failed outcomes in the
/// [`ComplianceResult`](crate::ComplianceResult).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComplianceError {
    /// A metric series is not aligned with the frequency axis.
    #[error("metric '{metric}' has {actual} samples but {expected} frequencies were supplied")]
    LengthMismatch {
        /// Metric name.
        metric: String,
        /// Frequency axis length.
        expected: usize,
        /// Series length.
        actual: usize,
    },
}

/// Errors from driving a [`TestRun`](crate::TestRun).
#[derive(Error, Debug)]
pub enum RunError {
    /// The run cannot move between these two states.
    #[error("invalid test run transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status.
        from: TestRunStatus,
        /// Requested status.
        to: TestRunStatus,
    },

    /// The device has nothing to drive an S-parameter test with.
    #[error("device '{device}' has no S-parameter configuration")]
    MissingSParameterConfig {
        /// Device name.
        device: String,
    },

    /// Metric computation failed for one file.
    #[error("file '{file}': {source}")]
    Metrics {
        /// Measurement file name.
        file: String,
        /// Underlying error.
        #[source]
        source: MetricsError,
    },

    /// Evaluation failed for one file.
    #[error("file '{file}': {source}")]
    Compliance {
        /// Measurement file name.
        file: String,
        /// Underlying error.
        #[source]
        source: ComplianceError,
    },

    /// The requirement set could not be hashed.
    #[error("requirement hash: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}
