//! # rfperf-compliance: Compliance Evaluation and Test Runs
//!
//! Turns metric arrays into pass/fail verdicts.
//!
//! - [`evaluate_compliance`] checks one file's [`MetricSet`] against every
//!   [`MetricLimit`] of a [`RequirementSet`], in order, and never stops
//!   early. Missing metrics and empty bands are recorded as failed
//!   outcomes rather than raised.
//! - [`TestRun`] drives a batch of measurement files through metric
//!   computation and evaluation, tracks the run status, and folds the
//!   per-file results into a [`RunVerdict`] under the set's
//!   [`PassPolicy`].
//!
//! [`MetricSet`]: rfperf_metrics::MetricSet
//! [`MetricLimit`]: rfperf_core::MetricLimit
//! [`RequirementSet`]: rfperf_core::RequirementSet
//! [`PassPolicy`]: rfperf_core::PassPolicy

pub mod error;
pub mod evaluate;
pub mod result;
pub mod run;

pub use error::{ComplianceError, RunError};
pub use evaluate::{aggregate, compare, evaluate_compliance, evaluate_metric_set};
pub use result::{ComplianceResult, RequirementOutcome};
pub use run::{
    FileEvaluation, MeasurementFile, RunVerdict, StatusTransition, TestRun, TestRunStatus,
};
