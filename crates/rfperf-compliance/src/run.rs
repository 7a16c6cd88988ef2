//! # Test Run Lifecycle
//!
//! A test run takes one device, one requirement set and a batch of
//! measurement files through metric computation and compliance
//! evaluation.
//!
//! ## States
//!
//! ```text
//! Created ──▶ Uploaded ──▶ Processing ──▶ Completed (terminal)
//!    │                        ▲    │
//!    └────────────────────────┘    └────▶ Failed (terminal)
//! ```
//!
//! Transitions are validated at runtime; an invalid request returns
//! [`RunError::InvalidTransition`] and leaves the run untouched. Every
//! accepted transition is appended to the run's history.
//!
//! ## Verdict
//!
//! When every file has been evaluated the per-file results are folded
//! into a [`RunVerdict`] under the requirement set's [`PassPolicy`]. A
//! metric or evaluation error on any file fails the whole run; the files
//! evaluated before the error keep their results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rfperf_core::{
    DeviceConfig, MeasurementPath, Network, NetworkDocument, NetworkError, PassPolicy,
    RequirementSet,
};
use rfperf_metrics::{compute_all_metrics, MetricSet};

use crate::error::RunError;
use crate::evaluate::evaluate_metric_set;
use crate::result::ComplianceResult;

// ─── Status ──────────────────────────────────────────────────────────

/// Processing status of a test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestRunStatus {
    /// Run record exists, no files attached yet.
    Created,
    /// Measurement files attached.
    Uploaded,
    /// Metrics and compliance are being computed.
    Processing,
    /// Every file was processed (terminal).
    Completed,
    /// Processing stopped on an error (terminal).
    Failed,
}

impl TestRunStatus {
    /// Lower-case status name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Uploaded => "uploaded",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Whether no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Whether `self -> to` is a permitted transition.
    pub fn can_transition_to(&self, to: TestRunStatus) -> bool {
        matches!(
            (self, to),
            (Self::Created, Self::Uploaded)
                | (Self::Created, Self::Processing)
                | (Self::Uploaded, Self::Processing)
                | (Self::Processing, Self::Completed)
                | (Self::Processing, Self::Failed)
        )
    }
}

impl std::fmt::Display for TestRunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record of one status change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusTransition {
    /// Status before the change.
    pub from: TestRunStatus,
    /// Status after the change.
    pub to: TestRunStatus,
    /// When the change happened.
    pub timestamp: DateTime<Utc>,
}

// ─── Inputs and per-file results ─────────────────────────────────────

/// One measurement file handed to a run.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementFile {
    /// Display name, usually the file name.
    pub name: String,
    /// Signal path the file was measured on, if known.
    pub path: Option<MeasurementPath>,
    /// Loaded network.
    pub network: Network,
}

impl MeasurementFile {
    /// A file with no path tag.
    pub fn new(name: impl Into<String>, network: Network) -> Self {
        Self {
            name: name.into(),
            path: None,
            network,
        }
    }

    /// Tag the file with a measurement path.
    pub fn with_path(mut self, path: MeasurementPath) -> Self {
        self.path = Some(path);
        self
    }

    /// Build from a network document, taking the path tag from it.
    pub fn from_document(
        name: impl Into<String>,
        document: &NetworkDocument,
    ) -> Result<Self, NetworkError> {
        Ok(Self {
            name: name.into(),
            path: document.path,
            network: document.to_network()?,
        })
    }
}

/// Metrics and compliance for one processed file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEvaluation {
    /// Name of the measurement file.
    pub file_name: String,
    /// Path tag of the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<MeasurementPath>,
    /// Computed metric arrays.
    pub metrics: MetricSet,
    /// Compliance against the run's requirement set.
    pub compliance: ComplianceResult,
}

// ─── Verdict ─────────────────────────────────────────────────────────

/// Run-level pass/fail under a [`PassPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunVerdict {
    /// Whether the run satisfies the policy.
    pub passed: bool,
    /// Failing files first, then uncovered paths.
    pub failure_reasons: Vec<String>,
}

impl RunVerdict {
    /// Fold per-file results under `policy`.
    ///
    /// With `all_files_must_pass` the run needs at least one file and no
    /// failing file; without it a single passing file is enough. Each
    /// required path additionally needs a passing file tagged with it.
    pub fn evaluate(evaluations: &[FileEvaluation], policy: &PassPolicy) -> Self {
        let passes = |e: &FileEvaluation| e.compliance.overall_pass();
        let mut failure_reasons = Vec::new();

        if evaluations.is_empty() {
            failure_reasons.push("No measurement files were processed".to_string());
        }
        for e in evaluations.iter().filter(|e| !passes(*e)) {
            failure_reasons.push(format!("File '{}' failed compliance", e.file_name));
        }

        let mut passed = if policy.all_files_must_pass {
            !evaluations.is_empty() && evaluations.iter().all(passes)
        } else {
            evaluations.iter().any(passes)
        };

        for path in &policy.required_paths {
            let covered = evaluations
                .iter()
                .any(|e| e.path == Some(*path) && passes(e));
            if !covered {
                passed = false;
                failure_reasons.push(format!(
                    "Required path '{path}' has no passing measurement file"
                ));
            }
        }

        Self {
            passed,
            failure_reasons,
        }
    }
}

// ─── Test run ────────────────────────────────────────────────────────

/// A batch of measurement files evaluated against one requirement set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRun {
    id: Uuid,
    device_name: String,
    status: TestRunStatus,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    requirement_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
    evaluations: Vec<FileEvaluation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    verdict: Option<RunVerdict>,
    transitions: Vec<StatusTransition>,
}

impl TestRun {
    /// New run in the `created` state.
    pub fn new(device_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            device_name: device_name.into(),
            status: TestRunStatus::Created,
            created_at: Utc::now(),
            completed_at: None,
            requirement_hash: None,
            error_message: None,
            evaluations: Vec::new(),
            verdict: None,
            transitions: Vec::new(),
        }
    }

    /// Run identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Device under test.
    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// Current status.
    pub fn status(&self) -> TestRunStatus {
        self.status
    }

    /// Creation time.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time the run reached a terminal state.
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Hash of the requirement set used, once processing started.
    pub fn requirement_hash(&self) -> Option<&str> {
        self.requirement_hash.as_deref()
    }

    /// Error that failed the run.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Per-file results recorded so far.
    pub fn evaluations(&self) -> &[FileEvaluation] {
        &self.evaluations
    }

    /// Verdict of a completed run.
    pub fn verdict(&self) -> Option<&RunVerdict> {
        self.verdict.as_ref()
    }

    /// Status history, oldest first.
    pub fn transitions(&self) -> &[StatusTransition] {
        &self.transitions
    }

    /// Mark files as attached (CREATED → UPLOADED).
    pub fn mark_uploaded(&mut self) -> Result<(), RunError> {
        self.transition(TestRunStatus::Uploaded)
    }

    /// Process `files` in order and settle the run.
    ///
    /// On success the run is `completed` and the verdict is returned. On a
    /// metric or evaluation error the run is `failed`, the error text is
    /// stored, and the error is returned.
    pub fn process(
        &mut self,
        files: &[MeasurementFile],
        device: &DeviceConfig,
        requirements: &RequirementSet,
    ) -> Result<RunVerdict, RunError> {
        self.transition(TestRunStatus::Processing)?;

        if let Err(err) = self.process_files(files, device, requirements) {
            tracing::warn!(run = %self.id, error = %err, "test run failed");
            self.error_message = Some(err.to_string());
            self.transition(TestRunStatus::Failed)?;
            return Err(err);
        }

        let verdict = RunVerdict::evaluate(&self.evaluations, requirements.pass_policy());
        self.verdict = Some(verdict.clone());
        self.transition(TestRunStatus::Completed)?;
        tracing::info!(
            run = %self.id,
            files = self.evaluations.len(),
            passed = verdict.passed,
            "test run completed"
        );
        Ok(verdict)
    }

    fn process_files(
        &mut self,
        files: &[MeasurementFile],
        device: &DeviceConfig,
        requirements: &RequirementSet,
    ) -> Result<(), RunError> {
        self.requirement_hash = Some(requirements.compute_hash()?);

        let config =
            device
                .s_parameter_config
                .as_ref()
                .ok_or_else(|| RunError::MissingSParameterConfig {
                    device: device.name.clone(),
                })?;

        for file in files {
            let metrics =
                compute_all_metrics(&file.network, config).map_err(|source| RunError::Metrics {
                    file: file.name.clone(),
                    source,
                })?;
            let compliance = evaluate_metric_set(&metrics, requirements).map_err(|source| {
                RunError::Compliance {
                    file: file.name.clone(),
                    source,
                }
            })?;
            tracing::debug!(
                file = %file.name,
                passed = compliance.overall_pass(),
                failed = compliance.failed_count(),
                "evaluated measurement file"
            );
            self.evaluations.push(FileEvaluation {
                file_name: file.name.clone(),
                path: file.path,
                metrics,
                compliance,
            });
        }
        Ok(())
    }

    fn transition(&mut self, to: TestRunStatus) -> Result<(), RunError> {
        if !self.status.can_transition_to(to) {
            return Err(RunError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        let now = Utc::now();
        self.transitions.push(StatusTransition {
            from: self.status,
            to,
            timestamp: now,
        });
        self.status = to;
        if to.is_terminal() {
            self.completed_at = Some(now);
        }
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
