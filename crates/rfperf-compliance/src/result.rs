//! # Compliance Result
//!
//! One [`RequirementOutcome`] per metric limit, in requirement-set order,
//! plus a running verdict. `overall_pass` starts `true` and only ever moves
//! to `false`: once any outcome fails, later passes cannot restore it.

use serde::{Deserialize, Serialize};

/// The evaluation of a single metric limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementOutcome {
    /// Limit description, or the metric name when it has none.
    pub requirement_name: String,
    /// Threshold the value was compared against.
    #[serde(with = "rfperf_metrics::ieee")]
    pub limit_value: f64,
    /// Aggregated value, or `0.0` when a data gap prevented aggregation.
    #[serde(with = "rfperf_metrics::ieee")]
    pub computed_value: f64,
    /// Whether the limit was met.
    pub passed: bool,
    /// Why the limit was not met.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl RequirementOutcome {
    /// A met limit.
    pub fn pass(requirement_name: impl Into<String>, limit_value: f64, computed_value: f64) -> Self {
        Self {
            requirement_name: requirement_name.into(),
            limit_value,
            computed_value,
            passed: true,
            failure_reason: None,
        }
    }

    /// A missed limit with its reason.
    pub fn fail(
        requirement_name: impl Into<String>,
        limit_value: f64,
        computed_value: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            requirement_name: requirement_name.into(),
            limit_value,
            computed_value,
            passed: false,
            failure_reason: Some(reason.into()),
        }
    }
}

/// Outcome of evaluating one metric set against one requirement set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceResult {
    requirements: Vec<RequirementOutcome>,
    overall_pass: bool,
    failure_reasons: Vec<String>,
}

impl Default for ComplianceResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ComplianceResult {
    /// Empty, passing result.
    pub fn new() -> Self {
        Self {
            requirements: Vec::new(),
            overall_pass: true,
            failure_reasons: Vec::new(),
        }
    }

    /// Append `outcome` and fold it into the verdict.
    pub fn add_requirement_result(&mut self, outcome: RequirementOutcome) {
        if !outcome.passed {
            self.overall_pass = false;
            if let Some(reason) = &outcome.failure_reason {
                self.failure_reasons.push(reason.clone());
            }
        }
        self.requirements.push(outcome);
    }

    /// Outcomes in evaluation order.
    pub fn requirements(&self) -> &[RequirementOutcome] {
        &self.requirements
    }

    /// `true` unless some outcome failed.
    pub fn overall_pass(&self) -> bool {
        self.overall_pass
    }

    /// Failure reasons in evaluation order.
    pub fn failure_reasons(&self) -> &[String] {
        &self.failure_reasons
    }

    /// Number of failed outcomes.
    pub fn failed_count(&self) -> usize {
        self.requirements.iter().filter(|r| !r.passed).count()
    }
}
