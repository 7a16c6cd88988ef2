//! # Compliance Evaluator
//!
//! Walks a requirement set's metric limits in order and produces exactly
//! one [`RequirementOutcome`] for each. For every limit:
//!
//! 1. Look up the metric series. A missing series is a failed outcome
//!    (`Metric '<name>' not found in computed metrics`).
//! 2. Keep the samples whose frequency lies in the limit's band, both
//!    ends included. No samples is a failed outcome
//!    (`No frequency points in band <start>-<stop> Hz`).
//! 3. Reduce the kept samples with the limit's aggregation and compare
//!    against the limit value with its operator.
//!
//! Every limit is evaluated even after an earlier one fails. The only
//! error returned is a series whose length differs from the frequency
//! axis, which means the caller paired the wrong arrays.

use rfperf_core::{format_float, Aggregation, MetricLimit, Operator, RequirementSet};
use rfperf_metrics::{reduce, MetricSet};

use crate::error::ComplianceError;
use crate::result::{ComplianceResult, RequirementOutcome};

/// Reduce `values` with `aggregation`, or `None` if `values` is empty.
///
/// A NaN sample makes every aggregation NaN.
pub fn aggregate(values: &[f64], aggregation: Aggregation) -> Option<f64> {
    match aggregation {
        Aggregation::Min => reduce::min(values),
        Aggregation::Max => reduce::max(values),
        Aggregation::Avg => reduce::mean(values),
        Aggregation::Pkpk => reduce::peak_to_peak(values),
    }
}

/// `value <op> limit`. Any comparison involving NaN is `false`.
pub fn compare(value: f64, limit: f64, operator: Operator) -> bool {
    match operator {
        Operator::LessEqual => value <= limit,
        Operator::GreaterEqual => value >= limit,
        Operator::Less => value < limit,
        Operator::Greater => value > limit,
    }
}

/// Evaluate `metrics` over `frequencies` against every limit in `requirements`.
pub fn evaluate_compliance(
    metrics: &MetricSet,
    frequencies: &[f64],
    requirements: &RequirementSet,
) -> Result<ComplianceResult, ComplianceError> {
    let mut result = ComplianceResult::new();
    for limit in requirements.metric_limits() {
        let outcome = evaluate_limit(metrics, frequencies, limit)?;
        tracing::debug!(
            requirement = %outcome.requirement_name,
            computed = outcome.computed_value,
            limit = outcome.limit_value,
            passed = outcome.passed,
            "evaluated requirement"
        );
        result.add_requirement_result(outcome);
    }
    Ok(result)
}

/// [`evaluate_compliance`] over the set's own frequency axis.
pub fn evaluate_metric_set(
    metrics: &MetricSet,
    requirements: &RequirementSet,
) -> Result<ComplianceResult, ComplianceError> {
    evaluate_compliance(metrics, metrics.frequencies(), requirements)
}

fn evaluate_limit(
    metrics: &MetricSet,
    frequencies: &[f64],
    limit: &MetricLimit,
) -> Result<RequirementOutcome, ComplianceError> {
    let name = limit.requirement_name();
    let metric = limit.metric_name();

    let Some(series) = metrics.get(metric) else {
        tracing::warn!(metric = metric.as_str(), "metric missing from computed set");
        return Ok(RequirementOutcome::fail(
            name,
            limit.limit_value(),
            0.0,
            format!("Metric '{metric}' not found in computed metrics"),
        ));
    };
    if series.len() != frequencies.len() {
        return Err(ComplianceError::LengthMismatch {
            metric: metric.to_string(),
            expected: frequencies.len(),
            actual: series.len(),
        });
    }

    let band = limit.frequency_band();
    let in_band = band.select(series, frequencies);
    let Some(value) = aggregate(&in_band, limit.aggregation()) else {
        tracing::warn!(metric = metric.as_str(), band = %band, "no frequency points in band");
        return Ok(RequirementOutcome::fail(
            name,
            limit.limit_value(),
            0.0,
            format!(
                "No frequency points in band {}-{} Hz",
                format_float(band.start_hz()),
                format_float(band.stop_hz())
            ),
        ));
    };

    if compare(value, limit.limit_value(), limit.operator()) {
        return Ok(RequirementOutcome::pass(name, limit.limit_value(), value));
    }
    let reason = format!(
        "{} {} = {} {} {} (limit)",
        metric,
        limit.aggregation(),
        fixed3(value),
        limit.operator(),
        format_float(limit.limit_value())
    );
    Ok(RequirementOutcome::fail(name, limit.limit_value(), value, reason))
}

/// Three-decimal rendering with lower-case `nan`.
fn fixed3(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{value:.3}")
    }
}
