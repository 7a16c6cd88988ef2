//! # Requirement Schema
//!
//! A [`RequirementSet`] is an ordered list of [`MetricLimit`] rules plus a
//! [`PassPolicy`]. Each rule binds one metric, a reducer over a frequency
//! band, a comparison operator and a limit:
//!
//! ```text
//! gain  min  >=  -10.0  over [1 GHz, 2 GHz]
//! vswr  max  <=    2.0  over [1 GHz, 2 GHz]
//! ```
//!
//! All vocabularies are closed enums. Parsing an unknown metric name,
//! aggregation, operator or path fails with a [`ConfigurationError`], so
//! the evaluator only ever sees well-formed rules.
//!
//! ## Traceability
//!
//! [`RequirementSet::compute_hash`] produces the 16-hex-character digest
//! stored with every test run. Its input layout is fixed: see
//! [`crate::canonical`] for the byte format and [`HashPayload`] for the
//! fields covered. Descriptions are deliberately outside the hash.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::band::FrequencyBand;
use crate::canonical::CanonicalBytes;
use crate::digest::sha256_digest;
use crate::error::{CanonicalizationError, ConfigurationError};

/// Number of hex characters kept from the SHA-256 requirement digest.
pub const REQUIREMENT_HASH_LEN: usize = 16;

// ---------------------------------------------------------------------------
// Vocabularies
// ---------------------------------------------------------------------------

/// Metric a limit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MetricName {
    /// Transmission magnitude in dB.
    Gain,
    /// Voltage standing wave ratio.
    Vswr,
    /// Reflected power loss in dB.
    ReturnLoss,
    /// Peak-to-peak gain variation in dB.
    GainFlatness,
}

impl MetricName {
    /// All metric names in schema order.
    pub fn all() -> &'static [MetricName] {
        &[
            Self::Gain,
            Self::Vswr,
            Self::ReturnLoss,
            Self::GainFlatness,
        ]
    }

    /// The snake_case identifier used in requirement documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gain => "gain",
            Self::Vswr => "vswr",
            Self::ReturnLoss => "return_loss",
            Self::GainFlatness => "gain_flatness",
        }
    }
}

impl FromStr for MetricName {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gain" => Ok(Self::Gain),
            "vswr" => Ok(Self::Vswr),
            "return_loss" => Ok(Self::ReturnLoss),
            "gain_flatness" => Ok(Self::GainFlatness),
            other => Err(ConfigurationError::UnknownMetric(other.to_string())),
        }
    }
}

/// Reducer applied to the in-band samples of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Aggregation {
    /// Smallest sample.
    Min,
    /// Largest sample.
    Max,
    /// Arithmetic mean.
    Avg,
    /// Largest minus smallest sample.
    Pkpk,
}

impl Aggregation {
    /// All aggregations in schema order.
    pub fn all() -> &'static [Aggregation] {
        &[Self::Min, Self::Max, Self::Avg, Self::Pkpk]
    }

    /// The identifier used in requirement documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Max => "max",
            Self::Avg => "avg",
            Self::Pkpk => "pkpk",
        }
    }
}

impl FromStr for Aggregation {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "avg" => Ok(Self::Avg),
            "pkpk" => Ok(Self::Pkpk),
            other => Err(ConfigurationError::UnknownAggregation(other.to_string())),
        }
    }
}

/// Relational operator comparing an aggregated value with a limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Operator {
    /// `value <= limit`
    LessEqual,
    /// `value >= limit`
    GreaterEqual,
    /// `value < limit`
    Less,
    /// `value > limit`
    Greater,
}

impl Operator {
    /// All operators in schema order.
    pub fn all() -> &'static [Operator] {
        &[
            Self::LessEqual,
            Self::GreaterEqual,
            Self::Less,
            Self::Greater,
        ]
    }

    /// The symbol used in requirement documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
        }
    }
}

impl FromStr for Operator {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<=" => Ok(Self::LessEqual),
            ">=" => Ok(Self::GreaterEqual),
            "<" => Ok(Self::Less),
            ">" => Ok(Self::Greater),
            other => Err(ConfigurationError::UnknownOperator(other.to_string())),
        }
    }
}

/// RF path a measurement file belongs to on redundant hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MeasurementPath {
    /// Primary path.
    Pri,
    /// Redundant path.
    Red,
}

impl MeasurementPath {
    /// Upper-case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pri => "PRI",
            Self::Red => "RED",
        }
    }
}

impl FromStr for MeasurementPath {
    type Err = ConfigurationError;

    /// Case-insensitive: `pri`, `Pri` and `PRI` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PRI" => Ok(Self::Pri),
            "RED" => Ok(Self::Red),
            _ => Err(ConfigurationError::UnknownPath(s.to_string())),
        }
    }
}

macro_rules! string_serde {
    ($($ty:ty),+ $(,)?) => {$(
        impl TryFrom<String> for $ty {
            type Error = ConfigurationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.as_str().to_string()
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    )+};
}

string_serde!(MetricName, Aggregation, Operator, MeasurementPath);

// ---------------------------------------------------------------------------
// MetricLimit
// ---------------------------------------------------------------------------

/// One pass/fail rule. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMetricLimit")]
pub struct MetricLimit {
    metric_name: MetricName,
    aggregation: Aggregation,
    operator: Operator,
    limit_value: f64,
    frequency_band: FrequencyBand,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

#[derive(Deserialize)]
struct RawMetricLimit {
    metric_name: MetricName,
    aggregation: Aggregation,
    operator: Operator,
    limit_value: f64,
    frequency_band: FrequencyBand,
    #[serde(default)]
    description: Option<String>,
}

impl TryFrom<RawMetricLimit> for MetricLimit {
    type Error = ConfigurationError;

    fn try_from(raw: RawMetricLimit) -> Result<Self, Self::Error> {
        let limit = Self::new(
            raw.metric_name,
            raw.aggregation,
            raw.operator,
            raw.limit_value,
            raw.frequency_band,
        )?;
        Ok(match raw.description {
            Some(text) => limit.with_description(text),
            None => limit,
        })
    }
}

impl MetricLimit {
    /// Create a rule without a description. `limit_value` must be finite.
    pub fn new(
        metric_name: MetricName,
        aggregation: Aggregation,
        operator: Operator,
        limit_value: f64,
        frequency_band: FrequencyBand,
    ) -> Result<Self, ConfigurationError> {
        if !limit_value.is_finite() {
            return Err(ConfigurationError::NonFiniteValue {
                field: "limit_value",
                value: limit_value,
            });
        }
        Ok(Self {
            metric_name,
            aggregation,
            operator,
            limit_value,
            frequency_band,
            description: None,
        })
    }

    /// Attach a human-readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Metric the rule applies to.
    pub fn metric_name(&self) -> MetricName {
        self.metric_name
    }

    /// Reducer over the in-band samples.
    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    /// Comparison operator.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Limit the aggregated value is compared against.
    pub fn limit_value(&self) -> f64 {
        self.limit_value
    }

    /// Band the metric is sliced to.
    pub fn frequency_band(&self) -> FrequencyBand {
        self.frequency_band
    }

    /// Optional description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Name reported in outcomes: the description when present and
    /// non-empty, otherwise the metric name.
    pub fn requirement_name(&self) -> &str {
        match self.description.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => self.metric_name.as_str(),
        }
    }
}

// ---------------------------------------------------------------------------
// PassPolicy
// ---------------------------------------------------------------------------

/// Multi-file aggregation policy for a test run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassPolicy {
    /// When true every file must pass; otherwise one passing file suffices.
    #[serde(default = "default_all_files_must_pass")]
    pub all_files_must_pass: bool,
    /// Paths that must be covered by at least one passing file.
    #[serde(default)]
    pub required_paths: Vec<MeasurementPath>,
}

fn default_all_files_must_pass() -> bool {
    true
}

impl Default for PassPolicy {
    fn default() -> Self {
        Self {
            all_files_must_pass: true,
            required_paths: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// RequirementSet
// ---------------------------------------------------------------------------

/// Named, ordered collection of rules for one test type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRequirementSet")]
pub struct RequirementSet {
    name: String,
    test_type: String,
    metric_limits: Vec<MetricLimit>,
    pass_policy: PassPolicy,
}

#[derive(Deserialize)]
struct RawRequirementSet {
    name: String,
    test_type: String,
    #[serde(default)]
    metric_limits: Vec<MetricLimit>,
    #[serde(default)]
    pass_policy: PassPolicy,
}

impl TryFrom<RawRequirementSet> for RequirementSet {
    type Error = ConfigurationError;

    fn try_from(raw: RawRequirementSet) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.test_type, raw.metric_limits, raw.pass_policy)
    }
}

/// Fields covered by the traceability hash, in the exact stored layout.
#[derive(Serialize)]
struct HashPayload<'a> {
    name: &'a str,
    test_type: &'a str,
    metric_limits: Vec<HashedLimit>,
    pass_policy: &'a PassPolicy,
}

#[derive(Serialize)]
struct HashedLimit {
    metric_name: MetricName,
    aggregation: Aggregation,
    operator: Operator,
    limit_value: f64,
    frequency_band: HashedBand,
}

#[derive(Serialize)]
struct HashedBand {
    start_hz: f64,
    stop_hz: f64,
}

impl RequirementSet {
    /// Create a requirement set. `name` must be non-empty.
    pub fn new(
        name: impl Into<String>,
        test_type: impl Into<String>,
        metric_limits: Vec<MetricLimit>,
        pass_policy: PassPolicy,
    ) -> Result<Self, ConfigurationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConfigurationError::EmptyName("requirement set name"));
        }
        Ok(Self {
            name,
            test_type: test_type.into(),
            metric_limits,
            pass_policy,
        })
    }

    /// Requirement set name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Test type, e.g. `s_parameter`.
    pub fn test_type(&self) -> &str {
        &self.test_type
    }

    /// Rules in evaluation order.
    pub fn metric_limits(&self) -> &[MetricLimit] {
        &self.metric_limits
    }

    /// Multi-file pass policy.
    pub fn pass_policy(&self) -> &PassPolicy {
        &self.pass_policy
    }

    /// Traceability hash: first 16 hex characters of SHA-256 over the
    /// canonical bytes of name, test type, rules and pass policy.
    pub fn compute_hash(&self) -> Result<String, CanonicalizationError> {
        let payload = HashPayload {
            name: &self.name,
            test_type: &self.test_type,
            metric_limits: self
                .metric_limits
                .iter()
                .map(|m| HashedLimit {
                    metric_name: m.metric_name,
                    aggregation: m.aggregation,
                    operator: m.operator,
                    limit_value: m.limit_value,
                    frequency_band: HashedBand {
                        start_hz: m.frequency_band.start_hz(),
                        stop_hz: m.frequency_band.stop_hz(),
                    },
                })
                .collect(),
            pass_policy: &self.pass_policy,
        };
        let canonical = CanonicalBytes::new(&payload)?;
        Ok(sha256_digest(&canonical).truncated_hex(REQUIREMENT_HASH_LEN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band() -> FrequencyBand {
        FrequencyBand::new(1e9, 2e9).unwrap()
    }

    fn gain_limit(limit: f64) -> MetricLimit {
        MetricLimit::new(
            MetricName::Gain,
            Aggregation::Min,
            Operator::GreaterEqual,
            limit,
            band(),
        )
        .unwrap()
    }

    #[test]
    fn vocabularies_round_trip_through_strings() {
        for m in MetricName::all() {
            assert_eq!(m.as_str().parse::<MetricName>().unwrap(), *m);
        }
        for a in Aggregation::all() {
            assert_eq!(a.as_str().parse::<Aggregation>().unwrap(), *a);
        }
        for o in Operator::all() {
            assert_eq!(o.as_str().parse::<Operator>().unwrap(), *o);
        }
    }

    #[test]
    fn unknown_vocabulary_is_configuration_error() {
        assert_eq!(
            "noise_figure".parse::<MetricName>(),
            Err(ConfigurationError::UnknownMetric("noise_figure".into()))
        );
        assert_eq!(
            "median".parse::<Aggregation>(),
            Err(ConfigurationError::UnknownAggregation("median".into()))
        );
        assert_eq!(
            "==".parse::<Operator>(),
            Err(ConfigurationError::UnknownOperator("==".into()))
        );
        assert!("Gain".parse::<MetricName>().is_err());
    }

    #[test]
    fn measurement_path_is_case_insensitive() {
        assert_eq!("pri".parse::<MeasurementPath>().unwrap(), MeasurementPath::Pri);
        assert_eq!("Red".parse::<MeasurementPath>().unwrap(), MeasurementPath::Red);
        assert!("SEC".parse::<MeasurementPath>().is_err());
        assert_eq!(MeasurementPath::Pri.to_string(), "PRI");
    }

    #[test]
    fn requirement_name_falls_back_to_metric() {
        assert_eq!(gain_limit(-10.0).requirement_name(), "gain");
        assert_eq!(
            gain_limit(-10.0).with_description("").requirement_name(),
            "gain"
        );
        assert_eq!(
            gain_limit(-10.0)
                .with_description("Minimum gain")
                .requirement_name(),
            "Minimum gain"
        );
    }

    #[test]
    fn limit_value_must_be_finite() {
        let err = MetricLimit::new(
            MetricName::Vswr,
            Aggregation::Max,
            Operator::LessEqual,
            f64::NAN,
            band(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::NonFiniteValue {
                field: "limit_value",
                ..
            }
        ));
    }

    #[test]
    fn requirement_set_name_must_not_be_empty() {
        assert_eq!(
            RequirementSet::new("", "s_parameter", vec![], PassPolicy::default()),
            Err(ConfigurationError::EmptyName("requirement set name"))
        );
    }

    #[test]
    fn deserializes_with_defaults() {
        let json = r#"{
            "name": "LNA acceptance",
            "test_type": "s_parameter",
            "metric_limits": [{
                "metric_name": "gain",
                "aggregation": "min",
                "operator": ">=",
                "limit_value": -10.0,
                "frequency_band": {"start_hz": 1e9, "stop_hz": 2e9},
                "description": "Minimum gain"
            }]
        }"#;
        let set: RequirementSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.metric_limits().len(), 1);
        assert_eq!(set.pass_policy(), &PassPolicy::default());
        assert_eq!(set.metric_limits()[0].requirement_name(), "Minimum gain");
    }

    #[test]
    fn deserialize_rejects_unknown_operator() {
        let json = r#"{
            "metric_name": "gain",
            "aggregation": "min",
            "operator": "=>",
            "limit_value": -10.0,
            "frequency_band": {"start_hz": 1e9, "stop_hz": 2e9}
        }"#;
        let err = serde_json::from_str::<MetricLimit>(json).unwrap_err();
        assert!(err.to_string().contains("unknown operator"));
    }

    #[test]
    fn deserialize_normalizes_required_paths() {
        let policy: PassPolicy =
            serde_json::from_str(r#"{"required_paths": ["pri", "Red"]}"#).unwrap();
        assert!(policy.all_files_must_pass);
        assert_eq!(
            policy.required_paths,
            vec![MeasurementPath::Pri, MeasurementPath::Red]
        );
        assert_eq!(
            serde_json::to_string(&policy).unwrap(),
            r#"{"all_files_must_pass":true,"required_paths":["PRI","RED"]}"#
        );
    }

    #[test]
    fn hash_matches_stored_vectors() {
        let set = RequirementSet::new(
            "Test",
            "s_parameter",
            vec![gain_limit(-10.0)],
            PassPolicy::default(),
        )
        .unwrap();
        assert_eq!(set.compute_hash().unwrap(), "2a8ff9299a8f9fcc");

        let changed = RequirementSet::new(
            "Test",
            "s_parameter",
            vec![gain_limit(-5.0)],
            PassPolicy::default(),
        )
        .unwrap();
        assert_eq!(changed.compute_hash().unwrap(), "3833a78d2730e882");

        let empty =
            RequirementSet::new("Test", "s_parameter", vec![], PassPolicy::default()).unwrap();
        assert_eq!(empty.compute_hash().unwrap(), "d132f0bbd905ee55");
    }

    #[test]
    fn hash_ignores_descriptions() {
        let plain = RequirementSet::new(
            "Test",
            "s_parameter",
            vec![gain_limit(-10.0)],
            PassPolicy::default(),
        )
        .unwrap();
        let described = RequirementSet::new(
            "Test",
            "s_parameter",
            vec![gain_limit(-10.0).with_description("Minimum gain")],
            PassPolicy::default(),
        )
        .unwrap();
        assert_eq!(plain.compute_hash().unwrap(), described.compute_hash().unwrap());
    }

    #[test]
    fn hash_depends_on_rule_order() {
        let vswr = MetricLimit::new(
            MetricName::Vswr,
            Aggregation::Max,
            Operator::LessEqual,
            2.0,
            band(),
        )
        .unwrap();
        let a = RequirementSet::new(
            "Test",
            "s_parameter",
            vec![gain_limit(-10.0), vswr.clone()],
            PassPolicy::default(),
        )
        .unwrap();
        let b = RequirementSet::new(
            "Test",
            "s_parameter",
            vec![vswr, gain_limit(-10.0)],
            PassPolicy::default(),
        )
        .unwrap();
        assert_ne!(a.compute_hash().unwrap(), b.compute_hash().unwrap());
    }
}
