//! # rfperf-core: Foundational Types for RF Performance Analysis
//!
//! This crate is the leaf of the rfperf workspace. It defines the value
//! types every other crate exchanges: the measured [`Network`], the
//! requirement schema evaluated against it, and the device configuration
//! that selects which S-parameters feed each metric.
//!
//! ## Key Design Principles
//!
//! 1. **Closed enums for schema vocabularies.** `MetricName`, `Aggregation`,
//!    `Operator` and `MeasurementPath` are enums with exhaustive `match`.
//!    An unknown name is a [`ConfigurationError`] at parse time, never a
//!    runtime branch in the evaluator.
//!
//! 2. **Validated constructors.** `FrequencyBand`, `SParameterSelector`,
//!    `MetricLimit`, `RequirementSet` and `Network` can only be built
//!    through constructors that enforce their invariants. Serde goes
//!    through the same constructors via `try_from`.
//!
//! 3. **`CanonicalBytes` newtype.** The requirement-set traceability hash
//!    flows through `CanonicalBytes::new()`, which reproduces the byte
//!    layout of the stored hashes exactly.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `rfperf-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod band;
pub mod canonical;
pub mod device;
pub mod digest;
pub mod error;
pub mod network;
pub mod requirement;
pub mod selector;

// Re-export primary types for ergonomic imports.
pub use band::FrequencyBand;
pub use canonical::{format_float, CanonicalBytes};
pub use device::{DeviceConfig, SParameterConfig};
pub use digest::{sha256_digest, ContentDigest};
pub use error::{CanonicalizationError, ConfigurationError, NetworkError, RfError};
pub use network::{Network, NetworkDocument, MAX_PORTS};
pub use requirement::{
    Aggregation, MeasurementPath, MetricLimit, MetricName, Operator, PassPolicy, RequirementSet,
    REQUIREMENT_HASH_LEN,
};
pub use selector::SParameterSelector;
