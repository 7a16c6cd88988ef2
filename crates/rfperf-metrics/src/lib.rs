//! # rfperf-metrics: RF Metric Engine
//!
//! Pure numeric transforms from a measured [`Network`] to per-frequency
//! metric arrays. Every function takes its inputs by reference and returns
//! a fresh array or scalar; nothing is cached and nothing is mutated, so
//! calls can run concurrently across files without coordination.
//!
//! | Metric | Formula | Non-finite handling |
//! |--------|---------|---------------------|
//! | gain | `20 log10 |S_ij|` | `-inf` at zero magnitude is kept |
//! | VSWR | `(1 + |S_ii|) / (1 - |S_ii|)` | replaced by [`VSWR_SENTINEL`] |
//! | return loss | `-20 log10 |S_ii|` | replaced by [`RETURN_LOSS_SENTINEL_DB`] |
//! | gain flatness | `max - min` of gain in band | [`EmptyBandError`] if band is empty |
//!
//! [`compute_all_metrics`] runs the whole set for a device configuration
//! and returns a [`MetricSet`] ready for the compliance evaluator.
//!
//! [`Network`]: rfperf_core::Network

pub mod engine;
pub mod error;
pub mod ieee;
pub mod reduce;
pub mod set;

pub use engine::{
    compute_gain, compute_gain_flatness, compute_return_loss, compute_vswr,
    RETURN_LOSS_SENTINEL_DB, VSWR_SENTINEL,
};
pub use error::{EmptyBandError, MetricsError};
pub use set::{compute_all_metrics, MetricSet};
