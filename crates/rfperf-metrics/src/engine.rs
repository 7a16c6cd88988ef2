//! # Metric Engine
//!
//! The four RF metrics. Gain reads the selected transmission parameter
//! directly. VSWR and return loss read the reflection coefficient at the
//! selector's output port `i`, so `S21` passed to [`compute_vswr`] reads
//! `S22`. Selectors are normally checked against the device when the
//! configuration is loaded; the port check here is the last line before
//! indexing the S-matrix.

use rfperf_core::{ConfigurationError, FrequencyBand, Network, SParameterSelector};

use crate::error::{EmptyBandError, MetricsError};
use crate::reduce;

/// Stand-in VSWR at total reflection, where the ratio diverges.
pub const VSWR_SENTINEL: f64 = 1000.0;

/// Stand-in return loss in dB for a perfectly matched port.
pub const RETURN_LOSS_SENTINEL_DB: f64 = 100.0;

/// Gain in dB, `20 log10 |S_ij|`.
///
/// A zero magnitude yields `-inf` and is kept as is.
pub fn compute_gain(
    network: &Network,
    selector: SParameterSelector,
) -> Result<Vec<f64>, ConfigurationError> {
    let gain = network
        .magnitudes(selector)?
        .into_iter()
        .map(|m| 20.0 * m.log10())
        .collect();
    Ok(gain)
}

/// VSWR at port `i` of `selector`, `(1 + |Γ|) / (1 - |Γ|)` with `Γ = S_ii`.
///
/// Non-finite ratios (`|Γ| = 1`, NaN input) become [`VSWR_SENTINEL`].
/// `|Γ| > 1` gives a finite negative ratio, which is passed through.
pub fn compute_vswr(
    network: &Network,
    selector: SParameterSelector,
) -> Result<Vec<f64>, ConfigurationError> {
    let vswr = reflection_magnitudes(network, selector)?
        .into_iter()
        .map(|gamma| {
            let ratio = (1.0 + gamma) / (1.0 - gamma);
            if ratio.is_finite() {
                ratio
            } else {
                VSWR_SENTINEL
            }
        })
        .collect();
    Ok(vswr)
}

/// Return loss in dB at port `i` of `selector`, `-20 log10 |S_ii|`.
///
/// A zero reflection gives `+inf`, replaced by [`RETURN_LOSS_SENTINEL_DB`].
pub fn compute_return_loss(
    network: &Network,
    selector: SParameterSelector,
) -> Result<Vec<f64>, ConfigurationError> {
    let rl = reflection_magnitudes(network, selector)?
        .into_iter()
        .map(|gamma| {
            let db = -20.0 * gamma.log10();
            if db.is_finite() {
                db
            } else {
                RETURN_LOSS_SENTINEL_DB
            }
        })
        .collect();
    Ok(rl)
}

/// Peak-to-peak gain over the frequencies inside `band`, ends inclusive.
pub fn compute_gain_flatness(
    gain_db: &[f64],
    frequencies: &[f64],
    band: &FrequencyBand,
) -> Result<f64, MetricsError> {
    if gain_db.len() != frequencies.len() {
        return Err(MetricsError::LengthMismatch {
            metric: "gain".to_string(),
            expected: frequencies.len(),
            actual: gain_db.len(),
        });
    }
    let in_band = band.select(gain_db, frequencies);
    reduce::peak_to_peak(&in_band).ok_or_else(|| {
        EmptyBandError {
            start_hz: band.start_hz(),
            stop_hz: band.stop_hz(),
        }
        .into()
    })
}

fn reflection_magnitudes(
    network: &Network,
    selector: SParameterSelector,
) -> Result<Vec<f64>, ConfigurationError> {
    selector.validate_for_ports(network.port_count())?;
    let port = selector.output_port();
    network.magnitudes(SParameterSelector::new(port, port)?)
}
