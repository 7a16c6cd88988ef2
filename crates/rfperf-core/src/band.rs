//! # Frequency Band
//!
//! A closed interval `[start_hz, stop_hz]` on the frequency axis. Bands
//! scope both gain-flatness computation and requirement evaluation, and
//! both ends are inclusive: a sweep point exactly on `start_hz` or
//! `stop_hz` belongs to the band.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Closed frequency interval with `0 < start_hz < stop_hz`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFrequencyBand")]
pub struct FrequencyBand {
    start_hz: f64,
    stop_hz: f64,
}

/// Unvalidated wire form of [`FrequencyBand`].
#[derive(Deserialize)]
struct RawFrequencyBand {
    start_hz: f64,
    stop_hz: f64,
}

impl TryFrom<RawFrequencyBand> for FrequencyBand {
    type Error = ConfigurationError;

    fn try_from(raw: RawFrequencyBand) -> Result<Self, Self::Error> {
        Self::new(raw.start_hz, raw.stop_hz)
    }
}

impl FrequencyBand {
    /// Create a band, rejecting non-finite, non-positive or inverted bounds.
    pub fn new(start_hz: f64, stop_hz: f64) -> Result<Self, ConfigurationError> {
        let invalid = |reason| ConfigurationError::InvalidBand {
            start_hz,
            stop_hz,
            reason,
        };
        if !start_hz.is_finite() || !stop_hz.is_finite() {
            return Err(invalid("bounds must be finite"));
        }
        if start_hz <= 0.0 {
            return Err(invalid("start_hz must be greater than 0"));
        }
        if stop_hz <= start_hz {
            return Err(invalid("stop_hz must be greater than start_hz"));
        }
        Ok(Self { start_hz, stop_hz })
    }

    /// Lower bound in Hz (inclusive).
    pub fn start_hz(&self) -> f64 {
        self.start_hz
    }

    /// Upper bound in Hz (inclusive).
    pub fn stop_hz(&self) -> f64 {
        self.stop_hz
    }

    /// Whether `frequency_hz` lies inside the band, ends included.
    pub fn contains(&self, frequency_hz: f64) -> bool {
        frequency_hz >= self.start_hz && frequency_hz <= self.stop_hz
    }

    /// Values paired with in-band frequencies, in axis order.
    ///
    /// `values` and `frequencies` are zipped; a length difference truncates
    /// to the shorter of the two, so callers check lengths first.
    pub fn select(&self, values: &[f64], frequencies: &[f64]) -> Vec<f64> {
        values
            .iter()
            .zip(frequencies)
            .filter(|(_, f)| self.contains(**f))
            .map(|(v, _)| *v)
            .collect()
    }
}

impl std::fmt::Display for FrequencyBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} Hz, {} Hz]", self.start_hz, self.stop_hz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_is_inclusive_on_both_ends() {
        let band = FrequencyBand::new(1e9, 2e9).unwrap();
        assert!(band.contains(1e9));
        assert!(band.contains(2e9));
        assert!(band.contains(1.5e9));
        assert!(!band.contains(0.999_999_999e9));
        assert!(!band.contains(2.000_000_001e9));
    }

    #[test]
    fn select_keeps_axis_order() {
        let band = FrequencyBand::new(1e9, 2e9).unwrap();
        let freqs = [0.5e9, 1e9, 1.5e9, 2e9, 2.5e9];
        assert_eq!(
            band.select(&[10.0, 11.0, 12.0, 13.0, 14.0], &freqs),
            vec![11.0, 12.0, 13.0]
        );
    }

    #[test]
    fn rejects_stop_not_above_start() {
        assert!(FrequencyBand::new(2e9, 1e9).is_err());
        assert!(FrequencyBand::new(1e9, 1e9).is_err());
    }

    #[test]
    fn rejects_non_positive_start() {
        assert!(FrequencyBand::new(0.0, 1e9).is_err());
        assert!(FrequencyBand::new(-1.0, 1e9).is_err());
    }

    #[test]
    fn rejects_non_finite_bounds() {
        assert!(FrequencyBand::new(f64::NAN, 1e9).is_err());
        assert!(FrequencyBand::new(1e9, f64::INFINITY).is_err());
    }

    #[test]
    fn deserialize_validates() {
        let ok: FrequencyBand =
            serde_json::from_str(r#"{"start_hz": 1e9, "stop_hz": 2e9}"#).unwrap();
        assert_eq!(ok.start_hz(), 1e9);
        assert_eq!(ok.stop_hz(), 2e9);

        let err = serde_json::from_str::<FrequencyBand>(r#"{"start_hz": 2e9, "stop_hz": 1e9}"#)
            .unwrap_err();
        assert!(err.to_string().contains("stop_hz must be greater than start_hz"));
    }

    #[test]
    fn serializes_field_names() {
        let band = FrequencyBand::new(1e9, 2e9).unwrap();
        let v = serde_json::to_value(band).unwrap();
        assert_eq!(v["start_hz"], 1e9);
        assert_eq!(v["stop_hz"], 2e9);
    }
}
