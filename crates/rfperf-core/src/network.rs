//! # Network: Multi-Port Frequency-Domain Measurement
//!
//! A [`Network`] holds the swept frequency axis and the complex scattering
//! matrix measured at each point:
//!
//! ```text
//! frequencies: [f_0, f_1, ..., f_{N-1}]        strictly increasing, > 0 Hz
//! s[k][i][j]:  S_{(i+1)(j+1)} at frequency f_k  N x P x P, P in 1..=4
//! ```
//!
//! Networks are immutable once constructed. Touchstone decoding lives
//! outside this workspace; loaders hand over a validated value through
//! [`Network::new`] or the serde exchange form [`NetworkDocument`].

use ndarray::{Array3, ArrayView1};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, NetworkError};
use crate::requirement::MeasurementPath;
use crate::selector::SParameterSelector;

/// Largest supported port count (`.s4p`).
pub const MAX_PORTS: usize = 4;

/// Immutable N-port network sampled over frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    frequencies: Vec<f64>,
    s: Array3<Complex64>,
}

impl Network {
    /// Create a network, enforcing the shape and frequency-axis invariants.
    pub fn new(frequencies: Vec<f64>, s: Array3<Complex64>) -> Result<Self, NetworkError> {
        if frequencies.is_empty() {
            return Err(NetworkError::Empty);
        }
        let (n, rows, cols) = s.dim();
        let ports = rows;
        if !(1..=MAX_PORTS).contains(&ports) {
            return Err(NetworkError::UnsupportedPortCount(ports));
        }
        let expected = (frequencies.len(), ports, ports);
        if (n, rows, cols) != expected {
            return Err(NetworkError::ShapeMismatch {
                expected,
                actual: (n, rows, cols),
            });
        }
        validate_axis(&frequencies)?;
        Ok(Self { frequencies, s })
    }

    /// Frequency axis in Hz.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Full `N x P x P` scattering matrix.
    pub fn s_matrix(&self) -> &Array3<Complex64> {
        &self.s
    }

    /// Number of ports `P`.
    pub fn port_count(&self) -> usize {
        self.s.dim().1
    }

    /// Number of frequency points `N`.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Always false: a constructed network has at least one point.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Complex series `S_ij(f_k)` for every frequency point.
    pub fn parameter(
        &self,
        selector: SParameterSelector,
    ) -> Result<ArrayView1<'_, Complex64>, ConfigurationError> {
        selector.validate_for_ports(self.port_count())?;
        let (row, col) = selector.matrix_index();
        Ok(self.s.slice(ndarray::s![.., row, col]))
    }

    /// `|S_ij(f_k)|` for every frequency point.
    pub fn magnitudes(&self, selector: SParameterSelector) -> Result<Vec<f64>, ConfigurationError> {
        Ok(self.parameter(selector)?.iter().map(|c| c.norm()).collect())
    }
}

fn validate_axis(frequencies: &[f64]) -> Result<(), NetworkError> {
    for (index, &value) in frequencies.iter().enumerate() {
        if !value.is_finite() || value <= 0.0 {
            return Err(NetworkError::InvalidFrequency { index, value });
        }
        if index > 0 && value <= frequencies[index - 1] {
            return Err(NetworkError::NotIncreasing { index, value });
        }
    }
    Ok(())
}

/// Serde exchange form of a measured network.
///
/// Complex entries are `[re, im]` pairs; `s[k][i][j]` follows the same
/// indexing as [`Network::s_matrix`]. `path` tags the RF path the file was
/// measured on, when known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkDocument {
    /// Frequency axis in Hz.
    pub frequencies: Vec<f64>,
    /// Scattering matrix as nested `[re, im]` pairs.
    pub s: Vec<Vec<Vec<[f64; 2]>>>,
    /// RF path tag, if the measurement belongs to a redundant path pair.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<MeasurementPath>,
}

impl NetworkDocument {
    /// Capture a network in exchange form.
    pub fn from_network(network: &Network, path: Option<MeasurementPath>) -> Self {
        let s = network
            .s
            .outer_iter()
            .map(|matrix| {
                matrix
                    .outer_iter()
                    .map(|row| row.iter().map(|c| [c.re, c.im]).collect())
                    .collect()
            })
            .collect();
        Self {
            frequencies: network.frequencies.clone(),
            s,
            path,
        }
    }

    /// Validate and convert into a [`Network`].
    pub fn to_network(&self) -> Result<Network, NetworkError> {
        let n = self.s.len();
        let ports = self.s.first().map_or(0, Vec::len);
        if n == 0 || self.frequencies.is_empty() {
            return Err(NetworkError::Empty);
        }
        if !(1..=MAX_PORTS).contains(&ports) {
            return Err(NetworkError::UnsupportedPortCount(ports));
        }
        let expected = (self.frequencies.len(), ports, ports);
        let mut flat = Vec::with_capacity(n * ports * ports);
        for matrix in &self.s {
            if matrix.len() != ports {
                return Err(NetworkError::ShapeMismatch {
                    expected,
                    actual: (n, matrix.len(), ports),
                });
            }
            for row in matrix {
                if row.len() != ports {
                    return Err(NetworkError::ShapeMismatch {
                        expected,
                        actual: (n, ports, row.len()),
                    });
                }
                flat.extend(row.iter().map(|[re, im]| Complex64::new(*re, *im)));
            }
        }
        let s = Array3::from_shape_vec((n, ports, ports), flat).map_err(|_| {
            NetworkError::ShapeMismatch {
                expected,
                actual: (n, ports, ports),
            }
        })?;
        Network::new(self.frequencies.clone(), s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_port(freqs: Vec<f64>) -> Network {
        let n = freqs.len();
        let mut s = Array3::from_elem((n, 2, 2), Complex64::new(0.0, 0.0));
        for k in 0..n {
            s[[k, 1, 0]] = Complex64::new(0.5, 0.0);
            s[[k, 0, 0]] = Complex64::new(0.0, 0.1 * (k + 1) as f64);
        }
        Network::new(freqs, s).unwrap()
    }

    #[test]
    fn parameter_extracts_selected_entry() {
        let net = two_port(vec![1e9, 2e9, 3e9]);
        assert_eq!(net.port_count(), 2);
        assert_eq!(net.len(), 3);
        let s21 = net.parameter("S21".parse().unwrap()).unwrap();
        assert_eq!(s21.len(), 3);
        assert!(s21.iter().all(|c| *c == Complex64::new(0.5, 0.0)));
        let mags = net.magnitudes("S11".parse().unwrap()).unwrap();
        assert!((mags[2] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn parameter_rejects_port_beyond_count() {
        let net = two_port(vec![1e9]);
        let err = net.parameter("S31".parse().unwrap()).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::PortOutOfRange {
                port: 3,
                port_count: 2
            }
        );
    }

    #[test]
    fn rejects_empty_axis() {
        let s = Array3::from_elem((0, 2, 2), Complex64::new(0.0, 0.0));
        assert_eq!(Network::new(vec![], s), Err(NetworkError::Empty));
    }

    #[test]
    fn rejects_five_ports() {
        let s = Array3::from_elem((1, 5, 5), Complex64::new(0.0, 0.0));
        assert_eq!(
            Network::new(vec![1e9], s),
            Err(NetworkError::UnsupportedPortCount(5))
        );
    }

    #[test]
    fn rejects_shape_mismatch() {
        let s = Array3::from_elem((2, 2, 2), Complex64::new(0.0, 0.0));
        assert!(matches!(
            Network::new(vec![1e9, 2e9, 3e9], s),
            Err(NetworkError::ShapeMismatch { .. })
        ));
        let s = Array3::from_elem((1, 2, 3), Complex64::new(0.0, 0.0));
        assert!(matches!(
            Network::new(vec![1e9], s),
            Err(NetworkError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn rejects_non_increasing_axis() {
        let s = Array3::from_elem((3, 1, 1), Complex64::new(0.0, 0.0));
        assert_eq!(
            Network::new(vec![1e9, 1e9, 2e9], s),
            Err(NetworkError::NotIncreasing {
                index: 1,
                value: 1e9
            })
        );
    }

    #[test]
    fn rejects_non_positive_frequency() {
        let s = Array3::from_elem((2, 1, 1), Complex64::new(0.0, 0.0));
        assert_eq!(
            Network::new(vec![0.0, 1e9], s),
            Err(NetworkError::InvalidFrequency {
                index: 0,
                value: 0.0
            })
        );
    }

    #[test]
    fn document_converts_both_ways() {
        let net = two_port(vec![1e9, 2e9]);
        let doc = NetworkDocument::from_network(&net, Some(MeasurementPath::Pri));
        assert_eq!(doc.s.len(), 2);
        assert_eq!(doc.s[0][1][0], [0.5, 0.0]);
        assert_eq!(doc.to_network().unwrap(), net);
    }

    #[test]
    fn document_rejects_ragged_matrix() {
        let doc = NetworkDocument {
            frequencies: vec![1e9],
            s: vec![vec![vec![[0.0, 0.0], [0.0, 0.0]], vec![[0.0, 0.0]]]],
            path: None,
        };
        assert!(matches!(
            doc.to_network(),
            Err(NetworkError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn document_parses_from_json() {
        let json = r#"{
            "frequencies": [1e9, 2e9],
            "s": [[[[0.1, 0.0]]], [[[0.2, 0.0]]]],
            "path": "RED"
        }"#;
        let doc: NetworkDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.path, Some(MeasurementPath::Red));
        let net = doc.to_network().unwrap();
        assert_eq!(net.port_count(), 1);
    }
}
