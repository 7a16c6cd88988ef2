//! # S-Parameter Selector
//!
//! Parses and validates `Sij` tokens such as `S21` or `S11`. `i` is the
//! output (receiving) port and `j` the input (driven) port, both 1-based
//! single digits. Port-count checks happen when a selector is bound to a
//! concrete device or network, not at parse time.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// A validated `Sij` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SParameterSelector {
    output: u8,
    input: u8,
}

impl SParameterSelector {
    /// Build a selector from 1-based port numbers in 1..=9.
    pub fn new(output: u8, input: u8) -> Result<Self, ConfigurationError> {
        if !(1..=9).contains(&output) || !(1..=9).contains(&input) {
            return Err(ConfigurationError::InvalidSelector(format!(
                "S{output}{input}"
            )));
        }
        Ok(Self { output, input })
    }

    /// Selector from ports already known to be in 1..=9.
    pub(crate) const fn from_ports(output: u8, input: u8) -> Self {
        Self { output, input }
    }

    /// The `i` in `Sij` (1-based).
    pub fn output_port(&self) -> u8 {
        self.output
    }

    /// Zero-based `(row, column)` into an S-matrix.
    pub fn matrix_index(&self) -> (usize, usize) {
        (usize::from(self.output) - 1, usize::from(self.input) - 1)
    }

    /// Reject ports beyond `port_count`, checking `i` before `j`.
    pub fn validate_for_ports(&self, port_count: usize) -> Result<(), ConfigurationError> {
        for port in [self.output, self.input] {
            if usize::from(port) > port_count {
                return Err(ConfigurationError::PortOutOfRange { port, port_count });
            }
        }
        Ok(())
    }
}

impl FromStr for SParameterSelector {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigurationError::InvalidSelector(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 3 || bytes[0] != b'S' {
            return Err(invalid());
        }
        let digit = |b: u8| {
            if b.is_ascii_digit() {
                Some(b - b'0')
            } else {
                None
            }
        };
        match (digit(bytes[1]), digit(bytes[2])) {
            (Some(i), Some(j)) => Self::new(i, j).map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for SParameterSelector {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SParameterSelector> for String {
    fn from(sel: SParameterSelector) -> Self {
        sel.to_string()
    }
}

impl std::fmt::Display for SParameterSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "S{}{}", self.output, self.input)
    }
}
