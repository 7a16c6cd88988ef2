//! # Device Configuration
//!
//! Describes which S-parameters of a device feed which metric, and the
//! bands over which gain flatness is reported. Selectors are checked for
//! format on parse and against the device's port count with
//! [`SParameterConfig::validate_against_port_count`] once a network is
//! known.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::band::FrequencyBand;
use crate::error::ConfigurationError;
use crate::selector::SParameterSelector;

/// S-parameter selection and reporting bands for one device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SParameterConfig {
    /// Band the device is specified over.
    pub operational_band_hz: FrequencyBand,
    /// Wider band used for out-of-band characterisation.
    pub wideband_band_hz: FrequencyBand,
    /// Transmission parameter used for gain.
    #[serde(default = "default_gain_parameter")]
    pub gain_parameter: SParameterSelector,
    /// Reflection parameter used for VSWR and input return loss.
    #[serde(default = "default_input_return_parameter")]
    pub input_return_parameter: SParameterSelector,
    /// Reflection parameter at the output port, if any.
    #[serde(default = "default_output_return_parameter")]
    pub output_return_parameter: Option<SParameterSelector>,
    /// Extra traces carried along for reporting.
    #[serde(default)]
    pub additional_traces: Vec<SParameterSelector>,
    /// Port labels, e.g. `{1: "RF IN", 2: "RF OUT"}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_labels: Option<BTreeMap<u8, String>>,
}

fn default_gain_parameter() -> SParameterSelector {
    SParameterSelector::from_ports(2, 1)
}

fn default_input_return_parameter() -> SParameterSelector {
    SParameterSelector::from_ports(1, 1)
}

fn default_output_return_parameter() -> Option<SParameterSelector> {
    Some(SParameterSelector::from_ports(2, 2))
}

impl SParameterConfig {
    /// Configuration with the default selectors (`S21`, `S11`, `S22`).
    pub fn new(operational_band_hz: FrequencyBand, wideband_band_hz: FrequencyBand) -> Self {
        Self {
            operational_band_hz,
            wideband_band_hz,
            gain_parameter: default_gain_parameter(),
            input_return_parameter: default_input_return_parameter(),
            output_return_parameter: default_output_return_parameter(),
            additional_traces: Vec::new(),
            port_labels: None,
        }
    }

    /// Every configured selector, in check order.
    pub fn selectors(&self) -> Vec<SParameterSelector> {
        let mut all = vec![self.gain_parameter, self.input_return_parameter];
        all.extend(self.output_return_parameter);
        all.extend(self.additional_traces.iter().copied());
        all
    }

    /// Fail on the first selector addressing a port beyond `port_count`.
    pub fn validate_against_port_count(&self, port_count: usize) -> Result<(), ConfigurationError> {
        self.selectors()
            .iter()
            .try_for_each(|sel| sel.validate_for_ports(port_count))
    }
}

/// Identity and test configuration of a device under test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDeviceConfig")]
pub struct DeviceConfig {
    /// Device name.
    pub name: String,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Part number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,
    /// Hardware revision.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    /// Test types this device can be run through.
    pub supported_test_types: Vec<String>,
    /// S-parameter test configuration, when the device supports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s_parameter_config: Option<SParameterConfig>,
}

#[derive(Deserialize)]
struct RawDeviceConfig {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    part_number: Option<String>,
    #[serde(default)]
    revision: Option<String>,
    #[serde(default)]
    supported_test_types: Vec<String>,
    #[serde(default)]
    s_parameter_config: Option<SParameterConfig>,
}

impl TryFrom<RawDeviceConfig> for DeviceConfig {
    type Error = ConfigurationError;

    fn try_from(raw: RawDeviceConfig) -> Result<Self, Self::Error> {
        if raw.name.is_empty() {
            return Err(ConfigurationError::EmptyName("device name"));
        }
        Ok(Self {
            name: raw.name,
            description: raw.description,
            part_number: raw.part_number,
            revision: raw.revision,
            supported_test_types: raw.supported_test_types,
            s_parameter_config: raw.s_parameter_config,
        })
    }
}
