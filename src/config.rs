//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the
//! tide-gauge.toml file. It provides a centralized home for the LoRaWAN
//! device credentials, the two site calibration constants, and the sampling
//! cadence, so nothing in the measurement core reaches for ambient globals.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Application configuration loaded from tide-gauge.toml
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// LoRaWAN device identity configuration
    pub device: DeviceConfig,
    /// Site calibration constants
    pub calibration: CalibrationConfig,
    /// Sampling cadence configuration
    pub sampling: SamplingConfig,
}

/// LoRaWAN OTAA device identity.
///
/// Credentials are carried as plain hex strings (no separators) exactly as
/// issued by the network console; the core never parses their textual form.
/// The radio stack consumes them as-is during the join procedure, which is
/// outside this crate.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeviceConfig {
    /// Device EUI, 16 hex characters
    pub dev_eui: String,
    /// Application/join EUI, 16 hex characters
    pub app_eui: String,
    /// Application key, 32 hex characters
    pub app_key: String,
    /// US915 sub-band the gateway listens on (typically 2)
    pub us915_subband: u8,
}

/// Site calibration constants.
///
/// `tide_height_m = geometry_reference_m - measured_distance_m - datum_offset_m`
///
/// Both constants are optional: a freshly provisioned device ships with
/// neither set, and the calibration engine refuses to derive heights until
/// the site survey fills them in (see
/// [`crate::calibration::compute_tide_height_from_config`]).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct CalibrationConfig {
    /// Elevation of the sensor mount above the site datum, in meters
    pub geometry_reference_m: Option<f32>,
    /// Residual site correction determined against a known tide, in meters
    pub datum_offset_m: Option<f32>,
}

/// Sampling cadence configuration
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct SamplingConfig {
    /// Seconds between measurement cycles
    pub interval_s: i64,
}

/// Device credential validation failure.
///
/// Raised before provisioning hands credentials to the radio stack; an empty
/// field here would otherwise only surface as a failed join hours later in
/// the field.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CredentialsError {
    /// A required credential string is empty or whitespace
    #[error("missing device credential: {0}")]
    Missing(&'static str),
}

impl Default for Config {
    fn default() -> Self {
        Config {
            device: DeviceConfig {
                // Placeholder EUIs; provisioning replaces these before join
                dev_eui: "0000000000000000".to_string(),
                app_eui: "0000000000000000".to_string(),
                app_key: "00000000000000000000000000000000".to_string(),
                us915_subband: 2,
            },
            calibration: CalibrationConfig {
                geometry_reference_m: None,
                datum_offset_m: None,
            },
            sampling: SamplingConfig { interval_s: 60 },
        }
    }
}

impl Config {
    /// Load configuration from tide-gauge.toml file
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path("tide-gauge.toml")
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Invalid config file format: {}", e);
                    eprintln!("Using default (uncalibrated) configuration");
                    Self::default()
                }
            },
            Err(_) => {
                eprintln!("Info: No config file found, using default (uncalibrated) configuration");
                Self::default()
            }
        }
    }

    /// Save current configuration to the given path
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Save current configuration to tide-gauge.toml
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to_path("tide-gauge.toml")?;
        eprintln!("Configuration saved to tide-gauge.toml");
        Ok(())
    }
}

impl DeviceConfig {
    /// Check that every OTAA credential is present before the radio stack
    /// gets them. Only presence is checked; hex validity is the network
    /// console's contract.
    pub fn validate(&self) -> Result<(), CredentialsError> {
        if self.dev_eui.trim().is_empty() {
            return Err(CredentialsError::Missing("dev_eui"));
        }
        if self.app_eui.trim().is_empty() {
            return Err(CredentialsError::Missing("app_eui"));
        }
        if self.app_key.trim().is_empty() {
            return Err(CredentialsError::Missing("app_key"));
        }
        Ok(())
    }
}

impl CalibrationConfig {
    /// True when both site constants have been surveyed in
    pub fn is_set(&self) -> bool {
        self.geometry_reference_m.is_some() && self.datum_offset_m.is_some()
    }
}
