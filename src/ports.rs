//! # Firmware Port Traits
//!
//! The seams between the portable core and the device firmware. The firmware
//! implements these for the real HC-SR04 driver, the fuel gauge, and the
//! LoRaWAN stack; tests implement them with canned readings. The core never
//! owns hardware state, it only borrows these collaborators for the duration
//! of one call.

use thiserror::Error;

/// A sensor read failed at the hardware layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("sensor read failed: {0}")]
pub struct SensorError(pub String);

/// A radio transmission failed at the hardware layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("radio send failed: {0}")]
pub struct RadioSendError(pub String);

/// Supplies the sensor-to-water distance each sampling cycle
pub trait DistanceSensor {
    /// Return measured distance from sensor to water surface in meters
    fn read_distance_m(&mut self) -> Result<f32, SensorError>;
}

/// Supplies the battery pack voltage each sampling cycle
pub trait BatteryMonitor {
    /// Return current battery voltage in volts
    fn read_battery_v(&mut self) -> Result<f32, SensorError>;
}

/// Carries a finished payload over the wireless uplink
pub trait Radio {
    /// Send a binary payload over the radio transport
    fn send(&mut self, payload: &[u8]) -> Result<(), RadioSendError>;
}
