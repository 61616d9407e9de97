//! # Tide Gauge Core Library
//!
//! This library is the portable core of a battery-powered ultrasonic tide gauge:
//! it converts raw distance readings into tide heights using site calibration
//! constants and packs the results into small fixed-width binary payloads for a
//! low-bandwidth LoRaWAN uplink with a strict byte budget.
//!
//! ## Design Philosophy
//!
//! ### Fit the uplink budget
//! - **Fixed-point fields**: Heights, distances, and voltages travel as 16-bit
//!   millimeter/millivolt integers, never as floats
//! - **Big-endian layout**: The canonical uplink frame is 6 bytes total; the
//!   standalone 2-byte and 4-byte encodings reuse the same field definitions
//!   for transports with smaller budgets
//! - **Hard range contracts**: A quantity that does not fit its 16-bit field
//!   after rounding is a reported error, never a silent clamp
//!
//! ### Keep the hardware out
//! The radio stack, the HC-SR04 pin driver, and the sleep loop live in the
//! surrounding firmware. This crate only sees their seams:
//! - [`ports::DistanceSensor`], [`ports::BatteryMonitor`], and [`ports::Radio`]
//!   are the trait boundaries the firmware implements
//! - [`pipeline::run_measurement_cycle`] wires one sampling cycle through those
//!   seams without retaining any state between calls
//!
//! ### Data Flow
//! 1. **Sample**: sensor supplies `measured_distance_m`, power monitor supplies
//!    `battery_v`
//! 2. **Calibrate**: `tide_height_m = geometry_reference_m - measured_distance_m
//!    - datum_offset_m`
//! 3. **Encode**: quantize to millimeters/millivolts and pack big-endian
//! 4. **Transmit**: the caller hands the finished frame to the radio
//!
//! ## Core Types
//!
//! The library exports two value types shared across the pipeline:
//! - [`Measurement`]: the raw quantities read during one sampling cycle
//! - [`Observation`]: a measurement with its derived tide height attached

use serde::{Deserialize, Serialize};

// Module declarations
pub mod calibration;
pub mod config;
pub mod decode;
pub mod payload;
pub mod pipeline;
pub mod ports;
pub mod scheduler;
pub mod ultrasonic;

/// Raw quantities read from the sensors during one sampling cycle.
///
/// Both fields are in SI units as delivered by the drivers: the ultrasonic
/// ranger reports the sensor-to-water distance in meters and the power monitor
/// reports the pack voltage in volts. Nothing here is calibrated or quantized
/// yet; that happens in [`calibration`] and [`payload`] respectively.
///
/// # Example
/// ```
/// use tide_gauge_lib::Measurement;
///
/// let m = Measurement { distance_m: 0.842, battery_v: 3.721 };
/// assert!(m.distance_m > 0.0);
/// ```
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Measurement {
    /// Sensor-to-water-surface distance in meters
    pub distance_m: f32,
    /// Battery pack voltage in volts
    pub battery_v: f32,
}

/// A complete observation: one [`Measurement`] with its derived tide height.
///
/// Produced by the pipeline after the calibration step succeeds; this is the
/// value the payload encoder turns into the canonical 6-byte uplink frame.
/// Tide height is signed: the water surface can sit above the reference
/// plane after storm surge or at extreme spring tides.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Observation {
    /// Tide height relative to the site datum, in meters (may be negative)
    pub tide_height_m: f32,
    /// Measured distance in meters
    pub distance_m: f32,
    /// Battery pack voltage in volts
    pub battery_v: f32,
}
