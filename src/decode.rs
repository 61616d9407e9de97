//! # Uplink Frame Decoding
//!
//! Ground-side mirror of [`crate::payload`]: parses the canonical 6-byte
//! uplink frame back into integer fields and their metric equivalents. The
//! network console runs the same logic in its payload formatter; this module
//! keeps a copy in the crate so the companion CLI and the round-trip tests
//! never drift from the wire format.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::payload::UPLINK_FRAME_LEN;

/// Errors from the uplink decoder.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The frame is shorter than the canonical 6-byte layout
    #[error("uplink frame too short: {0} bytes, need {UPLINK_FRAME_LEN}")]
    TooShort(usize),
}

/// A decoded uplink frame.
///
/// Carries both the raw integer fields exactly as transmitted and their
/// metric conversions, matching what operators see in the network console.
/// Serializes to JSON for the `decode` CLI command.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecodedUplink {
    /// Tide height in signed millimeters, as transmitted
    pub tide_height_mm: i16,
    /// Tide height in meters
    pub tide_height_m: f32,
    /// Uncalibrated sensor distance in millimeters, as transmitted
    pub distance_mm: u16,
    /// Uncalibrated sensor distance in meters
    pub distance_m: f32,
    /// Battery voltage in millivolts, as transmitted
    pub battery_mv: u16,
    /// Battery voltage in volts
    pub battery_v: f32,
}

/// Decode a canonical uplink frame.
///
/// Frames longer than 6 bytes are accepted and the trailing bytes ignored,
/// matching the network-side formatter (some transports pad frames).
///
/// # Example
/// ```
/// use tide_gauge_lib::decode::decode_uplink;
///
/// let decoded = decode_uplink(&[0x02, 0x92, 0x30, 0x39, 0x0E, 0x89]).unwrap();
/// assert_eq!(decoded.tide_height_mm, 658);
/// assert_eq!(decoded.distance_mm, 12345);
/// assert_eq!(decoded.battery_mv, 3721);
/// ```
pub fn decode_uplink(bytes: &[u8]) -> Result<DecodedUplink, DecodeError> {
    if bytes.len() < UPLINK_FRAME_LEN {
        return Err(DecodeError::TooShort(bytes.len()));
    }

    let tide_height_mm = i16::from_be_bytes([bytes[0], bytes[1]]);
    let distance_mm = u16::from_be_bytes([bytes[2], bytes[3]]);
    let battery_mv = u16::from_be_bytes([bytes[4], bytes[5]]);

    Ok(DecodedUplink {
        tide_height_mm,
        tide_height_m: tide_height_mm as f32 / 1000.0,
        distance_mm,
        distance_m: distance_mm as f32 / 1000.0,
        battery_mv,
        battery_v: battery_mv as f32 / 1000.0,
    })
}
