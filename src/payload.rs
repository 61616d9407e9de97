//! # Uplink Payload Encoding
//!
//! Packs physical quantities into the fixed-width big-endian fields of the
//! LoRaWAN uplink. Airtime regulations and battery budget cap the frame at a
//! handful of bytes, so every field is 16-bit fixed-point:
//!
//! | Field           | Offset | Width | Encoding                         |
//! |-----------------|--------|-------|----------------------------------|
//! | Tide height     | 0      | 2     | signed big-endian, millimeters   |
//! | Distance        | 2      | 2     | unsigned big-endian, millimeters |
//! | Battery voltage | 4      | 2     | unsigned big-endian, millivolts  |
//!
//! The standalone 2-byte and 4-byte encodings use the same field definitions
//! independently, for transports with smaller payload budgets.
//!
//! ## Quantization rule
//!
//! All encoders share one rule: multiply by 1000 and round to the nearest
//! integer (half away from zero, `f32::round`), then require the result to
//! fit the target integer width. A value that does not fit is a hard error,
//! never a silent clamp; the caller decides whether to skip the sample or
//! degrade. On any failure no bytes are produced, so a failed encode can
//! never reach the radio.

use thiserror::Error;

/// Width of the standalone tide height encoding
pub const TIDE_HEIGHT_LEN: usize = 2;
/// Width of the standalone distance + battery encoding
pub const DISTANCE_BATTERY_LEN: usize = 4;
/// Width of the canonical combined uplink frame
pub const UPLINK_FRAME_LEN: usize = 6;

/// Errors from the payload encoders.
///
/// Each invalid input is discriminated per field so the operator log names
/// the sensor to distrust, not just "encoding failed".
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PayloadError {
    /// Distance input was negative before quantization
    #[error("distance must be >= 0, got {0} m")]
    NegativeDistance(f32),

    /// Battery voltage input was negative before quantization
    #[error("battery voltage must be >= 0, got {0} V")]
    NegativeBattery(f32),

    /// Tide height does not fit signed 16-bit millimeters
    #[error("tide height out of encodable range (-32.768..=32.767 m): {0} m")]
    TideHeightOutOfRange(f32),

    /// Distance does not fit unsigned 16-bit millimeters
    #[error("distance out of encodable range (0..=65.535 m): {0} m")]
    DistanceOutOfRange(f32),

    /// Battery voltage does not fit unsigned 16-bit millivolts
    #[error("battery voltage out of encodable range (0..=65.535 V): {0} V")]
    BatteryOutOfRange(f32),
}

/// Quantize a physical quantity to integer thousandths (mm or mV).
///
/// Returns `None` for non-finite inputs; NaN would otherwise cast to 0 and
/// encode as a plausible-looking field.
fn to_fixed_point_thousandths(value: f32) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    Some((value * 1000.0).round() as i64)
}

/// Encode tide height as signed millimeters, big-endian two's-complement.
///
/// Valid range is the full signed 16-bit range: -32.768 m ..= 32.767 m.
///
/// # Example
/// ```
/// use tide_gauge_lib::payload::encode_tide_height;
///
/// assert_eq!(encode_tide_height(0.658).unwrap(), [0x02, 0x92]);
/// assert_eq!(encode_tide_height(-0.6).unwrap(), [0xFD, 0xA8]);
/// ```
pub fn encode_tide_height(tide_height_m: f32) -> Result<[u8; TIDE_HEIGHT_LEN], PayloadError> {
    let tide_height_mm = to_fixed_point_thousandths(tide_height_m)
        .filter(|mm| (i16::MIN as i64..=i16::MAX as i64).contains(mm))
        .ok_or(PayloadError::TideHeightOutOfRange(tide_height_m))?;

    Ok((tide_height_mm as i16).to_be_bytes())
}

/// Encode distance and battery voltage as unsigned millimeters/millivolts.
///
/// Each field is validated independently: negative inputs are rejected
/// outright, and each quantized value must fit unsigned 16 bits
/// (0 ..= 65.535 m / 0 ..= 65.535 V). Layout is distance (2 bytes
/// big-endian) followed by battery voltage (2 bytes big-endian).
pub fn encode_distance_battery(
    distance_m: f32,
    battery_v: f32,
) -> Result<[u8; DISTANCE_BATTERY_LEN], PayloadError> {
    if distance_m < 0.0 {
        return Err(PayloadError::NegativeDistance(distance_m));
    }
    if battery_v < 0.0 {
        return Err(PayloadError::NegativeBattery(battery_v));
    }

    let distance_mm = to_fixed_point_thousandths(distance_m)
        .filter(|mm| (0..=u16::MAX as i64).contains(mm))
        .ok_or(PayloadError::DistanceOutOfRange(distance_m))?;

    let battery_mv = to_fixed_point_thousandths(battery_v)
        .filter(|mv| (0..=u16::MAX as i64).contains(mv))
        .ok_or(PayloadError::BatteryOutOfRange(battery_v))?;

    let mut payload = [0u8; DISTANCE_BATTERY_LEN];
    payload[..2].copy_from_slice(&(distance_mm as u16).to_be_bytes());
    payload[2..].copy_from_slice(&(battery_mv as u16).to_be_bytes());
    Ok(payload)
}

/// Encode the canonical 6-byte uplink frame: tide height, distance, battery.
///
/// Purely a concatenation of [`encode_tide_height`] and
/// [`encode_distance_battery`]; if either sub-encoding fails the whole frame
/// fails and no partial output exists.
pub fn encode_tide_distance_battery(
    tide_height_m: f32,
    distance_m: f32,
    battery_v: f32,
) -> Result<[u8; UPLINK_FRAME_LEN], PayloadError> {
    let tide = encode_tide_height(tide_height_m)?;
    let distance_battery = encode_distance_battery(distance_m, battery_v)?;

    let mut frame = [0u8; UPLINK_FRAME_LEN];
    frame[..TIDE_HEIGHT_LEN].copy_from_slice(&tide);
    frame[TIDE_HEIGHT_LEN..].copy_from_slice(&distance_battery);
    Ok(frame)
}

/// Encode a complete [`crate::Observation`] as the canonical uplink frame
pub fn encode_observation(
    observation: &crate::Observation,
) -> Result<[u8; UPLINK_FRAME_LEN], PayloadError> {
    encode_tide_distance_battery(
        observation.tide_height_m,
        observation.distance_m,
        observation.battery_v,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tide_height_encodes_signed_millimeters_big_endian() {
        assert_eq!(encode_tide_height(0.9).unwrap(), [0x03, 0x84]);
        assert_eq!(encode_tide_height(0.658).unwrap(), [0x02, 0x92]);
    }

    #[test]
    fn tide_height_supports_negative_heights() {
        assert_eq!(encode_tide_height(-0.6).unwrap(), [0xFD, 0xA8]);
    }

    #[test]
    fn tide_height_boundary_values() {
        // Top of the signed 16-bit range encodes; one millimeter above fails
        assert_eq!(encode_tide_height(32.767).unwrap(), [0x7F, 0xFF]);
        assert_eq!(
            encode_tide_height(32.768),
            Err(PayloadError::TideHeightOutOfRange(32.768))
        );
        assert_eq!(encode_tide_height(-32.768).unwrap(), [0x80, 0x00]);
        assert!(encode_tide_height(-32.769).is_err());
        assert!(encode_tide_height(100.0).is_err());
    }

    #[test]
    fn tide_height_rounds_to_nearest_millimeter() {
        // 1.0004 m -> 1000 mm, 1.0006 m -> 1001 mm
        assert_eq!(encode_tide_height(1.0004).unwrap(), 1000u16.to_be_bytes());
        assert_eq!(encode_tide_height(1.0006).unwrap(), 1001u16.to_be_bytes());
        // Half away from zero on the negative side
        assert_eq!(
            encode_tide_height(-0.0005).unwrap(),
            (-1i16).to_be_bytes()
        );
    }

    #[test]
    fn tide_height_rejects_non_finite_input() {
        assert!(encode_tide_height(f32::NAN).is_err());
        assert!(encode_tide_height(f32::INFINITY).is_err());
    }

    #[test]
    fn distance_battery_encodes_both_fields_big_endian() {
        assert_eq!(
            encode_distance_battery(12.345, 3.721).unwrap(),
            [0x30, 0x39, 0x0E, 0x89]
        );
    }

    #[test]
    fn distance_battery_boundary_values() {
        assert_eq!(
            encode_distance_battery(65.535, 65.535).unwrap(),
            [0xFF, 0xFF, 0xFF, 0xFF]
        );
        assert_eq!(
            encode_distance_battery(65.536, 3.7),
            Err(PayloadError::DistanceOutOfRange(65.536))
        );
        assert_eq!(
            encode_distance_battery(1.0, 65.536),
            Err(PayloadError::BatteryOutOfRange(65.536))
        );
    }

    #[test]
    fn distance_battery_rejects_negative_inputs_per_field() {
        assert_eq!(
            encode_distance_battery(-0.001, 3.7),
            Err(PayloadError::NegativeDistance(-0.001))
        );
        assert_eq!(
            encode_distance_battery(1.0, -0.001),
            Err(PayloadError::NegativeBattery(-0.001))
        );
    }

    #[test]
    fn combined_frame_is_concatenation_of_sub_encodings() {
        let tide = encode_tide_height(0.658).unwrap();
        let distance_battery = encode_distance_battery(0.842, 3.721).unwrap();
        let frame = encode_tide_distance_battery(0.658, 0.842, 3.721).unwrap();

        assert_eq!(&frame[..2], &tide);
        assert_eq!(&frame[2..], &distance_battery);
        assert_eq!(frame, [0x02, 0x92, 0x03, 0x4A, 0x0E, 0x89]);
    }

    #[test]
    fn combined_frame_propagates_either_failure() {
        // Tide out of range
        assert_eq!(
            encode_tide_distance_battery(40.0, 1.0, 3.7),
            Err(PayloadError::TideHeightOutOfRange(40.0))
        );
        // Battery negative
        assert_eq!(
            encode_tide_distance_battery(0.5, 1.0, -0.2),
            Err(PayloadError::NegativeBattery(-0.2))
        );
    }

    #[test]
    fn round_trip_recovers_height_within_half_millimeter() {
        for &height in &[-32.768f32, -12.001, -0.0004, 0.0, 0.658, 3.3335, 32.767] {
            let bytes = encode_tide_height(height).unwrap();
            let decoded_mm = i16::from_be_bytes(bytes);
            let decoded_m = decoded_mm as f32 / 1000.0;
            assert!(
                (decoded_m - height).abs() <= 0.0005 + 1e-6,
                "height {} decoded as {}",
                height,
                decoded_m
            );
        }
    }
}
