//! # Ultrasonic Echo Conversion
//!
//! Turns the HC-SR04 echo pulse width into a one-way distance. The ranger
//! reports the round-trip time of a 40 kHz ping; halving the acoustic path
//! at the nominal speed of sound gives the sensor-to-water distance the
//! calibration engine consumes. Pin timing itself lives in the firmware;
//! only the conversion math is portable.

use thiserror::Error;

/// Nominal speed of sound in air at ~20 C, in meters per second.
///
/// Temperature compensation is deliberately absent: over the deployment's
/// 0-30 C span the error stays under 3%, well inside the site calibration
/// slack.
pub const SPEED_OF_SOUND_M_PER_S: f32 = 343.0;

/// Errors from the echo conversion.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UltrasonicError {
    /// Echo duration was negative (timer delta wrapped or driver fault)
    #[error("echo duration must be >= 0, got {0} us")]
    NegativeDuration(i64),
}

/// Convert an echo pulse width in microseconds to a one-way distance in meters.
///
/// The input is signed because drivers compute it as a difference of timer
/// captures, which goes negative when the counter wraps mid-pulse; such a
/// reading is rejected rather than folded into a bogus distance.
///
/// # Example
/// ```
/// use tide_gauge_lib::ultrasonic::echo_duration_to_distance;
///
/// // 5831 us round trip is ~1 m each way at 343 m/s
/// let d = echo_duration_to_distance(5831).unwrap();
/// assert!((d - 1.0).abs() < 1e-3);
/// ```
pub fn echo_duration_to_distance(echo_duration_us: i64) -> Result<f32, UltrasonicError> {
    if echo_duration_us < 0 {
        return Err(UltrasonicError::NegativeDuration(echo_duration_us));
    }

    let round_trip_time_s = echo_duration_us as f32 / 1_000_000.0;
    Ok(round_trip_time_s * SPEED_OF_SOUND_M_PER_S / 2.0)
}
