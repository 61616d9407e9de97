//! # Calibration Engine
//!
//! Converts a raw ultrasonic distance reading into a tide height relative to
//! the site datum. The geometry is a sensor mounted a fixed height above the
//! water looking straight down:
//!
//! ```text
//!   sensor mount ─┬─────────────  geometry_reference_m above datum
//!                 │ measured_distance_m
//!   water surface ┴─────────────  tide_height_m above datum
//! ```
//!
//! so `tide_height_m = geometry_reference_m - measured_distance_m -
//! datum_offset_m`, where `datum_offset_m` absorbs the residual between the
//! surveyed mount height and the official datum at the site.
//!
//! Everything here is a pure function over its arguments. No rounding happens
//! at this stage; full float precision is preserved for the quantization step
//! in [`crate::payload`].

use crate::config::CalibrationConfig;
use thiserror::Error;

/// Errors from the calibration engine.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CalibrationError {
    /// The sensor reported a negative distance (driver fault or wiring issue)
    #[error("measured distance must be >= 0, got {0} m")]
    NegativeDistance(f32),

    /// The site constants have not been surveyed in yet
    #[error("calibration is not set")]
    NotSet,
}

/// Compute tide height from a measured distance and the two site constants.
///
/// Fails when `measured_distance_m` is negative; a failed call never carries
/// a height. The result keeps full float precision.
///
/// # Example
/// ```
/// use tide_gauge_lib::calibration::compute_tide_height;
///
/// let h = compute_tide_height(1.500, 0.842, 0.000).unwrap();
/// assert!((h - 0.658).abs() < 1e-6);
/// ```
pub fn compute_tide_height(
    geometry_reference_m: f32,
    measured_distance_m: f32,
    datum_offset_m: f32,
) -> Result<f32, CalibrationError> {
    if measured_distance_m < 0.0 {
        return Err(CalibrationError::NegativeDistance(measured_distance_m));
    }

    Ok(geometry_reference_m - measured_distance_m - datum_offset_m)
}

/// Compute tide height using the constants stored in [`CalibrationConfig`].
///
/// Fails with [`CalibrationError::NotSet`] while either constant is still
/// `None`, so an unprovisioned device reports a clear error instead of
/// uplinking heights measured against a bogus zero reference.
pub fn compute_tide_height_from_config(
    measured_distance_m: f32,
    config: &CalibrationConfig,
) -> Result<f32, CalibrationError> {
    let (geometry_reference_m, datum_offset_m) =
        match (config.geometry_reference_m, config.datum_offset_m) {
            (Some(reference), Some(offset)) => (reference, offset),
            _ => return Err(CalibrationError::NotSet),
        };

    compute_tide_height(geometry_reference_m, measured_distance_m, datum_offset_m)
}

/// Derive the datum offset from a reference observation.
///
/// During site calibration an operator measures the distance to the water at
/// a moment when the true tide height is known from a nearby reference gauge.
/// Solving the height equation for the offset gives
/// `datum_offset_m = geometry_reference_m - measured_distance_m - known_tide_height_m`.
pub fn compute_datum_offset(
    geometry_reference_m: f32,
    measured_distance_m: f32,
    known_tide_height_m: f32,
) -> Result<f32, CalibrationError> {
    if measured_distance_m < 0.0 {
        return Err(CalibrationError::NegativeDistance(measured_distance_m));
    }

    Ok(geometry_reference_m - measured_distance_m - known_tide_height_m)
}
