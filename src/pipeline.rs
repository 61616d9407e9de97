//! # Measurement Pipeline
//!
//! Wires one sampling cycle through the port seams: read the sensors, derive
//! the tide height from the stored calibration, encode the canonical uplink
//! frame, and hand it to the radio. Every stage failure aborts the cycle
//! before anything reaches the air, so a frame is transmitted only when the
//! whole chain succeeded.
//!
//! Retry, sleep, and power sequencing are the firmware's business; the
//! functions here are single-shot and keep no state between calls.

use crate::calibration::{compute_tide_height_from_config, CalibrationError};
use crate::config::CalibrationConfig;
use crate::payload::{encode_observation, PayloadError, UPLINK_FRAME_LEN};
use crate::ports::{BatteryMonitor, DistanceSensor, Radio, RadioSendError, SensorError};
use crate::scheduler::SampleScheduler;
use crate::{Measurement, Observation};
use thiserror::Error;

/// A measurement cycle failed at some stage.
///
/// The variant says which stage, so the firmware log distinguishes a flaky
/// sensor from an uncalibrated site from a radio outage.
#[derive(Error, Debug)]
pub enum CycleError {
    /// A sensor read failed
    #[error(transparent)]
    Sensor(#[from] SensorError),

    /// Tide height could not be derived
    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    /// The observation did not fit the uplink frame
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// The radio rejected the frame
    #[error(transparent)]
    Radio(#[from] RadioSendError),
}

/// Run one measurement cycle: sample, calibrate, encode, transmit.
///
/// Returns the frame that was handed to the radio. On any error nothing is
/// transmitted and no partial frame exists.
///
/// # Example
/// ```no_run
/// use tide_gauge_lib::config::Config;
/// use tide_gauge_lib::pipeline::run_measurement_cycle;
/// # struct S; struct B; struct R;
/// # impl tide_gauge_lib::ports::DistanceSensor for S {
/// #     fn read_distance_m(&mut self) -> Result<f32, tide_gauge_lib::ports::SensorError> { Ok(0.842) }
/// # }
/// # impl tide_gauge_lib::ports::BatteryMonitor for B {
/// #     fn read_battery_v(&mut self) -> Result<f32, tide_gauge_lib::ports::SensorError> { Ok(3.7) }
/// # }
/// # impl tide_gauge_lib::ports::Radio for R {
/// #     fn send(&mut self, _: &[u8]) -> Result<(), tide_gauge_lib::ports::RadioSendError> { Ok(()) }
/// # }
/// # let mut sensor = S; let mut battery = B; let mut radio = R;
///
/// let config = Config::load();
/// let frame = run_measurement_cycle(
///     &mut sensor,
///     &mut battery,
///     &mut radio,
///     &config.calibration,
/// );
/// ```
pub fn run_measurement_cycle<S, B, R>(
    sensor: &mut S,
    battery: &mut B,
    radio: &mut R,
    config: &CalibrationConfig,
) -> Result<[u8; UPLINK_FRAME_LEN], CycleError>
where
    S: DistanceSensor + ?Sized,
    B: BatteryMonitor + ?Sized,
    R: Radio + ?Sized,
{
    let measurement = Measurement {
        distance_m: sensor.read_distance_m()?,
        battery_v: battery.read_battery_v()?,
    };

    let tide_height_m = compute_tide_height_from_config(measurement.distance_m, config)?;
    let observation = Observation {
        tide_height_m,
        distance_m: measurement.distance_m,
        battery_v: measurement.battery_v,
    };

    let frame = encode_observation(&observation)?;
    radio.send(&frame)?;
    Ok(frame)
}

/// Run a measurement cycle only if the scheduler says one is due at `now_s`.
///
/// Returns `Ok(None)` when not due; otherwise behaves exactly like
/// [`run_measurement_cycle`].
pub fn run_cycle_if_due<S, B, R>(
    scheduler: &mut SampleScheduler,
    now_s: i64,
    sensor: &mut S,
    battery: &mut B,
    radio: &mut R,
    config: &CalibrationConfig,
) -> Result<Option<[u8; UPLINK_FRAME_LEN]>, CycleError>
where
    S: DistanceSensor + ?Sized,
    B: BatteryMonitor + ?Sized,
    R: Radio + ?Sized,
{
    if !scheduler.is_due(now_s) {
        return Ok(None);
    }

    run_measurement_cycle(sensor, battery, radio, config).map(Some)
}
