//! # Companion CLI Test Suite
//!
//! Exercises the CLI helpers and the operator workflows end to end: survey a
//! calibration into a config file, then produce and decode the exact frame
//! the device would uplink. Tests run against real temporary files so the
//! config round-trip is the same one the provisioning laptop performs.

use tempfile::tempdir;
use tide_gauge_lib::calibration::{compute_datum_offset, compute_tide_height_from_config};
use tide_gauge_lib::config::Config;
use tide_gauge_lib::decode::decode_uplink;
use tide_gauge_lib::payload::encode_tide_distance_battery;

use crate::{format_hex, parse_hex};

#[test]
fn hex_formatting_matches_operator_notation() {
    assert_eq!(format_hex(&[0x02, 0x92, 0x0E, 0x89]), "02 92 0E 89");
    assert_eq!(format_hex(&[]), "");
}

#[test]
fn hex_parsing_accepts_common_separators() {
    let expected = vec![0x02, 0x92, 0x30, 0x39, 0x0E, 0x89];
    assert_eq!(parse_hex("02 92 30 39 0E 89").unwrap(), expected);
    assert_eq!(parse_hex("0292:3039:0e89").unwrap(), expected);
    assert_eq!(parse_hex("029230390E89").unwrap(), expected);
}

#[test]
fn hex_parsing_rejects_malformed_input() {
    assert!(parse_hex("029").is_err(), "odd length should fail");
    assert!(parse_hex("02 9G").is_err(), "non-hex digit should fail");
    assert!(parse_hex("02ΦΦ").is_err(), "non-ascii input should fail");
}

#[test]
fn hex_round_trips_through_both_helpers() {
    let frame = [0x7F, 0xFF, 0x00, 0x00, 0x0E, 0x89];
    assert_eq!(parse_hex(&format_hex(&frame)).unwrap(), frame.to_vec());
}

/// The full operator workflow: survey the site, then preview an uplink.
///
/// Mirrors what `set-calibration` followed by `encode` does, against a real
/// config file on disk.
#[test]
fn calibration_survey_then_encode_workflow() {
    let dir = tempdir().expect("should create temp dir");
    let config_path = dir.path().join("tide-gauge.toml");

    // Survey: reference gauge says the tide is at 0.9 m while we measure
    // 1.4 m of air below a mount surveyed at 2.5 m
    let datum_offset_m = compute_datum_offset(2.5, 1.4, 0.9).unwrap();
    let mut config = Config::default();
    config.calibration.geometry_reference_m = Some(2.5);
    config.calibration.datum_offset_m = Some(datum_offset_m);
    config.save_to_path(&config_path).unwrap();

    // Later session: reload the file and preview a frame
    let reloaded = Config::load_from_path(&config_path);
    assert!(reloaded.calibration.is_set());

    let tide_height_m = compute_tide_height_from_config(1.4, &reloaded.calibration).unwrap();
    assert!(
        (tide_height_m - 0.9).abs() < 1e-6,
        "survey point should reproduce the known tide, got {}",
        tide_height_m
    );

    let frame = encode_tide_distance_battery(tide_height_m, 1.4, 3.721).unwrap();
    assert_eq!(format_hex(&frame), "03 84 05 78 0E 89");
}

/// Decoding a captured frame recovers the quantities that were encoded.
#[test]
fn captured_frame_decodes_to_original_reading() {
    let frame = encode_tide_distance_battery(0.658, 0.842, 3.721).unwrap();
    let decoded = decode_uplink(&frame).unwrap();

    assert_eq!(decoded.tide_height_mm, 658);
    assert_eq!(decoded.distance_mm, 842);
    assert_eq!(decoded.battery_mv, 3721);
    assert!((decoded.tide_height_m - 0.658).abs() < 5e-4);

    // JSON output carries every field the console formatter shows
    let json = serde_json::to_string(&decoded).unwrap();
    for field in [
        "tide_height_mm",
        "tide_height_m",
        "distance_mm",
        "distance_m",
        "battery_mv",
        "battery_v",
    ] {
        assert!(json.contains(field), "JSON output missing {}", field);
    }
}

#[test]
fn uncalibrated_config_refuses_to_encode() {
    let config = Config::default();
    assert!(compute_tide_height_from_config(1.4, &config.calibration).is_err());
}
