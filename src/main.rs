//! # Tide Gauge Companion CLI
//!
//! Operator tooling for the tide gauge node: preview the exact bytes the
//! device would uplink for a given reading, decode a captured frame back
//! into engineering units, and survey the site calibration into the config
//! file. Runs on the provisioning laptop, not on the node itself.

// Test modules
#[cfg(test)]
mod tests;

use anyhow::{bail, Context};
use chrono::Local;
use std::env;

use tide_gauge_lib::calibration::{compute_datum_offset, compute_tide_height_from_config};
use tide_gauge_lib::config::Config;
use tide_gauge_lib::decode::decode_uplink;
use tide_gauge_lib::payload::encode_tide_distance_battery;

const USAGE: &str = "Usage: tide-gauge [--config <path>] <command>

Commands:
  encode <distance_m> <battery_v>
      Compute tide height from the configured calibration and print the
      6-byte uplink frame as hex.
  decode <hex>
      Decode an uplink frame (hex, optional spaces/colons) and print the
      fields as JSON.
  set-calibration <geometry_reference_m> <measured_distance_m> <known_tide_height_m>
      Derive the datum offset from a reference observation and save both
      calibration constants to the config file.";

/// Timestamped status line on stderr (stdout is reserved for command output)
fn log(message: &str) {
    eprintln!("[{}] {}", Local::now().format("%Y-%m-%d %H:%M:%S"), message);
}

/// Render a payload as uppercase hex pairs, e.g. "02 92 03 4A 0E 89"
pub(crate) fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a hex string into bytes, tolerating spaces and colon separators
pub(crate) fn parse_hex(text: &str) -> anyhow::Result<Vec<u8>> {
    let cleaned: String = text.chars().filter(|c| !" :".contains(*c)).collect();
    if !cleaned.is_ascii() {
        bail!("hex string contains non-hex characters: {:?}", text);
    }
    if cleaned.len() % 2 != 0 {
        bail!("hex string has odd length: {:?}", text);
    }

    (0..cleaned.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&cleaned[i..i + 2], 16)
                .with_context(|| format!("invalid hex byte {:?}", &cleaned[i..i + 2]))
        })
        .collect()
}

fn parse_meters(arg: &str, name: &str) -> anyhow::Result<f32> {
    arg.parse::<f32>()
        .with_context(|| format!("{} must be a number, got {:?}", name, arg))
}

fn cmd_encode(config_path: &str, args: &[String]) -> anyhow::Result<()> {
    let [distance, battery] = args else {
        bail!("encode expects <distance_m> <battery_v>\n\n{}", USAGE);
    };
    let distance_m = parse_meters(distance, "distance_m")?;
    let battery_v = parse_meters(battery, "battery_v")?;

    let config = Config::load_from_path(config_path);
    let tide_height_m = compute_tide_height_from_config(distance_m, &config.calibration)
        .context("cannot derive tide height (run set-calibration first?)")?;

    let frame = encode_tide_distance_battery(tide_height_m, distance_m, battery_v)
        .context("reading does not fit the uplink frame")?;

    log(&format!(
        "distance {:.3} m, battery {:.3} V -> tide height {:.3} m",
        distance_m, battery_v, tide_height_m
    ));
    println!("{}", format_hex(&frame));
    Ok(())
}

fn cmd_decode(args: &[String]) -> anyhow::Result<()> {
    if args.is_empty() {
        bail!("decode expects a hex frame\n\n{}", USAGE);
    }

    let bytes = parse_hex(&args.join(" "))?;
    let decoded = decode_uplink(&bytes).context("frame does not match the uplink layout")?;

    println!("{}", serde_json::to_string_pretty(&decoded)?);
    Ok(())
}

fn cmd_set_calibration(config_path: &str, args: &[String]) -> anyhow::Result<()> {
    let [reference, distance, known_tide] = args else {
        bail!(
            "set-calibration expects <geometry_reference_m> <measured_distance_m> <known_tide_height_m>\n\n{}",
            USAGE
        );
    };
    let geometry_reference_m = parse_meters(reference, "geometry_reference_m")?;
    let measured_distance_m = parse_meters(distance, "measured_distance_m")?;
    let known_tide_height_m = parse_meters(known_tide, "known_tide_height_m")?;

    let datum_offset_m =
        compute_datum_offset(geometry_reference_m, measured_distance_m, known_tide_height_m)
            .context("invalid reference observation")?;

    let mut config = Config::load_from_path(config_path);
    config.calibration.geometry_reference_m = Some(geometry_reference_m);
    config.calibration.datum_offset_m = Some(datum_offset_m);
    config
        .save_to_path(config_path)
        .map_err(|e| anyhow::anyhow!("failed to save {}: {}", config_path, e))?;

    log(&format!(
        "calibration saved: geometry_reference {:.3} m, datum_offset {:.3} m",
        geometry_reference_m, datum_offset_m
    ));
    Ok(())
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    // Optional --config <path> ahead of the command
    let (config_path, rest) = match args.split_first() {
        Some((flag, tail)) if flag == "--config" => {
            let Some((path, tail)) = tail.split_first() else {
                bail!("--config expects a path\n\n{}", USAGE);
            };
            (path.clone(), tail)
        }
        _ => ("tide-gauge.toml".to_string(), args.as_slice()),
    };

    match rest.split_first() {
        Some((command, command_args)) if command == "encode" => {
            cmd_encode(&config_path, command_args)
        }
        Some((command, command_args)) if command == "decode" => cmd_decode(command_args),
        Some((command, command_args)) if command == "set-calibration" => {
            cmd_set_calibration(&config_path, command_args)
        }
        Some((command, _)) => bail!("unknown command {:?}\n\n{}", command, USAGE),
        None => bail!("{}", USAGE),
    }
}
