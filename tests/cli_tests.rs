// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI integration tests.
//!
//! These tests run the actual robomsg binary and verify its behavior.

mod common;

use std::io::Write;
use std::process::{Command, Output};

use common::fixture_path;

/// Run robomsg with arguments
fn run(args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_robomsg");
    Command::new(bin)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|_| panic!("Failed to run {bin:?}"))
}

/// Run robomsg and assert success
fn run_ok(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        output.status.success(),
        "Command failed: {:?}\nstdout: {}\nstderr: {}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run robomsg and assert failure, returning (stdout, stderr)
fn run_err(args: &[&str]) -> (String, String) {
    let output = run(args);
    assert!(
        !output.status.success(),
        "Command should have failed but succeeded: {:?}",
        args
    );
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

fn fixture(name: &str) -> String {
    fixture_path(name).to_string_lossy().to_string()
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_cli_help() {
    let output = run_ok(&["--help"]);
    assert!(output.contains("Robotics message schema toolkit"));
    assert!(output.contains("list"));
    assert!(output.contains("schema"));
    assert!(output.contains("validate"));
    assert!(output.contains("normalize"));
}

#[test]
fn test_cli_version() {
    let output = run_ok(&["--version"]);
    assert!(output.contains("robomsg"));
}

#[test]
fn test_cli_invalid_subcommand() {
    let (_, stderr) = run_err(&["nonexistent"]);
    assert!(stderr.contains("unrecognized") || stderr.contains("unknown"));
}

// ============================================================================
// List / Schema
// ============================================================================

#[test]
fn test_list_types() {
    let output = run_ok(&["list"]);
    assert!(output.contains("sensors/Imu"));
    assert!(output.contains("actuators/DroneMode"));
    assert!(output.contains("standard/Header"));
}

#[test]
fn test_list_json() {
    let output = run_ok(&["list", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    let names: Vec<_> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect();
    assert!(names.contains(&"geometry/Quaternion".to_string()));
}

#[test]
fn test_schema_shows_constraints() {
    let output = run_ok(&["schema", "geometry/Quaternion"]);
    assert!(output.contains("geometry/Quaternion"));
    assert!(output.contains("w: float = 1"));
    assert!(output.contains("[range [-1, 1]]"));
}

#[test]
fn test_schema_unknown_type() {
    let (_, stderr) = run_err(&["schema", "sensors/Lidar"]);
    assert!(stderr.contains("unknown message type 'sensors/Lidar'"));
}

// ============================================================================
// Validate / Normalize
// ============================================================================

#[test]
fn test_validate_ok() {
    let output = run_ok(&["validate", "sensors/Imu", &fixture("imu_valid.json")]);
    assert!(output.contains("OK"));
}

#[test]
fn test_validate_reports_every_violation() {
    let (stdout, stderr) = run_err(&[
        "validate",
        "sensors/Imu",
        &fixture("imu_valid.json"),
        &fixture("imu_invalid.json"),
    ]);
    assert!(stdout.contains("FAIL"));
    assert!(stdout.contains("header.version"));
    assert!(stdout.contains("orientation.w"));
    assert!(stdout.contains("angular_velocity_covariance"));
    assert!(stderr.contains("1 of 2 document(s) failed validation"));
}

#[test]
fn test_validate_missing_file() {
    let (stdout, _) = run_err(&["validate", "sensors/Imu", "/nonexistent/imu.json"]);
    assert!(stdout.contains("failed to read"));
}

#[test]
fn test_normalize_fills_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"x": 1}}"#).unwrap();
    let path = file.path().to_string_lossy().to_string();

    let output = run_ok(&["normalize", "geometry/Vector3", &path, "--compact"]);
    assert_eq!(output.trim(), r#"{"x":1.0,"y":0.0,"z":0.0}"#);
}

#[test]
fn test_normalize_uses_config() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "[defaults]\nheader_frame = \"/odom\"").unwrap();
    let mut doc = tempfile::NamedTempFile::new().unwrap();
    write!(doc, r#"{{"data": "hi"}}"#).unwrap();

    let output = run_ok(&[
        "--config",
        &config.path().to_string_lossy(),
        "normalize",
        "standard/Text",
        &doc.path().to_string_lossy(),
        "--compact",
    ]);
    let value: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
    assert_eq!(value["header"]["frame"], "/odom");
    assert_eq!(value["header"]["version"], "1.0");
    assert_eq!(value["data"], "hi");
}

#[test]
fn test_bad_config_rejected() {
    let (_, stderr) = run_err(&[
        "--config",
        &fixture("bad_version.toml"),
        "normalize",
        "standard/Text",
        &fixture("imu_valid.json"),
    ]);
    assert!(stderr.contains("header.version"));
}
