// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Round-trip integration tests.
//!
//! Tests cover:
//! - `from_raw(to_raw(m)) == m` for every shipped message type
//! - The same law through JSON text
//! - Absent optional fields written as explicit nulls
//! - Byte-exact image payloads

mod common;

use common::{fixture_path, raw_json, Lvl1};
use robomsg::messages::actuators::{
    DifferentialPwm, DroneControl, DroneMode, DroneMotorCommand, Mode,
};
use robomsg::messages::geometry::{Homography, Quaternion, Vector3};
use robomsg::messages::sensors::{Attitude, BatteryState, Image, Imu};
use robomsg::messages::simulation::{WorldInput, WorldOutput};
use robomsg::messages::standard::{Header, Text};
use robomsg::{DefaultCache, ImageArray, JsonCodec, Message, RawMap, RawValue};

// ============================================================================
// Helpers
// ============================================================================

fn assert_round_trip<M: Message>(message: &M, cache: &DefaultCache) {
    let raw = message.to_raw();
    let again = M::from_raw_in(&raw, cache).unwrap();
    assert_eq!(&again, message);
    assert_eq!(again.to_raw(), raw);

    let codec = JsonCodec::new();
    let text = codec.encode_message(message, false).unwrap();
    let decoded: M = codec.decode_message_in(&text, cache).unwrap();
    assert_eq!(&decoded, message);
}

fn build<M: Message>(json: &str, cache: &DefaultCache) -> M {
    M::from_raw_in(&raw_json(json), cache).unwrap()
}

// ============================================================================
// Catalogue
// ============================================================================

#[test]
fn test_standard_round_trip() {
    let cache = DefaultCache::new();
    let header: Header = build(
        r#"{"version": "2.0.1", "frame": "/base", "txt": {"k": [1, "v"]}, "timestamp": 12.5}"#,
        &cache,
    );
    assert_round_trip(&header, &cache);
    assert_round_trip(&build::<Header>("{}", &cache), &cache);
    assert_round_trip(&build::<Text>(r#"{"data": ""}"#, &cache), &cache);
}

#[test]
fn test_geometry_round_trip() {
    let cache = DefaultCache::new();
    assert_round_trip(&build::<Vector3>(r#"{"x": 1e-9, "y": -2, "z": 3.25}"#, &cache), &cache);
    assert_round_trip(&build::<Quaternion>(r#"{"x": -1, "w": 1}"#, &cache), &cache);
    assert_round_trip(
        &build::<Homography>(r#"{"data": [1, 0, 0, 0, 1, 0, 0.001, 0, 1]}"#, &cache),
        &cache,
    );
}

#[test]
fn test_sensor_round_trip() {
    let cache = DefaultCache::new();
    assert_round_trip(
        &build::<Attitude>(r#"{"roll": 0.1, "pitch": 0.2, "yaw": 0.3}"#, &cache),
        &cache,
    );
    assert_round_trip(
        &build::<BatteryState>(r#"{"voltage": 12.6, "present": false}"#, &cache),
        &cache,
    );
    assert_round_trip(
        &build::<Imu>(
            r#"{"orientation": {"z": 0.7071, "w": 0.7071}, "linear_acceleration": {"z": 9.81}}"#,
            &cache,
        ),
        &cache,
    );

    let image = ImageArray::from_u8(2, 3, 3, (0..18).collect()).unwrap();
    let raw = RawMap::new().with("image", image.to_raw());
    let message = Image::from_raw_in(&raw, &cache).unwrap();
    assert_round_trip(&message, &cache);
    assert_eq!(message.image().as_bytes(), image.as_bytes());
}

#[test]
fn test_actuator_round_trip() {
    let cache = DefaultCache::new();
    assert_round_trip(
        &build::<DroneControl>(
            r#"{"roll": 1500, "pitch": 1500, "yaw": 1500, "throttle": 1100}"#,
            &cache,
        ),
        &cache,
    );

    let mode: DroneMode = build(r#"{"mode": 2}"#, &cache);
    assert_eq!(mode.mode(), Mode::Flying);
    assert_round_trip(&mode, &cache);

    assert_round_trip(
        &build::<DroneMotorCommand>(
            r#"{"minimum": 1000, "maximum": 2000, "m1": 1, "m2": 2, "m3": 3, "m4": 4}"#,
            &cache,
        ),
        &cache,
    );
}

#[test]
fn test_world_input_round_trip() {
    let cache = DefaultCache::new();
    let depth = ImageArray::from_u16(1, 2, 1, &[0, 65535]).unwrap();
    let raw = RawMap::new()
        .with("image", RawMap::new().with("image", depth.to_raw()))
        .with(
            "imus",
            RawMap::new()
                .with("front", RawMap::new())
                .with("rear", RawMap::new().with("angular_velocity", RawMap::new().with("z", 1))),
        )
        .with("right_encoder_ticks", 42);
    let input = WorldInput::from_raw_in(&raw, &cache).unwrap();
    assert_eq!(input.imus().unwrap().len(), 2);
    assert_eq!(input.right_encoder_ticks(), Some(42));
    assert_eq!(input.left_encoder_ticks(), None);
    assert_round_trip(&input, &cache);
}

#[test]
fn test_world_output_round_trip() {
    let cache = DefaultCache::new();
    assert_round_trip(&build::<DifferentialPwm>(r#"{"left": -0.25, "right": 1}"#, &cache), &cache);

    let output: WorldOutput = build(
        r#"{"differential_pwm": {"left": 0.5, "right": 0.5}, "state_reset_flag": true}"#,
        &cache,
    );
    assert!(output.wants_reset());
    assert_round_trip(&output, &cache);
    assert_round_trip(&build::<WorldOutput>("{}", &cache), &cache);
}

#[test]
fn test_three_level_round_trip() {
    let cache = DefaultCache::new();
    let msg: Lvl1 = build(r#"{"lvl2": {"lvl3": {"some_dict": {"nested": {"deep": 1}}}}}"#, &cache);
    assert_round_trip(&msg, &cache);
}

// ============================================================================
// Raw Form Details
// ============================================================================

#[test]
fn test_absent_and_falsy_are_distinct() {
    let cache = DefaultCache::new();
    let absent: Header = build("{}", &cache);
    let empty: Header = build(r#"{"frame": ""}"#, &cache);
    assert_ne!(absent, empty);
    assert_eq!(absent.to_raw().get("frame"), Some(&RawValue::Null));
    assert_eq!(empty.to_raw().get("frame"), Some(&RawValue::from("")));
}

#[test]
fn test_raw_fields_in_declaration_order() {
    let cache = DefaultCache::new();
    let imu: Imu = build("{}", &cache);
    let keys: Vec<_> = imu.to_raw().keys().map(str::to_string).collect();
    assert_eq!(
        keys,
        vec![
            "header",
            "orientation",
            "orientation_covariance",
            "angular_velocity",
            "angular_velocity_covariance",
            "linear_acceleration",
            "linear_acceleration_covariance",
        ]
    );
}

#[test]
fn test_fixture_documents_decode() {
    let cache = DefaultCache::new();
    let codec = JsonCodec::new();

    let text = std::fs::read_to_string(fixture_path("imu_valid.json")).unwrap();
    let imu: Imu = codec.decode_message_in(&text, &cache).unwrap();
    assert_eq!(imu.header().frame(), Some("/imu_link"));
    assert_round_trip(&imu, &cache);

    let text = std::fs::read_to_string(fixture_path("image_depth.json")).unwrap();
    let image: Image = codec.decode_message_in(&text, &cache).unwrap();
    assert_eq!(image.image().samples_u16().unwrap(), vec![1, 256, 4660, 65535]);
    assert_round_trip(&image, &cache);
}

// ============================================================================
// Interchange Edge Cases
// ============================================================================

#[test]
fn test_bytes_in_untyped_field_survive_json() {
    let cache = DefaultCache::new();
    let txt = RawMap::new()
        .with("blob", vec![0xde_u8, 0xad])
        .with("frames", vec![RawValue::Bytes(vec![]), RawValue::Bytes(vec![0xff])]);
    let header = Header::builder().set("txt", txt.clone()).build_in(&cache).unwrap();
    assert_round_trip(&header, &cache);

    let codec = JsonCodec::new();
    let text = codec.encode_message(&header, false).unwrap();
    assert!(text.contains(r#""blob":{"$bytes":"dead"}"#));
    let decoded: Header = codec.decode_message_in(&text, &cache).unwrap();
    assert_eq!(decoded.txt(), Some(&txt));

    // Untyped decoding keeps the bytes too.
    let raw = codec.decode(&text).unwrap();
    assert_eq!(raw.get("txt"), Some(&RawValue::Map(txt)));
}

#[test]
fn test_non_finite_floats_never_validate() {
    let cache = DefaultCache::new();
    let err = Header::builder()
        .set("timestamp", f64::NAN)
        .build_in(&cache)
        .unwrap_err();
    assert_eq!(err.paths(), vec!["timestamp"]);

    let err = Vector3::from_raw_in(&RawMap::new().with("y", f64::INFINITY), &cache).unwrap_err();
    assert_eq!(err.paths(), vec!["y"]);

    let txt = RawMap::new().with("gain", f64::NEG_INFINITY);
    let err = Header::builder().set("txt", txt).build_in(&cache).unwrap_err();
    assert_eq!(err.paths(), vec!["txt.gain"]);
}
