// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Sensor readings.

pub mod attitude;
pub mod battery;
pub mod image;
pub mod imu;

pub use attitude::Attitude;
pub use battery::BatteryState;
pub use image::Image;
pub use imu::Imu;
