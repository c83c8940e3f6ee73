// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inertial measurement unit reading.
//!
//! Covariances are row-major 3x3 matrices flattened to nine entries and
//! default to all zeros ("unknown").

use std::sync::{Arc, OnceLock};

use crate::core::{FieldRef, Message, RawMap, RawValue, ValidationError};
use crate::messages::geometry::{Quaternion, Vector3};
use crate::messages::standard::{header_field, Header};
use crate::schema::{FieldDescriptor, FieldType, MessageSchema};
use crate::validate::ValidatedFields;

/// Entries in a flattened 3x3 covariance matrix.
pub const COVARIANCE_LEN: usize = 9;

fn zero_covariance() -> RawValue {
    RawValue::from(vec![0.0; COVARIANCE_LEN])
}

fn empty_message() -> RawValue {
    RawValue::Map(RawMap::new())
}

fn covariance_len(value: &RawValue) -> Result<(), String> {
    match value.as_array() {
        Some(items) if items.len() != COVARIANCE_LEN => Err(format!(
            "expected {COVARIANCE_LEN} entries, found {}",
            items.len()
        )),
        _ => Ok(()),
    }
}

fn covariance(name: &'static str) -> FieldDescriptor {
    FieldDescriptor::new(name, FieldType::list(FieldType::Float))
        .default_with(zero_covariance)
        .predicate("covariance_len", covariance_len)
}

/// IMU sample: orientation, angular velocity and linear acceleration.
#[derive(Debug, Clone, PartialEq)]
pub struct Imu {
    header: Arc<Header>,
    orientation: Quaternion,
    orientation_covariance: Vec<f64>,
    angular_velocity: Vector3,
    angular_velocity_covariance: Vec<f64>,
    linear_acceleration: Vector3,
    linear_acceleration_covariance: Vec<f64>,
}

impl Imu {
    /// Message metadata.
    pub fn header(&self) -> &Arc<Header> {
        &self.header
    }

    /// Estimated orientation.
    pub fn orientation(&self) -> &Quaternion {
        &self.orientation
    }

    /// Row-major 3x3 covariance of the orientation.
    pub fn orientation_covariance(&self) -> &[f64] {
        &self.orientation_covariance
    }

    /// Angular velocity in rad/s.
    pub fn angular_velocity(&self) -> &Vector3 {
        &self.angular_velocity
    }

    /// Row-major 3x3 covariance of the angular velocity.
    pub fn angular_velocity_covariance(&self) -> &[f64] {
        &self.angular_velocity_covariance
    }

    /// Linear acceleration in m/s^2.
    pub fn linear_acceleration(&self) -> &Vector3 {
        &self.linear_acceleration
    }

    /// Row-major 3x3 covariance of the linear acceleration.
    pub fn linear_acceleration_covariance(&self) -> &[f64] {
        &self.linear_acceleration_covariance
    }
}

impl Message for Imu {
    fn schema() -> &'static MessageSchema {
        static SCHEMA: OnceLock<MessageSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            MessageSchema::new("sensors/Imu")
                .field(header_field())
                .field(
                    FieldDescriptor::new("orientation", FieldType::Message(Quaternion::schema))
                        .default_with(empty_message),
                )
                .field(covariance("orientation_covariance"))
                .field(
                    FieldDescriptor::new("angular_velocity", FieldType::Message(Vector3::schema))
                        .default_with(empty_message),
                )
                .field(covariance("angular_velocity_covariance"))
                .field(
                    FieldDescriptor::new("linear_acceleration", FieldType::Message(Vector3::schema))
                        .default_with(empty_message),
                )
                .field(covariance("linear_acceleration_covariance"))
        })
    }

    fn from_fields(mut fields: ValidatedFields) -> Result<Self, ValidationError> {
        Ok(Self {
            header: fields.take_shared("header")?,
            orientation: fields.take_message("orientation")?,
            orientation_covariance: fields.take_f64_list("orientation_covariance")?,
            angular_velocity: fields.take_message("angular_velocity")?,
            angular_velocity_covariance: fields.take_f64_list("angular_velocity_covariance")?,
            linear_acceleration: fields.take_message("linear_acceleration")?,
            linear_acceleration_covariance: fields.take_f64_list("linear_acceleration_covariance")?,
        })
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "header" => Some(FieldRef::Message(self.header.as_ref())),
            "orientation" => Some(FieldRef::Message(&self.orientation)),
            "orientation_covariance" => Some(FieldRef::value(self.orientation_covariance.clone())),
            "angular_velocity" => Some(FieldRef::Message(&self.angular_velocity)),
            "angular_velocity_covariance" => {
                Some(FieldRef::value(self.angular_velocity_covariance.clone()))
            }
            "linear_acceleration" => Some(FieldRef::Message(&self.linear_acceleration)),
            "linear_acceleration_covariance" => {
                Some(FieldRef::value(self.linear_acceleration_covariance.clone()))
            }
            _ => None,
        }
    }
}
