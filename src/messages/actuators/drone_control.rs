// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Remote-control style drone commands.
//!
//! Each channel is a PWM-like value in `[1000, 2000]`, where 1000 is 0% and
//! 2000 is 100%.

use std::sync::OnceLock;

use crate::core::{FieldRef, Message, ValidationError};
use crate::schema::{FieldDescriptor, FieldType, MessageSchema};
use crate::validate::ValidatedFields;

/// Lowest channel value (0%).
pub const CHANNEL_MIN: f64 = 1000.0;
/// Highest channel value (100%).
pub const CHANNEL_MAX: f64 = 2000.0;

fn channel(name: &'static str) -> FieldDescriptor {
    FieldDescriptor::new(name, FieldType::Float).range(CHANNEL_MIN, CHANNEL_MAX)
}

/// Roll, pitch, yaw rate and throttle commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DroneControl {
    roll: f64,
    pitch: f64,
    yaw: f64,
    throttle: f64,
}

impl DroneControl {
    /// Roll channel.
    pub fn roll(&self) -> f64 {
        self.roll
    }

    /// Pitch channel.
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Yaw rate channel.
    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    /// Throttle channel.
    pub fn throttle(&self) -> f64 {
        self.throttle
    }

    /// Throttle as a fraction in `[0, 1]`.
    pub fn throttle_ratio(&self) -> f64 {
        (self.throttle - CHANNEL_MIN) / (CHANNEL_MAX - CHANNEL_MIN)
    }
}

impl Message for DroneControl {
    fn schema() -> &'static MessageSchema {
        static SCHEMA: OnceLock<MessageSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            MessageSchema::new("actuators/DroneControl")
                .field(channel("roll"))
                .field(channel("pitch"))
                .field(channel("yaw"))
                .field(channel("throttle"))
        })
    }

    fn from_fields(mut fields: ValidatedFields) -> Result<Self, ValidationError> {
        Ok(Self {
            roll: fields.take_f64("roll")?,
            pitch: fields.take_f64("pitch")?,
            yaw: fields.take_f64("yaw")?,
            throttle: fields.take_f64("throttle")?,
        })
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        let value = match name {
            "roll" => self.roll,
            "pitch" => self.pitch,
            "yaw" => self.yaw,
            "throttle" => self.throttle,
            _ => return None,
        };
        Some(FieldRef::value(value))
    }
}
