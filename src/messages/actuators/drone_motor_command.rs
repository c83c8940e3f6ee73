// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

use std::sync::{Arc, OnceLock};

use crate::core::{FieldRef, Message, ValidationError};
use crate::messages::standard::{header_field, Header};
use crate::schema::{FieldDescriptor, FieldType, MessageSchema};
use crate::validate::ValidatedFields;

const MOTORS: [&str; 4] = ["m1", "m2", "m3", "m4"];

/// Per-motor PWM commands, with the flight controller's accepted range.
#[derive(Debug, Clone, PartialEq)]
pub struct DroneMotorCommand {
    header: Arc<Header>,
    minimum: i64,
    maximum: i64,
    motors: [i64; 4],
}

impl DroneMotorCommand {
    /// Message metadata.
    pub fn header(&self) -> &Arc<Header> {
        &self.header
    }

    /// Lower end of the PWM range.
    pub fn minimum(&self) -> i64 {
        self.minimum
    }

    /// Upper end of the PWM range.
    pub fn maximum(&self) -> i64 {
        self.maximum
    }

    /// Commands for motors 1 to 4.
    pub fn motors(&self) -> [i64; 4] {
        self.motors
    }

    /// Check whether every motor command lies within `[minimum, maximum]`.
    pub fn within_range(&self) -> bool {
        self.motors
            .iter()
            .all(|m| (self.minimum..=self.maximum).contains(m))
    }
}

impl Message for DroneMotorCommand {
    fn schema() -> &'static MessageSchema {
        static SCHEMA: OnceLock<MessageSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            let schema = MessageSchema::new("actuators/DroneMotorCommand")
                .field(header_field())
                .field(FieldDescriptor::new("minimum", FieldType::Int))
                .field(FieldDescriptor::new("maximum", FieldType::Int));
            MOTORS
                .iter()
                .fold(schema, |s, &m| s.field(FieldDescriptor::new(m, FieldType::Int)))
        })
    }

    fn from_fields(mut fields: ValidatedFields) -> Result<Self, ValidationError> {
        let header = fields.take_shared("header")?;
        let minimum = fields.take_i64("minimum")?;
        let maximum = fields.take_i64("maximum")?;
        let mut motors = [0; 4];
        for (slot, name) in motors.iter_mut().zip(MOTORS) {
            *slot = fields.take_i64(name)?;
        }
        Ok(Self {
            header,
            minimum,
            maximum,
            motors,
        })
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "header" => Some(FieldRef::Message(self.header.as_ref())),
            "minimum" => Some(FieldRef::value(self.minimum)),
            "maximum" => Some(FieldRef::value(self.maximum)),
            _ => MOTORS
                .iter()
                .position(|m| *m == name)
                .map(|i| FieldRef::value(self.motors[i])),
        }
    }
}
