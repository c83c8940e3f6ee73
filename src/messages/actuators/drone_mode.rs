// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

use std::fmt;
use std::sync::OnceLock;

use crate::core::{FieldRef, Message, RawValue, ValidationError, Violation, ViolationKind};
use crate::schema::{FieldDescriptor, FieldType, MessageSchema};
use crate::validate::ValidatedFields;

/// Flight mode of a drone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Disarmed = 0,
    Armed = 1,
    Flying = 2,
}

impl Mode {
    /// Decode the wire value.
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(Mode::Disarmed),
            1 => Some(Mode::Armed),
            2 => Some(Mode::Flying),
            _ => None,
        }
    }

    /// Wire value of the mode.
    pub fn as_i64(&self) -> i64 {
        *self as i64
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Disarmed => "DISARMED",
            Mode::Armed => "ARMED",
            Mode::Flying => "FLYING",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn known_mode(value: &RawValue) -> Result<(), String> {
    match value.as_i64() {
        Some(n) if Mode::from_i64(n).is_none() => Err(format!(
            "unknown mode {n}, expected 0 (DISARMED), 1 (ARMED) or 2 (FLYING)"
        )),
        _ => Ok(()),
    }
}

/// Current flight mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DroneMode {
    mode: Mode,
}

impl DroneMode {
    /// Requested flight mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }
}

impl Message for DroneMode {
    fn schema() -> &'static MessageSchema {
        static SCHEMA: OnceLock<MessageSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            MessageSchema::new("actuators/DroneMode")
                .field(FieldDescriptor::new("mode", FieldType::Int).predicate("known_mode", known_mode))
        })
    }

    fn from_fields(mut fields: ValidatedFields) -> Result<Self, ValidationError> {
        let raw = fields.take_i64("mode")?;
        let mode = Mode::from_i64(raw).ok_or_else(|| {
            ValidationError::single(
                Self::schema().name(),
                Violation::new("mode", ViolationKind::Predicate(format!("unknown mode {raw}"))),
            )
        })?;
        Ok(Self { mode })
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "mode" => Some(FieldRef::value(self.mode.as_i64())),
            _ => None,
        }
    }
}
