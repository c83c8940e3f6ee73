// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

use std::sync::{Arc, OnceLock};

use crate::core::{FieldRef, Message, ValidationError};
use crate::messages::standard::{header_field, Header};
use crate::schema::{FieldDescriptor, FieldType, MessageSchema};
use crate::validate::ValidatedFields;

/// Roll, pitch and yaw angles.
#[derive(Debug, Clone, PartialEq)]
pub struct Attitude {
    header: Arc<Header>,
    roll: f64,
    pitch: f64,
    yaw: f64,
}

impl Attitude {
    /// Message metadata.
    pub fn header(&self) -> &Arc<Header> {
        &self.header
    }

    /// Rotation about the x axis.
    pub fn roll(&self) -> f64 {
        self.roll
    }

    /// Rotation about the y axis.
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Rotation about the z axis.
    pub fn yaw(&self) -> f64 {
        self.yaw
    }
}

impl Message for Attitude {
    fn schema() -> &'static MessageSchema {
        static SCHEMA: OnceLock<MessageSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            MessageSchema::new("sensors/Attitude")
                .field(header_field())
                .field(FieldDescriptor::new("roll", FieldType::Float))
                .field(FieldDescriptor::new("pitch", FieldType::Float))
                .field(FieldDescriptor::new("yaw", FieldType::Float))
        })
    }

    fn from_fields(mut fields: ValidatedFields) -> Result<Self, ValidationError> {
        Ok(Self {
            header: fields.take_shared("header")?,
            roll: fields.take_f64("roll")?,
            pitch: fields.take_f64("pitch")?,
            yaw: fields.take_f64("yaw")?,
        })
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "header" => Some(FieldRef::Message(self.header.as_ref())),
            "roll" => Some(FieldRef::value(self.roll)),
            "pitch" => Some(FieldRef::value(self.pitch)),
            "yaw" => Some(FieldRef::value(self.yaw)),
            _ => None,
        }
    }
}
