// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Duty cycles for a differential-drive base.

use std::sync::{Arc, OnceLock};

use crate::core::{FieldRef, Message, ValidationError};
use crate::messages::standard::{header_field, Header};
use crate::schema::{FieldDescriptor, FieldType, MessageSchema};
use crate::validate::ValidatedFields;

fn wheel(name: &'static str) -> FieldDescriptor {
    FieldDescriptor::new(name, FieldType::Float)
        .default_value(0.0)
        .range(-1.0, 1.0)
        .describe("Signed duty cycle, negative drives backwards")
}

/// Left and right wheel duty cycles in `[-1, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DifferentialPwm {
    header: Arc<Header>,
    left: f64,
    right: f64,
}

impl DifferentialPwm {
    /// Message metadata.
    pub fn header(&self) -> &Arc<Header> {
        &self.header
    }

    /// Left wheel duty cycle.
    pub fn left(&self) -> f64 {
        self.left
    }

    /// Right wheel duty cycle.
    pub fn right(&self) -> f64 {
        self.right
    }

    /// Check whether both wheels are stopped.
    pub fn is_stopped(&self) -> bool {
        self.left == 0.0 && self.right == 0.0
    }
}

impl Message for DifferentialPwm {
    fn schema() -> &'static MessageSchema {
        static SCHEMA: OnceLock<MessageSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            MessageSchema::new("actuators/DifferentialPwm")
                .field(header_field())
                .field(wheel("left"))
                .field(wheel("right"))
        })
    }

    fn from_fields(mut fields: ValidatedFields) -> Result<Self, ValidationError> {
        Ok(Self {
            header: fields.take_shared("header")?,
            left: fields.take_f64("left")?,
            right: fields.take_f64("right")?,
        })
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "header" => Some(FieldRef::Message(self.header.as_ref())),
            "left" => Some(FieldRef::value(self.left)),
            "right" => Some(FieldRef::value(self.right)),
            _ => None,
        }
    }
}
