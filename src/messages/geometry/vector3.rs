// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

use std::sync::OnceLock;

use crate::core::{FieldRef, Message, ValidationError};
use crate::schema::{FieldDescriptor, FieldType, MessageSchema};
use crate::validate::ValidatedFields;

/// Three-component vector. Every component defaults to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector3 {
    x: f64,
    y: f64,
    z: f64,
}

impl Vector3 {
    /// X component.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y component.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Z component.
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl Message for Vector3 {
    fn schema() -> &'static MessageSchema {
        static SCHEMA: OnceLock<MessageSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            MessageSchema::new("geometry/Vector3")
                .field(FieldDescriptor::new("x", FieldType::Float).default_value(0.0))
                .field(FieldDescriptor::new("y", FieldType::Float).default_value(0.0))
                .field(FieldDescriptor::new("z", FieldType::Float).default_value(0.0))
        })
    }

    fn from_fields(mut fields: ValidatedFields) -> Result<Self, ValidationError> {
        Ok(Self {
            x: fields.take_f64("x")?,
            y: fields.take_f64("y")?,
            z: fields.take_f64("z")?,
        })
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "x" => Some(FieldRef::value(self.x)),
            "y" => Some(FieldRef::value(self.y)),
            "z" => Some(FieldRef::value(self.z)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_norm() {
        let v = Vector3::builder().set("x", 3).set("y", 4).build().unwrap();
        assert_eq!(v.norm(), 5.0);
    }
}
