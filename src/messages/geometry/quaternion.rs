// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Orientation as a unit quaternion.

use std::sync::OnceLock;

use crate::core::{FieldRef, Message, ValidationError};
use crate::schema::{FieldDescriptor, FieldType, MessageSchema};
use crate::validate::ValidatedFields;

/// Orientation quaternion. Components lie in `[-1, 1]`; the default is the
/// identity rotation `(0, 0, 0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    x: f64,
    y: f64,
    z: f64,
    w: f64,
}

fn component(name: &'static str, default: f64) -> FieldDescriptor {
    FieldDescriptor::new(name, FieldType::Float)
        .default_value(default)
        .range(-1.0, 1.0)
}

impl Quaternion {
    /// X component of the vector part.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y component of the vector part.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Z component of the vector part.
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Scalar part.
    pub fn w(&self) -> f64 {
        self.w
    }
}

impl Message for Quaternion {
    fn schema() -> &'static MessageSchema {
        static SCHEMA: OnceLock<MessageSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            MessageSchema::new("geometry/Quaternion")
                .field(component("x", 0.0))
                .field(component("y", 0.0))
                .field(component("z", 0.0))
                .field(component("w", 1.0))
        })
    }

    fn from_fields(mut fields: ValidatedFields) -> Result<Self, ValidationError> {
        Ok(Self {
            x: fields.take_f64("x")?,
            y: fields.take_f64("y")?,
            z: fields.take_f64("z")?,
            w: fields.take_f64("w")?,
        })
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        let value = match name {
            "x" => self.x,
            "y" => self.y,
            "z" => self.z,
            "w" => self.w,
            _ => return None,
        };
        Some(FieldRef::value(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{RawMap, ViolationKind};

    #[test]
    fn test_identity_default() {
        let q = Quaternion::from_raw(&RawMap::new()).unwrap();
        assert_eq!((q.x(), q.y(), q.z(), q.w()), (0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let raw = RawMap::new()
            .with("x", -1.0)
            .with("y", 1.0)
            .with("z", 1)
            .with("w", -1);
        assert!(Quaternion::from_raw(&raw).is_ok());
    }

    #[test]
    fn test_every_component_checked() {
        let raw = RawMap::new()
            .with("x", 1.5)
            .with("y", -1.5)
            .with("z", 0.5)
            .with("w", 2);
        let err = Quaternion::from_raw(&raw).unwrap_err();
        assert_eq!(err.paths(), vec!["x", "y", "w"]);
        assert!(err
            .violations()
            .iter()
            .all(|v| matches!(v.kind, ViolationKind::OutOfRange { .. })));
    }
}
