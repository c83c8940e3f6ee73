// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

use std::sync::{Arc, OnceLock};

use crate::core::{FieldRef, Message, RawValue, ValidationError};
use crate::messages::standard::{header_field, Header};
use crate::schema::{FieldDescriptor, FieldType, MessageSchema};
use crate::validate::ValidatedFields;

/// Number of entries in a flattened 3x3 matrix.
pub const MATRIX_LEN: usize = 9;

fn is_3x3(value: &RawValue) -> Result<(), String> {
    match value.as_array() {
        Some(items) if items.len() != MATRIX_LEN => Err(format!(
            "expected {MATRIX_LEN} entries, found {}",
            items.len()
        )),
        _ => Ok(()),
    }
}

/// Planar homography, stored as a row-major flattened 3x3 matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Homography {
    header: Arc<Header>,
    data: Vec<f64>,
}

impl Homography {
    /// Message metadata.
    pub fn header(&self) -> &Arc<Header> {
        &self.header
    }

    /// Flattened matrix, row-major.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Matrix entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= 3 || col >= 3 {
            return None;
        }
        self.data.get(row * 3 + col).copied()
    }

    /// Map a point through the homography. `None` if it maps to infinity.
    pub fn apply(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let h = &self.data;
        let w = h[6] * x + h[7] * y + h[8];
        if w == 0.0 {
            return None;
        }
        Some((
            (h[0] * x + h[1] * y + h[2]) / w,
            (h[3] * x + h[4] * y + h[5]) / w,
        ))
    }
}

impl Message for Homography {
    fn schema() -> &'static MessageSchema {
        static SCHEMA: OnceLock<MessageSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            MessageSchema::new("geometry/Homography")
                .field(header_field())
                .field(
                    FieldDescriptor::new("data", FieldType::list(FieldType::Float))
                        .predicate("is_3x3", is_3x3)
                        .describe("Homography matrix (flattened)"),
                )
        })
    }

    fn from_fields(mut fields: ValidatedFields) -> Result<Self, ValidationError> {
        Ok(Self {
            header: fields.take_shared("header")?,
            data: fields.take_f64_list("data")?,
        })
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "header" => Some(FieldRef::Message(self.header.as_ref())),
            "data" => Some(FieldRef::value(self.data.clone())),
            _ => None,
        }
    }
}
