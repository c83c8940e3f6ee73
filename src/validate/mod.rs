// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema validation.
//!
//! [`validate`] is the single construction gate for every message type. It
//! walks a [`MessageSchema`] in declaration order and, for each field:
//!
//! - type-checks a supplied value and runs its constraints,
//! - applies the field default when the value is absent (shared defaults come
//!   from the [`DefaultCache`]),
//! - records a `Missing` violation when there is neither value nor default.
//!
//! Nested messages, list elements and mapping entries are checked
//! recursively with dotted paths (`imus.left.orientation.w`). The pass never
//! stops early: it returns every violation, or a complete [`ValidatedFields`].
//!
//! A `null` value counts as absence. Optional fields keep it as `null`; other
//! fields fall back to their default.

mod fields;

pub use fields::{FieldValue, ValidatedFields};

use crate::core::{join_path, RawMap, RawValue, ValidationError, Violation, ViolationKind};
use crate::defaults::DefaultCache;
use crate::encoding::ImageArray;
use crate::schema::{FieldDefault, FieldDescriptor, FieldType, MessageSchema};

/// Validate `raw` against `schema`.
///
/// # Errors
///
/// Returns a [`ValidationError`] carrying every violation found, in field
/// declaration order, with nested violations addressed by dotted path.
pub fn validate(
    schema: &'static MessageSchema,
    raw: &RawMap,
    cache: &DefaultCache,
) -> Result<ValidatedFields, ValidationError> {
    let mut validator = Validator {
        cache,
        violations: Vec::new(),
    };
    let fields = validator.message(schema, raw, "");
    if validator.violations.is_empty() {
        Ok(fields)
    } else {
        Err(ValidationError::new(schema.name(), validator.violations))
    }
}

/// One validation pass; collects violations instead of returning early.
struct Validator<'a> {
    cache: &'a DefaultCache,
    violations: Vec<Violation>,
}

impl Validator<'_> {
    fn message(&mut self, schema: &'static MessageSchema, raw: &RawMap, prefix: &str) -> ValidatedFields {
        let mut entries = Vec::with_capacity(schema.field_count());

        for field in schema.fields() {
            let path = join_path(prefix, field.name());
            let value = match raw.get(field.name()) {
                Some(value) if !value.is_null() => self.supplied(field, value, &path),
                Some(_) if field.is_optional() => FieldValue::Raw(RawValue::Null),
                _ => self.absent(field, &path),
            };
            entries.push((field.name(), value));
        }

        if schema.denies_unknown_fields() {
            for key in raw.keys() {
                if schema.get_field(key).is_none() {
                    self.violations
                        .push(Violation::new(join_path(prefix, key), ViolationKind::UnknownField));
                }
            }
        }

        ValidatedFields::new(schema.name(), entries)
    }

    /// Check a supplied value, then its constraints if the type matched.
    fn supplied(&mut self, field: &FieldDescriptor, value: &RawValue, path: &str) -> FieldValue {
        let before = self.violations.len();
        let checked = self.value(field.field_type(), value, path);
        if self.violations.len() == before {
            for constraint in field.constraints() {
                if let Some(violation) = constraint.check(path, value) {
                    self.violations.push(violation);
                }
            }
        }
        checked
    }

    /// Report every NaN or infinite float inside an unchecked value.
    fn finite(&mut self, value: &RawValue, path: &str) {
        match value {
            RawValue::Float(f) if !f.is_finite() => {
                self.violations.push(Violation::new(path, ViolationKind::NonFinite));
            }
            RawValue::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    self.finite(item, &join_path(path, &i.to_string()));
                }
            }
            RawValue::Map(map) => {
                for (key, item) in map.iter() {
                    self.finite(item, &join_path(path, key));
                }
            }
            _ => {}
        }
    }

    fn absent(&mut self, field: &FieldDescriptor, path: &str) -> FieldValue {
        match field.field_default() {
            Some(FieldDefault::Literal(value)) => self.supplied(field, value, path),
            Some(FieldDefault::Factory(factory)) => {
                let value = factory();
                self.supplied(field, &value, path)
            }
            Some(FieldDefault::Shared(kind)) => match self.cache.get(*kind) {
                Ok(shared) => FieldValue::Shared(shared),
                Err(err) => {
                    self.violations.extend(
                        err.into_violations()
                            .into_iter()
                            .map(|v| v.nested_under(path)),
                    );
                    FieldValue::Raw(RawValue::Null)
                }
            },
            None if field.is_optional() => FieldValue::Raw(RawValue::Null),
            None => {
                self.violations.push(Violation::missing(path));
                FieldValue::Raw(RawValue::Null)
            }
        }
    }

    fn value(&mut self, field_type: &FieldType, value: &RawValue, path: &str) -> FieldValue {
        match (field_type, value) {
            (FieldType::Float, RawValue::Float(f)) if !f.is_finite() => {
                self.violations.push(Violation::new(path, ViolationKind::NonFinite));
                FieldValue::Raw(RawValue::Null)
            }

            (FieldType::Any, _) => {
                self.finite(value, path);
                FieldValue::Raw(value.clone())
            }

            (FieldType::Bool, RawValue::Bool(_))
            | (FieldType::Int, RawValue::Int(_))
            | (FieldType::Float, RawValue::Float(_))
            | (FieldType::String, RawValue::String(_))
            | (FieldType::Bytes, RawValue::Bytes(_)) => FieldValue::Raw(value.clone()),

            (FieldType::Float, RawValue::Int(i)) => FieldValue::Raw(RawValue::Float(*i as f64)),

            (FieldType::List(elem), RawValue::Array(items)) => FieldValue::List(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.value(elem, item, &join_path(path, &i.to_string())))
                    .collect(),
            ),

            (FieldType::Map(elem), RawValue::Map(map)) => FieldValue::Map(
                map.iter()
                    .map(|(key, item)| {
                        let checked = self.value(elem, item, &join_path(path, key));
                        (key.to_string(), checked)
                    })
                    .collect(),
            ),

            (FieldType::Message(schema), RawValue::Map(map)) => {
                FieldValue::Message(self.message(schema(), map, path))
            }

            (FieldType::Image, _) => match ImageArray::from_raw(value) {
                Ok(image) => FieldValue::Image(image),
                Err(violations) => {
                    self.violations
                        .extend(violations.into_iter().map(|v| v.nested_under(path)));
                    FieldValue::Raw(RawValue::Null)
                }
            },

            _ => {
                self.violations
                    .push(Violation::type_mismatch(path, field_type.name(), value.type_name()));
                FieldValue::Raw(RawValue::Null)
            }
        }
    }
}
