// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Output of a successful validation pass.
//!
//! [`ValidatedFields`] holds one [`FieldValue`] per declared field, in
//! declaration order, with defaults already applied. Message types move the
//! values out with the typed `take_*` accessors in
//! [`Message::from_fields`](crate::Message::from_fields).
//!
//! The accessors can only fail when a message type's struct disagrees with
//! its own descriptor table; they report that as a violation at the field
//! instead of panicking.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::{join_path, Message, RawMap, RawValue, ValidationError, Violation};
use crate::defaults::SharedDefault;
use crate::encoding::ImageArray;

/// A validated field value.
#[derive(Debug, Clone)]
pub enum FieldValue {
    /// Scalar, absence marker, or unchecked value
    Raw(RawValue),
    /// Validated array elements
    List(Vec<FieldValue>),
    /// Validated mapping entries in input order
    Map(Vec<(String, FieldValue)>),
    /// Validated nested message
    Message(ValidatedFields),
    /// Shared instance from the default cache
    Shared(SharedDefault),
    /// Validated image payload
    Image(ImageArray),
}

impl FieldValue {
    /// Short kind name used in extraction errors.
    fn kind(&self) -> &'static str {
        match self {
            FieldValue::Raw(value) => value.type_name(),
            FieldValue::List(_) => "array",
            FieldValue::Map(_) => "mapping",
            FieldValue::Message(_) => "message",
            FieldValue::Shared(_) => "shared default",
            FieldValue::Image(_) => "image",
        }
    }

    /// Convert back into the raw representation.
    ///
    /// Returns `None` for shared defaults, which only a typed extractor can
    /// interpret.
    pub fn into_raw(self) -> Option<RawValue> {
        match self {
            FieldValue::Raw(value) => Some(value),
            FieldValue::List(items) => items
                .into_iter()
                .map(FieldValue::into_raw)
                .collect::<Option<Vec<_>>>()
                .map(RawValue::Array),
            FieldValue::Map(entries) => {
                let mut map = RawMap::with_capacity(entries.len());
                for (key, value) in entries {
                    map.insert(key, value.into_raw()?);
                }
                Some(RawValue::Map(map))
            }
            FieldValue::Message(fields) => fields.into_raw_map().map(RawValue::Map),
            FieldValue::Shared(_) => None,
            FieldValue::Image(image) => Some(image.to_raw()),
        }
    }

    fn is_null(&self) -> bool {
        matches!(self, FieldValue::Raw(RawValue::Null))
    }
}

/// Field values of one validated message, in declaration order.
#[derive(Debug, Clone)]
pub struct ValidatedFields {
    type_name: &'static str,
    entries: Vec<(&'static str, FieldValue)>,
}

impl ValidatedFields {
    pub(crate) fn new(type_name: &'static str, entries: Vec<(&'static str, FieldValue)>) -> Self {
        Self { type_name, entries }
    }

    /// Name of the validated message type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Number of remaining fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if every field has been taken.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrow a field value.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Convert all remaining fields back into a raw mapping.
    pub fn into_raw_map(self) -> Option<RawMap> {
        let mut map = RawMap::with_capacity(self.entries.len());
        for (name, value) in self.entries {
            map.insert(name, value.into_raw()?);
        }
        Some(map)
    }

    fn mismatch(&self, name: &str, expected: &str, found: &str) -> ValidationError {
        ValidationError::single(self.type_name, Violation::type_mismatch(name, expected, found))
    }

    /// Move a field value out.
    pub fn take(&mut self, name: &str) -> Result<FieldValue, ValidationError> {
        match self.entries.iter().position(|(n, _)| *n == name) {
            Some(index) => Ok(self.entries.remove(index).1),
            None => Err(ValidationError::single(self.type_name, Violation::missing(name))),
        }
    }

    /// Move a field out as a raw value.
    pub fn take_raw(&mut self, name: &str) -> Result<RawValue, ValidationError> {
        let value = self.take(name)?;
        let kind = value.kind();
        value
            .into_raw()
            .ok_or_else(|| self.mismatch(name, "raw value", kind))
    }

    fn take_opt_raw(&mut self, name: &str) -> Result<Option<RawValue>, ValidationError> {
        match self.take_raw(name)? {
            RawValue::Null => Ok(None),
            value => Ok(Some(value)),
        }
    }

    pub fn take_bool(&mut self, name: &str) -> Result<bool, ValidationError> {
        let value = self.take_raw(name)?;
        value
            .as_bool()
            .ok_or_else(|| self.mismatch(name, "bool", value.type_name()))
    }

    pub fn take_opt_bool(&mut self, name: &str) -> Result<Option<bool>, ValidationError> {
        match self.take_opt_raw(name)? {
            None => Ok(None),
            Some(value) => value
                .as_bool()
                .map(Some)
                .ok_or_else(|| self.mismatch(name, "bool", value.type_name())),
        }
    }

    pub fn take_i64(&mut self, name: &str) -> Result<i64, ValidationError> {
        let value = self.take_raw(name)?;
        value
            .as_i64()
            .ok_or_else(|| self.mismatch(name, "int", value.type_name()))
    }

    pub fn take_opt_i64(&mut self, name: &str) -> Result<Option<i64>, ValidationError> {
        match self.take_opt_raw(name)? {
            None => Ok(None),
            Some(value) => value
                .as_i64()
                .map(Some)
                .ok_or_else(|| self.mismatch(name, "int", value.type_name())),
        }
    }

    pub fn take_f64(&mut self, name: &str) -> Result<f64, ValidationError> {
        let value = self.take_raw(name)?;
        value
            .as_f64()
            .ok_or_else(|| self.mismatch(name, "float", value.type_name()))
    }

    pub fn take_opt_f64(&mut self, name: &str) -> Result<Option<f64>, ValidationError> {
        match self.take_opt_raw(name)? {
            None => Ok(None),
            Some(value) => value
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.mismatch(name, "float", value.type_name())),
        }
    }

    pub fn take_string(&mut self, name: &str) -> Result<String, ValidationError> {
        match self.take_raw(name)? {
            RawValue::String(s) => Ok(s),
            other => Err(self.mismatch(name, "string", other.type_name())),
        }
    }

    pub fn take_opt_string(&mut self, name: &str) -> Result<Option<String>, ValidationError> {
        match self.take_opt_raw(name)? {
            None => Ok(None),
            Some(RawValue::String(s)) => Ok(Some(s)),
            Some(other) => Err(self.mismatch(name, "string", other.type_name())),
        }
    }

    pub fn take_opt_map(&mut self, name: &str) -> Result<Option<RawMap>, ValidationError> {
        match self.take_opt_raw(name)? {
            None => Ok(None),
            Some(RawValue::Map(map)) => Ok(Some(map)),
            Some(other) => Err(self.mismatch(name, "mapping", other.type_name())),
        }
    }

    pub fn take_opt_list(&mut self, name: &str) -> Result<Option<Vec<RawValue>>, ValidationError> {
        match self.take_opt_raw(name)? {
            None => Ok(None),
            Some(RawValue::Array(items)) => Ok(Some(items)),
            Some(other) => Err(self.mismatch(name, "array", other.type_name())),
        }
    }

    /// Move out a list of numbers as floats.
    pub fn take_f64_list(&mut self, name: &str) -> Result<Vec<f64>, ValidationError> {
        match self.take_raw(name)? {
            RawValue::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_f64()
                        .ok_or_else(|| self.mismatch(name, "list[float]", item.type_name()))
                })
                .collect(),
            other => Err(self.mismatch(name, "list[float]", other.type_name())),
        }
    }

    /// Move out an image payload.
    pub fn take_image(&mut self, name: &str) -> Result<ImageArray, ValidationError> {
        match self.take(name)? {
            FieldValue::Image(image) => Ok(image),
            other => Err(self.mismatch(name, "image", other.kind())),
        }
    }

    /// Move out a nested message by value.
    pub fn take_message<T: Message>(&mut self, name: &str) -> Result<T, ValidationError> {
        let value = self.take(name)?;
        self.message_from(name, value)
    }

    /// Move out an optional nested message.
    pub fn take_opt_message<T: Message>(&mut self, name: &str) -> Result<Option<T>, ValidationError> {
        let value = self.take(name)?;
        if value.is_null() {
            return Ok(None);
        }
        self.message_from(name, value).map(Some)
    }

    /// Move out a nested message behind an `Arc`, keeping shared defaults shared.
    pub fn take_shared<T: Message>(&mut self, name: &str) -> Result<Arc<T>, ValidationError> {
        match self.take(name)? {
            FieldValue::Shared(shared) => self.downcast(name, shared),
            FieldValue::Message(fields) => T::from_fields(fields).map(Arc::new),
            other => Err(self.mismatch(name, T::schema().name(), other.kind())),
        }
    }

    /// Move out an optional mapping of nested messages.
    pub fn take_opt_message_map<T: Message>(
        &mut self,
        name: &str,
    ) -> Result<Option<BTreeMap<String, T>>, ValidationError> {
        match self.take(name)? {
            FieldValue::Raw(RawValue::Null) => Ok(None),
            FieldValue::Map(entries) => {
                let mut out = BTreeMap::new();
                for (key, value) in entries {
                    let message = self.message_from(&join_path(name, &key), value)?;
                    out.insert(key, message);
                }
                Ok(Some(out))
            }
            other => Err(self.mismatch(name, "mapping", other.kind())),
        }
    }

    fn message_from<T: Message>(&self, name: &str, value: FieldValue) -> Result<T, ValidationError> {
        match value {
            FieldValue::Message(fields) => T::from_fields(fields),
            FieldValue::Shared(shared) => self
                .downcast::<T>(name, shared)
                .map(|arc| Arc::unwrap_or_clone(arc)),
            other => Err(self.mismatch(name, T::schema().name(), other.kind())),
        }
    }

    fn downcast<T: Message>(&self, name: &str, shared: SharedDefault) -> Result<Arc<T>, ValidationError> {
        shared
            .downcast::<T>()
            .map_err(|_| self.mismatch(name, T::schema().name(), "shared default of another type"))
    }
}
