// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Conversion between messages and the raw representation.
//!
//! `to_raw` walks the descriptor table in declaration order and writes an
//! explicit `Null` for every absent optional field. `from_raw` is the
//! validator followed by typed extraction, so the two are inverse for every
//! valid message.

use crate::core::{DynMessage, Message, RawMap, RawValue, ValidationError};
use crate::defaults::{global_defaults, DefaultCache};
use crate::validate::validate;

/// Convert a message to its raw mapping.
pub fn to_raw<M: Message>(message: &M) -> RawMap {
    to_raw_dyn(message)
}

/// Convert a type-erased message to its raw mapping.
pub fn to_raw_dyn(message: &dyn DynMessage) -> RawMap {
    let schema = message.message_schema();
    let mut raw = RawMap::with_capacity(schema.field_count());
    for field in schema.fields() {
        let value = match message.field_ref(field.name()) {
            Some(field_ref) => field_ref.into_raw(),
            None => {
                debug_assert!(
                    false,
                    "{} declares '{}' but does not expose it",
                    schema.name(),
                    field.name()
                );
                RawValue::Null
            }
        };
        raw.insert(field.name(), value);
    }
    raw
}

/// Validate `raw` and build `M`, using the global default cache.
pub fn from_raw<M: Message>(raw: &RawMap) -> Result<M, ValidationError> {
    from_raw_in(raw, global_defaults())
}

/// Validate `raw` and build `M`, taking shared defaults from `cache`.
pub fn from_raw_in<M: Message>(raw: &RawMap, cache: &DefaultCache) -> Result<M, ValidationError> {
    let fields = validate(M::schema(), raw, cache)?;
    M::from_fields(fields)
}
