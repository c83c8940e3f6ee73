// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use robomsg::messages::standard::{header_field, Header};
use robomsg::schema::{FieldDescriptor, FieldType, MessageSchema};
use robomsg::validate::ValidatedFields;
use robomsg::{FieldRef, JsonCodec, Message, RawMap, ValidationError};

// ============================================================================
// Fixtures
// ============================================================================

/// Path to a file under `tests/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Parse a JSON object into a raw mapping.
pub fn raw_json(json: &str) -> RawMap {
    JsonCodec::new().decode(json).unwrap()
}

// ============================================================================
// Three-level nesting messages
// ============================================================================

/// Innermost level: an arbitrary mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Lvl3 {
    some_dict: RawMap,
}

impl Lvl3 {
    pub fn some_dict(&self) -> &RawMap {
        &self.some_dict
    }
}

impl Message for Lvl3 {
    fn schema() -> &'static MessageSchema {
        static SCHEMA: OnceLock<MessageSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            MessageSchema::new("test/Lvl3")
                .field(FieldDescriptor::new("some_dict", FieldType::map(FieldType::Any)))
        })
    }

    fn from_fields(mut fields: ValidatedFields) -> Result<Self, ValidationError> {
        Ok(Self {
            some_dict: fields.take_opt_map("some_dict")?.unwrap_or_default(),
        })
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "some_dict" => Some(FieldRef::value(self.some_dict.clone())),
            _ => None,
        }
    }
}

/// Middle level: a label plus a nested [`Lvl3`].
#[derive(Debug, Clone, PartialEq)]
pub struct Lvl2 {
    label: String,
    lvl3: Lvl3,
}

impl Lvl2 {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn lvl3(&self) -> &Lvl3 {
        &self.lvl3
    }
}

impl Message for Lvl2 {
    fn schema() -> &'static MessageSchema {
        static SCHEMA: OnceLock<MessageSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            MessageSchema::new("test/Lvl2")
                .field(FieldDescriptor::new("label", FieldType::String).default_value("lvl2"))
                .field(FieldDescriptor::new("lvl3", FieldType::Message(Lvl3::schema)))
        })
    }

    fn from_fields(mut fields: ValidatedFields) -> Result<Self, ValidationError> {
        Ok(Self {
            label: fields.take_string("label")?,
            lvl3: fields.take_message("lvl3")?,
        })
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "label" => Some(FieldRef::value(self.label.as_str())),
            "lvl3" => Some(FieldRef::Message(&self.lvl3)),
            _ => None,
        }
    }
}

/// Outer level: a header and a nested [`Lvl2`].
#[derive(Debug, Clone, PartialEq)]
pub struct Lvl1 {
    header: Arc<Header>,
    lvl2: Lvl2,
}

impl Lvl1 {
    pub fn header(&self) -> &Arc<Header> {
        &self.header
    }

    pub fn lvl2(&self) -> &Lvl2 {
        &self.lvl2
    }
}

impl Message for Lvl1 {
    fn schema() -> &'static MessageSchema {
        static SCHEMA: OnceLock<MessageSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            MessageSchema::new("test/Lvl1")
                .field(header_field())
                .field(FieldDescriptor::new("lvl2", FieldType::Message(Lvl2::schema)))
        })
    }

    fn from_fields(mut fields: ValidatedFields) -> Result<Self, ValidationError> {
        Ok(Self {
            header: fields.take_shared("header")?,
            lvl2: fields.take_message("lvl2")?,
        })
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "header" => Some(FieldRef::Message(self.header.as_ref())),
            "lvl2" => Some(FieldRef::Message(&self.lvl2)),
            _ => None,
        }
    }
}
