// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

use std::sync::{Arc, OnceLock};

use super::header::{header_field, Header};
use crate::core::{FieldRef, Message, ValidationError};
use crate::schema::{FieldDescriptor, FieldType, MessageSchema};
use crate::validate::ValidatedFields;

/// Plain string payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    header: Arc<Header>,
    data: String,
}

impl Text {
    /// Message metadata.
    pub fn header(&self) -> &Arc<Header> {
        &self.header
    }

    /// Text payload.
    pub fn data(&self) -> &str {
        &self.data
    }
}

impl Message for Text {
    fn schema() -> &'static MessageSchema {
        static SCHEMA: OnceLock<MessageSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            MessageSchema::new("standard/Text")
                .field(header_field())
                .field(FieldDescriptor::new("data", FieldType::String).describe("String payload"))
        })
    }

    fn from_fields(mut fields: ValidatedFields) -> Result<Self, ValidationError> {
        Ok(Self {
            header: fields.take_shared("header")?,
            data: fields.take_string("data")?,
        })
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "header" => Some(FieldRef::Message(self.header.as_ref())),
            "data" => Some(FieldRef::value(self.data.as_str())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RawMap;
    use crate::defaults::DefaultCache;

    #[test]
    fn test_data_required() {
        let cache = DefaultCache::new();
        let err = Text::from_raw_in(&RawMap::new(), &cache).unwrap_err();
        assert_eq!(err.paths(), vec!["data"]);
        assert_eq!(err.type_name(), "standard/Text");
    }

    #[test]
    fn test_supplied_header_is_not_shared() {
        let cache = DefaultCache::new();
        let raw = RawMap::new()
            .with("data", "hello")
            .with("header", RawMap::new().with("frame", "/cam"));
        let text = Text::from_raw_in(&raw, &cache).unwrap();
        assert_eq!(text.data(), "hello");
        assert_eq!(text.header().frame(), Some("/cam"));
        assert!(!cache.is_initialized(crate::defaults::DefaultKind::Header));
    }
}
