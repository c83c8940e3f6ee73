// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Standard message header.
//!
//! Most messages carry a `header` field. When the caller does not supply one,
//! the validator fills in the shared instance from the
//! [`DefaultCache`](crate::defaults::DefaultCache), so thousands of messages
//! built in a loop all point at the same `Arc<Header>`.

use std::sync::{Arc, OnceLock};

use chrono::{DateTime, TimeZone, Utc};

use crate::core::{FieldRef, Message, RawMap, ValidationError};
use crate::defaults::{global_defaults, DefaultKind};
use crate::schema::{FieldDescriptor, FieldType, MessageSchema};
use crate::validate::ValidatedFields;

/// Pattern every header version must match: `MAJOR.MINOR[.PATCH]`.
pub const VERSION_PATTERN: &str = r"^[0-9]+\.[0-9]+(\.[0-9]+)?$";

/// Version used when none is given.
pub const DEFAULT_VERSION: &str = "1.0";

/// Metadata attached to a message.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    version: String,
    frame: Option<String>,
    txt: Option<RawMap>,
    timestamp: Option<f64>,
}

impl Header {
    /// Build a header with the given version and no other data.
    pub fn new(version: &str) -> Result<Self, ValidationError> {
        Self::builder().set("version", version).build()
    }

    /// Build a header with the default version, stamped with the current time.
    pub fn now() -> Result<Self, ValidationError> {
        let now = Utc::now();
        let seconds = now.timestamp() as f64 + f64::from(now.timestamp_subsec_nanos()) * 1e-9;
        Self::builder().set("timestamp", seconds).build()
    }

    /// The shared default header from the global cache.
    pub fn shared_default() -> Result<Arc<Self>, ValidationError> {
        global_defaults().header()
    }

    /// Version of the message this header is attached to.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Reference frame the data was captured in.
    pub fn frame(&self) -> Option<&str> {
        self.frame.as_deref()
    }

    /// Auxiliary data.
    pub fn txt(&self) -> Option<&RawMap> {
        self.txt.as_ref()
    }

    /// Timestamp in seconds since the Unix epoch.
    pub fn timestamp(&self) -> Option<f64> {
        self.timestamp
    }

    /// Timestamp as a UTC date-time, if set and representable.
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        let seconds = self.timestamp?;
        if !seconds.is_finite() {
            return None;
        }
        let whole = seconds.floor();
        let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
        Utc.timestamp_opt(whole as i64, nanos).single()
    }
}

/// Descriptor for a `header` field defaulting to the shared [`Header`].
pub fn header_field() -> FieldDescriptor {
    FieldDescriptor::new("header", FieldType::Message(Header::schema))
        .shared_default(DefaultKind::Header)
        .describe("Message metadata")
}

impl Message for Header {
    fn schema() -> &'static MessageSchema {
        static SCHEMA: OnceLock<MessageSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            MessageSchema::new("standard/Header")
                .field(
                    FieldDescriptor::new("version", FieldType::String)
                        .default_value(DEFAULT_VERSION)
                        .pattern(VERSION_PATTERN)
                        .describe("Version of the message this header is attached to"),
                )
                .field(
                    FieldDescriptor::new("frame", FieldType::String)
                        .optional()
                        .describe("Reference frame this data is captured in"),
                )
                .field(
                    FieldDescriptor::new("txt", FieldType::map(FieldType::Any))
                        .optional()
                        .describe("Auxiliary data attached to the message"),
                )
                .field(
                    FieldDescriptor::new("timestamp", FieldType::Float)
                        .optional()
                        .describe("Timestamp"),
                )
        })
    }

    fn from_fields(mut fields: ValidatedFields) -> Result<Self, ValidationError> {
        Ok(Self {
            version: fields.take_string("version")?,
            frame: fields.take_opt_string("frame")?,
            txt: fields.take_opt_map("txt")?,
            timestamp: fields.take_opt_f64("timestamp")?,
        })
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "version" => Some(FieldRef::value(self.version.as_str())),
            "frame" => Some(FieldRef::value(self.frame.as_deref())),
            "txt" => Some(FieldRef::value(self.txt.clone())),
            "timestamp" => Some(FieldRef::value(self.timestamp)),
            _ => None,
        }
    }
}
