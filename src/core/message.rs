// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message runtime.
//!
//! Every message type implements [`Message`]: it owns a `&'static`
//! [`MessageSchema`], converts validated fields into its struct, and exposes
//! its fields by name so the codec can walk the schema. Construction,
//! serialization and customization come as provided methods and behave the
//! same for every type.
//!
//! Message structs have private fields and getters only. There is no way to
//! change a built message; [`Message::to_builder`] starts a new one from an
//! existing one's values and re-validates everything on `build`.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use super::error::ValidationError;
use super::value::{RawMap, RawValue};
use crate::defaults::{global_defaults, DefaultCache};
use crate::encoding;
use crate::schema::MessageSchema;
use crate::validate::ValidatedFields;

/// A validated, schema-described message type.
pub trait Message: fmt::Debug + Clone + PartialEq + Send + Sync + 'static {
    /// Descriptor table of this type, built once.
    fn schema() -> &'static MessageSchema;

    /// Build the struct from a successful validation pass.
    ///
    /// Only called with fields validated against [`Message::schema`].
    fn from_fields(fields: ValidatedFields) -> Result<Self, ValidationError>;

    /// Borrow a field by its declared name.
    fn field(&self, name: &str) -> Option<FieldRef<'_>>;

    /// Validate `raw` and build a message, using the global default cache.
    fn from_raw(raw: &RawMap) -> Result<Self, ValidationError> {
        Self::from_raw_in(raw, global_defaults())
    }

    /// Validate `raw` and build a message, taking shared defaults from `cache`.
    fn from_raw_in(raw: &RawMap, cache: &DefaultCache) -> Result<Self, ValidationError> {
        encoding::from_raw_in(raw, cache)
    }

    /// Convert to the raw representation, fields in declaration order.
    fn to_raw(&self) -> RawMap {
        encoding::to_raw(self)
    }

    /// Start building a message from scratch.
    fn builder() -> MessageBuilder<Self> {
        MessageBuilder::new()
    }

    /// Start building a new message from this one's values.
    fn to_builder(&self) -> MessageBuilder<Self> {
        MessageBuilder::from_raw(self.to_raw())
    }
}

/// Borrowed view of one message field, as seen by the codec.
pub enum FieldRef<'a> {
    /// Plain value (scalars, lists, mappings, image payloads)
    Value(RawValue),
    /// Nested message
    Message(&'a dyn DynMessage),
    /// List of nested messages
    Messages(Vec<&'a dyn DynMessage>),
    /// Mapping of nested messages, in key order
    MessageMap(Vec<(&'a str, &'a dyn DynMessage)>),
    /// Absent optional field
    Absent,
}

impl<'a> FieldRef<'a> {
    /// Wrap a plain value; `None` becomes the absence marker.
    pub fn value(value: impl Into<RawValue>) -> Self {
        FieldRef::Value(value.into())
    }

    /// Wrap an optional nested message.
    pub fn optional<M: Message>(message: Option<&'a M>) -> Self {
        match message {
            Some(message) => FieldRef::Message(message),
            None => FieldRef::Absent,
        }
    }

    /// Wrap an optional mapping of nested messages.
    pub fn map_of<M: Message>(messages: Option<&'a BTreeMap<String, M>>) -> Self {
        match messages {
            Some(messages) => FieldRef::MessageMap(
                messages
                    .iter()
                    .map(|(key, message)| (key.as_str(), message as &dyn DynMessage))
                    .collect(),
            ),
            None => FieldRef::Absent,
        }
    }

    /// Convert the field to its raw value.
    pub fn into_raw(self) -> RawValue {
        match self {
            FieldRef::Value(value) => value,
            FieldRef::Message(message) => RawValue::Map(message.to_raw_map()),
            FieldRef::Messages(messages) => RawValue::Array(
                messages
                    .into_iter()
                    .map(|m| RawValue::Map(m.to_raw_map()))
                    .collect(),
            ),
            FieldRef::MessageMap(entries) => RawValue::Map(
                entries
                    .into_iter()
                    .map(|(key, m)| (key, RawValue::Map(m.to_raw_map())))
                    .collect(),
            ),
            FieldRef::Absent => RawValue::Null,
        }
    }
}

impl fmt::Debug for FieldRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRef::Value(value) => f.debug_tuple("Value").field(value).finish(),
            FieldRef::Message(m) => f.debug_tuple("Message").field(&m.type_name()).finish(),
            FieldRef::Messages(ms) => write!(f, "Messages(len={})", ms.len()),
            FieldRef::MessageMap(ms) => write!(f, "MessageMap(len={})", ms.len()),
            FieldRef::Absent => write!(f, "Absent"),
        }
    }
}

/// Object-safe view of any [`Message`], used for nested fields and for
/// messages built by name through the registry.
pub trait DynMessage: fmt::Debug + Send + Sync {
    /// Descriptor table of the concrete type.
    fn message_schema(&self) -> &'static MessageSchema;

    /// Borrow a field by name.
    fn field_ref(&self, name: &str) -> Option<FieldRef<'_>>;

    /// Convert to the raw representation.
    fn to_raw_map(&self) -> RawMap;

    /// Downcast support.
    fn as_any(&self) -> &dyn Any;

    /// Type name from the schema.
    fn type_name(&self) -> &'static str {
        self.message_schema().name()
    }
}

impl<M: Message> DynMessage for M {
    fn message_schema(&self) -> &'static MessageSchema {
        M::schema()
    }

    fn field_ref(&self, name: &str) -> Option<FieldRef<'_>> {
        self.field(name)
    }

    fn to_raw_map(&self) -> RawMap {
        self.to_raw()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl dyn DynMessage {
    /// Downcast to a concrete message type.
    pub fn downcast_ref<M: Message>(&self) -> Option<&M> {
        self.as_any().downcast_ref::<M>()
    }
}

/// Builder for a new message.
///
/// Collects raw field values; nothing is checked until [`build`](Self::build),
/// which runs the full validation pass.
pub struct MessageBuilder<M> {
    raw: RawMap,
    _marker: PhantomData<fn() -> M>,
}

impl<M: Message> MessageBuilder<M> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::from_raw(RawMap::new())
    }

    /// Create a builder seeded with raw values.
    pub fn from_raw(raw: RawMap) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    /// Set a field value.
    pub fn set(mut self, name: &str, value: impl Into<RawValue>) -> Self {
        self.raw.insert(name, value);
        self
    }

    /// Set a nested message field.
    pub fn set_message<N: Message>(self, name: &str, message: &N) -> Self {
        let raw = message.to_raw();
        self.set(name, raw)
    }

    /// Remove a field so its default applies again.
    pub fn unset(mut self, name: &str) -> Self {
        self.raw.remove(name);
        self
    }

    /// Raw values collected so far.
    pub fn raw(&self) -> &RawMap {
        &self.raw
    }

    /// Validate and build, using the global default cache.
    pub fn build(self) -> Result<M, ValidationError> {
        M::from_raw(&self.raw)
    }

    /// Validate and build, taking shared defaults from `cache`.
    pub fn build_in(self, cache: &DefaultCache) -> Result<M, ValidationError> {
        M::from_raw_in(&self.raw, cache)
    }
}

impl<M: Message> Default for MessageBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> fmt::Debug for MessageBuilder<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageBuilder").field("raw", &self.raw).finish()
    }
}
