// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! JSON interchange for the raw representation.
//!
//! Mapping between [`RawValue`] and JSON:
//!
//! | Raw | JSON |
//! |---|---|
//! | `Null` | `null` |
//! | `Bool` / `Int` / `Float` / `String` | same |
//! | `Bytes` | `{"$bytes": "<lowercase hex>"}` |
//! | `Array` / `Map` | array / object (key order kept) |
//!
//! Any object whose only key is `$bytes` with a string value decodes back to
//! `Bytes`, so byte payloads survive inside untyped fields such as
//! `Header.txt`. [`JsonCodec::decode_with_schema`] additionally accepts a bare
//! hex string where the schema declares bytes or an image payload.
//!
//! ## Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use robomsg::encoding::JsonCodec;
//! use robomsg::messages::geometry::Vector3;
//!
//! let codec = JsonCodec::new();
//! let v: Vector3 = codec.decode_message(r#"{"x": 1, "y": 2.5}"#)?;
//! assert_eq!(v.x(), 1.0);
//! let text = codec.encode_message(&v, false)?;
//! assert_eq!(text, r#"{"x":1.0,"y":2.5,"z":0.0}"#);
//! # Ok(())
//! # }
//! ```

use crate::core::{join_path, DynMessage, Message, MessageError, RawMap, RawValue, Result};
use crate::defaults::{global_defaults, DefaultCache};
use crate::schema::{FieldType, MessageSchema};

use super::raw::{from_raw_in, to_raw_dyn};

/// Object key marking a hex-encoded byte string.
pub const BYTES_TAG: &str = "$bytes";

/// JSON encoder/decoder for raw mappings and messages.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCodec {
    _private: (),
}

impl JsonCodec {
    /// Create a new JSON codec.
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Encode a raw mapping to JSON text.
    ///
    /// # Arguments
    ///
    /// * `raw` - The mapping to encode
    /// * `pretty` - Whether to pretty-print the output
    pub fn encode(&self, raw: &RawMap, pretty: bool) -> Result<String> {
        let value = map_to_json(raw)?;
        let text = if pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        };
        text.map_err(|e| MessageError::parse("json encode", format!("{e}")))
    }

    /// Encode a message to JSON text.
    pub fn encode_message<M: Message>(&self, message: &M, pretty: bool) -> Result<String> {
        self.encode(&message.to_raw(), pretty)
    }

    /// Encode a type-erased message to JSON text.
    pub fn encode_dyn(&self, message: &dyn DynMessage, pretty: bool) -> Result<String> {
        self.encode(&to_raw_dyn(message), pretty)
    }

    /// Decode JSON text into a raw mapping. The document must be an object.
    pub fn decode(&self, json: &str) -> Result<RawMap> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| MessageError::parse("json", format!("{e}")))?;
        match json_to_raw(value, "")? {
            RawValue::Map(map) => Ok(map),
            other => Err(MessageError::parse(
                "json",
                format!("expected an object at top level, found {}", other.type_name()),
            )),
        }
    }

    /// Decode JSON text into a raw mapping, restoring byte fields from hex.
    pub fn decode_with_schema(&self, json: &str, schema: &MessageSchema) -> Result<RawMap> {
        let raw = self.decode(json)?;
        restore_message(raw, schema, "")
    }

    /// Decode and validate a message, using the global default cache.
    pub fn decode_message<M: Message>(&self, json: &str) -> Result<M> {
        self.decode_message_in(json, global_defaults())
    }

    /// Decode and validate a message, taking shared defaults from `cache`.
    pub fn decode_message_in<M: Message>(&self, json: &str, cache: &DefaultCache) -> Result<M> {
        let raw = self.decode_with_schema(json, M::schema())?;
        Ok(from_raw_in(&raw, cache)?)
    }
}

fn map_to_json(map: &RawMap) -> Result<serde_json::Value> {
    let mut obj = serde_json::Map::with_capacity(map.len());
    for (key, value) in map.iter() {
        obj.insert(key.to_string(), raw_to_json(value, key)?);
    }
    Ok(serde_json::Value::Object(obj))
}

fn raw_to_json(value: &RawValue, path: &str) -> Result<serde_json::Value> {
    match value {
        RawValue::Null => Ok(serde_json::Value::Null),
        RawValue::Bool(b) => Ok(serde_json::Value::Bool(*b)),
        RawValue::Int(i) => Ok(serde_json::Value::Number((*i).into())),
        RawValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .ok_or_else(|| {
                MessageError::parse("json encode", format!("{path}: non-finite float {f}"))
            }),
        RawValue::String(s) => Ok(serde_json::Value::String(s.clone())),
        RawValue::Bytes(bytes) => {
            let mut tagged = serde_json::Map::with_capacity(1);
            tagged.insert(BYTES_TAG.to_string(), serde_json::Value::String(hex::encode(bytes)));
            Ok(serde_json::Value::Object(tagged))
        }
        RawValue::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| raw_to_json(item, &join_path(path, &i.to_string())))
            .collect::<Result<Vec<_>>>()
            .map(serde_json::Value::Array),
        RawValue::Map(map) => {
            let mut obj = serde_json::Map::with_capacity(map.len());
            for (key, item) in map.iter() {
                obj.insert(key.to_string(), raw_to_json(item, &join_path(path, key))?);
            }
            Ok(serde_json::Value::Object(obj))
        }
    }
}

fn json_to_raw(value: serde_json::Value, path: &str) -> Result<RawValue> {
    match value {
        serde_json::Value::Null => Ok(RawValue::Null),
        serde_json::Value::Bool(b) => Ok(RawValue::Bool(b)),
        serde_json::Value::Number(n) => Ok(match n.as_i64() {
            Some(i) => RawValue::Int(i),
            // u64 beyond i64 and real numbers both land here
            None => RawValue::Float(n.as_f64().unwrap_or(f64::NAN)),
        }),
        serde_json::Value::String(s) => Ok(RawValue::String(s)),
        serde_json::Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| json_to_raw(item, &join_path(path, &i.to_string())))
            .collect::<Result<Vec<_>>>()
            .map(RawValue::Array),
        serde_json::Value::Object(obj) => {
            if obj.len() == 1 {
                if let Some(serde_json::Value::String(text)) = obj.get(BYTES_TAG) {
                    return decode_hex(text, path);
                }
            }
            let mut map = RawMap::with_capacity(obj.len());
            for (key, item) in obj {
                let item = json_to_raw(item, &join_path(path, &key))?;
                map.insert(key, item);
            }
            Ok(RawValue::Map(map))
        }
    }
}

fn restore_message(raw: RawMap, schema: &MessageSchema, prefix: &str) -> Result<RawMap> {
    let mut out = RawMap::with_capacity(raw.len());
    for (key, value) in raw {
        let value = match schema.get_field(&key) {
            Some(field) => restore(value, field.field_type(), &join_path(prefix, &key))?,
            None => value,
        };
        out.insert(key, value);
    }
    Ok(out)
}

/// Turn bare hex strings back into bytes where `field_type` expects them.
///
/// Values that do not have the expected shape are left alone for the
/// validator to report.
fn restore(value: RawValue, field_type: &FieldType, path: &str) -> Result<RawValue> {
    match (field_type, value) {
        (FieldType::Bytes, RawValue::String(text)) => decode_hex(&text, path),
        (FieldType::Image, RawValue::Map(mut map)) => {
            let data = match map.get("data") {
                Some(RawValue::String(text)) => Some(decode_hex(text, &join_path(path, "data"))?),
                _ => None,
            };
            if let Some(data) = data {
                map.insert("data", data);
            }
            Ok(RawValue::Map(map))
        }
        (FieldType::List(elem), RawValue::Array(items)) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| restore(item, elem, &join_path(path, &i.to_string())))
            .collect::<Result<Vec<_>>>()
            .map(RawValue::Array),
        (FieldType::Map(elem), RawValue::Map(map)) => {
            let mut out = RawMap::with_capacity(map.len());
            for (key, item) in map {
                let item = restore(item, elem, &join_path(path, &key))?;
                out.insert(key, item);
            }
            Ok(RawValue::Map(out))
        }
        (FieldType::Message(schema), RawValue::Map(map)) => {
            restore_message(map, schema(), path).map(RawValue::Map)
        }
        (_, value) => Ok(value),
    }
}

fn decode_hex(text: &str, path: &str) -> Result<RawValue> {
    hex::decode(text)
        .map(RawValue::Bytes)
        .map_err(|e| MessageError::parse(format!("json field '{path}'"), format!("invalid hex: {e}")))
}
