// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Raw value representation.
//!
//! Provides the serialization-neutral nested structure that every message is
//! converted to by [`to_raw`](crate::encoding::to_raw) and validated from by
//! [`from_raw`](crate::encoding::from_raw).
//!
//! # Design Principles
//!
//! - **Owned types**: Uses owned `String` and `Vec<u8>` for clarity and simplicity
//! - **Explicit absence**: [`RawValue::Null`] marks an absent optional field, so
//!   "absent" and "present with a falsy value" stay distinguishable
//! - **Ordered mappings**: [`RawMap`] keeps insertion order so serialized
//!   messages list fields in declaration order

use std::fmt;

/// Generic value of the raw representation.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    // Absence marker for optional fields
    Null,

    // Boolean
    Bool(bool),

    // Signed integer
    Int(i64),

    // Floating point
    Float(f64),

    // String (UTF-8)
    String(String),

    // Binary data (image payloads)
    Bytes(Vec<u8>),

    // Array of values
    Array(Vec<RawValue>),

    // Nested mapping
    Map(RawMap),
}

impl RawValue {
    // ========================================================================
    // Type Checking Predicates
    // ========================================================================

    /// Check if this value is a number (integer or float).
    pub fn is_numeric(&self) -> bool {
        matches!(self, RawValue::Int(_) | RawValue::Float(_))
    }

    /// Check if this value is a container (array or mapping).
    pub fn is_container(&self) -> bool {
        matches!(self, RawValue::Array(_) | RawValue::Map(_))
    }

    /// Check if this value is the absence marker.
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get the value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RawValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the value as an integer. Floats are not truncated.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RawValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the value as a float, widening integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Int(v) => Some(*v as f64),
            RawValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a byte slice.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RawValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Get the value as an array slice.
    pub fn as_array(&self) -> Option<&[RawValue]> {
        match self {
            RawValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Get the value as a mapping.
    pub fn as_map(&self) -> Option<&RawMap> {
        match self {
            RawValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Get the type name used in violation reports.
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::Bool(_) => "bool",
            RawValue::Int(_) => "int",
            RawValue::Float(_) => "float",
            RawValue::String(_) => "string",
            RawValue::Bytes(_) => "bytes",
            RawValue::Array(_) => "array",
            RawValue::Map(_) => "mapping",
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Null => write!(f, "null"),
            RawValue::Bool(v) => write!(f, "{v}"),
            RawValue::Int(v) => write!(f, "{v}"),
            RawValue::Float(v) => write!(f, "{v}"),
            RawValue::String(v) => write!(f, "\"{v}\""),
            RawValue::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            RawValue::Array(v) => write!(f, "[{} elements]", v.len()),
            RawValue::Map(v) => write!(f, "{{{} fields}}", v.len()),
        }
    }
}

impl From<bool> for RawValue {
    fn from(v: bool) -> Self {
        RawValue::Bool(v)
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Int(v)
    }
}

impl From<i32> for RawValue {
    fn from(v: i32) -> Self {
        RawValue::Int(i64::from(v))
    }
}

impl From<u32> for RawValue {
    fn from(v: u32) -> Self {
        RawValue::Int(i64::from(v))
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Float(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::String(v.to_string())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::String(v)
    }
}

impl From<Vec<u8>> for RawValue {
    fn from(v: Vec<u8>) -> Self {
        RawValue::Bytes(v)
    }
}

impl From<Vec<RawValue>> for RawValue {
    fn from(v: Vec<RawValue>) -> Self {
        RawValue::Array(v)
    }
}

impl From<Vec<f64>> for RawValue {
    fn from(v: Vec<f64>) -> Self {
        RawValue::Array(v.into_iter().map(RawValue::Float).collect())
    }
}

impl From<RawMap> for RawValue {
    fn from(v: RawMap) -> Self {
        RawValue::Map(v)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(RawValue::Null, Into::into)
    }
}

// =============================================================================
// Ordered Mapping
// =============================================================================

/// String-keyed mapping that remembers insertion order.
///
/// Keys are unique: inserting an existing key replaces its value in place.
/// Equality ignores order, so two mappings with the same entries compare
/// equal regardless of how they were built.
#[derive(Debug, Clone, Default)]
pub struct RawMap {
    entries: Vec<(String, RawValue)>,
}

impl RawMap {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mapping with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert a value, returning the previous value for the key if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Option<RawValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Remove a key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<RawValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Check whether a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for RawMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|o| o == v))
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for RawMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = RawMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl IntoIterator for RawMap {
    type Item = (String, RawValue);
    type IntoIter = std::vec::IntoIter<(String, RawValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_checking() {
        assert!(RawValue::Int(42).is_numeric());
        assert!(RawValue::Float(2.5).is_numeric());
        assert!(!RawValue::String("hello".to_string()).is_numeric());
        assert!(RawValue::Array(vec![]).is_container());
        assert!(RawValue::Map(RawMap::new()).is_container());
        assert!(RawValue::Null.is_null());
        assert!(!RawValue::Bool(false).is_null());
    }

    #[test]
    fn test_as_f64_widens_integers() {
        assert_eq!(RawValue::Int(3).as_f64(), Some(3.0));
        assert_eq!(RawValue::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(RawValue::Bool(true).as_f64(), None);
    }

    #[test]
    fn test_as_i64_does_not_truncate() {
        assert_eq!(RawValue::Int(-7).as_i64(), Some(-7));
        assert_eq!(RawValue::Float(7.0).as_i64(), None);
    }

    #[test]
    fn test_type_name() {
        assert_eq!(RawValue::Null.type_name(), "null");
        assert_eq!(RawValue::Int(3).type_name(), "int");
        assert_eq!(RawValue::Map(RawMap::new()).type_name(), "mapping");
        assert_eq!(RawValue::Bytes(vec![1]).type_name(), "bytes");
    }

    #[test]
    fn test_display() {
        assert_eq!(RawValue::String("a".into()).to_string(), "\"a\"");
        assert_eq!(RawValue::Bytes(vec![0; 4]).to_string(), "<4 bytes>");
        assert_eq!(RawValue::Array(vec![RawValue::Null]).to_string(), "[1 elements]");
    }

    #[test]
    fn test_from_option() {
        assert_eq!(RawValue::from(None::<String>), RawValue::Null);
        assert_eq!(RawValue::from(Some(2.5)), RawValue::Float(2.5));
    }

    #[test]
    fn test_map_preserves_insertion_order() {
        let map = RawMap::new().with("b", 1).with("a", 2).with("c", 3);
        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_map_insert_replaces_in_place() {
        let mut map = RawMap::new().with("x", 1).with("y", 2);
        let previous = map.insert("x", 10);
        assert_eq!(previous, Some(RawValue::Int(1)));
        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().next(), Some("x"));
        assert_eq!(map.get("x"), Some(&RawValue::Int(10)));
    }

    #[test]
    fn test_map_equality_ignores_order() {
        let a = RawMap::new().with("x", 1).with("y", "z");
        let b = RawMap::new().with("y", "z").with("x", 1);
        assert_eq!(a, b);
        assert_ne!(a, RawMap::new().with("x", 1));
    }

    #[test]
    fn test_map_remove() {
        let mut map = RawMap::new().with("x", 1);
        assert_eq!(map.remove("x"), Some(RawValue::Int(1)));
        assert!(map.is_empty());
        assert_eq!(map.remove("x"), None);
    }
}
