// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message type registry.
//!
//! Maps schema names (e.g. "sensors/Imu") to message types so that tools can
//! look up schemas and build messages from raw input without naming the Rust
//! type at compile time.

use std::collections::HashMap;
use std::sync::RwLock;

use super::error::{MessageError, Result, ValidationError};
use super::message::{DynMessage, Message};
use super::value::RawMap;
use crate::defaults::DefaultCache;
use crate::schema::{MessageSchema, SchemaFn};

type BuildFn = fn(&RawMap, &DefaultCache) -> std::result::Result<Box<dyn DynMessage>, ValidationError>;

fn build_boxed<M: Message>(
    raw: &RawMap,
    cache: &DefaultCache,
) -> std::result::Result<Box<dyn DynMessage>, ValidationError> {
    M::from_raw_in(raw, cache).map(|m| Box::new(m) as Box<dyn DynMessage>)
}

#[derive(Clone, Copy)]
struct MessageEntry {
    schema: SchemaFn,
    build: BuildFn,
}

/// Thread-safe registry of message types.
///
/// Uses RwLock for concurrent read access with exclusive write access.
pub struct MessageRegistry {
    inner: RwLock<HashMap<&'static str, MessageEntry>>,
}

fn poisoned<E: std::fmt::Display>(e: E) -> MessageError {
    MessageError::Other(format!("Registry lock poisoned: {e}"))
}

impl MessageRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Register a message type under its schema name.
    ///
    /// Registering the same name again replaces the earlier entry.
    pub fn register<M: Message>(&self) -> Result<()> {
        let name = M::schema().name();
        let mut inner = self.inner.write().map_err(poisoned)?;
        let entry = MessageEntry {
            schema: M::schema,
            build: build_boxed::<M>,
        };
        if inner.insert(name, entry).is_some() {
            tracing::debug!(type_name = name, "replaced registered message type");
        }
        Ok(())
    }

    /// Get the schema of a registered type.
    pub fn schema(&self, name: &str) -> Result<Option<&'static MessageSchema>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.get(name).map(|entry| (entry.schema)()))
    }

    /// Check if a type is registered.
    pub fn contains(&self, name: &str) -> Result<bool> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.contains_key(name))
    }

    /// All registered type names, sorted.
    pub fn names(&self) -> Result<Vec<&'static str>> {
        let inner = self.inner.read().map_err(poisoned)?;
        let mut names: Vec<_> = inner.keys().copied().collect();
        names.sort_unstable();
        Ok(names)
    }

    /// Remove a type from the registry.
    pub fn remove(&self, name: &str) -> Result<bool> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        Ok(inner.remove(name).is_some())
    }

    /// Get the number of registered types.
    pub fn len(&self) -> Result<usize> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.len())
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Validate `raw` as the type registered under `name`.
    ///
    /// # Errors
    ///
    /// [`MessageError::TypeNotFound`] for an unknown name,
    /// [`MessageError::Validation`] if the input is invalid.
    pub fn build(&self, name: &str, raw: &RawMap, cache: &DefaultCache) -> Result<Box<dyn DynMessage>> {
        let entry = {
            let inner = self.inner.read().map_err(poisoned)?;
            inner
                .get(name)
                .copied()
                .ok_or_else(|| MessageError::type_not_found(name))?
        };
        Ok((entry.build)(raw, cache)?)
    }
}

impl Default for MessageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MessageRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = self.names().unwrap_or_default();
        f.debug_struct("MessageRegistry").field("types", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::geometry::{Quaternion, Vector3};

    #[test]
    fn test_message_registry() {
        let registry = MessageRegistry::new();
        assert!(registry.is_empty().unwrap());

        registry.register::<Vector3>().unwrap();
        registry.register::<Quaternion>().unwrap();
        registry.register::<Vector3>().unwrap();

        assert_eq!(registry.len().unwrap(), 2);
        assert!(registry.contains("geometry/Vector3").unwrap());
        assert_eq!(
            registry.names().unwrap(),
            vec!["geometry/Quaternion", "geometry/Vector3"]
        );
        let schema = registry.schema("geometry/Vector3").unwrap().unwrap();
        assert_eq!(schema.field_count(), 3);

        assert!(registry.remove("geometry/Vector3").unwrap());
        assert!(!registry.contains("geometry/Vector3").unwrap());
        assert!(registry.schema("geometry/Vector3").unwrap().is_none());
    }

    #[test]
    fn test_build_by_name() {
        let registry = MessageRegistry::new();
        registry.register::<Vector3>().unwrap();
        let cache = DefaultCache::new();

        let raw = RawMap::new().with("x", 1.5);
        let message = registry.build("geometry/Vector3", &raw, &cache).unwrap();
        let v = message.downcast_ref::<Vector3>().unwrap();
        assert_eq!(v.x(), 1.5);
    }

    #[test]
    fn test_build_errors() {
        let registry = MessageRegistry::new();
        registry.register::<Quaternion>().unwrap();
        let cache = DefaultCache::new();

        let err = registry.build("nope/Nothing", &RawMap::new(), &cache).unwrap_err();
        assert!(matches!(err, MessageError::TypeNotFound { .. }));

        let raw = RawMap::new().with("w", 2.0);
        let err = registry.build("geometry/Quaternion", &raw, &cache).unwrap_err();
        assert!(err.as_validation().unwrap().has_path("w"));
    }
}
