// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Shared default value cache.
//!
//! Message fields may default to non-trivial validated structures (the
//! [`Header`]). Building one per message is wasteful, so a [`DefaultCache`]
//! builds the canonical instance once and hands out clones of one `Arc`.
//!
//! Initialization is check / lock / re-check / build / store. Readers after
//! initialization only touch the `OnceLock` and never take the mutex.
//!
//! Cached instances are immutable: they are reachable only through `Arc`, and
//! message types expose no mutation API. A customized value must be built
//! fresh (see [`Message::to_builder`](crate::Message::to_builder)).

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use crate::config::DefaultsConfig;
use crate::core::{Message, RawMap, ValidationError};
use crate::messages::standard::Header;

/// Type-erased shared default, downcast by the field extractor.
pub type SharedDefault = Arc<dyn Any + Send + Sync>;

/// Kinds of cacheable defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultKind {
    /// The standard message [`Header`]
    Header,
}

impl DefaultKind {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DefaultKind::Header => "Header",
        }
    }
}

/// Lazily built store of shared default instances.
///
/// Tests and embedders create their own caches; [`global_defaults`] is the
/// process-wide instance used by [`Message::from_raw`].
pub struct DefaultCache {
    config: DefaultsConfig,
    header: OnceLock<Arc<Header>>,
    init_lock: Mutex<()>,
    builds: AtomicUsize,
}

impl DefaultCache {
    /// Create a cache that builds the canonical defaults.
    pub fn new() -> Self {
        Self::with_config(DefaultsConfig::default())
    }

    /// Create a cache that builds defaults from `config`.
    ///
    /// The configuration is not checked here; an invalid configured value
    /// surfaces as a [`ValidationError`] on first access.
    pub fn with_config(config: DefaultsConfig) -> Self {
        Self {
            config,
            header: OnceLock::new(),
            init_lock: Mutex::new(()),
            builds: AtomicUsize::new(0),
        }
    }

    /// Configuration the defaults are built from.
    pub fn config(&self) -> &DefaultsConfig {
        &self.config
    }

    /// Get the shared default [`Header`], building it on first call.
    ///
    /// Every successful call returns a clone of the same `Arc`.
    ///
    /// # Errors
    ///
    /// Returns the header's [`ValidationError`] if the configured defaults
    /// are invalid. Nothing is stored in that case, so every later call
    /// fails the same way.
    pub fn header(&self) -> Result<Arc<Header>, ValidationError> {
        if let Some(header) = self.header.get() {
            return Ok(Arc::clone(header));
        }

        let _guard = self
            .init_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(header) = self.header.get() {
            return Ok(Arc::clone(header));
        }

        let header = Arc::new(self.build_header()?);
        self.builds.fetch_add(1, Ordering::Relaxed);
        // Only this thread stores while holding the lock, so `set` cannot race.
        let _ = self.header.set(Arc::clone(&header));
        Ok(header)
    }

    /// Get the shared default of `kind`.
    pub fn get(&self, kind: DefaultKind) -> Result<SharedDefault, ValidationError> {
        match kind {
            DefaultKind::Header => Ok(self.header()? as SharedDefault),
        }
    }

    /// Check whether the default of `kind` has been built.
    pub fn is_initialized(&self, kind: DefaultKind) -> bool {
        match kind {
            DefaultKind::Header => self.header.get().is_some(),
        }
    }

    /// Number of default instances built so far.
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    fn build_header(&self) -> Result<Header, ValidationError> {
        let mut raw = RawMap::with_capacity(2);
        raw.insert("version", self.config.header_version.as_str());
        if let Some(frame) = &self.config.header_frame {
            raw.insert("frame", frame.as_str());
        }
        // Header declares no shared defaults, so this never re-enters the cache.
        Header::from_raw_in(&raw, self)
    }
}

impl Default for DefaultCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DefaultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultCache")
            .field("config", &self.config)
            .field("header", &self.header.get())
            .field("builds", &self.builds())
            .finish()
    }
}

/// Global default cache.
///
/// This is a convenience singleton built from the canonical configuration.
/// For custom defaults, create a `DefaultCache` directly and pass it to
/// [`Message::from_raw_in`].
static GLOBAL_DEFAULTS: OnceLock<DefaultCache> = OnceLock::new();

/// Get the global default cache.
pub fn global_defaults() -> &'static DefaultCache {
    GLOBAL_DEFAULTS.get_or_init(DefaultCache::new)
}
