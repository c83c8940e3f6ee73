// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::path::Path;

use anyhow::Context as _;
use robomsg::config::RuntimeConfig;
use robomsg::defaults::DefaultCache;
use robomsg::messages::builtin_registry;
use robomsg::schema::MessageSchema;
use robomsg::MessageRegistry;

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Shared state for one CLI invocation.
pub struct Context {
    pub cache: DefaultCache,
    pub registry: &'static MessageRegistry,
}

impl Context {
    /// Build the context, reading `config` if given.
    pub fn load(config: Option<&Path>) -> Result<Self> {
        let config = match config {
            Some(path) => RuntimeConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => RuntimeConfig::default(),
        };
        Ok(Self {
            cache: DefaultCache::with_config(config.defaults),
            registry: builtin_registry(),
        })
    }

    /// Look up a registered schema, failing with the list of known types.
    pub fn schema(&self, type_name: &str) -> Result<&'static MessageSchema> {
        match self.registry.schema(type_name)? {
            Some(schema) => Ok(schema),
            None => {
                let known = self.registry.names()?.join(", ");
                Err(anyhow::anyhow!(
                    "unknown message type '{type_name}' (known: {known})"
                ))
            }
        }
    }
}

/// Read a document from disk.
pub fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
