// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Runtime configuration.
//!
//! Configuration is read from TOML:
//!
//! ```toml
//! [defaults]
//! header_version = "1.0"
//! header_frame = "/base_link"
//! ```
//!
//! Every key is optional; missing keys keep their canonical values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{MessageError, Result};
use crate::messages::standard::header::DEFAULT_VERSION;

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Values the shared defaults are built from
    pub defaults: DefaultsConfig,
}

/// Values used to build the cached default instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    /// Version string of the default header
    pub header_version: String,
    /// Reference frame of the default header
    pub header_frame: Option<String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            header_version: DEFAULT_VERSION.to_string(),
            header_frame: None,
        }
    }
}

impl RuntimeConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| MessageError::config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            header_version = %config.defaults.header_version,
            "loaded runtime configuration"
        );
        Ok(config)
    }

    /// Serialize configuration back to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| MessageError::config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = RuntimeConfig::from_toml_str("").unwrap();
        assert_eq!(config, RuntimeConfig::default());
        assert_eq!(config.defaults.header_version, "1.0");
        assert!(config.defaults.header_frame.is_none());
    }

    #[test]
    fn test_partial_config() {
        let config = RuntimeConfig::from_toml_str("[defaults]\nheader_frame = \"/odom\"\n").unwrap();
        assert_eq!(config.defaults.header_version, "1.0");
        assert_eq!(config.defaults.header_frame.as_deref(), Some("/odom"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = RuntimeConfig::from_toml_str("[defaults]\nheader_colour = \"red\"\n").unwrap_err();
        assert!(matches!(err, MessageError::Config(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = RuntimeConfig {
            defaults: DefaultsConfig {
                header_version: "3.2".to_string(),
                header_frame: Some("/map".to_string()),
            },
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(RuntimeConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = RuntimeConfig::load("/nonexistent/robomsg.toml").unwrap_err();
        assert!(matches!(err, MessageError::Io(_)));
    }
}
