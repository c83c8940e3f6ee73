// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Robomsg
//!
//! Message-schema runtime for structured robotics data.
//!
//! Every message type declares an ordered table of field descriptors and
//! inherits three behaviors from it:
//! - **Validation** that checks every field (recursively through nested
//!   messages) and reports all violations with dotted paths, or builds the
//!   message; see [`validate`](crate::validate)
//! - **A lossless codec** between messages and a generic nested
//!   [`RawMap`]; see [`encoding`](crate::encoding)
//! - **Shared defaults**: a missing `header` is filled from a lazily built,
//!   thread-safe cache; see [`defaults`](crate::defaults)
//!
//! ## Architecture
//!
//! - `core/` - raw values, errors, the [`Message`] trait, the type registry
//! - `schema/` - field descriptors and constraints
//! - `validate/` - the validation pass
//! - `encoding/` - raw conversion, image payloads, JSON
//! - `defaults/` - the default value cache
//! - `messages/` - the shipped message catalogue
//!
//! ## Example
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use robomsg::messages::sensors::Imu;
//! use robomsg::{Message, RawMap};
//!
//! let raw = RawMap::new().with("orientation", RawMap::new().with("w", 1.5));
//! let err = Imu::from_raw(&raw).unwrap_err();
//! assert_eq!(err.paths(), vec!["orientation.w"]);
//!
//! let imu = Imu::from_raw(&RawMap::new())?;
//! assert_eq!(Imu::from_raw(&imu.to_raw())?, imu);
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{
    DynMessage, FieldRef, Message, MessageBuilder, MessageError, MessageRegistry, RawMap,
    RawValue, Result, ValidationError, Violation, ViolationKind,
};

// Field descriptors and constraints
pub mod schema;

// Validation pass
pub mod validate;

// Raw, image and JSON codecs
pub mod encoding;

// Shared default values
pub mod defaults;

// Runtime configuration
pub mod config;

// Message catalogue
pub mod messages;

pub use config::RuntimeConfig;
pub use defaults::{global_defaults, DefaultCache, DefaultKind};
pub use encoding::{ImageArray, JsonCodec};
pub use messages::builtin_registry;
