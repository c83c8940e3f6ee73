// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout robomsg.
//!
//! This module provides the foundational types for the library:
//! - [`MessageError`] and [`ValidationError`] - error handling
//! - [`RawValue`] / [`RawMap`] - the raw representation
//! - [`Message`] - the message runtime trait
//! - [`MessageRegistry`] - name-keyed message type registry

pub mod error;
pub mod message;
pub mod registry;
pub mod value;

pub use error::{join_path, MessageError, Result, ValidationError, Violation, ViolationKind};
pub use message::{DynMessage, FieldRef, Message, MessageBuilder};
pub use registry::MessageRegistry;
pub use value::{RawMap, RawValue};
