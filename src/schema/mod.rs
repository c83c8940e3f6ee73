// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Declarative message schemas.
//!
//! This module provides:
//! - [`MessageSchema`] - the ordered descriptor table of a message type
//! - [`FieldDescriptor`] - name, type, default and constraints of one field
//! - [`Constraint`] - pattern, closed range and predicate checks

pub mod constraint;
pub mod descriptor;

pub use constraint::{Constraint, Pattern, PredicateFn};
pub use descriptor::{FieldDefault, FieldDescriptor, FieldType, MessageSchema, SchemaFn};
