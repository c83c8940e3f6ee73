// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message encoding/decoding.
//!
//! - [`raw`] - messages to and from the raw representation
//! - [`image`] - shape-checked dense image payloads
//! - [`json`] - JSON text for the raw representation

pub mod image;
pub mod json;
pub mod raw;

pub use image::{ElementType, ImageArray};
pub use json::JsonCodec;
pub use raw::{from_raw, from_raw_in, to_raw, to_raw_dyn};
