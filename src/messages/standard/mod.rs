// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Standard messages shared by every other group.

pub mod header;
pub mod text;

pub use header::{header_field, Header};
pub use text::Text;
