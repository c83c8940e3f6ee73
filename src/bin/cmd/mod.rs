// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod list;
mod normalize;
mod schema;
mod validate;

pub use list::ListCmd;
pub use normalize::NormalizeCmd;
pub use schema::SchemaCmd;
pub use validate::ValidateCmd;
