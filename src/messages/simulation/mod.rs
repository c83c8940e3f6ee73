// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Simulator interface messages.

pub mod world_input;
pub mod world_output;

pub use world_input::WorldInput;
pub use world_output::WorldOutput;
