// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Geometry primitives.

pub mod homography;
pub mod quaternion;
pub mod vector3;

pub use homography::Homography;
pub use quaternion::Quaternion;
pub use vector3::Vector3;
