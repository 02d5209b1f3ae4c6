// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Geometry primitives for Glue stage placement.

This crate provides:
- Axis-aligned bounding boxes (`Aabb`).
- Yaw-only poses (`Pose`).
- Oriented bounding boxes with a separating-axis intersection test (`Obb`).

Design notes:
- Float32 throughout; operations favor clarity over speed.
- Pure values: every box is rebuilt from an entity's pose when needed, so
  nothing here caches state between resolver iterations.
"]

/// Foundational geometric types.
pub mod types;

pub use types::aabb::Aabb;
pub use types::obb::{Obb, CONTACT_SLOP};
pub use types::pose::Pose;
