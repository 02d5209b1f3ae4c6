// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core geometry types used by the stage (pose, AABB, OBB).
//!
//! Overlap semantics:
//! - `Aabb::overlaps` is inclusive on faces.
//! - `Obb::intersects` treats faces in contact as separated, so boxes that
//!   rest flush on or beside each other are not reported as penetrating.

#[doc = "Axis-aligned bounding boxes (world space)."]
pub mod aabb;
#[doc = "Oriented bounding boxes and the separating-axis test."]
pub mod obb;
#[doc = "Position plus yaw."]
pub mod pose;
