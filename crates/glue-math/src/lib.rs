// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Math helpers for stage placement: scalar utilities, a float32 `Vec3`, and
//! a column-major 3×3 rotation matrix.
//!
//! All operations round to `f32`. Collision math downstream only ever
//! reasons about yaw (rotation about +Y), so `Mat3` favours that case but
//! stays general.

mod mat3;
mod vec3;

pub use mat3::Mat3;
pub use vec3::Vec3;

use std::f32::consts::TAU;

/// Converts degrees to radians with float32 precision.
pub fn deg_to_rad(value: f32) -> f32 {
    value * (TAU / 360.0)
}

/// Converts radians to degrees with float32 precision.
pub fn rad_to_deg(value: f32) -> f32 {
    value * (360.0 / TAU)
}

/// Returns `true` when `a` and `b` differ by at most `tolerance`.
pub fn approx_eq(a: f32, b: f32, tolerance: f32) -> bool {
    (a - b).abs() <= tolerance
}
