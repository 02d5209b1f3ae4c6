// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use glue_math::{Mat3, Vec3};

/// Placement of a box on the stage: world-space center plus yaw.
///
/// Conventions:
/// - `translation` is the box center in world units.
/// - `yaw` is a rotation about +Y in radians. Pitch and roll are never
///   modelled; collision and stacking only reason about yaw.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pose {
    translation: Vec3,
    yaw: f32,
}

impl Pose {
    /// Identity pose (origin, no rotation).
    pub const fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            yaw: 0.0,
        }
    }

    /// Creates a pose from components.
    pub const fn new(translation: Vec3, yaw: f32) -> Self {
        Self { translation, yaw }
    }

    /// Translation component.
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    /// Yaw in radians.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Rotation matrix for this pose's yaw.
    pub fn to_mat3(&self) -> Mat3 {
        Mat3::rotation_y(self.yaw)
    }

    /// Maps a point from this pose's local frame into world space.
    pub fn transform_point(&self, local: &Vec3) -> Vec3 {
        self.to_mat3().transform(local).add(&self.translation)
    }

    /// Maps a world-space point into this pose's local frame.
    pub fn inverse_transform_point(&self, world: &Vec3) -> Vec3 {
        self.to_mat3()
            .transpose()
            .transform(&world.sub(&self.translation))
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}
