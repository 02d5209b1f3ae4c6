// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use glue_math::{Mat3, Vec3};

use crate::types::aabb::Aabb;
use crate::types::pose::Pose;

/// Separation below which two faces are considered touching, not overlapping.
pub const CONTACT_SLOP: f32 = 1e-4;

/// Added to every `|R[i][j]|` term so near-parallel edge pairs, whose cross
/// product degenerates, can never produce a false separation.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Oriented bounding box: a box-shaped collision volume in world space.
///
/// Invariants:
/// - `half_extents` components are non-negative.
/// - `rotation` is orthonormal; column `i` is the world direction of local
///   axis `i`.
///
/// Boxes are cheap values rebuilt from an entity's pose whenever needed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Obb {
    center: Vec3,
    half_extents: Vec3,
    rotation: Mat3,
}

impl Obb {
    /// Creates a box from its center, half-extents, and rotation matrix.
    pub fn new(center: Vec3, half_extents: Vec3, rotation: Mat3) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
            rotation,
        }
    }

    /// Creates a box positioned by a yaw pose.
    pub fn from_pose(pose: &Pose, half_extents: Vec3) -> Self {
        Self::new(pose.translation(), half_extents, pose.to_mat3())
    }

    /// Maps a point in this box's local frame into world space.
    fn to_world(&self, local: &Vec3) -> Vec3 {
        self.rotation.transform(local).add(&self.center)
    }

    /// The eight corners in world space.
    pub fn corners(&self) -> [Vec3; 8] {
        let [hx, hy, hz] = self.half_extents.to_array();
        let mut out = [Vec3::ZERO; 8];
        let mut idx = 0;
        for sx in [-hx, hx] {
            for sy in [-hy, hy] {
                for sz in [-hz, hz] {
                    out[idx] = self.to_world(&Vec3::new(sx, sy, sz));
                    idx += 1;
                }
            }
        }
        out
    }

    /// Smallest world AABB that encloses this box.
    pub fn world_aabb(&self) -> Aabb {
        // The projection radius of an OBB on world axis k is Σ_j |R[k][j]|·e_j.
        let e = self.half_extents.to_array();
        let mut r = [0.0f32; 3];
        for (k, radius) in r.iter_mut().enumerate() {
            *radius = (0..3).map(|j| self.rotation.at(k, j).abs() * e[j]).sum();
        }
        Aabb::from_center_half_extents(self.center, Vec3::from(r))
    }

    /// Returns `true` iff no separating axis exists between the two boxes.
    ///
    /// Tests the three face normals of each box and the nine edge cross
    /// products. Faces in contact (separation within [`CONTACT_SLOP`]) count
    /// as separated. Boxes with non-finite data never intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        if !(self.center.is_finite()
            && other.center.is_finite()
            && self.half_extents.is_finite()
            && other.half_extents.is_finite())
        {
            return false;
        }

        let ea = self.half_extents.to_array();
        let eb = other.half_extents.to_array();

        // R[i][j] = a_i · b_j expresses `other` in this box's frame.
        let mut r = [[0.0f32; 3]; 3];
        let mut abs_r = [[0.0f32; 3]; 3];
        for i in 0..3 {
            let a = self.rotation.column(i);
            for j in 0..3 {
                r[i][j] = a.dot(&other.rotation.column(j));
                abs_r[i][j] = r[i][j].abs() + PARALLEL_EPSILON;
            }
        }

        let d = other.center.sub(&self.center);
        let t = [
            d.dot(&self.rotation.column(0)),
            d.dot(&self.rotation.column(1)),
            d.dot(&self.rotation.column(2)),
        ];

        // Face normals of `self`.
        for i in 0..3 {
            let ra = ea[i];
            let rb = eb[0] * abs_r[i][0] + eb[1] * abs_r[i][1] + eb[2] * abs_r[i][2];
            if t[i].abs() > ra + rb - CONTACT_SLOP {
                return false;
            }
        }

        // Face normals of `other`.
        for j in 0..3 {
            let ra = ea[0] * abs_r[0][j] + ea[1] * abs_r[1][j] + ea[2] * abs_r[2][j];
            let rb = eb[j];
            let dist = (t[0] * r[0][j] + t[1] * r[1][j] + t[2] * r[2][j]).abs();
            if dist > ra + rb - CONTACT_SLOP {
                return false;
            }
        }

        // Edge cross products a_i × b_j. The tested quantities are scaled by
        // |a_i × b_j|, so the slop is scaled the same way; parallel pairs are
        // already covered by the face tests.
        for i in 0..3 {
            let (i1, i2) = ((i + 1) % 3, (i + 2) % 3);
            for j in 0..3 {
                let axis_len = (1.0 - r[i][j] * r[i][j]).max(0.0).sqrt();
                if axis_len < 1e-3 {
                    continue;
                }
                let (j1, j2) = ((j + 1) % 3, (j + 2) % 3);
                let ra = ea[i1] * abs_r[i2][j] + ea[i2] * abs_r[i1][j];
                let rb = eb[j1] * abs_r[i][j2] + eb[j2] * abs_r[i][j1];
                let dist = (t[i2] * r[i1][j] - t[i1] * r[i2][j]).abs();
                if dist > ra + rb - CONTACT_SLOP * axis_len {
                    return false;
                }
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::FRAC_PI_4;

    fn cube(center: Vec3, yaw: f32, half: f32) -> Obb {
        Obb::from_pose(&Pose::new(center, yaw), Vec3::new(half, half, half))
    }

    #[test]
    fn overlapping_boxes_intersect() {
        let a = cube(Vec3::ZERO, 0.0, 1.0);
        let b = cube(Vec3::new(1.5, 0.0, 0.0), 0.0, 1.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn flush_faces_do_not_intersect() {
        let a = cube(Vec3::ZERO, 0.0, 1.0);
        let beside = cube(Vec3::new(2.0, 0.0, 0.0), 0.0, 1.0);
        let on_top = cube(Vec3::new(0.0, 2.0, 0.0), 0.0, 1.0);
        assert!(!a.intersects(&beside));
        assert!(!a.intersects(&on_top));
    }

    #[test]
    fn rotated_box_separates_where_aabbs_would_overlap() {
        // Two 45° boxes offset along their shared diagonal: 2.12 apart on a
        // local axis whose combined radius is 2, yet the world AABBs overlap.
        let a = cube(Vec3::ZERO, FRAC_PI_4, 1.0);
        let b = cube(Vec3::new(1.5, 0.0, 1.5), FRAC_PI_4, 1.0);
        assert!((a.world_aabb().max().x() - 2.0f32.sqrt()).abs() < 1e-5);
        assert!(a.world_aabb().overlaps(&b.world_aabb()));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn mixed_yaw_corner_penetration_is_detected() {
        let a = cube(Vec3::ZERO, 0.0, 1.0);
        // Diamond whose corner pokes 0.2 into `a`'s +X face.
        let b = cube(Vec3::new(1.0 + 2.0f32.sqrt() - 0.2, 0.0, 0.0), FRAC_PI_4, 1.0);
        assert!(a.intersects(&b));
    }

    #[test]
    fn non_finite_boxes_never_intersect() {
        let a = cube(Vec3::ZERO, 0.0, 1.0);
        let b = Obb::new(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0), Mat3::identity());
        assert!(!a.intersects(&b));
    }
}
