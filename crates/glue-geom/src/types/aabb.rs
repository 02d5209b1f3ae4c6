// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use glue_math::Vec3;

/// Axis-aligned bounding box in world coordinates.
///
/// Invariants:
/// - `min` components are less than or equal to `max` components.
/// - Values are `f32` world units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Constructs an AABB from two opposite corners.
    ///
    /// Corners are reordered component-wise, so any two corners describe the
    /// same box.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        let [ax, ay, az] = a.to_array();
        let [bx, by, bz] = b.to_array();
        Self {
            min: Vec3::new(ax.min(bx), ay.min(by), az.min(bz)),
            max: Vec3::new(ax.max(bx), ay.max(by), az.max(bz)),
        }
    }

    /// Returns the minimum corner.
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Returns the maximum corner.
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Builds an AABB centered at `center` with half-extents `he`.
    pub fn from_center_half_extents(center: Vec3, he: Vec3) -> Self {
        let he = he.abs();
        Self {
            min: center.sub(&he),
            max: center.add(&he),
        }
    }

    /// Returns `true` if this AABB overlaps another (inclusive on faces).
    pub fn overlaps(&self, other: &Self) -> bool {
        let a_min = self.min.to_array();
        let a_max = self.max.to_array();
        let b_min = other.min.to_array();
        let b_max = other.max.to_array();
        !(a_max[0] < b_min[0]
            || a_min[0] > b_max[0]
            || a_max[1] < b_min[1]
            || a_min[1] > b_max[1]
            || a_max[2] < b_min[2]
            || a_min[2] > b_max[2])
    }

    /// Returns `true` if the floor footprints (XZ) overlap with positive area.
    ///
    /// Footprints that merely share an edge do not count.
    pub fn overlaps_xz(&self, other: &Self) -> bool {
        self.min.x() < other.max.x()
            && self.max.x() > other.min.x()
            && self.min.z() < other.max.z()
            && self.max.z() > other.min.z()
    }

    /// Inflates the box vertically only (bottom down and top up by `m`).
    pub fn inflate_y(&self, m: f32) -> Self {
        let delta = Vec3::new(0.0, m, 0.0);
        Self::new(self.min.sub(&delta), self.max.add(&delta))
    }

    /// Builds the minimal AABB that contains all `points`.
    ///
    /// Returns `None` if `points` is empty.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut min = *first;
        let mut max = *first;
        for p in rest {
            let a = p.to_array();
            let mi = min.to_array();
            let ma = max.to_array();
            min = Vec3::new(mi[0].min(a[0]), mi[1].min(a[1]), mi[2].min(a[2]));
            max = Vec3::new(ma[0].max(a[0]), ma[1].max(a[1]), ma[2].max(a[2]));
        }
        Some(Self { min, max })
    }
}
