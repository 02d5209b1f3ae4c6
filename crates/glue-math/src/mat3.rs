// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::Vec3;

/// Column‑major 3×3 matrix used as the rotation part of a box's pose.
///
/// - Stored column‑major; column `i` is the world direction of the box's
///   local axis `i`.
/// - Orthonormal rotations invert by transposition ([`Mat3::transpose`]).
///
/// # Examples
/// ```
/// use core::f32::consts::FRAC_PI_2;
/// use glue_math::{Mat3, Vec3};
/// // Yaw=90°: +Z maps to +X
/// let r = Mat3::rotation_y(FRAC_PI_2);
/// let v = r.transform(&Vec3::UNIT_Z);
/// assert!((v.x() - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat3 {
    data: [f32; 9],
}

impl Mat3 {
    /// Returns the identity matrix.
    pub const fn identity() -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, // col 0
                0.0, 1.0, 0.0, // col 1
                0.0, 0.0, 1.0, // col 2
            ],
        }
    }

    /// Creates a matrix from column-major array data.
    pub const fn new(data: [f32; 9]) -> Self {
        Self { data }
    }

    /// Builds a rotation matrix around the Y axis by `angle` radians.
    ///
    /// Maps `(x, z)` to `(x·cos + z·sin, −x·sin + z·cos)`.
    #[rustfmt::skip]
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([
            c,   0.0, -s,
            0.0, 1.0, 0.0,
            s,   0.0, c,
        ])
    }

    /// Returns the matrix as a column‑major array.
    pub fn to_array(self) -> [f32; 9] {
        self.data
    }

    /// Element at `(row, col)`.
    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.data[col * 3 + row]
    }

    /// Column `idx` as a vector (the world direction of local axis `idx`).
    pub fn column(&self, idx: usize) -> Vec3 {
        let base = idx * 3;
        Vec3::new(self.data[base], self.data[base + 1], self.data[base + 2])
    }

    /// Returns the transposed matrix.
    pub fn transpose(&self) -> Self {
        let mut out = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                out[row * 3 + col] = self.at(row, col);
            }
        }
        Self::new(out)
    }

    /// Applies the matrix to a vector.
    pub fn transform(&self, v: &Vec3) -> Vec3 {
        let [x, y, z] = v.to_array();
        Vec3::new(
            self.at(0, 0) * x + self.at(0, 1) * y + self.at(0, 2) * z,
            self.at(1, 0) * x + self.at(1, 1) * y + self.at(1, 2) * z,
            self.at(2, 0) * x + self.at(2, 1) * y + self.at(2, 2) * z,
        )
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::identity()
    }
}
