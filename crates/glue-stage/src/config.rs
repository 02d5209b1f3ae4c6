// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tuning knobs for the collision resolver and detachment sweep.

use crate::error::StageError;

/// Resolver configuration.
///
/// Passed explicitly to [`crate::CollisionResolver`]; the core holds no
/// global state. With the `serde` feature enabled, missing fields in a
/// serialized config fall back to [`ResolverConfig::default`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResolverConfig {
    /// Upper bound on resolution passes per `resolve` call.
    pub max_iterations: usize,
    /// Extra distance added to every rigid push-out, in world units.
    pub step: f32,
    /// Fraction of the neighbour's smaller horizontal half-extent within
    /// which the dragged entity is pulled toward the neighbour's center.
    pub center_threshold_ratio: f32,
    /// Fraction of the remaining XZ distance covered by one center pull.
    pub center_pull_ratio: f32,
    /// Similarity snap vertical tolerance, as a multiple of the taller
    /// entity's half height.
    pub snap_vertical_tolerance: f32,
    /// Same as `snap_vertical_tolerance`, used when the dragged entity was
    /// stacked when the drag update began.
    pub stacked_snap_vertical_tolerance: f32,
    /// Vertical slack (± units) on a parent's box when checking whether a
    /// child still rests on it.
    pub detach_tolerance: f32,
    /// Maximum yaw difference (radians) for two entities to count as
    /// identically rotated.
    pub yaw_tolerance: f32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            step: 0.1,
            center_threshold_ratio: 0.3,
            center_pull_ratio: 0.3,
            snap_vertical_tolerance: 1.0,
            stacked_snap_vertical_tolerance: 0.2,
            detach_tolerance: 0.1,
            yaw_tolerance: 1e-4,
        }
    }
}

impl ResolverConfig {
    /// Checks that every field is finite and inside its usable range.
    pub fn validate(&self) -> Result<(), StageError> {
        let invalid = |field: &'static str, reason: &'static str| -> Result<(), StageError> {
            Err(StageError::InvalidConfig { field, reason })
        };
        if self.max_iterations == 0 {
            return invalid("max_iterations", "must be at least 1");
        }
        if !(self.step.is_finite() && self.step >= 0.0) {
            return invalid("step", "must be finite and non-negative");
        }
        for (field, value) in [
            ("center_threshold_ratio", self.center_threshold_ratio),
            ("center_pull_ratio", self.center_pull_ratio),
        ] {
            if !(value.is_finite() && (0.0..=1.0).contains(&value)) {
                return invalid(field, "must lie in [0, 1]");
            }
        }
        for (field, value) in [
            ("snap_vertical_tolerance", self.snap_vertical_tolerance),
            (
                "stacked_snap_vertical_tolerance",
                self.stacked_snap_vertical_tolerance,
            ),
            ("detach_tolerance", self.detach_tolerance),
            ("yaw_tolerance", self.yaw_tolerance),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(field, "must be finite and non-negative");
            }
        }
        Ok(())
    }
}
