// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Placement math for pulls, edge docking, and rigid push-out.
//!
//! All functions are pure: they return the new center and leave the stage
//! alone. None divides by a distance, so coincident centers are safe.

use glue_geom::Aabb;
use glue_math::Vec3;

use crate::entity::Entity;

/// Side of the neighbour the dragged entity docks against, in the
/// neighbour's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapSide {
    /// Local −X.
    Left,
    /// Local +X.
    Right,
    /// Local −Z.
    Back,
    /// Local +Z.
    Front,
}

/// Moves `from` a fraction `ratio` of the way toward `target` in X/Z.
/// Y is unchanged.
pub fn center_pull(from: Vec3, target: Vec3, ratio: f32) -> Vec3 {
    Vec3::new(
        from.x() + (target.x() - from.x()) * ratio,
        from.y(),
        from.z() + (target.z() - from.z()) * ratio,
    )
}

/// Docks `dragged` flush against the closest side of `neighbour`.
///
/// Works in the neighbour's local frame (both share a yaw): the docking
/// axis is set to touch, the other horizontal axis aligns with the
/// neighbour's center. Y is unchanged.
pub fn edge_snap(dragged: &Entity, neighbour: &Entity) -> (SnapSide, Vec3) {
    let pose = neighbour.pose();
    let local = pose.inverse_transform_point(&dragged.position());
    let (hn, hd) = (neighbour.half_extents(), dragged.half_extents());
    let reach_x = hn.x() + hd.x();
    let reach_z = hn.z() + hd.z();

    let sides = [
        (SnapSide::Left, (local.x() + reach_x).abs()),
        (SnapSide::Right, (local.x() - reach_x).abs()),
        (SnapSide::Back, (local.z() + reach_z).abs()),
        (SnapSide::Front, (local.z() - reach_z).abs()),
    ];
    let mut side = sides[0];
    for candidate in &sides[1..] {
        if candidate.1 < side.1 {
            side = *candidate;
        }
    }

    let docked = match side.0 {
        SnapSide::Left => Vec3::new(-reach_x, local.y(), 0.0),
        SnapSide::Right => Vec3::new(reach_x, local.y(), 0.0),
        SnapSide::Back => Vec3::new(0.0, local.y(), -reach_z),
        SnapSide::Front => Vec3::new(0.0, local.y(), reach_z),
    };
    (side.0, pose.transform_point(&docked))
}

/// Displacement that pushes `dragged` out of `other` along the horizontal
/// axis with the shallower penetration, by that depth plus `step`.
///
/// The direction is the side that needs the shorter move, so a box wider
/// than the obstacle it straddles still clears it.
pub fn push_out(dragged: &Aabb, other: &Aabb, step: f32) -> Vec3 {
    let (d_min, d_max) = (dragged.min(), dragged.max());
    let (o_min, o_max) = (other.min(), other.max());
    let x = signed_depth(d_max.x() - o_min.x(), o_max.x() - d_min.x());
    let z = signed_depth(d_max.z() - o_min.z(), o_max.z() - d_min.z());

    if x.abs() < z.abs() {
        Vec3::new(x + x.signum() * step, 0.0, 0.0)
    } else {
        Vec3::new(0.0, 0.0, z + z.signum() * step)
    }
}

/// Shorter of "back off toward −axis by `toward_min`" and "advance toward
/// +axis by `toward_max`", as a signed distance.
fn signed_depth(toward_min: f32, toward_max: f32) -> f32 {
    if toward_min < toward_max {
        -toward_min.abs()
    } else {
        toward_max.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EntityDesc, Stage};

    #[test]
    fn center_pull_is_partial_and_safe_at_zero_distance() {
        let from = Vec3::new(10.0, 3.0, -10.0);
        let pulled = center_pull(from, Vec3::ZERO, 0.3);
        assert!((pulled.x() - 7.0).abs() < 1e-6);
        assert!((pulled.z() + 7.0).abs() < 1e-6);
        assert_eq!(pulled.y(), 3.0);
        assert_eq!(center_pull(Vec3::ZERO, Vec3::ZERO, 0.3), Vec3::ZERO);
    }

    #[test]
    fn edge_snap_picks_nearest_side_and_centers_orthogonal_axis() {
        let mut stage = Stage::new();
        let n = stage.insert(EntityDesc::new("seat", 10.0, 10.0, 10.0).snapping());
        let d = stage.insert(EntityDesc::new("seat", 10.0, 10.0, 10.0).at(1.5, 8.5).snapping());
        let (Ok(n), Ok(d)) = (stage.entity(n), stage.entity(d)) else {
            unreachable!("entities were just inserted");
        };
        let (side, pos) = edge_snap(d, n);
        assert_eq!(side, SnapSide::Front);
        assert!(pos.x().abs() < 1e-5);
        assert!((pos.z() - 10.0).abs() < 1e-5);
    }

    #[test]
    fn push_out_uses_shallower_axis() {
        let a = Aabb::from_center_half_extents(Vec3::new(1.5, 0.0, 0.2), Vec3::new(1.0, 1.0, 1.0));
        let b = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0));
        let delta = push_out(&a, &b, 0.1);
        // X overlap is 0.5, Z overlap is 1.8.
        assert!((delta.x() - 0.6).abs() < 1e-5);
        assert_eq!(delta.z(), 0.0);
    }

    #[test]
    fn push_out_clears_a_narrow_obstacle_on_the_near_side() {
        // Dragged spans x -15..-5 around a post at -14.5..-12.5: moving right
        // by 2.5 clears it, moving left would need 9.5.
        let dragged = Aabb::from_center_half_extents(Vec3::new(-10.0, 5.0, 0.0), Vec3::new(5.0, 5.0, 5.0));
        let post = Aabb::from_center_half_extents(Vec3::new(-13.5, 5.0, 0.0), Vec3::new(1.0, 5.0, 1.0));
        let delta = push_out(&dragged, &post, 0.1);
        assert!((delta.x() - 2.6).abs() < 1e-5);
        assert_eq!(delta.z(), 0.0);
        let moved = Aabb::from_center_half_extents(Vec3::new(-10.0 + delta.x(), 5.0, 0.0), Vec3::new(5.0, 5.0, 5.0));
        assert!(!moved.overlaps(&post));
    }
}
