// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! How the dragged entity treats an intersecting neighbour.
//!
//! Priority: similarity snap, then stackable surface, then rigid block.

use std::f32::consts::{PI, TAU};

use crate::config::ResolverConfig;
use crate::entity::Entity;

/// Response to one intersecting neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Similar, stackable neighbour and the dragged entity is near its
    /// center: pull toward the center and stack on it.
    CenterStack,
    /// Similar neighbour: dock flush against its closest side.
    EdgeSnap,
    /// Stackable neighbour: stack on it, pulling toward its center first
    /// when `pull` is set.
    Surface {
        /// Dragged entity is within the center threshold.
        pull: bool,
    },
    /// Blocks the dragged entity.
    Rigid,
}

impl Contact {
    /// True when the neighbour becomes a stacking candidate.
    pub fn is_stacking_candidate(self) -> bool {
        matches!(self, Self::CenterStack | Self::Surface { .. })
    }

    /// True when the dragged entity is pulled toward the neighbour's center.
    pub fn pulls_to_center(self) -> bool {
        matches!(self, Self::CenterStack | Self::Surface { pull: true })
    }
}

/// Classifies an intersecting `neighbour` for the `dragged` entity.
///
/// `dragged_was_stacked` tightens the similarity vertical tolerance so that
/// lifting an item off a stack does not grab the neighbour's edge.
pub fn classify(
    dragged: &Entity,
    neighbour: &Entity,
    config: &ResolverConfig,
    dragged_was_stacked: bool,
) -> Contact {
    let near_center = within_center_threshold(dragged, neighbour, config);
    if is_similar(dragged, neighbour, config, dragged_was_stacked) {
        if neighbour.capabilities().stackable && near_center {
            return Contact::CenterStack;
        }
        return Contact::EdgeSnap;
    }
    if neighbour.capabilities().stackable {
        return Contact::Surface { pull: near_center };
    }
    Contact::Rigid
}

/// Both snap-enabled, same type, same yaw, and at comparable heights.
pub fn is_similar(
    dragged: &Entity,
    neighbour: &Entity,
    config: &ResolverConfig,
    dragged_was_stacked: bool,
) -> bool {
    let (a, b) = (dragged.capabilities(), neighbour.capabilities());
    if !(a.snaps_to_similar && b.snaps_to_similar) {
        return false;
    }
    if dragged.type_id() != neighbour.type_id() {
        return false;
    }
    if yaw_difference(dragged.yaw(), neighbour.yaw()).abs() > config.yaw_tolerance {
        return false;
    }
    let tolerance = if dragged_was_stacked {
        config.stacked_snap_vertical_tolerance
    } else {
        config.snap_vertical_tolerance
    };
    let taller_half = dragged.half_extents().y().max(neighbour.half_extents().y());
    let dy = (dragged.position().y() - neighbour.position().y()).abs();
    dy <= taller_half * tolerance
}

/// Horizontal distance to the neighbour's center is under the configured
/// fraction of its smaller horizontal half-extent.
pub fn within_center_threshold(dragged: &Entity, neighbour: &Entity, config: &ResolverConfig) -> bool {
    let he = neighbour.half_extents();
    let threshold = config.center_threshold_ratio * he.x().min(he.z());
    dragged.position().horizontal_distance(&neighbour.position()) < threshold
}

/// `a - b` wrapped into `(-π, π]`.
fn yaw_difference(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(TAU);
    if d > PI {
        d - TAU
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EntityDesc, Stage};

    fn seat() -> EntityDesc {
        EntityDesc::new("seat", 4.0, 4.0, 4.0).snapping()
    }

    fn contact(neighbour: EntityDesc, dragged: EntityDesc, was_stacked: bool) -> Contact {
        let mut stage = Stage::new();
        let n = stage.insert(neighbour);
        let d = stage.insert(dragged);
        let (Ok(n), Ok(d)) = (stage.entity(n), stage.entity(d)) else {
            unreachable!("entities were just inserted");
        };
        classify(d, n, &ResolverConfig::default(), was_stacked)
    }

    #[test]
    fn similar_stackable_near_center_is_a_center_stack() {
        // Threshold is 0.3 × 2.0 = 0.6; the offset is about 0.54.
        let c = contact(seat().stackable(), seat().at(0.5, 0.2), false);
        assert_eq!(c, Contact::CenterStack);
        assert!(c.pulls_to_center());
        assert!(c.is_stacking_candidate());
    }

    #[test]
    fn similar_off_center_edge_snaps_even_when_stackable() {
        let c = contact(seat().stackable(), seat().at(3.0, 0.0), false);
        assert_eq!(c, Contact::EdgeSnap);
        assert!(!c.is_stacking_candidate());
        assert_eq!(contact(seat(), seat().at(0.1, 0.0), false), Contact::EdgeSnap);
    }

    #[test]
    fn dissimilar_stackable_is_a_surface() {
        let near = contact(
            EntityDesc::new("table", 4.0, 4.0, 4.0).stackable(),
            seat().at(0.2, 0.0),
            false,
        );
        assert_eq!(near, Contact::Surface { pull: true });
        let far = contact(
            EntityDesc::new("table", 4.0, 4.0, 4.0).stackable(),
            seat().at(1.5, 0.0),
            false,
        );
        assert_eq!(far, Contact::Surface { pull: false });
        assert!(!far.pulls_to_center());
        assert!(far.is_stacking_candidate());
    }

    #[test]
    fn dissimilar_plain_box_is_rigid() {
        let c = contact(EntityDesc::new("wall", 4.0, 4.0, 4.0), seat().at(1.0, 0.0), false);
        assert_eq!(c, Contact::Rigid);
        assert!(!c.is_stacking_candidate());
    }

    #[test]
    fn type_gate_falls_through_to_rigid() {
        let other = EntityDesc::new("stool", 4.0, 4.0, 4.0).snapping();
        assert_eq!(contact(other, seat().at(1.0, 0.0), false), Contact::Rigid);
    }

    #[test]
    fn both_sides_must_opt_into_snapping() {
        let plain = EntityDesc::new("seat", 4.0, 4.0, 4.0);
        assert_eq!(contact(plain.clone(), seat().at(1.0, 0.0), false), Contact::Rigid);
        assert_eq!(contact(seat(), plain.at(1.0, 0.0), false), Contact::Rigid);
    }

    #[test]
    fn yaw_gate_falls_through_to_surface() {
        let c = contact(seat().stackable().rotated(30.0), seat().at(0.2, 0.0), false);
        assert_eq!(c, Contact::Surface { pull: true });
    }

    #[test]
    fn yaw_gate_treats_full_turns_as_equal() {
        assert_eq!(contact(seat().rotated(360.0), seat().at(1.0, 0.0), false), Contact::EdgeSnap);
        assert_eq!(contact(seat().rotated(-180.0), seat().rotated(180.0).at(1.0, 0.0), false), Contact::EdgeSnap);
        assert_eq!(contact(seat().rotated(359.0), seat().rotated(-1.0).at(1.0, 0.0), false), Contact::EdgeSnap);
    }

    #[test]
    fn height_gate_falls_through_to_rigid() {
        // Taller half-height is 2.0, so free drags accept |dy| <= 2.0.
        assert_eq!(contact(seat(), seat().at(1.0, 0.0).elevated(1.9), false), Contact::EdgeSnap);
        assert_eq!(contact(seat(), seat().at(1.0, 0.0).elevated(2.5), false), Contact::Rigid);
    }

    #[test]
    fn items_lifted_off_a_stack_use_the_tighter_height_gate() {
        // 0.2 × 2.0 = 0.4.
        assert_eq!(contact(seat(), seat().at(1.0, 0.0).elevated(0.3), true), Contact::EdgeSnap);
        assert_eq!(contact(seat(), seat().at(1.0, 0.0).elevated(1.0), true), Contact::Rigid);
        assert_eq!(contact(seat(), seat().at(1.0, 0.0).elevated(1.0), false), Contact::EdgeSnap);
    }

    #[test]
    fn center_threshold_uses_the_narrower_side() {
        let mut stage = Stage::new();
        let bench = stage.insert(EntityDesc::new("bench", 20.0, 2.0, 2.0).stackable());
        let cup = stage.insert(EntityDesc::new("cup", 1.0, 1.0, 1.0).at(0.5, 0.0));
        let (Ok(bench), Ok(cup)) = (stage.entity(bench), stage.entity(cup)) else {
            unreachable!("entities were just inserted");
        };
        // 0.3 × min(10, 1) = 0.3.
        assert!(!within_center_threshold(cup, bench, &ResolverConfig::default()));
    }

    #[test]
    fn yaw_difference_wraps_into_half_open_range() {
        assert!(yaw_difference(0.0, TAU).abs() < 1e-6);
        assert!(yaw_difference(-PI, PI).abs() < 1e-6);
        assert!((yaw_difference(0.1, -0.1) - 0.2).abs() < 1e-6);
        assert!((yaw_difference(PI - 0.1, -PI + 0.1) + 0.2).abs() < 1e-5);
    }
}
