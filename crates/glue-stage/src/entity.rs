// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Placed boxes and the descriptor used to create them.

use std::collections::BTreeSet;

use glue_geom::{Aabb, Obb, Pose};
use glue_math::{deg_to_rad, rad_to_deg, Vec3};

use crate::color::DisplayColor;
use crate::ident::{make_type_id, EntityId, TypeId};

/// What an entity may take part in during resolution.
///
/// Checked in one place, [`crate::classify::classify`], rather than ad hoc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capabilities {
    /// Other entities may rest on top of this one.
    pub stackable: bool,
    /// Docks edge-to-edge or center-to-center with same-type entities.
    pub snaps_to_similar: bool,
    /// Visible, mesh-backed, and part of collision checks at all.
    pub collidable: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            stackable: false,
            snaps_to_similar: false,
            collidable: true,
        }
    }
}

/// Parent relation of a stacked entity.
///
/// The parent and the offset live in one value so they are always set and
/// cleared together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackLink {
    /// Entity this one rests on.
    pub parent: EntityId,
    /// `child.position - parent.position` at the moment of (re)stacking.
    pub offset: Vec3,
}

/// A positioned, yaw-rotatable, stackable box on the stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub(crate) id: EntityId,
    pub(crate) kind: String,
    pub(crate) type_id: TypeId,
    pub(crate) position: Vec3,
    pub(crate) yaw: f32,
    pub(crate) half_extents: Vec3,
    pub(crate) caps: Capabilities,
    pub(crate) locked: bool,
    pub(crate) stack: Option<StackLink>,
    pub(crate) children: BTreeSet<EntityId>,
    pub(crate) color: DisplayColor,
}

impl Entity {
    /// Stable id on the owning stage.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Label the type id was derived from.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Similarity key.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// World-space center.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Yaw in radians.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Half width/height/depth.
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Capability flags.
    pub fn capabilities(&self) -> Capabilities {
        self.caps
    }

    /// True while the entity is being carried by an ancestor's drag.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Parent relation, when stacked.
    pub fn stack_link(&self) -> Option<StackLink> {
        self.stack
    }

    /// Entity this one rests on.
    pub fn parent(&self) -> Option<EntityId> {
        self.stack.map(|link| link.parent)
    }

    /// Offset from the parent's position recorded at stacking time.
    pub fn relative_offset(&self) -> Option<Vec3> {
        self.stack.map(|link| link.offset)
    }

    /// Entities resting directly on this one.
    pub fn children(&self) -> &BTreeSet<EntityId> {
        &self.children
    }

    /// Last computed display state.
    pub fn color(&self) -> DisplayColor {
        self.color
    }

    /// World Y of the top face.
    pub fn top(&self) -> f32 {
        self.position.y() + self.half_extents.y()
    }

    /// World Y of the bottom face.
    pub fn bottom(&self) -> f32 {
        self.position.y() - self.half_extents.y()
    }

    /// Position plus yaw.
    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.yaw)
    }

    /// World-space oriented box.
    pub fn obb(&self) -> Obb {
        Obb::from_pose(&self.pose(), self.half_extents)
    }

    /// World-space axis-aligned bounds of [`Entity::obb`].
    pub fn world_aabb(&self) -> Aabb {
        self.obb().world_aabb()
    }

    /// True when every half-extent is finite and strictly positive and the
    /// pose is finite. Entities failing this are skipped by classification.
    pub fn has_valid_extents(&self) -> bool {
        let he = self.half_extents.to_array();
        he.iter().all(|h| h.is_finite() && *h > 0.0)
            && self.position.is_finite()
            && self.yaw.is_finite()
    }

    /// Descriptor that recreates this entity at its current pose on a stage
    /// whose floor is at `floor_height`. Stacking relations are not part of
    /// the descriptor.
    pub fn describe(&self, floor_height: f32) -> EntityDesc {
        EntityDesc {
            kind: self.kind.clone(),
            x: self.position.x(),
            z: self.position.z(),
            elevation: self.bottom() - floor_height,
            width: self.half_extents.x() * 2.0,
            height: self.half_extents.y() * 2.0,
            depth: self.half_extents.z() * 2.0,
            rotation_deg: rad_to_deg(self.yaw),
            stackable: self.caps.stackable,
            snaps_to_similar: self.caps.snaps_to_similar,
            collidable: self.caps.collidable,
        }
    }
}

/// Creation descriptor for an [`Entity`].
///
/// Sizes are full width/height/depth; `elevation` is the height of the
/// bottom face above the floor, so the default places the box on the floor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EntityDesc {
    /// Type label; entities with equal labels are "similar".
    pub kind: String,
    /// Center X.
    pub x: f32,
    /// Center Z.
    pub z: f32,
    /// Bottom face height above the floor.
    pub elevation: f32,
    /// Full size along local X.
    pub width: f32,
    /// Full size along Y.
    pub height: f32,
    /// Full size along local Z.
    pub depth: f32,
    /// Yaw in degrees.
    pub rotation_deg: f32,
    /// See [`Capabilities::stackable`].
    pub stackable: bool,
    /// See [`Capabilities::snaps_to_similar`].
    pub snaps_to_similar: bool,
    /// See [`Capabilities::collidable`].
    pub collidable: bool,
}

impl Default for EntityDesc {
    fn default() -> Self {
        Self {
            kind: "box".to_owned(),
            x: 0.0,
            z: 0.0,
            elevation: 0.0,
            width: 1.0,
            height: 1.0,
            depth: 1.0,
            rotation_deg: 0.0,
            stackable: false,
            snaps_to_similar: false,
            collidable: true,
        }
    }
}

impl EntityDesc {
    /// Descriptor for a box of the given kind and full size, on the floor at
    /// the origin.
    pub fn new(kind: impl Into<String>, width: f32, height: f32, depth: f32) -> Self {
        Self {
            kind: kind.into(),
            width,
            height,
            depth,
            ..Self::default()
        }
    }

    /// Places the center at `(x, z)` on the floor plane.
    pub fn at(mut self, x: f32, z: f32) -> Self {
        self.x = x;
        self.z = z;
        self
    }

    /// Raises the bottom face `elevation` units above the floor.
    pub fn elevated(mut self, elevation: f32) -> Self {
        self.elevation = elevation;
        self
    }

    /// Sets the yaw in degrees.
    pub fn rotated(mut self, degrees: f32) -> Self {
        self.rotation_deg = degrees;
        self
    }

    /// Marks the box as a surface others may rest on.
    pub fn stackable(mut self) -> Self {
        self.stackable = true;
        self
    }

    /// Enables similarity snapping.
    pub fn snapping(mut self) -> Self {
        self.snaps_to_similar = true;
        self
    }

    /// Excludes the box from collision checks.
    pub fn non_collidable(mut self) -> Self {
        self.collidable = false;
        self
    }

    pub(crate) fn build(self, id: EntityId, floor_height: f32) -> Entity {
        let half_extents = Vec3::new(self.width * 0.5, self.height * 0.5, self.depth * 0.5);
        let position = Vec3::new(
            self.x,
            floor_height + self.elevation + half_extents.y(),
            self.z,
        );
        Entity {
            id,
            type_id: make_type_id(&self.kind),
            kind: self.kind,
            position,
            yaw: deg_to_rad(self.rotation_deg),
            half_extents,
            caps: Capabilities {
                stackable: self.stackable,
                snaps_to_similar: self.snaps_to_similar,
                collidable: self.collidable,
            },
            locked: false,
            stack: None,
            children: BTreeSet::new(),
            color: DisplayColor::Free,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elevation_is_measured_from_the_floor_to_the_bottom_face() {
        let e = EntityDesc::new("cup", 2.0, 4.0, 2.0).elevated(3.0).build(EntityId::from_raw(0), 1.0);
        assert_eq!(e.bottom(), 4.0);
        assert_eq!(e.position().y(), 6.0);
        assert_eq!(e.top(), 8.0);
    }

    #[test]
    fn describe_recreates_the_pose() {
        let desc = EntityDesc::new("shelf", 4.0, 2.0, 1.0)
            .at(3.0, -1.0)
            .elevated(2.0)
            .rotated(30.0)
            .stackable();
        let e = desc.clone().build(EntityId::from_raw(0), 0.5);
        let back = e.describe(0.5);
        assert_eq!(back.kind, desc.kind);
        assert!((back.elevation - desc.elevation).abs() < 1e-5);
        assert!((back.rotation_deg - desc.rotation_deg).abs() < 1e-3);
        assert!(back.stackable);
        assert!(!e.capabilities().snaps_to_similar);
    }

    #[test]
    fn zero_sized_boxes_are_invalid() {
        let e = EntityDesc::new("decal", 0.0, 1.0, 1.0).build(EntityId::from_raw(0), 0.0);
        assert!(!e.has_valid_extents());
    }
}
