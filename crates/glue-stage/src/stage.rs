// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Entity arena and the stacking forest.
//!
//! Parent/child relations are stored as ids, never references, so cycle
//! checks and removal are plain map lookups. Every walk up or down the
//! forest is bounded by the arena size.

use std::collections::{BTreeMap, BTreeSet};

use glue_geom::{Aabb, Obb};
use glue_math::{deg_to_rad, Mat3, Vec3};
use tracing::{debug, warn};

use crate::color::display_color;
use crate::entity::{Entity, EntityDesc, StackLink};
use crate::error::StageError;
use crate::event::StageEvent;
use crate::ident::EntityId;

/// Result of a [`Stage::stack`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackOutcome {
    /// A new parent relation was recorded.
    Stacked,
    /// The child already rested on this parent; its offset was re-pinned.
    Refreshed,
    /// `parent == child`; nothing changed.
    SelfStack,
    /// The parent rests (transitively) on the child; nothing changed.
    CycleRejected,
}

impl StackOutcome {
    /// True when the child now rests on the requested parent.
    pub fn is_stacked(self) -> bool {
        matches!(self, Self::Stacked | Self::Refreshed)
    }
}

/// The set of boxes sharing a floor, plus their stacking forest.
#[derive(Debug, Clone, Default)]
pub struct Stage {
    entities: BTreeMap<EntityId, Entity>,
    next_id: u32,
    floor_height: f32,
    events: Vec<StageEvent>,
}

impl Stage {
    /// Empty stage with the floor at `y = 0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty stage with the floor at `y = floor_height`.
    pub fn with_floor_height(floor_height: f32) -> Self {
        Self {
            floor_height,
            ..Self::default()
        }
    }

    /// Height of the ground plane.
    pub fn floor_height(&self) -> f32 {
        self.floor_height
    }

    /// Creates an entity and returns its id.
    ///
    /// Entities with non-positive or non-finite sizes are accepted but never
    /// take part in collision classification.
    pub fn insert(&mut self, desc: EntityDesc) -> EntityId {
        let id = EntityId::from_raw(self.next_id);
        self.next_id += 1;
        let mut entity = desc.build(id, self.floor_height);
        if !entity.has_valid_extents() {
            warn!(%id, kind = entity.kind(), "entity has invalid extents; excluded from collision");
        }
        entity.color = display_color(&entity, &BTreeSet::new(), false);
        self.entities.insert(id, entity);
        id
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True when no entity is on the stage.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// True when `id` names an entity on this stage.
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Looks up an entity, failing with [`StageError::UnknownEntity`].
    pub fn entity(&self, id: EntityId) -> Result<&Entity, StageError> {
        self.entities.get(&id).ok_or(StageError::UnknownEntity(id))
    }

    pub(crate) fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity, StageError> {
        self.entities
            .get_mut(&id)
            .ok_or(StageError::UnknownEntity(id))
    }

    pub(crate) fn take(&mut self, id: EntityId) -> Result<Entity, StageError> {
        self.entities
            .remove(&id)
            .ok_or(StageError::UnknownEntity(id))
    }

    /// All ids in ascending order.
    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.keys().copied().collect()
    }

    /// Iterates entities in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.values()
    }

    /// World-space oriented box of an entity.
    pub fn obb(&self, id: EntityId) -> Result<Obb, StageError> {
        Ok(self.entity(id)?.obb())
    }

    /// World-space axis-aligned bounds of an entity.
    pub fn world_aabb(&self, id: EntityId) -> Result<Aabb, StageError> {
        Ok(self.entity(id)?.world_aabb())
    }

    /// Takes every queued change notification, oldest first.
    pub fn drain_events(&mut self) -> Vec<StageEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: StageEvent) {
        self.events.push(event);
    }

    /// Includes or excludes an entity from collision checks (e.g. when it is
    /// hidden).
    pub fn set_collidable(&mut self, id: EntityId, collidable: bool) -> Result<(), StageError> {
        self.entity_mut(id)?.caps.collidable = collidable;
        Ok(())
    }

    // ── forest queries ──────────────────────────────────────────────────

    /// Entity `id` rests on, if any.
    pub fn parent_of(&self, id: EntityId) -> Result<Option<EntityId>, StageError> {
        Ok(self.entity(id)?.parent())
    }

    /// Entities resting directly on `id`, ascending.
    pub fn children_of(&self, id: EntityId) -> Result<Vec<EntityId>, StageError> {
        Ok(self.entity(id)?.children.iter().copied().collect())
    }

    /// Supports below `id`, nearest first.
    pub fn ancestors(&self, id: EntityId) -> Result<Vec<EntityId>, StageError> {
        let mut out = Vec::new();
        let mut cursor = self.entity(id)?.parent();
        while let Some(parent) = cursor {
            if out.len() > self.entities.len() {
                break;
            }
            out.push(parent);
            cursor = self.entities.get(&parent).and_then(Entity::parent);
        }
        Ok(out)
    }

    /// Every entity transitively resting on `id`, parents before children.
    pub fn descendants(&self, id: EntityId) -> Result<Vec<EntityId>, StageError> {
        let mut out = Vec::new();
        let mut seen = BTreeSet::new();
        let mut pending: Vec<EntityId> = self.entity(id)?.children.iter().rev().copied().collect();
        while let Some(next) = pending.pop() {
            if !seen.insert(next) {
                continue;
            }
            out.push(next);
            if let Some(e) = self.entities.get(&next) {
                pending.extend(e.children.iter().rev().copied());
            }
        }
        Ok(out)
    }

    /// True when `descendant` rests, directly or transitively, on `ancestor`.
    pub fn is_ancestor_of(&self, ancestor: EntityId, descendant: EntityId) -> bool {
        self.ancestors(descendant)
            .map(|chain| chain.contains(&ancestor))
            .unwrap_or(false)
    }

    // ── stacking mutation ───────────────────────────────────────────────

    /// Records that `child` rests on `parent`.
    ///
    /// Self-stacks and stacks that would close a cycle are rejected without
    /// changing anything. Re-stacking onto the current parent only refreshes
    /// the relative offset; stacking onto a new parent first detaches from
    /// the old one.
    pub fn stack(&mut self, parent: EntityId, child: EntityId) -> Result<StackOutcome, StageError> {
        let parent_pos = self.entity(parent)?.position;
        let child_entity = self.entity(child)?;
        if parent == child {
            return Ok(StackOutcome::SelfStack);
        }
        if self.is_ancestor_of(child, parent) {
            debug!(%parent, %child, "stack rejected: would create a cycle");
            return Ok(StackOutcome::CycleRejected);
        }
        let offset = child_entity.position.sub(&parent_pos);
        let previous = child_entity.parent();

        if previous == Some(parent) {
            self.entity_mut(child)?.stack = Some(StackLink { parent, offset });
            return Ok(StackOutcome::Refreshed);
        }
        if let Some(old) = previous {
            self.unstack(old, child)?;
        }
        self.entity_mut(parent)?.children.insert(child);
        self.entity_mut(child)?.stack = Some(StackLink { parent, offset });
        debug!(%parent, %child, "stacked");
        self.emit(StageEvent::Stacked { parent, child });
        Ok(StackOutcome::Stacked)
    }

    /// Removes the relation `child` rests on `parent`.
    ///
    /// Returns `false` when `child` was not resting on `parent`.
    pub fn unstack(&mut self, parent: EntityId, child: EntityId) -> Result<bool, StageError> {
        self.entity(child)?;
        let removed = self.entity_mut(parent)?.children.remove(&child);
        let child_entity = self.entity_mut(child)?;
        let linked = child_entity.parent() == Some(parent);
        if linked {
            child_entity.stack = None;
        }
        if removed || linked {
            debug!(%parent, %child, "unstacked");
            self.emit(StageEvent::Unstacked { parent, child });
        }
        Ok(removed || linked)
    }

    // ── placement ───────────────────────────────────────────────────────

    /// Moves an entity's center without touching what rests on it.
    ///
    /// This is how a drag controller applies a tentative position before
    /// calling [`crate::CollisionResolver::resolve`].
    pub fn place(&mut self, id: EntityId, position: Vec3) -> Result<(), StageError> {
        self.set_center(id, position)?;
        self.emit(StageEvent::Moved { id, position });
        Ok(())
    }

    /// Moves an entity and carries its whole sub-stack along.
    ///
    /// `y = None` puts the entity on the floor.
    pub fn set_position(&mut self, id: EntityId, x: f32, y: Option<f32>, z: f32) -> Result<(), StageError> {
        let half_height = self.entity(id)?.half_extents.y();
        let y = y.unwrap_or(self.floor_height + half_height);
        self.place(id, Vec3::new(x, y, z))?;
        self.move_stacked_children(id)
    }

    /// Sets yaw (radians) and rotates the sub-stack about this entity by the
    /// same delta.
    pub fn set_yaw(&mut self, id: EntityId, yaw: f32) -> Result<(), StageError> {
        let entity = self.entity_mut(id)?;
        let delta = yaw - entity.yaw;
        entity.yaw = yaw;
        self.emit(StageEvent::Rotated { id, yaw });
        self.rotate_stacked_children(id, delta)
    }

    /// Sets yaw in degrees; see [`Stage::set_yaw`].
    pub fn set_rotation_degrees(&mut self, id: EntityId, degrees: f32) -> Result<(), StageError> {
        self.set_yaw(id, deg_to_rad(degrees))
    }

    /// Re-seats every transitive child at `parent.position + offset`.
    pub fn move_stacked_children(&mut self, id: EntityId) -> Result<(), StageError> {
        let mut pending = vec![id];
        let mut visited = BTreeSet::new();
        while let Some(parent) = pending.pop() {
            if !visited.insert(parent) {
                continue;
            }
            let (origin, children) = {
                let p = self.entity(parent)?;
                (p.position, p.children.iter().copied().collect::<Vec<_>>())
            };
            for child in children {
                let Some(offset) = self.entity(child)?.relative_offset() else {
                    continue;
                };
                let position = origin.add(&offset);
                self.set_center(child, position)?;
                self.emit(StageEvent::Moved { id: child, position });
                pending.push(child);
            }
        }
        Ok(())
    }

    fn rotate_stacked_children(&mut self, id: EntityId, delta: f32) -> Result<(), StageError> {
        if delta == 0.0 {
            return Ok(());
        }
        let rotation = Mat3::rotation_y(delta);
        let mut pending = vec![id];
        let mut visited = BTreeSet::new();
        while let Some(parent) = pending.pop() {
            if !visited.insert(parent) {
                continue;
            }
            let (origin, children) = {
                let p = self.entity(parent)?;
                (p.position, p.children.iter().copied().collect::<Vec<_>>())
            };
            for child in children {
                let c = self.entity_mut(child)?;
                let relative = c
                    .relative_offset()
                    .unwrap_or_else(|| c.position.sub(&origin));
                let rotated = rotation.transform(&relative);
                let position = origin.add(&rotated);
                c.position = position;
                c.yaw += delta;
                c.stack = Some(StackLink {
                    parent,
                    offset: rotated,
                });
                let yaw = c.yaw;
                self.emit(StageEvent::Moved { id: child, position });
                self.emit(StageEvent::Rotated { id: child, yaw });
                pending.push(child);
            }
        }
        Ok(())
    }

    /// Seats every transitive child exactly on top of the entity beneath it,
    /// keeping X/Z, and re-pins offsets.
    pub(crate) fn reseat_chain(&mut self, id: EntityId) -> Result<(), StageError> {
        let mut pending = vec![id];
        let mut visited = BTreeSet::new();
        while let Some(parent) = pending.pop() {
            if !visited.insert(parent) {
                continue;
            }
            let (origin, top, children) = {
                let p = self.entity(parent)?;
                (p.position, p.top(), p.children.iter().copied().collect::<Vec<_>>())
            };
            for child in children {
                let c = self.entity_mut(child)?;
                let position = c.position.with_y(top + c.half_extents.y());
                c.position = position;
                c.stack = Some(StackLink {
                    parent,
                    offset: position.sub(&origin),
                });
                self.emit(StageEvent::Moved { id: child, position });
                pending.push(child);
            }
        }
        Ok(())
    }

    /// Sets the center without emitting an event.
    pub(crate) fn set_center(&mut self, id: EntityId, position: Vec3) -> Result<(), StageError> {
        self.entity_mut(id)?.position = position;
        Ok(())
    }

    // ── cascade locks ───────────────────────────────────────────────────

    /// Marks every transitive child of `id` as locked.
    pub fn lock_descendants(&mut self, id: EntityId) -> Result<(), StageError> {
        self.set_descendants_locked(id, true)
    }

    /// Clears the lock on every transitive child of `id`.
    pub fn unlock_descendants(&mut self, id: EntityId) -> Result<(), StageError> {
        self.set_descendants_locked(id, false)
    }

    fn set_descendants_locked(&mut self, id: EntityId, locked: bool) -> Result<(), StageError> {
        for child in self.descendants(id)? {
            self.entity_mut(child)?.locked = locked;
        }
        Ok(())
    }
}
