// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-drag-update collision, stacking, and snapping resolution.

use std::collections::{BTreeMap, BTreeSet};

use glue_geom::CONTACT_SLOP;
use tracing::{debug, instrument, trace, warn};

use crate::classify::{classify, Contact};
use crate::color::{display_color, DisplayColor};
use crate::config::ResolverConfig;
use crate::entity::Entity;
use crate::error::StageError;
use crate::event::StageEvent;
use crate::ident::EntityId;
use crate::snap::{center_pull, edge_snap, push_out};
use crate::stage::Stage;
use crate::sweep::sweep;

/// What a [`CollisionResolver::resolve`] call settled on.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resolution {
    /// Rigid neighbours the dragged entity overlapped in the final pass.
    /// A rigid parent is listed here without blocking convergence.
    pub colliding: BTreeSet<EntityId>,
    /// Passes run (at most `max_iterations`).
    pub iterations: usize,
    /// False when the iteration cap was reached with work still pending.
    /// Residual overlap is then possible and reported via `colliding`.
    pub converged: bool,
    /// Support the dragged entity rests on afterwards.
    pub stacked_on: Option<EntityId>,
    /// Support the detachment sweep removed the dragged entity from.
    pub detached_from: Option<EntityId>,
    /// Display state of every entity on the stage.
    pub colors: BTreeMap<EntityId, DisplayColor>,
}

impl Resolution {
    /// True when the dragged entity is still blocked.
    pub fn has_collision(&self) -> bool {
        !self.colliding.is_empty()
    }
}

/// Outcome of a single pass over the neighbours.
#[derive(Debug, Default)]
struct Pass {
    colliding: BTreeSet<EntityId>,
    /// A rigid neighbour pushed the dragged entity, or still overlaps it.
    blocked: bool,
    /// A pull or edge snap moved the dragged entity.
    snapped: bool,
    stacked: bool,
}

impl Pass {
    fn settled(&self) -> bool {
        !self.blocked && !self.stacked
    }
}

/// Resolves overlaps for a dragged entity against the rest of the stage.
///
/// Invoked once per drag-position update, after the caller has applied the
/// tentative position (see [`Stage::place`]). Runs to completion; there are
/// no suspension points.
#[derive(Debug, Clone, Default)]
pub struct CollisionResolver {
    config: ResolverConfig,
}

impl CollisionResolver {
    /// Creates a resolver with the given tuning.
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Active tuning.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Pushes `dragged` out of rigid neighbours, stacks it on surfaces,
    /// snaps it to similar neighbours, carries its sub-stack, detaches it
    /// from a support it slid off, and recomputes display colors.
    ///
    /// Best effort: hitting the iteration cap is not an error.
    #[instrument(level = "debug", skip_all, fields(dragged = %dragged))]
    pub fn resolve(&self, stage: &mut Stage, dragged: EntityId) -> Result<Resolution, StageError> {
        let (start, stackable, was_stacked, valid) = {
            let e = stage.entity(dragged)?;
            (
                e.position(),
                e.capabilities().stackable,
                e.parent().is_some(),
                e.has_valid_extents(),
            )
        };

        let mut resolution = Resolution::default();
        if valid {
            if stackable {
                stage.lock_descendants(dragged)?;
            }
            let looped = self.run_passes(stage, dragged, was_stacked, &mut resolution);
            if stackable {
                stage.move_stacked_children(dragged)?;
                stage.unlock_descendants(dragged)?;
            }
            looped?;
        } else {
            debug!("dragged entity has invalid extents; skipping classification");
            resolution.converged = true;
        }

        let end = stage.entity(dragged)?.position();
        if end != start {
            stage.emit(StageEvent::Moved {
                id: dragged,
                position: end,
            });
        }

        resolution.detached_from = sweep(stage, dragged, &self.config)?;
        resolution.stacked_on = stage.parent_of(dragged)?;
        if let Some(parent) = resolution.stacked_on {
            // Sliding across a support moves the entity without re-stacking it.
            stage.stack(parent, dragged)?;
        }
        resolution.colors = refresh_colors(stage, &resolution.colliding, dragged);
        Ok(resolution)
    }

    fn run_passes(
        &self,
        stage: &mut Stage,
        dragged: EntityId,
        was_stacked: bool,
        resolution: &mut Resolution,
    ) -> Result<(), StageError> {
        while resolution.iterations < self.config.max_iterations {
            resolution.iterations += 1;
            let pass = self.pass(stage, dragged, was_stacked)?;
            trace!(
                iteration = resolution.iterations,
                colliding = pass.colliding.len(),
                blocked = pass.blocked,
                stacked = pass.stacked,
                "pass"
            );
            let done = pass.settled();
            resolution.colliding = pass.colliding;
            if done {
                resolution.converged = true;
                return Ok(());
            }
        }
        warn!(
            iterations = resolution.iterations,
            colliding = resolution.colliding.len(),
            "iteration cap reached; leaving entity at last position"
        );
        Ok(())
    }

    /// One classification sweep over every neighbour followed by stacking
    /// placement.
    fn pass(&self, stage: &mut Stage, dragged: EntityId, was_stacked: bool) -> Result<Pass, StageError> {
        let cfg = &self.config;
        let mut pass = Pass::default();
        let mut candidates: Vec<EntityId> = Vec::new();

        for id in stage.ids() {
            if id == dragged {
                continue;
            }
            let (contact, target, blocks) = {
                let me = stage.entity(dragged)?;
                let other = stage.entity(id)?;
                if !takes_part(other) || !me.obb().intersects(&other.obb()) {
                    continue;
                }
                let contact = classify(me, other, cfg, was_stacked);
                // A rigid parent still supports the entity; it never pushes it.
                let blocks = contact == Contact::Rigid && me.parent() != Some(id);
                let target = match contact {
                    c if c.pulls_to_center() => Some(center_pull(
                        me.position(),
                        other.position(),
                        cfg.center_pull_ratio,
                    )),
                    Contact::EdgeSnap => {
                        let (side, docked) = edge_snap(me, other);
                        trace!(neighbour = %id, ?side, "edge snap");
                        Some(docked)
                    }
                    Contact::Rigid if blocks => {
                        let delta = push_out(&me.world_aabb(), &other.world_aabb(), cfg.step);
                        Some(me.position().add(&delta))
                    }
                    _ => None,
                };
                (contact, target, blocks)
            };

            if contact == Contact::Rigid {
                pass.colliding.insert(id);
            }
            pass.blocked |= blocks;
            pass.snapped |= target.is_some() && !blocks;
            if contact.is_stacking_candidate() {
                candidates.push(id);
            }
            if let Some(target) = target {
                stage.set_center(dragged, target)?;
            }
        }

        let mut ordered: Vec<(f32, EntityId)> = Vec::with_capacity(candidates.len());
        for id in candidates {
            ordered.push((stage.entity(id)?.position().y(), id));
        }
        ordered.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        for (_, candidate) in ordered {
            if self.place_on(stage, dragged, candidate)? {
                pass.stacked = true;
            }
        }

        // Neighbours are visited in id order, so a later pull or snap can
        // land the entity in a rigid neighbour that was already checked.
        if pass.snapped && pass.settled() {
            let late = self.rigid_overlaps(stage, dragged, was_stacked)?;
            if !late.is_empty() {
                trace!(count = late.len(), "snap landed in a rigid neighbour");
                pass.blocked = true;
                pass.colliding.extend(late);
            }
        }
        Ok(pass)
    }

    /// Rigid, non-parent neighbours the dragged entity currently overlaps.
    fn rigid_overlaps(
        &self,
        stage: &Stage,
        dragged: EntityId,
        was_stacked: bool,
    ) -> Result<BTreeSet<EntityId>, StageError> {
        let me = stage.entity(dragged)?;
        let obb = me.obb();
        Ok(stage
            .iter()
            .filter(|other| other.id() != dragged && me.parent() != Some(other.id()))
            .filter(|other| takes_part(other) && obb.intersects(&other.obb()))
            .filter(|other| classify(me, other, &self.config, was_stacked) == Contact::Rigid)
            .map(Entity::id)
            .collect())
    }

    /// Lifts `dragged` onto `surface` if it sits below the surface's top and
    /// records the stacking relation. Returns whether anything moved.
    fn place_on(&self, stage: &mut Stage, dragged: EntityId, surface: EntityId) -> Result<bool, StageError> {
        if stage.is_ancestor_of(dragged, surface) {
            return Ok(false);
        }
        let top = stage.entity(surface)?.top();
        let (bottom, lifted) = {
            let me = stage.entity(dragged)?;
            (me.bottom(), me.position().with_y(top + me.half_extents().y()))
        };
        if bottom >= top - CONTACT_SLOP {
            return Ok(false);
        }
        stage.set_center(dragged, lifted)?;
        let outcome = stage.stack(surface, dragged)?;
        stage.move_stacked_children(dragged)?;
        debug!(%surface, ?outcome, y = lifted.y(), "placed on surface");
        Ok(true)
    }
}

/// Unlocked, collidable, and well-formed.
fn takes_part(other: &Entity) -> bool {
    !other.is_locked() && other.capabilities().collidable && other.has_valid_extents()
}

fn refresh_colors(
    stage: &mut Stage,
    colliding: &BTreeSet<EntityId>,
    dragged: EntityId,
) -> BTreeMap<EntityId, DisplayColor> {
    let dragged_colliding = !colliding.is_empty();
    let colors: BTreeMap<EntityId, DisplayColor> = stage
        .iter()
        .map(|e| {
            let own = dragged_colliding && e.id() == dragged;
            (e.id(), display_color(e, colliding, own))
        })
        .collect();
    for (id, color) in &colors {
        if let Ok(e) = stage.entity_mut(*id) {
            e.color = *color;
        }
    }
    colors
}
