// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Finding what an unsupported entity lands on.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::StageError;
use crate::event::StageEvent;
use crate::ident::EntityId;
use crate::stage::Stage;

/// Highest stackable surface under `id`'s footprint whose top is at or
/// below `id`'s bottom (plus `tolerance`).
///
/// `id`, its descendants, and everything in `exclude` are never candidates.
/// Ties on height go to the lower id.
pub(crate) fn find_support(
    stage: &Stage,
    id: EntityId,
    exclude: &BTreeSet<EntityId>,
    tolerance: f32,
) -> Result<Option<EntityId>, StageError> {
    let entity = stage.entity(id)?;
    let footprint = entity.world_aabb();
    let bottom = entity.bottom();
    let carried: BTreeSet<EntityId> = stage.descendants(id)?.into_iter().collect();

    let mut best: Option<(f32, EntityId)> = None;
    for other in stage.iter() {
        let oid = other.id();
        if oid == id || carried.contains(&oid) || exclude.contains(&oid) {
            continue;
        }
        let caps = other.capabilities();
        if !(caps.stackable && caps.collidable && other.has_valid_extents()) {
            continue;
        }
        let top = other.top();
        if top > bottom + tolerance || !other.world_aabb().overlaps_xz(&footprint) {
            continue;
        }
        if best.is_none_or(|(best_top, _)| top > best_top) {
            best = Some((top, oid));
        }
    }
    Ok(best.map(|(_, oid)| oid))
}

/// Drops `id` straight down onto its support (or the floor), stacks it there,
/// and seats its sub-stack on top of it.
///
/// Returns the new support, if any.
pub(crate) fn settle(
    stage: &mut Stage,
    id: EntityId,
    exclude: &BTreeSet<EntityId>,
    tolerance: f32,
) -> Result<Option<EntityId>, StageError> {
    let support = find_support(stage, id, exclude, tolerance)?;
    let surface = match support {
        Some(s) => stage.entity(s)?.top(),
        None => stage.floor_height(),
    };
    let position = {
        let e = stage.entity(id)?;
        e.position().with_y(surface + e.half_extents().y())
    };
    stage.set_center(id, position)?;
    stage.emit(StageEvent::Moved { id, position });
    if let Some(s) = support {
        stage.stack(s, id)?;
    } else if let Some(old) = stage.parent_of(id)? {
        stage.unstack(old, id)?;
    }
    stage.reseat_chain(id)?;
    debug!(%id, support = ?support, y = position.y(), "settled");
    Ok(support)
}
