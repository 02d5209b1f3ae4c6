// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Organic detachment of a stacked entity dragged off its support.

use std::collections::BTreeSet;

use tracing::debug;

use crate::config::ResolverConfig;
use crate::error::StageError;
use crate::ident::EntityId;
use crate::stage::Stage;
use crate::support::settle;

/// Unstacks `moved` from any stackable parent it no longer rests on.
///
/// "Rests on" means the world bounds of `moved` still overlap the parent's
/// bounds widened vertically by `config.detach_tolerance`. A detached entity
/// drops onto the highest surface below its footprint, or the floor, taking
/// its sub-stack with it.
///
/// Returns the parent it was detached from, if any.
pub fn sweep(
    stage: &mut Stage,
    moved: EntityId,
    config: &ResolverConfig,
) -> Result<Option<EntityId>, StageError> {
    let bounds = stage.world_aabb(moved)?;
    let supports: Vec<EntityId> = stage
        .iter()
        .filter(|e| e.capabilities().stackable && e.children().contains(&moved))
        .map(|e| e.id())
        .collect();

    let mut detached = None;
    for parent in supports {
        let still_resting = stage
            .world_aabb(parent)?
            .inflate_y(config.detach_tolerance)
            .overlaps(&bounds);
        if !still_resting && stage.unstack(parent, moved)? {
            debug!(%parent, child = %moved, "detached");
            detached = Some(parent);
        }
    }

    if detached.is_some() && stage.parent_of(moved)?.is_none() {
        settle(stage, moved, &BTreeSet::new(), config.detach_tolerance)?;
    }
    Ok(detached)
}
