// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Removing an entity without leaving anything floating.

use std::collections::BTreeSet;

use tracing::debug;

use crate::entity::Entity;
use crate::error::StageError;
use crate::event::StageEvent;
use crate::ident::EntityId;
use crate::stage::Stage;
use crate::support::settle;

/// Vertical slack when looking for the surface a gap-filled entity lands on.
const GAP_FILL_TOLERANCE: f32 = 0.1;

impl Stage {
    /// Removes an entity, first dropping whatever rested on it.
    ///
    /// Each direct child falls onto the next surface below it (the removed
    /// entity's own support, or the floor) and every entity above it in the
    /// chain is re-seated exactly on the one beneath. The removed entity is
    /// detached from its own parent and returned.
    pub fn remove(&mut self, id: EntityId) -> Result<Entity, StageError> {
        let (own_parent, children) = {
            let e = self.entity(id)?;
            (e.parent(), e.children().iter().copied().collect::<Vec<_>>())
        };
        if let Some(parent) = own_parent {
            self.unstack(parent, id)?;
        }

        let exclude = BTreeSet::from([id]);
        for child in children {
            self.unstack(id, child)?;
            let landed = settle(self, child, &exclude, GAP_FILL_TOLERANCE)?;
            debug!(removed = %id, %child, landed_on = ?landed, "gap-filled");
        }

        let entity = self.take(id)?;
        self.emit(StageEvent::Removed { id });
        Ok(entity)
    }
}
