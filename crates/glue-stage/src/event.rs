// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Change notifications for the rendering/animation layer.

use glue_math::Vec3;

use crate::ident::EntityId;

/// A mutation applied to the stage as a side effect of placement,
/// stacking, resolution, or removal.
///
/// Events queue on the [`crate::Stage`] in the order they happen; consumers
/// drain them with [`crate::Stage::drain_events`] and re-synchronise any
/// attached visuals.
#[derive(Debug, Clone, PartialEq)]
pub enum StageEvent {
    /// Entity center changed.
    Moved {
        /// Entity that moved.
        id: EntityId,
        /// New world-space center.
        position: Vec3,
    },
    /// Entity yaw changed.
    Rotated {
        /// Entity that rotated.
        id: EntityId,
        /// New yaw in radians.
        yaw: f32,
    },
    /// `child` now rests on `parent`.
    Stacked {
        /// Supporting entity.
        parent: EntityId,
        /// Resting entity.
        child: EntityId,
    },
    /// `child` no longer rests on `parent`.
    Unstacked {
        /// Former support.
        parent: EntityId,
        /// Former resting entity.
        child: EntityId,
    },
    /// Entity left the stage.
    Removed {
        /// Removed entity.
        id: EntityId,
    },
}
