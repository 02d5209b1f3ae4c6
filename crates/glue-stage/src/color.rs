// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Display state derived from the final classification of a resolve pass.

use std::collections::BTreeSet;

use crate::entity::Entity;
use crate::ident::EntityId;

/// Visual feedback state for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayColor {
    /// In rigid collision with the dragged entity (or the dragged entity
    /// itself while colliding).
    Colliding,
    /// Resting on another entity.
    Stacked,
    /// A surface others may rest on, or currently supporting something.
    Stackable,
    /// None of the above.
    #[default]
    Free,
}

impl DisplayColor {
    /// Packed `0xRRGGBB` value used by the renderer.
    pub const fn rgb(self) -> u32 {
        match self {
            Self::Colliding => 0xff0000,
            Self::Stacked => 0xffff00,
            Self::Stackable => 0x0000ff,
            Self::Free => 0x00ff00,
        }
    }
}

/// Computes the display color of `entity`.
///
/// `dragged_colliding` is true only for the dragged entity when its final
/// resolve pass still found a rigid collision.
pub fn display_color(
    entity: &Entity,
    colliding: &BTreeSet<EntityId>,
    dragged_colliding: bool,
) -> DisplayColor {
    if dragged_colliding || colliding.contains(&entity.id()) {
        DisplayColor::Colliding
    } else if !entity.children().is_empty() || entity.capabilities().stackable {
        DisplayColor::Stackable
    } else if entity.parent().is_some() {
        DisplayColor::Stacked
    } else {
        DisplayColor::Free
    }
}
