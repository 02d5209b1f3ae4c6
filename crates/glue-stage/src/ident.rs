// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Identifier and hashing utilities.
use blake3::Hasher;
use core::fmt;

/// Canonical 256-bit hash used for type identifiers.
pub type Hash = [u8; 32];

/// Stable handle of an entity in a [`crate::Stage`] arena.
///
/// Ids are allocated sequentially and never reused within a stage, so a
/// removed entity's id cannot alias a later one.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct EntityId(u32);

impl EntityId {
    /// Wraps a raw index.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw index value.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Equality key deciding whether two entities are "similar" for snapping.
///
/// `TypeId` values are produced by [`make_type_id`], which hashes a label;
/// two entities loaded from the same asset share a label and thus a type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TypeId(pub Hash);

/// Produces a stable type identifier derived from a label using BLAKE3.
pub fn make_type_id(label: &str) -> TypeId {
    let mut hasher = Hasher::new();
    hasher.update(label.as_bytes());
    TypeId(hasher.finalize().into())
}
