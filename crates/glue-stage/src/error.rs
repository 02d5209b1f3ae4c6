// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use thiserror::Error;

use crate::ident::EntityId;

/// Errors emitted by stage operations.
///
/// Geometric outcomes (unresolved overlap, rejected cycles, skipped
/// degenerate boxes) are reported through return values, not errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StageError {
    /// The id does not name an entity on this stage.
    #[error("unknown entity: {0}")]
    UnknownEntity(EntityId),
    /// A resolver configuration field is out of range.
    #[error("invalid resolver config: `{field}` {reason}")]
    InvalidConfig {
        /// Offending field name.
        field: &'static str,
        /// Human-readable constraint that was violated.
        reason: &'static str,
    },
}
