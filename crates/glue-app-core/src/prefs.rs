// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Stage-level preferences shared by Glue tools.

use serde::{Deserialize, Serialize};

/// Logical config key under which [`StagePrefs`] are stored.
pub const STAGE_KEY: &str = "stage";

/// Logical config key under which the resolver tuning is stored.
pub const RESOLVER_KEY: &str = "resolver";

/// Saved preferences for a stage surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StagePrefs {
    /// Height of the ground plane new stages are created with.
    pub floor_height: f32,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for StagePrefs {
    fn default() -> Self {
        Self {
            floor_height: 0.0,
            pretty: true,
        }
    }
}
