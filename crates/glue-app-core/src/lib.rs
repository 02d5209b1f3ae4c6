// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for Glue tools (config storage, prefs).
//! Keeps CLI and host adapters thin and framework-agnostic.

pub mod config;
pub mod prefs;
