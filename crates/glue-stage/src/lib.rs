// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! glue-stage: collision resolution, stacking, and similarity snapping for
//! yaw-oriented boxes on a floor plane.
//!
//! A [`Stage`] owns every placed [`Entity`] and the stacking forest that links
//! them. While a user drags an entity, the caller applies the tentative
//! position with [`Stage::place`] and then runs
//! [`CollisionResolver::resolve`], which pushes the entity out of rigid
//! neighbours, stacks it on surfaces, docks it against similar entities,
//! carries its sub-stack, and detaches it from a support it slid off.
//! [`Stage::remove`] drops whatever rested on a removed entity so nothing is
//! left floating.
//!
//! Everything is single-threaded and deterministic: entities are iterated in
//! id order and every mutation is reported as a [`StageEvent`].
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::missing_const_for_fn,
    clippy::suboptimal_flops,
    clippy::redundant_pub_crate,
    clippy::missing_errors_doc
)]

pub mod classify;
pub mod config;
pub mod snap;

mod color;
mod entity;
mod error;
mod event;
mod ident;
mod removal;
mod resolver;
mod stage;
mod support;
mod sweep;

// Re-exports for stable public API
pub use color::{display_color, DisplayColor};
pub use config::ResolverConfig;
pub use entity::{Capabilities, Entity, EntityDesc, StackLink};
pub use error::StageError;
pub use event::StageEvent;
pub use ident::{make_type_id, EntityId, Hash, TypeId};
pub use resolver::{CollisionResolver, Resolution};
pub use stage::{Stage, StackOutcome};
pub use sweep::sweep;
