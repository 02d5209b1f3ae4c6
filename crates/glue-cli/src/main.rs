// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Glue CLI
//!
//! Loads a scene of boxes, applies a drag or a removal, runs the collision
//! resolver, and prints the resulting state as JSON on stdout. Logs go to
//! stderr and are filtered with `RUST_LOG` (default `info`).
#![allow(clippy::print_stdout)]

mod cli;
mod scene;
mod settings;

use anyhow::Result;
use clap::Parser;
use glue_math::Vec3;
use glue_stage::CollisionResolver;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, ConfigArgs, DragArgs, SceneArgs};
use crate::scene::{DragSummary, RemoveSummary, Scene};
use crate::settings::Settings;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::load(cli.config.as_deref(), cli.config_dir.as_deref())?;
    match cli.cmd {
        Command::Drag(args) => drag(&settings, &args),
        Command::Remove(args) => remove(&settings, &args),
        Command::Config(args) => config(&settings, &args),
    }
}

fn drag(settings: &Settings, args: &DragArgs) -> Result<()> {
    let mut scene = Scene::load(&args.scene.scene, settings.prefs.floor_height)?;
    scene.link(&args.scene.stacks)?;
    let id = scene.id(args.scene.entity)?;
    scene.stage.drain_events();

    let [x, y, z] = args.to;
    scene.stage.place(id, Vec3::new(x, y, z))?;
    let resolution = CollisionResolver::new(settings.resolver.clone()).resolve(&mut scene.stage, id)?;
    let events = scene.stage.drain_events().len();
    info!(
        entity = args.scene.entity,
        converged = resolution.converged,
        iterations = resolution.iterations,
        "drag resolved"
    );

    if let Some(out) = &args.out {
        scene.save(out)?;
        info!(path = %out.display(), "wrote resolved scene");
    }
    emit(settings, &DragSummary::new(&scene, &resolution, events))
}

fn remove(settings: &Settings, args: &SceneArgs) -> Result<()> {
    let mut scene = Scene::load(&args.scene, settings.prefs.floor_height)?;
    scene.link(&args.stacks)?;
    let id = scene.id(args.entity)?;
    scene.stage.drain_events();

    scene.stage.remove(id)?;
    let events = scene.stage.drain_events().len();
    info!(entity = args.entity, events, "removed");

    emit(
        settings,
        &RemoveSummary {
            removed: args.entity,
            events,
            entities: scene.entities(None),
        },
    )
}

fn config(settings: &Settings, args: &ConfigArgs) -> Result<()> {
    if args.save {
        let base = settings.save_resolver()?;
        info!(dir = %base.display(), "saved resolver config");
    }
    if args.print || !args.save {
        emit(settings, &settings.resolver)?;
    }
    Ok(())
}

fn emit<T: Serialize>(settings: &Settings, value: &T) -> Result<()> {
    let json = if settings.prefs.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
