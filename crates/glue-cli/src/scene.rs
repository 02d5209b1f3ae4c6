// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! JSON scenes and the summaries printed after each command.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use glue_math::rad_to_deg;
use glue_stage::{DisplayColor, EntityDesc, EntityId, Resolution, Stage};
use serde::Serialize;

/// A stage loaded from a scene file, with ids mapped back to array indices.
#[derive(Debug)]
pub struct Scene {
    pub stage: Stage,
    pub ids: Vec<EntityId>,
}

impl Scene {
    /// Reads a JSON array of entity descriptors and inserts them in order.
    pub fn load(path: &Path, floor_height: f32) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("reading scene {}", path.display()))?;
        let descs: Vec<EntityDesc> =
            serde_json::from_str(&text).with_context(|| format!("parsing scene {}", path.display()))?;
        let mut stage = Stage::with_floor_height(floor_height);
        let ids = descs.into_iter().map(|d| stage.insert(d)).collect();
        Ok(Self { stage, ids })
    }

    /// Id of the entity at `index`.
    pub fn id(&self, index: usize) -> Result<EntityId> {
        match self.ids.get(index) {
            Some(id) => Ok(*id),
            None => bail!("entity index {index} out of range (scene has {})", self.ids.len()),
        }
    }

    /// Scene index of `id`.
    pub fn index(&self, id: EntityId) -> Option<usize> {
        self.ids.iter().position(|candidate| *candidate == id)
    }

    /// Records `parent:child` links given on the command line.
    pub fn link(&mut self, links: &[(usize, usize)]) -> Result<()> {
        for &(parent, child) in links {
            let outcome = self.stage.stack(self.id(parent)?, self.id(child)?)?;
            if !outcome.is_stacked() {
                bail!("cannot stack {child} on {parent}: {outcome:?}");
            }
        }
        Ok(())
    }

    /// Descriptors for every remaining entity, in scene order.
    pub fn descriptors(&self) -> Vec<EntityDesc> {
        let floor = self.stage.floor_height();
        self.ids
            .iter()
            .filter_map(|id| self.stage.entity(*id).ok())
            .map(|e| e.describe(floor))
            .collect()
    }

    /// Writes [`Scene::descriptors`] as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.descriptors())?;
        fs::write(path, json).with_context(|| format!("writing scene {}", path.display()))
    }

    /// Per-entity state for printing.
    pub fn entities(&self, colors: Option<&BTreeMap<EntityId, DisplayColor>>) -> Vec<EntityView> {
        self.ids
            .iter()
            .enumerate()
            .filter_map(|(index, id)| self.stage.entity(*id).ok().map(|e| (index, e)))
            .map(|(index, e)| {
                let color = colors
                    .and_then(|c| c.get(&e.id()).copied())
                    .unwrap_or_else(|| e.color());
                EntityView {
                    index,
                    kind: e.kind().to_owned(),
                    position: e.position().to_array(),
                    rotation_deg: rad_to_deg(e.yaw()),
                    parent: e.parent().and_then(|p| self.index(p)),
                    color: color_name(color),
                    rgb: format!("#{:06x}", color.rgb()),
                }
            })
            .collect()
    }
}

/// One entity in a printed summary.
#[derive(Debug, Serialize)]
pub struct EntityView {
    pub index: usize,
    pub kind: String,
    pub position: [f32; 3],
    pub rotation_deg: f32,
    pub parent: Option<usize>,
    pub color: &'static str,
    pub rgb: String,
}

/// Output of `glue drag`.
#[derive(Debug, Serialize)]
pub struct DragSummary {
    pub converged: bool,
    pub iterations: usize,
    pub colliding: Vec<usize>,
    pub stacked_on: Option<usize>,
    pub detached_from: Option<usize>,
    pub events: usize,
    pub entities: Vec<EntityView>,
}

impl DragSummary {
    /// Builds the summary for a finished resolve.
    pub fn new(scene: &Scene, resolution: &Resolution, events: usize) -> Self {
        Self {
            converged: resolution.converged,
            iterations: resolution.iterations,
            colliding: resolution
                .colliding
                .iter()
                .filter_map(|id| scene.index(*id))
                .collect(),
            stacked_on: resolution.stacked_on.and_then(|id| scene.index(id)),
            detached_from: resolution.detached_from.and_then(|id| scene.index(id)),
            events,
            entities: scene.entities(Some(&resolution.colors)),
        }
    }
}

/// Output of `glue remove`.
#[derive(Debug, Serialize)]
pub struct RemoveSummary {
    pub removed: usize,
    pub events: usize,
    pub entities: Vec<EntityView>,
}

fn color_name(color: DisplayColor) -> &'static str {
    match color {
        DisplayColor::Colliding => "colliding",
        DisplayColor::Stacked => "stacked",
        DisplayColor::Stackable => "stackable",
        DisplayColor::Free => "free",
    }
}
