// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Effective configuration: store, `--config` override, defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glue_app_core::config::ConfigService;
use glue_app_core::prefs::{StagePrefs, RESOLVER_KEY, STAGE_KEY};
use glue_config_fs::FsConfigStore;
use glue_stage::ResolverConfig;
use tracing::{debug, warn};

/// Everything a command needs to build and resolve a stage.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub resolver: ResolverConfig,
    pub prefs: StagePrefs,
    pub store: Option<FsConfigStore>,
}

impl Settings {
    /// Loads prefs and resolver tuning from the store, then applies the
    /// `--config` file on top.
    ///
    /// A missing platform config dir is not fatal: defaults are used.
    pub fn load(config: Option<&Path>, config_dir: Option<&Path>) -> Result<Self> {
        let store = match config_dir {
            Some(dir) => Some(
                FsConfigStore::with_base(dir)
                    .with_context(|| format!("opening config dir {}", dir.display()))?,
            ),
            None => match FsConfigStore::new() {
                Ok(store) => Some(store),
                Err(err) => {
                    warn!(error = %err, "no config store available; using defaults");
                    None
                }
            },
        };

        let mut settings = Self {
            store,
            ..Self::default()
        };
        if let Some(store) = settings.store.clone() {
            debug!(base = %store.base().display(), "loading stored config");
            let service = ConfigService::new(store);
            settings.prefs = service
                .load_or_default(STAGE_KEY)
                .context("loading stage prefs")?;
            settings.resolver = service
                .load_or_default(RESOLVER_KEY)
                .context("loading resolver config")?;
        }

        if let Some(path) = config {
            let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            settings.resolver = serde_json::from_slice(&bytes)
                .with_context(|| format!("parsing resolver config {}", path.display()))?;
        }

        settings
            .resolver
            .validate()
            .context("validating resolver config")?;
        Ok(settings)
    }

    /// Writes the resolver tuning back to the store.
    pub fn save_resolver(&self) -> Result<&Path> {
        let store = self
            .store
            .as_ref()
            .context("no config store available; pass --config-dir")?;
        ConfigService::new(store.clone())
            .save(RESOLVER_KEY, &self.resolver)
            .context("saving resolver config")?;
        Ok(store.base())
    }
}
