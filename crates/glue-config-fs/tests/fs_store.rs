#![allow(missing_docs)]

use glue_app_core::config::{ConfigError, ConfigService, ConfigStore};
use glue_app_core::prefs::{StagePrefs, STAGE_KEY};
use glue_config_fs::FsConfigStore;

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FsConfigStore::with_base(dir.path()).expect("store");
    assert!(matches!(store.load_raw("absent"), Err(ConfigError::NotFound)));
}

#[test]
fn prefs_persist_as_json_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FsConfigStore::with_base(dir.path().join("nested")).expect("store");
    let path = store.path_for(STAGE_KEY);
    let service = ConfigService::new(store);

    let prefs = StagePrefs {
        floor_height: -1.0,
        pretty: false,
    };
    service.save(STAGE_KEY, &prefs).expect("save");
    assert!(path.is_file());

    let text = std::fs::read_to_string(&path).expect("read");
    assert!(text.contains("floor_height"));

    let back: StagePrefs = service.load_or_default(STAGE_KEY).expect("load");
    assert_eq!(back, prefs);
}
