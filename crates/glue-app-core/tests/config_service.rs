#![allow(missing_docs)]

use glue_app_core::config::{ConfigError, ConfigService, ConfigStore, MemoryConfigStore};
use glue_app_core::prefs::{StagePrefs, STAGE_KEY};

#[test]
fn missing_key_loads_as_none_and_default() {
    let service = ConfigService::new(MemoryConfigStore::new());
    let loaded: Option<StagePrefs> = service.load(STAGE_KEY).expect("load");
    assert!(loaded.is_none());
    let prefs: StagePrefs = service.load_or_default(STAGE_KEY).expect("default");
    assert_eq!(prefs, StagePrefs::default());
}

#[test]
fn saved_prefs_round_trip_through_the_store() {
    let service = ConfigService::new(MemoryConfigStore::new());
    let prefs = StagePrefs {
        floor_height: 2.5,
        pretty: false,
    };
    service.save(STAGE_KEY, &prefs).expect("save");
    let back: Option<StagePrefs> = service.load(STAGE_KEY).expect("load");
    assert_eq!(back, Some(prefs));
    assert_eq!(service.into_inner().len(), 1);
}

#[test]
fn partial_prefs_fill_in_defaults() {
    let store = MemoryConfigStore::new();
    store.save_raw(STAGE_KEY, br#"{ "floor_height": 1.0 }"#).expect("seed");
    let service = ConfigService::new(store);
    let prefs: StagePrefs = service.load_or_default(STAGE_KEY).expect("load");
    assert_eq!(prefs.floor_height, 1.0);
    assert!(prefs.pretty);
}

#[test]
fn malformed_blob_is_a_serde_error() {
    let store = MemoryConfigStore::new();
    store.save_raw(STAGE_KEY, b"{ not json").expect("seed");
    let service = ConfigService::new(store);
    let err = service.load::<StagePrefs>(STAGE_KEY).expect_err("malformed");
    assert!(matches!(err, ConfigError::Serde(_)));
}

#[test]
fn empty_blob_counts_as_missing() {
    let store = MemoryConfigStore::new();
    store.save_raw(STAGE_KEY, b"").expect("seed");
    let service = ConfigService::new(store);
    assert!(service.load::<StagePrefs>(STAGE_KEY).expect("load").is_none());
}
