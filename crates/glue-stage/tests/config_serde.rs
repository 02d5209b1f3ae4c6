#![cfg(feature = "serde")]
#![allow(missing_docs)]
//! JSON shape of the serialisable stage types.

use glue_stage::{EntityDesc, ResolverConfig, Stage};

#[test]
fn partial_config_falls_back_to_defaults() {
    let cfg: ResolverConfig = serde_json::from_str(r#"{ "step": 0.25 }"#).expect("parse");
    assert_eq!(cfg.step, 0.25);
    assert_eq!(cfg.max_iterations, ResolverConfig::default().max_iterations);
    assert_eq!(cfg.detach_tolerance, ResolverConfig::default().detach_tolerance);
}

#[test]
fn scene_descriptors_parse_with_defaults() {
    let descs: Vec<EntityDesc> = serde_json::from_str(
        r#"[
            { "kind": "table", "width": 10, "height": 10, "depth": 10, "stackable": true },
            { "kind": "cup", "x": 1, "z": 2, "elevation": 10, "width": 2, "height": 2, "depth": 2 }
        ]"#,
    )
    .expect("parse");
    assert_eq!(descs.len(), 2);
    assert!(descs[0].stackable);
    assert!(descs[1].collidable);

    let mut stage = Stage::new();
    let ids: Vec<_> = descs.into_iter().map(|d| stage.insert(d)).collect();
    let cup = stage.entity(ids[1]).expect("cup");
    assert_eq!(cup.position().y(), 11.0);
}
