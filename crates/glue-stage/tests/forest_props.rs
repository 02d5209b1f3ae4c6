#![allow(missing_docs)]
//! Property tests over the stacking forest and the resolver.

use glue_math::{approx_eq, Vec3};
use glue_stage::{CollisionResolver, EntityDesc, EntityId, Stage, StackOutcome};
use proptest::prelude::*;

const N: u32 = 6;

fn stage_of_crates() -> (Stage, Vec<EntityId>) {
    let mut stage = Stage::new();
    let ids = (0..N)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let x = i as f32 * 3.0;
            stage.insert(EntityDesc::new("crate", 2.0, 2.0, 2.0).at(x, 0.0).stackable())
        })
        .collect();
    (stage, ids)
}

fn assert_offsets_hold(stage: &Stage) -> Result<(), TestCaseError> {
    for e in stage.iter() {
        if let Some(link) = e.stack_link() {
            let parent = stage.entity(link.parent).expect("parent exists");
            let expect = parent.position().add(&link.offset);
            for (a, b) in e.position().to_array().iter().zip(expect.to_array().iter()) {
                prop_assert!(approx_eq(*a, *b, 1e-3), "{} vs {}", a, b);
            }
            prop_assert!(parent.children().contains(&e.id()));
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn forest_stays_acyclic(ops in prop::collection::vec((0..N, 0..N), 1..40)) {
        let (mut stage, ids) = stage_of_crates();
        for (p, c) in ops {
            let (parent, child) = (ids[p as usize], ids[c as usize]);
            let outcome = stage.stack(parent, child).expect("stack");
            if parent == child {
                prop_assert_eq!(outcome, StackOutcome::SelfStack);
            }
            for id in &ids {
                let chain = stage.ancestors(*id).expect("ancestors");
                prop_assert!(!chain.contains(id));
                prop_assert!(chain.len() < ids.len());
            }
        }
        // Every child appears under exactly one parent.
        for id in &ids {
            let holders = ids
                .iter()
                .filter(|p| stage.children_of(**p).expect("children").contains(id))
                .count();
            let linked = usize::from(stage.parent_of(*id).expect("parent").is_some());
            prop_assert_eq!(holders, linked);
        }
    }

    #[test]
    fn cascades_keep_children_at_their_offsets(
        ops in prop::collection::vec((0..N, 0..N), 1..20),
        mover in 0..N,
        dx in -20.0f32..20.0,
        dz in -20.0f32..20.0,
        degrees in -180.0f32..180.0,
    ) {
        let (mut stage, ids) = stage_of_crates();
        for (p, c) in ops {
            stage.stack(ids[p as usize], ids[c as usize]).expect("stack");
        }
        // Move the root of the mover's stack so no moved entity has a stale offset.
        let picked = ids[mover as usize];
        let id = stage.ancestors(picked).expect("ancestors").last().copied().unwrap_or(picked);
        let at = stage.entity(id).expect("mover").position();
        stage.set_position(id, at.x() + dx, Some(at.y()), at.z() + dz).expect("move");
        assert_offsets_hold(&stage)?;
        stage.set_rotation_degrees(id, degrees).expect("rotate");
        assert_offsets_hold(&stage)?;
    }

    #[test]
    fn converged_drag_leaves_no_overlap(x in -12.0f32..12.0, z in -12.0f32..12.0) {
        let mut stage = Stage::new();
        let wall = stage.insert(EntityDesc::new("wall", 6.0, 6.0, 6.0).at(-5.0, 0.0));
        let table = stage.insert(EntityDesc::new("table", 6.0, 3.0, 6.0).at(5.0, 0.0).stackable());
        let cube = stage.insert(EntityDesc::new("cube", 2.0, 2.0, 2.0).at(30.0, 30.0));
        stage.place(cube, Vec3::new(x, 1.0, z)).expect("place");

        let res = CollisionResolver::default().resolve(&mut stage, cube).expect("resolve");

        if res.converged {
            let obb = stage.obb(cube).expect("cube");
            prop_assert!(!obb.intersects(&stage.obb(wall).expect("wall")));
            prop_assert!(!obb.intersects(&stage.obb(table).expect("table")));
            prop_assert!(res.colliding.is_empty());
        }
    }
}
