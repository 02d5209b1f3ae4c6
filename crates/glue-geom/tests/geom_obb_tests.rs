#![allow(missing_docs)]
//! Integration tests for glue-geom oriented boxes.

use core::f32::consts::{FRAC_PI_2, PI};
use glue_geom::{Aabb, Obb, Pose};
use glue_math::Vec3;
use proptest::prelude::*;

fn boxed(center: Vec3, yaw: f32, he: Vec3) -> Obb {
    Obb::from_pose(&Pose::new(center, yaw), he)
}

#[test]
fn quarter_turn_swaps_footprint_axes() {
    // A 10×2 plank turned 90° occupies 2 on X and 10 on Z.
    let plank = boxed(Vec3::ZERO, FRAC_PI_2, Vec3::new(5.0, 1.0, 1.0));
    let bb = plank.world_aabb();
    assert!((bb.max().x() - 1.0).abs() < 1e-5);
    assert!((bb.max().z() - 5.0).abs() < 1e-5);

    let probe_x = boxed(Vec3::new(3.0, 0.0, 0.0), 0.0, Vec3::new(1.0, 1.0, 1.0));
    let probe_z = boxed(Vec3::new(0.0, 0.0, 3.0), 0.0, Vec3::new(1.0, 1.0, 1.0));
    assert!(!plank.intersects(&probe_x));
    assert!(plank.intersects(&probe_z));
}

#[test]
fn vertical_separation_is_respected() {
    let base = boxed(Vec3::new(0.0, 5.0, 0.0), 0.0, Vec3::new(5.0, 5.0, 5.0));
    let hovering = boxed(Vec3::new(0.0, 12.6, 0.0), 0.0, Vec3::new(2.5, 2.5, 2.5));
    let resting = boxed(Vec3::new(0.0, 12.5, 0.0), 0.0, Vec3::new(2.5, 2.5, 2.5));
    let sunk = boxed(Vec3::new(0.0, 12.0, 0.0), 0.0, Vec3::new(2.5, 2.5, 2.5));
    assert!(!base.intersects(&hovering));
    assert!(!base.intersects(&resting));
    assert!(base.intersects(&sunk));
}

#[test]
fn corners_are_enclosed_by_world_aabb() {
    let b = boxed(Vec3::new(1.0, 2.0, 3.0), 0.6, Vec3::new(2.0, 0.5, 1.0));
    let bb = b.world_aabb();
    let from_corners = Aabb::from_points(&b.corners());
    assert!(from_corners.is_some());
    if let Some(fc) = from_corners {
        for (a, c) in bb.min().to_array().iter().zip(fc.min().to_array().iter()) {
            assert!((a - c).abs() < 1e-4);
        }
        for (a, c) in bb.max().to_array().iter().zip(fc.max().to_array().iter()) {
            assert!((a - c).abs() < 1e-4);
        }
    }
}

proptest! {
    #[test]
    fn intersection_is_symmetric(
        ax in -10.0f32..10.0, az in -10.0f32..10.0, ayaw in -PI..PI,
        bx in -10.0f32..10.0, bz in -10.0f32..10.0, byaw in -PI..PI,
        h in 0.5f32..4.0,
    ) {
        let a = boxed(Vec3::new(ax, h, az), ayaw, Vec3::new(h, h, h * 0.5));
        let b = boxed(Vec3::new(bx, h, bz), byaw, Vec3::new(h * 0.75, h, h));
        prop_assert_eq!(a.intersects(&b), b.intersects(&a));
    }

    #[test]
    fn intersecting_boxes_have_overlapping_aabbs(
        bx in -6.0f32..6.0, bz in -6.0f32..6.0, byaw in -PI..PI,
    ) {
        let a = boxed(Vec3::new(0.0, 1.0, 0.0), 0.3, Vec3::new(2.0, 1.0, 1.0));
        let b = boxed(Vec3::new(bx, 1.0, bz), byaw, Vec3::new(1.0, 1.0, 2.0));
        if a.intersects(&b) {
            prop_assert!(a.world_aabb().overlaps(&b.world_aabb()));
        }
    }
}
