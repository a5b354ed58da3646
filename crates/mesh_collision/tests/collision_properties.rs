//! End-to-end checks of the detector contract through the public API.

use mesh_collision::prelude::*;
use mesh_collision::physics::collision::sat::discrete_collide_with;

fn cube_at(x: f32, y: f32, z: f32) -> Entity {
    Entity::new(
        Pose::from_position(Vec3::new(x, y, z)).unwrap(),
        Mesh::cube().unwrap(),
    )
}

fn wall_at_z5() -> Entity {
    Entity::new(
        Pose::default(),
        Mesh::triangle(
            Vec3::new(-10.0, -10.0, 5.0),
            Vec3::new(10.0, -10.0, 5.0),
            Vec3::new(0.0, 10.0, 5.0),
        )
        .unwrap(),
    )
}

#[test]
fn separated_unit_cubes_do_not_collide() {
    mesh_collision::foundation::logging::init();
    let a = cube_at(0.0, 0.0, 0.0);
    let b = cube_at(10.0, 0.0, 0.0);
    assert!(!discrete_collide(&a, &b));
    assert!(!discrete_collide(&b, &a));
    assert!(!aabb_overlap(&a, &b));
}

#[test]
fn coincident_copies_collide() {
    let pose = Pose::new(Vec3::new(3.0, -2.0, 7.0), Vec3::new(12.0, 34.0, 56.0), 1.5).unwrap();
    let a = Entity::new(pose.clone(), Mesh::cube().unwrap());
    let b = Entity::new(pose, Mesh::cube().unwrap());
    assert!(discrete_collide(&a, &b));
    assert!(CollisionDetector::default().discrete_collide(&a, &b));
}

#[test]
fn continuous_hit_and_miss_against_wall() {
    mesh_collision::foundation::logging::init();
    let a = cube_at(0.0, 0.0, 0.0);
    let wall = wall_at_z5();
    assert!(continuous_collide(&a, &Vec3::new(0.0, 0.0, 10.0), &wall).unwrap());
    assert!(!continuous_collide(&a, &Vec3::new(0.0, 0.0, 1.0), &wall).unwrap());
}

#[test]
fn continuous_zero_motion_far_from_plane_misses() {
    let a = cube_at(0.0, 0.0, 0.0);
    assert!(!continuous_collide(&a, &Vec3::zeros(), &wall_at_z5()).unwrap());
}

#[test]
fn repeated_queries_are_idempotent() {
    let a = cube_at(0.0, 0.0, 0.0);
    let b = cube_at(1.0, 1.0, 1.0);
    let wall = wall_at_z5();
    let velocity = Vec3::new(0.0, 0.0, 10.0);
    let detector = CollisionDetector::default();

    let first = (
        discrete_collide(&a, &b),
        continuous_collide(&a, &velocity, &wall).unwrap(),
        detector.sweep(&a, &velocity, &wall).unwrap(),
    );
    for _ in 0..3 {
        let again = (
            discrete_collide(&a, &b),
            continuous_collide(&a, &velocity, &wall).unwrap(),
            detector.sweep(&a, &velocity, &wall).unwrap(),
        );
        assert_eq!(first, again);
    }
}

#[test]
fn sweep_contact_kinds() {
    let detector = CollisionDetector::default();
    let a = cube_at(0.0, 0.0, 0.0);
    let velocity = Vec3::new(0.0, 0.0, 10.0);

    let face = detector.sweep(&a, &velocity, &wall_at_z5()).unwrap().unwrap();
    assert_eq!(face.kind, ContactKind::Face);

    let beside = Entity::new(
        Pose::default(),
        Mesh::triangle(
            Vec3::new(0.5, -10.0, 5.0),
            Vec3::new(0.5, 10.0, 5.0),
            Vec3::new(10.0, 0.0, 5.0),
        )
        .unwrap(),
    );
    let edge = detector.sweep(&a, &velocity, &beside).unwrap().unwrap();
    assert_eq!(edge.kind, ContactKind::Edge);
    assert!(edge.time > face.time);
}

#[test]
fn rotated_and_scaled_target() {
    // Wall authored in the XY plane, rotated to face X and pushed out to x = 6
    let pose = Pose::new(Vec3::new(6.0, 0.0, 0.0), Vec3::new(0.0, 90.0, 0.0), 2.0).unwrap();
    let wall = Entity::new(
        pose,
        Mesh::triangle(
            Vec3::new(-5.0, -5.0, 0.0),
            Vec3::new(5.0, -5.0, 0.0),
            Vec3::new(0.0, 5.0, 0.0),
        )
        .unwrap(),
    );
    let a = cube_at(0.0, 0.0, 0.0);
    let detector = CollisionDetector::default();
    let hit = detector.sweep(&a, &Vec3::new(10.0, 0.0, 0.0), &wall).unwrap().unwrap();
    assert_eq!(hit.kind, ContactKind::Face);
    assert!((hit.time - 0.5).abs() < 1e-4);
    assert!(!detector.continuous_collide(&a, &Vec3::new(-10.0, 0.0, 0.0), &wall).unwrap());
}

#[test]
fn invalid_inputs_rejected_at_construction() {
    assert!(matches!(
        Pose::new(Vec3::zeros(), Vec3::zeros(), 0.0),
        Err(CollisionError::InvalidPose { .. })
    ));
    assert!(matches!(
        Mesh::new(vec![Vec3::zeros()], Vec::new(), vec![0, 0, 1]),
        Err(CollisionError::InvalidMesh { .. })
    ));
}

#[test]
fn edge_cross_axes_only_remove_collisions() {
    let config = DetectorConfig {
        sat_axes: SatAxes::FaceNormalsAndEdgeCrosses,
        ..Default::default()
    };
    let a = Entity::new(
        Pose::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 45.0), 1.0).unwrap(),
        Mesh::cube().unwrap(),
    );
    for x in [1.0f32, 2.0, 2.7, 2.9, 3.5] {
        let b = Entity::new(
            Pose::new(Vec3::new(x, 0.0, 0.0), Vec3::new(0.0, 45.0, 0.0), 1.0).unwrap(),
            Mesh::cube().unwrap(),
        );
        if discrete_collide_with(&a, &b, &config) {
            assert!(discrete_collide(&a, &b));
        }
    }
}
