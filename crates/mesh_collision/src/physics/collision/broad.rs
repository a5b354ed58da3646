//! Broad-phase pre-filters
//!
//! Cheap conservative tests that reject pairs which cannot possibly touch.
//! A `false` here means the vertex sets cannot touch; a `true` only means
//! the narrow phase has to run.

use crate::entity::Entity;
use crate::foundation::math::Vec3;
use crate::physics::collision::primitives::BoundingSphere;

/// Do the world-space bounding boxes of two entities overlap?
///
/// An entity without vertices has no box to measure, so the pair is passed
/// on to the narrow phase.
pub fn aabb_overlap(a: &Entity, b: &Entity) -> bool {
    match (a.aabb(), b.aabb()) {
        (Some(box_a), Some(box_b)) => box_a.intersects(&box_b),
        _ => true,
    }
}

/// Does the box `a` covers while moving by `velocity` overlap the box of `b`?
pub fn swept_aabb_overlap(a: &Entity, velocity: &Vec3, b: &Entity) -> bool {
    match (a.aabb(), b.aabb()) {
        (Some(box_a), Some(box_b)) => box_a.swept(*velocity).intersects(&box_b),
        _ => true,
    }
}

/// Do the orientation-independent bounding spheres of two entities overlap?
///
/// Like [`aabb_overlap`], a mesh without vertices never rejects the pair.
pub fn sphere_overlap(a: &Entity, b: &Entity) -> bool {
    if a.mesh().vertices().is_empty() || b.mesh().vertices().is_empty() {
        return true;
    }
    a.bounding_sphere().intersects(&b.bounding_sphere())
}

/// Sphere test against `b` anywhere along the motion of `a`
///
/// The swept test moves the ellipsoid inscribed in the box of `a`, which can
/// poke outside the pose-centered bounding sphere. The moving sphere takes the
/// box center and its largest half-extent as radius, then sits halfway along
/// the motion, grown by half the travel distance.
pub fn swept_sphere_overlap(a: &Entity, velocity: &Vec3, b: &Entity) -> bool {
    let Some(aabb) = a.aabb() else {
        return true;
    };
    if b.mesh().vertices().is_empty() {
        return true;
    }
    let sphere = BoundingSphere::new(
        aabb.center() + velocity * 0.5,
        aabb.half_extents().max() + velocity.magnitude() * 0.5,
    );
    sphere.intersects(&b.bounding_sphere())
}
