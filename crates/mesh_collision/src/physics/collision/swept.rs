//! Continuous swept-ellipsoid collision detection
//!
//! The moving entity is approximated by the ellipsoid inscribed in its world
//! bounding box. Scaling every axis by the reciprocal half-extent turns that
//! ellipsoid into a unit sphere ("canonical space"), where contact against a
//! triangle reduces to three cases solved in closed form over `t ∈ [0, 1]`:
//!
//! - **Face**: the sphere center reaches distance 1 from the triangle plane
//!   while its projection lies inside the triangle.
//! - **Vertex**: `|c + v·t - p|² = 1`.
//! - **Edge**: distance from the center to the edge's line equals 1 and the
//!   closest point falls within the edge segment.
//!
//! See Fauerby, "Improved Collision detection and Response" (2003).

use crate::config::DetectorConfig;
use crate::entity::Entity;
use crate::foundation::math::{utils, Vec3};
use crate::physics::collision::primitives::Plane;
use crate::physics::error::{CollisionError, CollisionResult};

/// Which feature of a triangle was touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// Triangle interior
    Face,
    /// One of the three edges
    Edge,
    /// One of the three vertices
    Vertex,
}

/// Earliest contact found by [`sweep`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    /// Time of impact as a fraction of the motion, in `[0, 1]`
    pub time: f32,
    /// Feature of the target triangle that was touched
    pub kind: ContactKind,
    /// World-space contact point on the target
    pub point: Vec3,
    /// Index of the target triangle in its mesh
    pub triangle: usize,
}

/// Per-axis rescaling that maps the moving entity's bounding ellipsoid to a unit sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanonicalSpace {
    /// Reciprocal world half-extents of the moving entity
    pub scale: Vec3,
    /// Sphere center in canonical coordinates
    pub center: Vec3,
}

impl CanonicalSpace {
    /// Derive the canonical space of a moving entity from its world bounding box
    ///
    /// Fails with [`CollisionError::DegenerateGeometry`] when any half-extent is
    /// at or below `min_half_extent`, or when the mesh has no vertices.
    pub fn for_entity(entity: &Entity, min_half_extent: f32) -> CollisionResult<Self> {
        let aabb = entity.aabb().ok_or(CollisionError::DegenerateGeometry {
            axis: 0,
            half_extent: 0.0,
        })?;
        let half = aabb.half_extents();
        for axis in 0..3 {
            // Also catches NaN
            if !(half[axis] > min_half_extent) || !half[axis].is_finite() {
                log::debug!("Continuous: degenerate half-extent {} on axis {}", half[axis], axis);
                return Err(CollisionError::DegenerateGeometry {
                    axis,
                    half_extent: half[axis],
                });
            }
        }
        let scale = half.map(f32::recip);
        Ok(Self {
            scale,
            center: aabb.center().component_mul(&scale),
        })
    }

    /// World-space position or vector to canonical space
    pub fn to_canonical(&self, v: &Vec3) -> Vec3 {
        v.component_mul(&self.scale)
    }

    /// Canonical-space position or vector back to world space
    pub fn to_world(&self, v: &Vec3) -> Vec3 {
        v.component_div(&self.scale)
    }
}

/// Will `a`, moving by `velocity` over one time step, touch stationary `b`?
/// Uses default tolerances.
pub fn continuous_collide(a: &Entity, velocity: &Vec3, b: &Entity) -> CollisionResult<bool> {
    continuous_collide_with(a, velocity, b, &DetectorConfig::default())
}

/// Swept test with explicit configuration
///
/// Returns as soon as any triangle of `b` reports contact; use [`sweep`] when
/// the earliest contact is needed.
pub fn continuous_collide_with(
    a: &Entity,
    velocity: &Vec3,
    b: &Entity,
    config: &DetectorConfig,
) -> CollisionResult<bool> {
    let space = CanonicalSpace::for_entity(a, config.min_half_extent)?;
    let velocity = space.to_canonical(velocity);
    let target = canonical_vertices(b, &space);

    for (index, [i0, i1, i2]) in b.mesh().triangles().enumerate() {
        let tri = [target[i0], target[i1], target[i2]];
        if let Some(contact) = triangle_contact(&space.center, &velocity, &tri, config) {
            log::debug!(
                "Continuous: {:?} contact with triangle {} at t = {}",
                contact.kind, index, contact.time
            );
            return Ok(true);
        }
    }

    log::trace!("Continuous: no contact over {} triangles", b.mesh().triangle_count());
    Ok(false)
}

/// Earliest contact of `a` moving by `velocity` against stationary `b`
///
/// Scans every triangle and keeps the minimum time of impact. Ties go to the
/// lower triangle index.
pub fn sweep(
    a: &Entity,
    velocity: &Vec3,
    b: &Entity,
    config: &DetectorConfig,
) -> CollisionResult<Option<SweepHit>> {
    let space = CanonicalSpace::for_entity(a, config.min_half_extent)?;
    let canonical_velocity = space.to_canonical(velocity);
    let target = canonical_vertices(b, &space);

    let mut earliest: Option<SweepHit> = None;
    for (index, [i0, i1, i2]) in b.mesh().triangles().enumerate() {
        let tri = [target[i0], target[i1], target[i2]];
        if let Some(contact) = triangle_contact(&space.center, &canonical_velocity, &tri, config) {
            if earliest.map_or(true, |hit| contact.time < hit.time) {
                earliest = Some(SweepHit {
                    time: contact.time,
                    kind: contact.kind,
                    point: space.to_world(&contact.point),
                    triangle: index,
                });
            }
        }
    }

    if let Some(hit) = &earliest {
        log::debug!("Sweep: earliest {:?} contact on triangle {} at t = {}", hit.kind, hit.triangle, hit.time);
    }
    Ok(earliest)
}

fn canonical_vertices(entity: &Entity, space: &CanonicalSpace) -> Vec<Vec3> {
    entity
        .world_vertices()
        .iter()
        .map(|v| space.to_canonical(v))
        .collect()
}

/// Contact in canonical space
#[derive(Debug, Clone, Copy, PartialEq)]
struct Contact {
    time: f32,
    kind: ContactKind,
    point: Vec3,
}

/// Earliest contact of a unit sphere at `center` moving by `velocity` with one triangle
fn triangle_contact(
    center: &Vec3,
    velocity: &Vec3,
    tri: &[Vec3; 3],
    config: &DetectorConfig,
) -> Option<Contact> {
    let Some(plane) = Plane::from_points(tri[0], tri[1], tri[2]) else {
        log::trace!("Continuous: skipping zero-area triangle");
        return None;
    };
    let distance = plane.signed_distance_to(center);
    let normal_dot_velocity = plane.normal.dot(velocity);

    let (t0, t1) = if normal_dot_velocity.abs() < config.parallel_epsilon {
        // Moving parallel to the plane: either always inside the slab or never
        if distance.abs() > 1.0 {
            return None;
        }
        (0.0, 1.0)
    } else {
        let ta = (1.0 - distance) / normal_dot_velocity;
        let tb = (-1.0 - distance) / normal_dot_velocity;
        let (t0, t1) = if ta <= tb { (ta, tb) } else { (tb, ta) };
        // Neither slab crossing happens during this time step
        if !utils::in_range(t0, 0.0, 1.0) && !utils::in_range(t1, 0.0, 1.0) {
            return None;
        }
        (t0.clamp(0.0, 1.0), t1.clamp(0.0, 1.0))
    };

    let plane_point = plane.project(&(center + velocity * t0));
    if plane.in_triangle(&plane_point, &tri[0], &tri[1], &tri[2]) {
        return Some(Contact {
            time: t0,
            kind: ContactKind::Face,
            point: plane_point,
        });
    }

    let mut best: Option<Contact> = None;
    let mut limit = t1;
    let velocity_sq = velocity.magnitude_squared();

    for p in tri {
        let a = velocity_sq;
        let b = 2.0 * velocity.dot(&(center - p));
        let c = (p - center).magnitude_squared() - 1.0;
        if let Some(t) = lowest_root(a, b, c, limit) {
            limit = t;
            best = Some(Contact {
                time: t,
                kind: ContactKind::Vertex,
                point: *p,
            });
        }
    }

    for (pa, pb) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
        let edge = pb - pa;
        let base_to_vertex = pa - center;
        let edge_sq = edge.magnitude_squared();
        let edge_dot_velocity = edge.dot(velocity);
        let edge_dot_base = edge.dot(&base_to_vertex);

        let a = edge_sq * -velocity_sq + edge_dot_velocity * edge_dot_velocity;
        let b = edge_sq * (2.0 * velocity.dot(&base_to_vertex)) - 2.0 * edge_dot_velocity * edge_dot_base;
        let c = edge_sq * (1.0 - base_to_vertex.magnitude_squared()) + edge_dot_base * edge_dot_base;

        if let Some(t) = lowest_root(a, b, c, limit) {
            // Root is against the infinite line; keep it only within the segment
            let f = (edge_dot_velocity * t - edge_dot_base) / edge_sq;
            if utils::in_range(f, 0.0, 1.0) {
                limit = t;
                best = Some(Contact {
                    time: t,
                    kind: ContactKind::Edge,
                    point: pa + edge * f,
                });
            }
        }
    }

    best
}

/// Lowest root of `a·t² + b·t + c` strictly inside `(0, max)`
///
/// Uses the cancellation-free form of the quadratic formula, so a tiny
/// leading coefficient (slow motion) still yields the near root accurately and
/// `a == 0` degrades to the linear root. A negative discriminant yields no root.
pub fn lowest_root(a: f32, b: f32, c: f32, max: f32) -> Option<f32> {
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let q = -0.5 * (b + b.signum() * discriminant.sqrt());
    if q.abs() < f32::MIN_POSITIVE {
        // b and the discriminant both vanish: no relative motion
        return None;
    }
    // q / a is infinite for a == 0 and falls out of range below
    let r1 = c / q;
    let r2 = q / a;
    let (r1, r2) = if r1 <= r2 { (r1, r2) } else { (r2, r1) };

    if r1 > 0.0 && r1 < max {
        Some(r1)
    } else if r2 > 0.0 && r2 < max {
        Some(r2)
    } else {
        None
    }
}
