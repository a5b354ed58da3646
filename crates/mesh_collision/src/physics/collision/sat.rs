//! Discrete separating-axis test
//!
//! Two convex shapes are disjoint iff some axis exists on which their
//! projections do not overlap. The candidate axes are the deduplicated world
//! face normals of both meshes, optionally extended with the cross products of
//! every edge direction of one mesh with every edge direction of the other.
//!
//! With face normals only, the test is exact whenever a separating axis is a
//! face normal, and can report a false positive for some edge-to-edge
//! configurations (two rotated boxes meeting edge on). Enable
//! [`SatAxes::FaceNormalsAndEdgeCrosses`] for an exact convex test.
//!
//! The world coordinate axes are always tried first, through the bounding
//! boxes of the two vertex sets, so disjoint boxes never report a collision.

use crate::config::{DetectorConfig, SatAxes};
use crate::entity::Entity;
use crate::foundation::math::Vec3;
use crate::physics::collision::primitives::{Aabb, WorldTriangle};

/// Do two entities intersect at their current poses? Uses default tolerances.
pub fn discrete_collide(a: &Entity, b: &Entity) -> bool {
    discrete_collide_with(a, b, &DetectorConfig::default())
}

/// Separating-axis test with explicit configuration
///
/// Returns `true` when no candidate axis separates the two vertex sets. If
/// either mesh has no vertices nothing can be projected and the result is a
/// vacuous `true`. Meshes without triangles contribute no face axes; two such
/// meshes collide vacuously unless their boxes are already disjoint.
pub fn discrete_collide_with(a: &Entity, b: &Entity, config: &DetectorConfig) -> bool {
    let verts_a = a.world_vertices();
    let verts_b = b.world_vertices();

    if let (Some(box_a), Some(box_b)) = (Aabb::from_points(&verts_a), Aabb::from_points(&verts_b)) {
        if !box_a.intersects(&box_b) {
            log::debug!("SAT: separated on a world axis ({:?} vs {:?})", box_a, box_b);
            return false;
        }
    }

    let tris_a = a.world_triangles();
    let tris_b = b.world_triangles();

    let axes = candidate_axes(&tris_a, &tris_b, config);
    log::trace!("SAT: testing {} candidate axes", axes.len());

    for axis in &axes {
        if let (Some(ia), Some(ib)) = (project(axis, &verts_a), project(axis, &verts_b)) {
            if !ia.overlaps(&ib) {
                log::debug!("SAT: separating axis {:?} found ({:?} vs {:?})", axis, ia, ib);
                return false;
            }
        }
    }

    log::debug!("SAT: no separating axis among {} candidates", axes.len());
    true
}

/// Closed interval of projections onto an axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Smallest projection
    pub min: f32,
    /// Largest projection
    pub max: f32,
}

impl Interval {
    /// Check if two intervals share at least one point
    pub fn overlaps(&self, other: &Interval) -> bool {
        !(self.min > other.max || self.max < other.min)
    }
}

/// Project a point set onto `axis`, `None` for an empty set
pub fn project(axis: &Vec3, vertices: &[Vec3]) -> Option<Interval> {
    let (first, rest) = vertices.split_first()?;
    let start = axis.dot(first);
    Some(rest.iter().fold(Interval { min: start, max: start }, |acc, v| {
        let d = axis.dot(v);
        Interval {
            min: acc.min.min(d),
            max: acc.max.max(d),
        }
    }))
}

/// Gather the deduplicated candidate axes for a pair of triangle sets
pub fn candidate_axes(
    tris_a: &[WorldTriangle],
    tris_b: &[WorldTriangle],
    config: &DetectorConfig,
) -> Vec<Vec3> {
    let mut axes = Vec::new();
    for tri in tris_a.iter().chain(tris_b) {
        push_unique(&mut axes, tri.normal, config.axis_dedup_epsilon);
    }

    if config.sat_axes == SatAxes::FaceNormalsAndEdgeCrosses {
        let edges_a = edge_directions(tris_a, config.axis_dedup_epsilon);
        let edges_b = edge_directions(tris_b, config.axis_dedup_epsilon);
        for ea in &edges_a {
            for eb in &edges_b {
                // Parallel edges give no new axis
                if let Some(axis) = ea.cross(eb).try_normalize(config.axis_dedup_epsilon) {
                    push_unique(&mut axes, axis, config.axis_dedup_epsilon);
                }
            }
        }
    }

    axes
}

fn edge_directions(tris: &[WorldTriangle], epsilon: f32) -> Vec<Vec3> {
    let mut directions = Vec::new();
    for tri in tris {
        for edge in tri.edges() {
            if let Some(dir) = edge.try_normalize(epsilon) {
                push_unique(&mut directions, dir, epsilon);
            }
        }
    }
    directions
}

/// Append a unit direction unless it, or its negation, is already present
fn push_unique(axes: &mut Vec<Vec3>, axis: Vec3, epsilon: f32) {
    let duplicate = axes.iter().any(|existing| {
        (existing - axis).amax() <= epsilon || (existing + axis).amax() <= epsilon
    });
    if !duplicate {
        axes.push(axis);
    }
}
