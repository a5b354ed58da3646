//! Collision detector facade
//!
//! Detection is split into two phases: a cheap broad phase that rejects pairs
//! whose bounding volumes cannot touch, and an exact narrow phase run only on
//! the survivors. [`CollisionDetector`] wires the two together according to a
//! [`DetectorConfig`].

use crate::config::{BroadPhase, DetectorConfig};
use crate::entity::Entity;
use crate::foundation::math::Vec3;
use crate::physics::collision::{broad, sat, swept};
use crate::physics::collision::swept::{CanonicalSpace, SweepHit};
use crate::physics::error::CollisionResult;

/// Two entities, by index into the slice given to [`CollisionDetector::detect_collisions`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair {
    /// Smaller index
    pub index_a: usize,
    /// Larger index
    pub index_b: usize,
}

impl CollisionPair {
    /// Create a new collision pair (always stores the smaller index first)
    pub fn new(index_a: usize, index_b: usize) -> Self {
        if index_a <= index_b {
            Self { index_a, index_b }
        } else {
            Self { index_a: index_b, index_b: index_a }
        }
    }
}

/// Broad-phase gated entry point for discrete and continuous queries
#[derive(Debug, Clone, Default)]
pub struct CollisionDetector {
    config: DetectorConfig,
}

impl CollisionDetector {
    /// Create a detector with the given configuration
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Are `a` and `b` intersecting at their current poses?
    pub fn discrete_collide(&self, a: &Entity, b: &Entity) -> bool {
        let candidate = match self.config.broad_phase {
            BroadPhase::None => true,
            BroadPhase::Aabb => broad::aabb_overlap(a, b),
            BroadPhase::Sphere => broad::sphere_overlap(a, b),
        };
        if !candidate {
            log::trace!("Broad phase rejected discrete pair");
            return false;
        }
        sat::discrete_collide_with(a, b, &self.config)
    }

    /// Will `a`, moving by `velocity` over one time step, touch stationary `b`?
    ///
    /// Degenerate moving geometry is reported even when the broad phase would
    /// have rejected the pair.
    pub fn continuous_collide(&self, a: &Entity, velocity: &Vec3, b: &Entity) -> CollisionResult<bool> {
        CanonicalSpace::for_entity(a, self.config.min_half_extent)?;
        if !self.swept_candidate(a, velocity, b) {
            log::trace!("Broad phase rejected swept pair");
            return Ok(false);
        }
        swept::continuous_collide_with(a, velocity, b, &self.config)
    }

    /// Earliest contact of `a` moving by `velocity` against stationary `b`
    pub fn sweep(&self, a: &Entity, velocity: &Vec3, b: &Entity) -> CollisionResult<Option<SweepHit>> {
        CanonicalSpace::for_entity(a, self.config.min_half_extent)?;
        if !self.swept_candidate(a, velocity, b) {
            return Ok(None);
        }
        swept::sweep(a, velocity, b, &self.config)
    }

    /// Discrete test over every unordered pair of `entities`
    pub fn detect_collisions(&self, entities: &[Entity]) -> Vec<CollisionPair> {
        let mut pairs = Vec::new();
        for (i, a) in entities.iter().enumerate() {
            for (j, b) in entities.iter().enumerate().skip(i + 1) {
                if self.discrete_collide(a, b) {
                    pairs.push(CollisionPair::new(i, j));
                }
            }
        }
        log::debug!("Detected {} colliding pairs among {} entities", pairs.len(), entities.len());
        pairs
    }

    fn swept_candidate(&self, a: &Entity, velocity: &Vec3, b: &Entity) -> bool {
        match self.config.broad_phase {
            BroadPhase::None => true,
            BroadPhase::Aabb => broad::swept_aabb_overlap(a, velocity, b),
            BroadPhase::Sphere => broad::swept_sphere_overlap(a, velocity, b),
        }
    }
}
