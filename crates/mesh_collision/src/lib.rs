//! # Mesh Collision
//!
//! Exact intersection tests between pairs of posed triangle meshes.
//!
//! ## Features
//!
//! - **Discrete test**: separating-axis test over world face normals
//!   (optionally edge cross products)
//! - **Continuous test**: swept-ellipsoid time of impact against every
//!   triangle face, edge and vertex, so fast movers do not tunnel
//! - **Broad phase**: bounding box and bounding sphere pre-filters
//! - **Configurable**: tolerances loadable from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust
//! use mesh_collision::prelude::*;
//!
//! fn main() -> Result<(), CollisionError> {
//!     let mover = Entity::new(Pose::from_position(Vec3::zeros())?, Mesh::cube()?);
//!     let wall = Entity::new(
//!         Pose::default(),
//!         Mesh::triangle(
//!             Vec3::new(-10.0, -10.0, 5.0),
//!             Vec3::new(10.0, -10.0, 5.0),
//!             Vec3::new(0.0, 10.0, 5.0),
//!         )?,
//!     );
//!
//!     let detector = CollisionDetector::default();
//!     assert!(!detector.discrete_collide(&mover, &wall));
//!     assert!(detector.continuous_collide(&mover, &Vec3::new(0.0, 0.0, 10.0), &wall)?);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod foundation;
pub mod config;
pub mod entity;
pub mod physics;

pub use config::{BroadPhase, DetectorConfig, SatAxes};
pub use entity::{Entity, Mesh, Pose};
pub use physics::collision::{
    aabb_overlap,
    continuous_collide,
    discrete_collide,
    sphere_overlap,
    sweep,
};
pub use physics::{CollisionDetector, CollisionError, CollisionPair, CollisionResult};

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{Config, DetectorConfig, SatAxes, BroadPhase},
        entity::{Entity, Mesh, Pose},
        foundation::math::{Vec3, Mat4},
        physics::{
            CollisionDetector, CollisionError, CollisionResult,
            ContactKind, SweepHit,
        },
        aabb_overlap, sphere_overlap, discrete_collide, continuous_collide,
    };
}
