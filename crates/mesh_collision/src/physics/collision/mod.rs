//! Collision detection between posed triangle meshes
//!
//! Split into a cheap broad phase and exact narrow-phase tests.
//!
//! # Architecture
//!
//! - **Model Space Storage**: Meshes stay in local coordinates on the entity
//! - **On-Demand Transformation**: World (or canonical) vertices are derived per query
//! - **Pure Functions**: No detector holds state between calls
//!
//! # Module Organization
//!
//! - [`primitives`] - Bounding volumes, planes and world triangles
//! - [`broad`] - Box and sphere pre-filters
//! - [`sat`] - Discrete separating-axis test
//! - [`swept`] - Continuous swept-ellipsoid test

pub mod primitives;
pub mod broad;
pub mod sat;
pub mod swept;

// Re-export commonly used types
pub use primitives::{Aabb, BoundingSphere, Plane, WorldTriangle};
pub use broad::{aabb_overlap, sphere_overlap, swept_aabb_overlap, swept_sphere_overlap};
pub use sat::{discrete_collide, discrete_collide_with};
pub use swept::{continuous_collide, continuous_collide_with, sweep, CanonicalSpace, ContactKind, SweepHit};
