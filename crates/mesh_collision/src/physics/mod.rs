//! Physics module for collision detection
//!
//! Provides broad-phase filters, the discrete and continuous narrow-phase
//! detectors, and a configurable facade tying them together.

pub mod collision;
pub mod collision_system;
pub mod error;

pub use collision::{
    Aabb,
    BoundingSphere,
    ContactKind,
    Plane,
    SweepHit,
    WorldTriangle,
};
pub use collision_system::{CollisionDetector, CollisionPair};
pub use error::{CollisionError, CollisionResult};
