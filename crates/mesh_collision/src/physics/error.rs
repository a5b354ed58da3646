//! Collision error types
//!
//! Every variant is a precondition violation. Collision queries have no
//! transient failures, so nothing here is retried; callers fix their input.

/// Errors raised at the collision API boundary
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CollisionError {
    /// Mesh data does not describe a valid triangle soup
    #[error("Invalid mesh: {reason}")]
    InvalidMesh {
        /// What was wrong with the mesh
        reason: String,
    },

    /// The moving entity's bounds collapse on an axis, so canonical scaling is undefined
    #[error("Degenerate geometry: half-extent {half_extent} on axis {axis} is too small for canonical scaling")]
    DegenerateGeometry {
        /// Axis index (0 = X, 1 = Y, 2 = Z)
        axis: usize,
        /// The offending world-space half-extent
        half_extent: f32,
    },

    /// Pose cannot produce a valid transform
    #[error("Invalid pose: {reason}")]
    InvalidPose {
        /// What was wrong with the pose
        reason: String,
    },
}

impl CollisionError {
    pub(crate) fn invalid_mesh(reason: impl Into<String>) -> Self {
        Self::InvalidMesh { reason: reason.into() }
    }

    pub(crate) fn invalid_pose(reason: impl Into<String>) -> Self {
        Self::InvalidPose { reason: reason.into() }
    }
}

/// Result alias for collision operations
pub type CollisionResult<T> = Result<T, CollisionError>;
