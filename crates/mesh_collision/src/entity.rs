//! Posed mesh entities
//!
//! An [`Entity`] pairs an immutable [`Pose`] with a static [`Mesh`]. Mesh data
//! lives in MODEL SPACE and is transformed to world space on demand for each
//! query; nothing derived from the pose is cached.

use crate::foundation::math::{utils, Mat4, Mat4Ext, Point3, Vec3};
use crate::physics::collision::primitives::{Aabb, BoundingSphere, WorldTriangle};
use crate::physics::error::{CollisionError, CollisionResult};

/// Position, Euler rotation (degrees) and uniform scale of an entity
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    position: Vec3,
    rotation: Vec3,
    scale: f32,
}

impl Pose {
    /// Create a pose, rejecting non-positive or non-finite scale
    ///
    /// `rotation` holds the X, Y and Z angles in degrees.
    pub fn new(position: Vec3, rotation: Vec3, scale: f32) -> CollisionResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(CollisionError::invalid_pose(format!(
                "scale must be positive and finite, got {scale}"
            )));
        }
        if !utils::is_finite(&position) {
            return Err(CollisionError::invalid_pose("position has a non-finite component"));
        }
        if !utils::is_finite(&rotation) {
            return Err(CollisionError::invalid_pose("rotation has a non-finite component"));
        }
        Ok(Self { position, rotation, scale })
    }

    /// Unrotated, unscaled pose at `position`
    pub fn from_position(position: Vec3) -> CollisionResult<Self> {
        Self::new(position, Vec3::zeros(), 1.0)
    }

    /// World-space position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Rotation angles about X, Y and Z in degrees
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Uniform scale factor
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Build the model-to-world matrix
    ///
    /// Composition order is translate * rotateX * rotateY * rotateZ * scale,
    /// so scale applies first and translation last.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * Mat4::rotation_x(utils::deg_to_rad(self.rotation.x))
            * Mat4::rotation_y(utils::deg_to_rad(self.rotation.y))
            * Mat4::rotation_z(utils::deg_to_rad(self.rotation.z))
            * Mat4::new_scaling(self.scale)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: 1.0,
        }
    }
}

/// Static triangle mesh in model space
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Create a mesh from vertex positions, shading normals and triangle indices
    ///
    /// Fails with [`CollisionError::InvalidMesh`] when the index count is not a
    /// multiple of three, an index is out of range, or a coordinate is not finite.
    pub fn new(vertices: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> CollisionResult<Self> {
        if indices.len() % 3 != 0 {
            return Err(CollisionError::invalid_mesh(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            )));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(CollisionError::invalid_mesh(format!(
                "index {bad} out of range for {} vertices",
                vertices.len()
            )));
        }
        if !vertices.iter().all(utils::is_finite) {
            return Err(CollisionError::invalid_mesh("vertex has a non-finite component"));
        }
        if !normals.iter().all(utils::is_finite) {
            return Err(CollisionError::invalid_mesh("normal has a non-finite component"));
        }
        Ok(Self { vertices, normals, indices })
    }

    /// Create a mesh from flattened `[x, y, z, x, y, z, ...]` arrays
    pub fn from_flat(vertices: &[f32], normals: &[f32], indices: &[u32]) -> CollisionResult<Self> {
        Self::new(unflatten(vertices, "vertex")?, unflatten(normals, "normal")?, indices.to_vec())
    }

    /// Axis-aligned box spanning `-half_extents..=half_extents`, 12 outward-wound triangles
    pub fn cuboid(half_extents: Vec3) -> CollisionResult<Self> {
        let (x, y, z) = (half_extents.x, half_extents.y, half_extents.z);
        let vertices = vec![
            // Front
            Vec3::new(-x, -y, z),
            Vec3::new(x, -y, z),
            Vec3::new(x, y, z),
            Vec3::new(-x, y, z),
            // Back
            Vec3::new(-x, -y, -z),
            Vec3::new(-x, y, -z),
            Vec3::new(x, y, -z),
            Vec3::new(x, -y, -z),
        ];
        let normals = vertices
            .iter()
            .map(|v| if v.z > 0.0 { Vec3::z() } else { -Vec3::z() })
            .collect();

        let indices = vec![
            // Front
            0, 1, 2, 2, 3, 0,
            // Back
            4, 5, 6, 6, 7, 4,
            // Left
            4, 0, 3, 3, 5, 4,
            // Right
            1, 7, 6, 6, 2, 1,
            // Top
            3, 2, 6, 6, 5, 3,
            // Bottom
            4, 7, 1, 1, 0, 4,
        ];

        Self::new(vertices, normals, indices)
    }

    /// Cube with vertices at ±1.0 on each axis
    pub fn cube() -> CollisionResult<Self> {
        Self::cuboid(Vec3::new(1.0, 1.0, 1.0))
    }

    /// Single triangle wound `a, b, c`
    pub fn triangle(a: Vec3, b: Vec3, c: Vec3) -> CollisionResult<Self> {
        let normal = (b - a).cross(&(c - a)).try_normalize(f32::EPSILON).unwrap_or_else(Vec3::zeros);
        Self::new(vec![a, b, c], vec![normal; 3], vec![0, 1, 2])
    }

    /// Model-space vertex positions
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Per-vertex shading normals (not used by the detectors)
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Flat triangle index list
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as vertex index triples
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
    }

    /// Distance from the model origin to the farthest vertex
    pub fn furthest_point(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| v.magnitude())
            .fold(0.0, f32::max)
    }
}

fn unflatten(data: &[f32], what: &str) -> CollisionResult<Vec<Vec3>> {
    if data.len() % 3 != 0 {
        return Err(CollisionError::invalid_mesh(format!(
            "{what} array length {} is not a multiple of 3",
            data.len()
        )));
    }
    Ok(data
        .chunks_exact(3)
        .map(|c| Vec3::new(c[0], c[1], c[2]))
        .collect())
}

/// A posed mesh participating in collision queries
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pose: Pose,
    mesh: Mesh,
}

impl Entity {
    /// Pair a validated pose with a validated mesh
    pub fn new(pose: Pose, mesh: Mesh) -> Self {
        Self { pose, mesh }
    }

    /// The entity's pose
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// The entity's model-space mesh
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Vertices transformed to world space, in mesh order
    pub fn world_vertices(&self) -> Vec<Vec3> {
        let matrix = self.pose.to_matrix();
        self.mesh
            .vertices
            .iter()
            .map(|v| matrix.transform_point(&Point3::from(*v)).coords)
            .collect()
    }

    /// World-space triangles with outward unit normals
    ///
    /// Zero-area triangles have no normal and are dropped.
    pub fn world_triangles(&self) -> Vec<WorldTriangle> {
        let world = self.world_vertices();
        self.mesh
            .triangles()
            .filter_map(|[a, b, c]| WorldTriangle::new(world[a], world[b], world[c]))
            .collect()
    }

    /// World-space axis-aligned bounding box, `None` for a mesh without vertices
    pub fn aabb(&self) -> Option<Aabb> {
        Aabb::from_points(&self.world_vertices())
    }

    /// Bounding sphere around the pose position enclosing every orientation of the mesh
    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.pose.position, self.mesh.furthest_point() * self.pose.scale)
    }
}
