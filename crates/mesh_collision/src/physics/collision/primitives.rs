//! Primitive collision shapes and geometric helpers
//!
//! Provides bounding volumes (boxes, spheres) and the plane/triangle helpers
//! shared by the narrow-phase detectors.

use crate::foundation::math::Vec3;

/// Squared-length threshold below which a cross product is treated as zero
const DEGENERATE_EPSILON: f32 = 1e-12;

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Creates a box from its corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Tightest box around a point set, `None` if the set is empty
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut aabb = Self::new(*first, *first);
        for p in rest {
            aabb.min = aabb.min.inf(p);
            aabb.max = aabb.max.sup(p);
        }
        Some(aabb)
    }

    /// Check if this box overlaps another (touching counts as overlap)
    pub fn intersects(&self, other: &Aabb) -> bool {
        (0..3).all(|i| self.min[i] <= other.max[i] && self.max[i] >= other.min[i])
    }

    /// Center of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half the size of the box along each axis
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Smallest box containing both boxes
    pub fn merged(&self, other: &Aabb) -> Aabb {
        Aabb::new(self.min.inf(&other.min), self.max.sup(&other.max))
    }

    /// This box moved by `offset`
    pub fn translated(&self, offset: Vec3) -> Aabb {
        Aabb::new(self.min + offset, self.max + offset)
    }

    /// Region covered while translating by `velocity` over one time step
    pub fn swept(&self, velocity: Vec3) -> Aabb {
        self.merged(&self.translated(velocity))
    }
}

/// A bounding sphere for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if this sphere intersects with another
    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }
}

/// An infinite plane stored as unit normal plus offset (`n·p + offset = 0`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal
    pub normal: Vec3,
    /// Signed offset along the normal
    pub offset: f32,
    /// A point on the plane
    pub origin: Vec3,
}

impl Plane {
    /// Plane through `point` with the given normal, `None` for a zero normal
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Option<Self> {
        let normal = normal.try_normalize(DEGENERATE_EPSILON.sqrt())?;
        Some(Self {
            normal,
            offset: -normal.dot(&point),
            origin: point,
        })
    }

    /// Plane through three points, normal by the right-hand rule on `a, b, c`
    ///
    /// Returns `None` when the points are collinear.
    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Option<Self> {
        let normal = (b - a).cross(&(c - a));
        if normal.magnitude_squared() < DEGENERATE_EPSILON {
            return None;
        }
        Self::from_point_normal(a, normal)
    }

    /// Signed distance from the plane, positive on the side the normal points to
    pub fn signed_distance_to(&self, point: &Vec3) -> f32 {
        self.normal.dot(point) + self.offset
    }

    /// Closest point on the plane
    pub fn project(&self, point: &Vec3) -> Vec3 {
        point - self.normal * self.signed_distance_to(point)
    }

    /// True if both points are strictly on the same side (false if either lies on the plane)
    pub fn on_same_side(&self, p1: &Vec3, p2: &Vec3) -> bool {
        self.signed_distance_to(p1) * self.signed_distance_to(p2) > 0.0
    }

    /// Check whether `point`, assumed to lie on this plane, is inside triangle `pa, pb, pc`
    ///
    /// For each edge, a sub-plane is erected through the edge perpendicular to
    /// this plane; the point must share a side with the opposite vertex for all
    /// three edges. Points exactly on an edge are reported outside.
    pub fn in_triangle(&self, point: &Vec3, pa: &Vec3, pb: &Vec3, pc: &Vec3) -> bool {
        self.same_side_of_edge(point, pa, pb, pc)
            && self.same_side_of_edge(point, pb, pa, pc)
            && self.same_side_of_edge(point, pc, pa, pb)
    }

    fn same_side_of_edge(&self, point: &Vec3, opposite: &Vec3, ea: &Vec3, eb: &Vec3) -> bool {
        let edge_normal = (ea - eb).cross(&self.normal);
        match Plane::from_point_normal(*ea, edge_normal) {
            Some(edge_plane) => edge_plane.on_same_side(point, opposite),
            None => false,
        }
    }
}

/// A world-space triangle with its outward unit normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldTriangle {
    /// First vertex
    pub a: Vec3,
    /// Second vertex
    pub b: Vec3,
    /// Third vertex
    pub c: Vec3,
    /// Unit normal by the right-hand rule on `a, b, c`
    pub normal: Vec3,
}

impl WorldTriangle {
    /// Creates a triangle, `None` if it has zero area
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Option<Self> {
        let plane = Plane::from_points(a, b, c)?;
        Some(Self { a, b, c, normal: plane.normal })
    }

    /// The supporting plane
    pub fn plane(&self) -> Plane {
        Plane {
            normal: self.normal,
            offset: -self.normal.dot(&self.a),
            origin: self.a,
        }
    }

    /// Vertices in winding order
    pub fn vertices(&self) -> [Vec3; 3] {
        [self.a, self.b, self.c]
    }

    /// Edge direction vectors `b-a`, `c-b`, `a-c`
    pub fn edges(&self) -> [Vec3; 3] {
        [self.b - self.a, self.c - self.b, self.a - self.c]
    }

    /// Calculates the centroid (center point) of the triangle
    pub fn centroid(&self) -> Vec3 {
        (self.a + self.b + self.c) / 3.0
    }

    /// Check whether a point on the triangle's plane lies inside it
    pub fn contains(&self, point: &Vec3) -> bool {
        self.plane().in_triangle(point, &self.a, &self.b, &self.c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_right_triangle() -> WorldTriangle {
        WorldTriangle::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
        .unwrap()
    }

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points(&[
            Vec3::new(1.0, -2.0, 3.0),
            Vec3::new(-1.0, 4.0, 0.0),
        ])
        .unwrap();
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 4.0, 3.0));
        assert_eq!(aabb.center(), Vec3::new(0.0, 1.0, 1.5));
        assert_eq!(aabb.half_extents(), Vec3::new(1.0, 3.0, 1.5));
        assert!(Aabb::from_points(&[]).is_none());
    }

    #[test]
    fn test_aabb_touching_boxes_overlap() {
        let a = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let b = a.translated(Vec3::new(2.0, 0.0, 0.0));
        let c = a.translated(Vec3::new(2.1, 0.0, 0.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_aabb_swept_covers_both_ends() {
        let a = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let swept = a.swept(Vec3::new(0.0, -5.0, 0.0));
        assert_eq!(swept.min, Vec3::new(-1.0, -6.0, -1.0));
        assert_eq!(swept.max, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_sphere_intersection() {
        let a = BoundingSphere::new(Vec3::zeros(), 1.0);
        let b = BoundingSphere::new(Vec3::new(2.0, 0.0, 0.0), 1.0);
        let c = BoundingSphere::new(Vec3::new(2.5, 0.0, 0.0), 1.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_plane_signed_distance() {
        let plane = Plane::from_point_normal(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 2.0)).unwrap();
        assert_relative_eq!(plane.normal.magnitude(), 1.0);
        assert_relative_eq!(plane.signed_distance_to(&Vec3::zeros()), -5.0);
        assert_relative_eq!(plane.signed_distance_to(&Vec3::new(3.0, 3.0, 7.0)), 2.0);
        assert_relative_eq!(plane.project(&Vec3::new(1.0, 2.0, 0.0)), Vec3::new(1.0, 2.0, 5.0));
    }

    #[test]
    fn test_plane_rejects_collinear_points() {
        assert!(Plane::from_points(Vec3::zeros(), Vec3::x(), Vec3::x() * 2.0).is_none());
        assert!(Plane::from_point_normal(Vec3::zeros(), Vec3::zeros()).is_none());
    }

    #[test]
    fn test_on_same_side_excludes_plane() {
        let plane = Plane::from_point_normal(Vec3::zeros(), Vec3::y()).unwrap();
        assert!(plane.on_same_side(&Vec3::new(0.0, 1.0, 0.0), &Vec3::new(5.0, 2.0, 0.0)));
        assert!(!plane.on_same_side(&Vec3::new(0.0, 1.0, 0.0), &Vec3::new(0.0, -1.0, 0.0)));
        assert!(!plane.on_same_side(&Vec3::zeros(), &Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_in_triangle() {
        let tri = unit_right_triangle();
        assert!(tri.contains(&Vec3::new(0.25, 0.25, 0.0)));
        assert!(!tri.contains(&Vec3::new(0.75, 0.75, 0.0)));
        assert!(!tri.contains(&Vec3::new(-0.1, 0.5, 0.0)));
    }

    #[test]
    fn test_in_triangle_independent_of_winding() {
        let tri = WorldTriangle::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        )
        .unwrap();
        assert_relative_eq!(tri.normal, Vec3::new(0.0, 0.0, -1.0));
        assert!(tri.contains(&Vec3::new(0.25, 0.25, 0.0)));
    }

    #[test]
    fn test_degenerate_triangle_rejected() {
        assert!(WorldTriangle::new(Vec3::zeros(), Vec3::x(), Vec3::x()).is_none());
    }
}
