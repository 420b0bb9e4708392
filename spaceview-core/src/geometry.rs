/// Geometry primitives: points, lines, planes and triangles
use crate::vector::Vector3;

/// A coordinate in three dimensional space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// A point whose coordinates are all NaN, used where no well-defined point exists.
    pub const fn undefined() -> Self {
        Self::new(f64::NAN, f64::NAN, f64::NAN)
    }

    pub fn is_undefined(&self) -> bool {
        self.x.is_nan() && self.y.is_nan() && self.z.is_nan()
    }

    /// Offsets the point by `offset`.
    pub fn translated(self, offset: Vector3) -> Self {
        (Vector3::from(self) + offset).to_point()
    }
}

impl From<Vector3> for Point3 {
    fn from(v: Vector3) -> Self {
        v.to_point()
    }
}

/// A line given by a support vector and a direction vector.
///
/// The direction must not be the zero vector. This is not checked; a zero
/// direction makes every relation involving the line meaningless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line3 {
    pub support: Vector3,
    pub direction: Vector3,
}

impl Line3 {
    pub fn new(support: Vector3, direction: Vector3) -> Self {
        Self { support, direction }
    }

    /// The line through `p1` and `p2`, anchored at `p1`.
    pub fn from_points(p1: Point3, p2: Point3) -> Self {
        Self::new(p1.into(), Vector3::between(p1, p2))
    }

    pub fn from_point_direction(point: Point3, direction: Vector3) -> Self {
        Self::new(point.into(), direction)
    }

    /// The point `support + direction * t`.
    pub fn point_at(&self, t: f64) -> Point3 {
        (self.support + self.direction * t).to_point()
    }
}

/// A plane given by a support vector and two direction vectors.
///
/// The direction vectors must not be parallel. The normal is the cross product
/// of the two directions unless it is replaced with [`Plane3::with_normal`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane3 {
    pub support: Vector3,
    pub directions: [Vector3; 2],
    pub normal: Vector3,
}

impl Plane3 {
    pub fn new(support: Vector3, first: Vector3, second: Vector3) -> Self {
        Self {
            support,
            directions: [first, second],
            normal: first.cross(&second),
        }
    }

    /// The plane through three points, anchored at `p1`.
    pub fn from_points(p1: Point3, p2: Point3, p3: Point3) -> Self {
        Self::new(
            p1.into(),
            Vector3::between(p1, p2),
            Vector3::between(p1, p3),
        )
    }

    pub fn with_normal(mut self, normal: Vector3) -> Self {
        self.normal = normal;
        self
    }

    /// The point `support + directions[0] * s + directions[1] * t`.
    pub fn point_at(&self, s: f64, t: f64) -> Point3 {
        (self.support + self.directions[0] * s + self.directions[1] * t).to_point()
    }
}

impl From<&Triangle3> for Plane3 {
    fn from(triangle: &Triangle3) -> Self {
        let [a, b, c] = triangle.corners;
        Self::from_points(a, b, c)
    }
}

/// A triangle defined by its three corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle3 {
    pub corners: [Point3; 3],
}

impl Triangle3 {
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self {
            corners: [a, b, c],
        }
    }

    /// The edges from the first corner to the second and third corners.
    pub fn edges(&self) -> (Vector3, Vector3) {
        let [a, b, c] = self.corners;
        (Vector3::between(a, b), Vector3::between(a, c))
    }

    /// Unnormalized face normal following the corner winding.
    pub fn winding_normal(&self) -> Vector3 {
        let (first, second) = self.edges();
        first.cross(&second)
    }
}
