/// Three dimensional vectors
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::error::GeometryError;
use crate::geometry::Point3;
use crate::matrix::Matrix;

/// Rounds `value` to `decimals` places, resolving ties to the even neighbour.
///
/// Lengths and angles are rounded before they are compared so that values
/// differing only by floating point noise compare equal.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// A vector in three dimensional space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The vector pointing from `start` to `end`.
    pub fn between(start: Point3, end: Point3) -> Self {
        Self::new(end.x - start.x, end.y - start.y, end.z - start.z)
    }

    pub fn to_point(self) -> Point3 {
        Point3::new(self.x, self.y, self.z)
    }

    /// Euclidean norm rounded to 10 decimal places.
    pub fn length(&self) -> f64 {
        round_to(self.dot(self).sqrt(), 10)
    }

    /// Scales the vector to length 1. The result is NaN for the zero vector.
    pub fn to_unit_vector(self) -> Self {
        self * (1.0 / self.length())
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Returns a copy rotated around `axis` by `angle` radians.
    ///
    /// The axis is normalized first, so any non-zero axis is accepted. A zero
    /// axis cannot be normalized and yields [`GeometryError::InvalidRotationAxis`].
    pub fn rotated(&self, axis: Vector3, angle: f64) -> Result<Self, GeometryError> {
        let rotation = Matrix::rotation(axis.to_unit_vector(), angle)?;
        rotation.transform_vector(self)
    }

    /// In-place variant of [`Vector3::rotated`]. Leaves `self` untouched on error.
    pub fn rotate(&mut self, axis: Vector3, angle: f64) -> Result<(), GeometryError> {
        *self = self.rotated(axis, angle)?;
        Ok(())
    }
}

impl From<Point3> for Vector3 {
    fn from(point: Point3) -> Self {
        Self::new(point.x, point.y, point.z)
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Dot product
impl Mul for Vector3 {
    type Output = f64;

    fn mul(self, rhs: Self) -> f64 {
        self.dot(&rhs)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Mul<Vector3> for f64 {
    type Output = Vector3;

    fn mul(self, vector: Vector3) -> Vector3 {
        vector * self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_close(a: Vector3, b: Vector3) {
        assert!((a - b).dot(&(a - b)).sqrt() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 3), 1.235);
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(3.5, 0), 4.0);
        assert_eq!(round_to(-0.4, 0), 0.0);
    }

    #[test]
    fn test_length_is_rounded() {
        assert_eq!(Vector3::new(3.0, 4.0, 0.0).length(), 5.0);
        assert_eq!(Vector3::new(1.0, 1.0, 1.0).length(), 1.7320508076);
    }

    #[test]
    fn test_unit_vector_has_unit_length() {
        for v in [
            Vector3::new(3.0, -4.0, 12.0),
            Vector3::new(10.0, 20.0, -5.0),
            Vector3::new(-7.5, 2.25, 1e3),
        ] {
            assert!((v.to_unit_vector().length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_unit_vector_of_zero_is_nan() {
        let unit = Vector3::ZERO.to_unit_vector();
        assert!(unit.x.is_nan() && unit.y.is_nan() && unit.z.is_nan());
    }

    #[test]
    fn test_cross_product() {
        assert_eq!(Vector3::UNIT_X.cross(&Vector3::UNIT_Y), Vector3::UNIT_Z);
        assert_eq!(Vector3::UNIT_Y.cross(&Vector3::UNIT_X), -Vector3::UNIT_Z);
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(-2.0, 0.5, 4.0);
        let c = a.cross(&b);
        assert_eq!(c * a, 0.0);
        assert_eq!(c * b, 0.0);
    }

    #[test]
    fn test_operators() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vector3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vector3::new(3.0, 3.0, 3.0));
        assert_eq!(a * b, 32.0);
        assert_eq!(a * 2.0, Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(2.0 * a, a * 2.0);

        // Operators never alias their operands.
        let mut c = a;
        c += b;
        assert_eq!(a, Vector3::new(1.0, 2.0, 3.0));
        c -= b;
        assert_eq!(c, a);
    }

    #[test]
    fn test_rotation_quarter_turn() {
        let rotated = Vector3::UNIT_X.rotated(Vector3::UNIT_Z, FRAC_PI_2).unwrap();
        assert_close(rotated, Vector3::UNIT_Y);
    }

    #[test]
    fn test_rotation_normalizes_axis() {
        let rotated = Vector3::UNIT_X
            .rotated(Vector3::new(0.0, 0.0, 5.0), PI)
            .unwrap();
        assert_close(rotated, -Vector3::UNIT_X);
    }

    #[test]
    fn test_rotation_round_trip() {
        let axis = Vector3::new(1.0, -2.0, 0.5);
        let original = Vector3::new(0.3, 4.0, -1.2);
        let mut v = original;
        v.rotate(axis, 0.7).unwrap();
        assert_ne!(v, original);
        v.rotate(axis, -0.7).unwrap();
        assert_close(v, original);
    }

    #[test]
    fn test_rotation_around_zero_axis_fails() {
        let mut v = Vector3::UNIT_X;
        assert!(matches!(
            v.rotate(Vector3::ZERO, 1.0),
            Err(GeometryError::InvalidRotationAxis { .. })
        ));
        assert_eq!(v, Vector3::UNIT_X);
    }
}
