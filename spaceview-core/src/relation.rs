/// Relations between vectors, lines and planes: intersections, angles, parallelism
use std::f64::consts::{FRAC_PI_2, PI};

use crate::geometry::{Line3, Plane3, Point3};
use crate::matrix::{Matrix, SecondEquation, SolutionKind};
use crate::vector::{round_to, Vector3};

/// Multiply degrees by this to get radians.
pub const RADIANS_PER_DEGREE: f64 = PI / 180.0;
/// Multiply radians by this to get degrees.
pub const DEGREES_PER_RADIAN: f64 = 180.0 / PI;

/// Result of intersecting two primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection {
    /// The primitives meet in exactly this point.
    Point(Point3),
    /// The primitives meet, but not in a single well-defined point: coincident
    /// lines, or a degenerate plane/line system that may equally have no solution.
    Undefined,
    /// The primitives do not meet.
    None,
}

impl Intersection {
    /// Whether an intersection was reported. `Undefined` counts as one.
    pub fn exists(&self) -> bool {
        !matches!(self, Intersection::None)
    }

    pub fn point(&self) -> Option<Point3> {
        match self {
            Intersection::Point(point) => Some(*point),
            _ => None,
        }
    }

    /// The intersection point, with NaN coordinates standing in for `Undefined`
    /// and `None`.
    pub fn point_or_undefined(&self) -> Point3 {
        self.point().unwrap_or_else(Point3::undefined)
    }
}

/// The vector a primitive contributes to angle calculations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Orientation {
    /// Lines and free vectors
    Direction(Vector3),
    /// Planes
    Normal(Vector3),
}

pub trait Oriented {
    fn orientation(&self) -> Orientation;
}

impl Oriented for Vector3 {
    fn orientation(&self) -> Orientation {
        Orientation::Direction(*self)
    }
}

impl Oriented for Line3 {
    fn orientation(&self) -> Orientation {
        Orientation::Direction(self.direction)
    }
}

impl Oriented for Plane3 {
    fn orientation(&self) -> Orientation {
        Orientation::Normal(self.normal)
    }
}

/// Angle between two vectors in radians, rounded to 3 decimals.
///
/// The cosine is rounded to 10 decimals before `acos` so that parallel vectors
/// give exactly 0. A zero-length operand gives NaN.
pub fn vector_angle(a: Vector3, b: Vector3) -> f64 {
    let cosine = round_to(a.dot(&b) / (a.length() * b.length()), 10);
    round_to(cosine.acos(), 3)
}

/// Angle between any two of vector, line and plane, in radians.
///
/// Two directions or two normals are compared directly. A plane against a
/// vector or a line gives `π/2` minus the angle between the normal and the
/// other direction.
pub fn angle_between<A, B>(a: &A, b: &B) -> f64
where
    A: Oriented + ?Sized,
    B: Oriented + ?Sized,
{
    match (a.orientation(), b.orientation()) {
        (Orientation::Direction(u), Orientation::Direction(v))
        | (Orientation::Normal(u), Orientation::Normal(v)) => vector_angle(u, v),
        (Orientation::Normal(normal), Orientation::Direction(other))
        | (Orientation::Direction(other), Orientation::Normal(normal)) => {
            FRAC_PI_2 - vector_angle(normal, other)
        }
    }
}

/// Whether `b` is a scalar multiple of `a`, using `a.x / b.x` as the scalar.
///
/// The components are compared exactly. When `b.x` is zero the scalar is
/// infinite or NaN and the answer is unreliable: two parallel vectors in the
/// YZ plane are reported as not parallel.
pub fn is_parallel(a: Vector3, b: Vector3) -> bool {
    let scalar = a.x / b.x;
    a.y == b.y * scalar && a.z == b.z * scalar
}

pub fn lines_parallel(first: &Line3, second: &Line3) -> bool {
    is_parallel(first.direction, second.direction)
}

pub fn planes_parallel(first: &Plane3, second: &Plane3) -> bool {
    is_parallel(first.normal, second.normal)
}

fn components_agree(a: f64, b: f64) -> bool {
    round_to(a, 10) == round_to(b, 10)
}

/// Intersects two lines.
///
/// The X and Y equations are solved first and the Z components of the
/// candidate point are compared afterwards. When the XY system is degenerate
/// but the lines are not parallel, the X and Z equations are used instead and
/// the Y components are compared.
pub fn intersect_lines(first: &Line3, second: &Line3) -> Intersection {
    let mut system = Matrix::from_lines(first, second, SecondEquation::Y);
    system.reduce();
    match system.classify_solution() {
        SolutionKind::Unique => {
            let (t, s) = (system[(0, 2)], system[(1, 2)]);
            let z1 = first.support.z + t * first.direction.z;
            let z2 = second.support.z + s * second.direction.z;
            if components_agree(z1, z2) {
                Intersection::Point(first.point_at(t))
            } else {
                Intersection::None
            }
        }
        SolutionKind::Degenerate if lines_parallel(first, second) => {
            let offset = second.support - first.support;
            if offset.cross(&first.direction).length() == 0.0 {
                Intersection::Undefined
            } else {
                Intersection::None
            }
        }
        SolutionKind::Degenerate => intersect_lines_xz(first, second),
        SolutionKind::Unknown => Intersection::None,
    }
}

fn intersect_lines_xz(first: &Line3, second: &Line3) -> Intersection {
    let mut system = Matrix::from_lines(first, second, SecondEquation::Z);
    system.reduce();
    match system.classify_solution() {
        SolutionKind::Unique => {
            let (t, s) = (system[(0, 2)], system[(1, 2)]);
            let y1 = first.support.y + t * first.direction.y;
            let y2 = second.support.y + s * second.direction.y;
            if components_agree(y1, y2) {
                Intersection::Point(first.point_at(t))
            } else {
                Intersection::None
            }
        }
        SolutionKind::Degenerate => Intersection::Undefined,
        SolutionKind::Unknown => Intersection::None,
    }
}

/// Intersects a plane with a line.
///
/// A degenerate system is reported as [`Intersection::Undefined`] whether the
/// line lies in the plane or runs parallel to it.
pub fn intersect_plane_line(plane: &Plane3, line: &Line3) -> Intersection {
    let mut system = Matrix::from_plane_and_line(plane, line);
    system.reduce();
    match system.classify_solution() {
        SolutionKind::Unique => {
            let (a, b, c) = (system[(0, 3)], system[(1, 3)], system[(2, 3)]);
            let [u, v] = plane.directions;
            let on_plane = plane.support.z + a * u.z + b * v.z;
            let on_line = line.support.z + c * line.direction.z;
            if components_agree(on_plane, on_line) {
                Intersection::Point(plane.point_at(a, b))
            } else {
                Intersection::None
            }
        }
        SolutionKind::Degenerate => Intersection::Undefined,
        SolutionKind::Unknown => Intersection::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    fn line(support: (f64, f64, f64), direction: (f64, f64, f64)) -> Line3 {
        Line3::new(
            Vector3::new(support.0, support.1, support.2),
            Vector3::new(direction.0, direction.1, direction.2),
        )
    }

    fn ground_plane() -> Plane3 {
        Plane3::from_points(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn test_crossing_lines() {
        let result = intersect_lines(
            &line((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)),
            &line((2.0, -1.0, 0.0), (0.0, 1.0, 0.0)),
        );
        assert_eq!(result, Intersection::Point(Point3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_crossing_lines_in_space() {
        let first = line((1.0, 1.0, 1.0), (1.0, 2.0, 3.0));
        let second = line((0.0, 5.0, 0.0), (1.0, -1.0, 2.0));
        assert_eq!(
            intersect_lines(&first, &second).point(),
            Some(Point3::new(2.0, 3.0, 4.0))
        );
    }

    #[test]
    fn test_skew_lines() {
        let result = intersect_lines(
            &line((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)),
            &line((0.0, 1.0, 1.0), (0.0, 1.0, 0.0)),
        );
        assert_eq!(result, Intersection::None);
        assert!(!result.exists());
    }

    #[test]
    fn test_identical_lines_are_undefined() {
        let result = intersect_lines(
            &line((1.0, 2.0, 3.0), (1.0, 2.0, 3.0)),
            &line((2.0, 4.0, 6.0), (2.0, 4.0, 6.0)),
        );
        assert_eq!(result, Intersection::Undefined);
        assert!(result.exists());
        assert!(result.point_or_undefined().is_undefined());
    }

    #[test]
    fn test_parallel_disjoint_lines() {
        let result = intersect_lines(
            &line((0.0, 0.0, 0.0), (1.0, 1.0, 0.0)),
            &line((0.0, 1.0, 0.0), (2.0, 2.0, 0.0)),
        );
        assert_eq!(result, Intersection::None);
    }

    #[test]
    fn test_lines_resolved_with_xz_equations() {
        // Directions agree in X and Y, so the XY system is degenerate.
        let first = line((0.0, 0.0, 0.0), (1.0, 1.0, 0.0));
        let second = line((0.0, 0.0, 1.0), (1.0, 1.0, 1.0));
        assert_eq!(
            intersect_lines(&first, &second),
            Intersection::Point(Point3::new(-1.0, -1.0, 0.0))
        );
    }

    #[test]
    fn test_plane_line_intersection() {
        let result =
            intersect_plane_line(&ground_plane(), &line((2.0, 3.0, 5.0), (0.0, 0.0, -1.0)));
        assert_eq!(result, Intersection::Point(Point3::new(2.0, 3.0, 0.0)));
    }

    #[test]
    fn test_oblique_plane_line_intersection() {
        let plane = Plane3::from_points(
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(0.0, 0.0, 3.0),
        );
        let l = line((-1.0, -1.0, -1.0), (1.0, 1.0, 1.0));
        let point = intersect_plane_line(&plane, &l).point().unwrap();
        // x/1 + y/2 + z/3 = 1 with x = y = z
        let expected = 6.0 / 11.0;
        for coordinate in [point.x, point.y, point.z] {
            assert!((coordinate - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_plane_line_degenerate_cases() {
        let parallel = line((0.0, 0.0, 5.0), (1.0, 0.0, 0.0));
        let contained = line((0.0, 0.0, 0.0), (1.0, 1.0, 0.0));
        assert_eq!(
            intersect_plane_line(&ground_plane(), &parallel),
            Intersection::Undefined
        );
        assert_eq!(
            intersect_plane_line(&ground_plane(), &contained),
            Intersection::Undefined
        );
    }

    #[test]
    fn test_vector_angles() {
        assert_eq!(vector_angle(Vector3::UNIT_X, Vector3::UNIT_Y), 1.571);
        assert_eq!(vector_angle(Vector3::UNIT_X, Vector3::new(2.0, 0.0, 0.0)), 0.0);
        assert_eq!(vector_angle(Vector3::UNIT_X, -Vector3::UNIT_X), 3.142);
        assert_eq!(vector_angle(Vector3::UNIT_X, Vector3::new(1.0, 1.0, 0.0)), 0.785);
        assert!(vector_angle(Vector3::ZERO, Vector3::UNIT_X).is_nan());
    }

    #[test]
    fn test_angle_between_primitives() {
        let diagonal = line((0.0, 0.0, 0.0), (1.0, 1.0, 0.0));
        let x_axis = line((5.0, 5.0, 5.0), (3.0, 0.0, 0.0));
        assert_eq!(angle_between(&diagonal, &x_axis), 0.785);
        assert_eq!(angle_between(&diagonal, &Vector3::UNIT_Y), 0.785);

        let ground = ground_plane();
        let slope = line((0.0, 0.0, 0.0), (1.0, 0.0, 1.0));
        assert!((angle_between(&ground, &slope) - FRAC_PI_4).abs() < 1e-3);
        assert_eq!(angle_between(&ground, &slope), angle_between(&slope, &ground));
        assert_eq!(angle_between(&ground, &Vector3::UNIT_Z), FRAC_PI_2);
        assert_eq!(angle_between(&ground, &Vector3::UNIT_X), FRAC_PI_2 - 1.571);

        let tilted = ground.with_normal(Vector3::new(0.0, 1.0, 1.0));
        assert_eq!(angle_between(&ground, &tilted), 0.785);
    }

    #[test]
    fn test_parallelism() {
        assert!(is_parallel(Vector3::new(1.0, 2.0, 3.0), Vector3::new(-2.0, -4.0, -6.0)));
        assert!(!is_parallel(Vector3::new(1.0, 2.0, 3.0), Vector3::new(1.0, 2.0, 4.0)));
        assert!(lines_parallel(
            &line((0.0, 0.0, 0.0), (1.0, 1.0, 0.0)),
            &line((9.0, 0.0, 0.0), (2.0, 2.0, 0.0))
        ));
        let tilted = ground_plane().with_normal(Vector3::new(0.5, 0.0, 2.0));
        assert!(!planes_parallel(&ground_plane(), &tilted));
    }

    #[test]
    fn test_parallelism_with_zero_x_component() {
        // Division by a zero X component: parallel vectors are not recognized.
        assert!(!is_parallel(Vector3::new(0.0, 1.0, 0.0), Vector3::new(0.0, 2.0, 0.0)));
    }

    #[test]
    fn test_unit_conversions() {
        assert!((90.0 * RADIANS_PER_DEGREE - FRAC_PI_2).abs() < 1e-15);
        assert!((PI * DEGREES_PER_RADIAN - 180.0).abs() < 1e-12);
    }
}
