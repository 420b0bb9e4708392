/// Camera basis and the movement and rotation commands that act on it
use std::f64::consts::FRAC_PI_2;

use crate::error::GeometryError;
use crate::matrix::Matrix;
use crate::vector::Vector3;

/// One of the six signed directions the camera can translate along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Axis a rotation command turns around, in camera space.
///
/// `X` is the horizontal basis vector, `Y` the viewing direction and `Z` the
/// vertical basis vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationAxis {
    X,
    Y,
    Z,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationSense {
    Clockwise,
    CounterClockwise,
}

impl RotationSense {
    /// Sign applied to the rotation angle.
    pub fn signum(self) -> f64 {
        match self {
            RotationSense::Clockwise => -1.0,
            RotationSense::CounterClockwise => 1.0,
        }
    }
}

/// Orientation of the camera together with its frustum plane normals.
///
/// `direction`, `vertical` and `horizontal` form an orthonormal basis. The
/// four frustum normals point into the viewing volume and are derived from the
/// basis and the field of view. All seven vectors change together through
/// [`CameraBasis::apply_rotation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub direction: Vector3,
    pub vertical: Vector3,
    pub horizontal: Vector3,
    pub left: Vector3,
    pub right: Vector3,
    pub top: Vector3,
    pub bottom: Vector3,
}

impl CameraBasis {
    /// Builds the basis and derives the frustum normals.
    ///
    /// `fov` is the horizontal field of view in radians; the vertical field of
    /// view is `fov / aspect`.
    pub fn new(
        direction: Vector3,
        vertical: Vector3,
        horizontal: Vector3,
        fov: f64,
        aspect: f64,
    ) -> Result<Self, GeometryError> {
        let horizontal_turn = fov / 2.0 - FRAC_PI_2;
        let vertical_turn = fov / aspect / 2.0 - FRAC_PI_2;

        Ok(Self {
            direction,
            vertical,
            horizontal,
            left: direction.rotated(vertical, horizontal_turn)?,
            right: direction.rotated(vertical, -horizontal_turn)?,
            top: direction.rotated(horizontal, vertical_turn)?,
            bottom: direction.rotated(horizontal, -vertical_turn)?,
        })
    }

    /// The basis vector a rotation command turns around.
    pub fn axis(&self, axis: RotationAxis) -> Vector3 {
        match axis {
            RotationAxis::X => self.horizontal,
            RotationAxis::Y => self.direction,
            RotationAxis::Z => self.vertical,
        }
    }

    /// Unit step for a translation command.
    pub fn offset(&self, direction: MoveDirection) -> Vector3 {
        match direction {
            MoveDirection::Forward => self.direction,
            MoveDirection::Backward => -self.direction,
            MoveDirection::Right => self.horizontal,
            MoveDirection::Left => -self.horizontal,
            MoveDirection::Up => self.vertical,
            MoveDirection::Down => -self.vertical,
        }
    }

    /// Applies `rotation` to all seven vectors.
    ///
    /// Every product is computed before anything is stored, so a failure
    /// leaves the basis exactly as it was.
    pub fn apply_rotation(&mut self, rotation: &Matrix) -> Result<(), GeometryError> {
        let rotated = Self {
            direction: rotation.transform_vector(&self.direction)?,
            vertical: rotation.transform_vector(&self.vertical)?,
            horizontal: rotation.transform_vector(&self.horizontal)?,
            left: rotation.transform_vector(&self.left)?,
            right: rotation.transform_vector(&self.right)?,
            top: rotation.transform_vector(&self.top)?,
            bottom: rotation.transform_vector(&self.bottom)?,
        };
        *self = rotated;
        Ok(())
    }
}
