/// Camera with frustum culling, back-face culling and trigonometric projection
use std::f64::consts::PI;

use tracing::{debug, trace, warn};

use crate::error::GeometryError;
use crate::geometry::{Point3, Triangle3};
use crate::matrix::Matrix;
use crate::mesh::MeshAsset;
use crate::relation::{vector_angle, RADIANS_PER_DEGREE};
use crate::screen::{Polygon, Screen, ScreenPoint};
use crate::transform::{CameraBasis, MoveDirection, RotationAxis, RotationSense};
use crate::vector::{round_to, Vector3};

pub const FIELD_OF_VIEW_DEGREES: f64 = 90.0;
pub const DEFAULT_MOVE_DISTANCE: f64 = 0.1;
pub const DEFAULT_ROTATION_DEGREES: f64 = 1.5;

const HOME_POSITION: Point3 = Point3::new(1.0, -10.0, 1.0);
const HOME_DIRECTION: Vector3 = Vector3::UNIT_Y;
const HOME_VERTICAL: Vector3 = Vector3::UNIT_Z;
const HOME_HORIZONTAL: Vector3 = Vector3::UNIT_X;

/// A pinhole camera that renders triangles onto its own [`Screen`].
///
/// Projection does not use a projection matrix. Each corner is placed by the
/// angle between its viewing ray and the left and top frustum planes, which is
/// turned into a screen fraction with the law of sines.
#[derive(Debug, Clone)]
pub struct Camera {
    fov: f64,
    aspect: f64,
    width_scalar: f64,
    height_scalar: f64,
    position: Point3,
    basis: CameraBasis,
    triangles: Vec<Triangle3>,
    visible: Vec<usize>,
    screen: Screen,
}

impl Camera {
    /// A camera in the home pose with an empty scene.
    pub fn new(width: u32, height: u32) -> Result<Self, GeometryError> {
        let fov = FIELD_OF_VIEW_DEGREES * RADIANS_PER_DEGREE;
        let aspect = f64::from(width) / f64::from(height);
        let vertical_fov = fov / aspect;

        let mut camera = Self {
            fov,
            aspect,
            width_scalar: ((PI - fov) / 2.0).sin() / fov.sin(),
            height_scalar: ((PI - vertical_fov) / 2.0).sin() / vertical_fov.sin(),
            position: HOME_POSITION,
            basis: CameraBasis::new(HOME_DIRECTION, HOME_VERTICAL, HOME_HORIZONTAL, fov, aspect)?,
            triangles: Vec::new(),
            visible: Vec::new(),
            screen: Screen::new(width, height),
        };
        camera.reset()?;
        Ok(camera)
    }

    pub fn with_mesh(width: u32, height: u32, mesh: &MeshAsset) -> Result<Self, GeometryError> {
        let mut camera = Self::new(width, height)?;
        camera.add_mesh(mesh);
        Ok(camera)
    }

    /// Appends the mesh's triangles to the scene and re-renders.
    pub fn add_mesh(&mut self, mesh: &MeshAsset) {
        self.triangles.extend(mesh.triangles());
        self.refresh();
    }

    /// Returns to the home pose and re-renders.
    pub fn reset(&mut self) -> Result<(), GeometryError> {
        self.basis = CameraBasis::new(
            HOME_DIRECTION,
            HOME_VERTICAL,
            HOME_HORIZONTAL,
            self.fov,
            self.aspect,
        )?;
        self.position = HOME_POSITION;
        self.refresh();
        debug!(visible = self.visible.len(), "camera reset");
        Ok(())
    }

    /// Translates the camera by `distance` along one of its basis directions.
    pub fn move_on_axis(&mut self, direction: MoveDirection, distance: f64) {
        let offset = self.basis.offset(direction) * distance;
        self.position = self.position.translated(offset);
        self.refresh();
    }

    /// Rotates the whole basis around one of its own axes.
    ///
    /// On error the camera keeps its previous orientation.
    pub fn rotate_around_axis(
        &mut self,
        axis: RotationAxis,
        degrees: f64,
        sense: RotationSense,
    ) -> Result<(), GeometryError> {
        let angle = degrees * RADIANS_PER_DEGREE * sense.signum();
        let rotated = Matrix::rotation(self.basis.axis(axis).to_unit_vector(), angle)
            .and_then(|rotation| self.basis.apply_rotation(&rotation));
        if let Err(err) = rotated {
            warn!(?axis, degrees, error = %err, "rotation rejected");
            return Err(err);
        }
        self.refresh();
        Ok(())
    }

    /// Recomputes the visible set and the screen from the current pose.
    pub fn refresh(&mut self) {
        self.determine_visible();
        self.back_face_cull();
        self.project();
        trace!(
            visible = self.visible.len(),
            total = self.triangles.len(),
            "camera refreshed"
        );
    }

    /// Frustum culling.
    ///
    /// A triangle stays when at least one of its corners is inside all four
    /// frustum planes. Triangles that overlap the view without any corner
    /// inside it are dropped.
    pub fn determine_visible(&mut self) {
        let visible = self
            .triangles
            .iter()
            .enumerate()
            .filter(|(_, triangle)| triangle.corners.iter().any(|&c| self.inside_frustum(c)))
            .map(|(index, _)| index)
            .collect();
        self.visible = visible;
    }

    /// Drops visible triangles whose winding faces away from the camera.
    pub fn back_face_cull(&mut self) {
        let position = self.position;
        let triangles = &self.triangles;
        self.visible.retain(|&index| {
            let triangle = &triangles[index];
            let to_triangle = Vector3::between(position, triangle.corners[0]);
            triangle.winding_normal().dot(&to_triangle) >= 0.0
        });
    }

    /// Rebuilds the screen from the visible triangles.
    pub fn project(&mut self) {
        self.screen.clear();
        for &index in &self.visible {
            let [a, b, c] = self.triangles[index].corners;
            let projected = [
                self.project_point(a),
                self.project_point(b),
                self.project_point(c),
            ];
            self.screen.add(projected);
        }
    }

    fn inside_frustum(&self, point: Point3) -> bool {
        let to_point = Vector3::between(self.position, point);
        let basis = &self.basis;
        [basis.left, basis.right, basis.top, basis.bottom]
            .into_iter()
            .all(|normal| vector_angle(to_point, normal) <= PI / 2.0)
    }

    fn project_point(&self, point: Point3) -> ScreenPoint {
        let to_point = Vector3::between(self.position, point);
        let basis = &self.basis;
        let vertical_fov = self.fov / self.aspect;

        let x = screen_fraction(
            to_point.cross(&basis.vertical),
            basis.left,
            basis.right,
            self.fov,
            self.width_scalar,
        );
        let y = screen_fraction(
            to_point.cross(&basis.horizontal),
            basis.top,
            basis.bottom,
            vertical_fov,
            self.height_scalar,
        );

        ScreenPoint::new(
            (x * f64::from(self.screen.width())).round_ties_even(),
            (y * f64::from(self.screen.height())).round_ties_even(),
        )
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    /// Viewing direction with each component rounded to 3 decimals.
    pub fn direction_rounded(&self) -> [f64; 3] {
        let Vector3 { x, y, z } = self.basis.direction;
        [round_to(x, 3), round_to(y, 3), round_to(z, 3)]
    }

    pub fn basis(&self) -> &CameraBasis {
        &self.basis
    }

    /// Horizontal field of view in radians.
    pub fn fov(&self) -> f64 {
        self.fov
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Triangles that survived both culling passes.
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn polygons(&self) -> Vec<Polygon> {
        self.screen.as_polygons()
    }
}

/// Position of a viewing ray across one screen axis, as a fraction of it.
///
/// `reference` is the ray crossed with the basis vector perpendicular to the
/// axis. Its angle to the `near` frustum normal gives the angle at the near
/// edge of the triangle formed with the far edge; the law of sines turns that
/// into a distance. Rays beyond the near edge come out negative.
fn screen_fraction(reference: Vector3, near: Vector3, far: Vector3, fov: f64, scalar: f64) -> f64 {
    let edge_angle = (PI - fov) / 2.0;
    let angle = vector_angle(reference, near);
    let fraction = scalar * angle.sin() / (PI - angle - edge_angle).sin();
    if vector_angle(-reference, far) > fov {
        -fraction
    } else {
        fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(a: Point3, b: Point3, c: Point3) -> MeshAsset {
        MeshAsset::new(vec![a, b, c], vec![[0, 1, 2]]).unwrap()
    }

    /// Point mesh: a degenerate triangle whose corners coincide.
    fn marker(point: Point3) -> MeshAsset {
        single(point, point, point)
    }

    #[test]
    fn test_home_pose() {
        let camera = Camera::new(800, 600).unwrap();
        assert_eq!(camera.position(), Point3::new(1.0, -10.0, 1.0));
        assert_eq!(camera.direction_rounded(), [0.0, 1.0, 0.0]);
        assert_eq!(camera.visible_count(), 0);
        assert!(camera.screen().is_empty());
        assert!((camera.fov() - PI / 2.0).abs() < 1e-12);
        assert!((camera.aspect_ratio() - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_center_projects_to_screen_center() {
        let camera = Camera::with_mesh(800, 600, &marker(Point3::new(1.0, 0.0, 1.0))).unwrap();
        assert_eq!(camera.visible_count(), 1);
        let [p, _, _] = camera.screen().triangles()[0];
        assert_eq!(p, ScreenPoint::new(400.0, 300.0));
    }

    #[test]
    fn test_screen_axes() {
        let right = Camera::with_mesh(800, 600, &marker(Point3::new(3.0, 0.0, 1.0))).unwrap();
        let up = Camera::with_mesh(800, 600, &marker(Point3::new(1.0, 0.0, 3.0))).unwrap();
        let left = Camera::with_mesh(800, 600, &marker(Point3::new(-1.0, 0.0, 1.0))).unwrap();

        let right_point = right.screen().triangles()[0][0];
        let up_point = up.screen().triangles()[0][0];
        let left_point = left.screen().triangles()[0][0];

        assert!(right_point.x > 400.0);
        assert_eq!(right_point.y, 300.0);
        assert!(up_point.y < 300.0);
        assert_eq!(up_point.x, 400.0);
        assert!(left_point.x < 400.0);
        // Equal offsets to either side land symmetrically
        assert!((right_point.x - 400.0 - (400.0 - left_point.x)).abs() <= 1.0);
    }

    #[test]
    fn test_frustum_drops_points_behind() {
        let camera = Camera::with_mesh(800, 600, &marker(Point3::new(1.0, -20.0, 1.0))).unwrap();
        assert_eq!(camera.triangle_count(), 1);
        assert_eq!(camera.visible_count(), 0);
        assert!(camera.polygons().is_empty());
    }

    #[test]
    fn test_back_face_winding() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(2.0, 0.0, 0.0);
        let c = Point3::new(0.0, 0.0, 2.0);

        // cross(c - a, b - a) points +y, along the line of sight
        let facing = Camera::with_mesh(800, 600, &single(a, c, b)).unwrap();
        assert_eq!(facing.visible_count(), 1);

        let away = Camera::with_mesh(800, 600, &single(a, b, c)).unwrap();
        assert_eq!(away.visible_count(), 0);
    }

    #[test]
    fn test_move_and_reset() {
        let mut camera = Camera::new(800, 600).unwrap();
        camera.move_on_axis(MoveDirection::Right, 2.0);
        camera.move_on_axis(MoveDirection::Up, 0.5);
        assert_eq!(camera.position(), Point3::new(3.0, -10.0, 1.5));
        camera.move_on_axis(MoveDirection::Backward, DEFAULT_MOVE_DISTANCE);
        assert_eq!(camera.position().y, -10.0 - DEFAULT_MOVE_DISTANCE);

        camera
            .rotate_around_axis(RotationAxis::Z, 45.0, RotationSense::CounterClockwise)
            .unwrap();
        assert_eq!(camera.direction_rounded(), [-0.707, 0.707, 0.0]);

        camera.reset().unwrap();
        assert_eq!(camera.position(), Point3::new(1.0, -10.0, 1.0));
        assert_eq!(camera.direction_rounded(), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_rotation_moves_projection() {
        let mesh = marker(Point3::new(1.0, 0.0, 1.0));
        let mut camera = Camera::with_mesh(800, 600, &mesh).unwrap();
        camera
            .rotate_around_axis(RotationAxis::Z, 10.0, RotationSense::Clockwise)
            .unwrap();
        // Turning right moves what was straight ahead to the left half
        assert!(camera.screen().triangles()[0][0].x < 400.0);
    }

    #[test]
    fn test_screen_matches_visible() {
        let mut camera = Camera::with_mesh(800, 600, &MeshAsset::cube(1.0)).unwrap();
        assert_eq!(camera.screen().len(), camera.visible_count());
        camera.move_on_axis(MoveDirection::Forward, DEFAULT_MOVE_DISTANCE);
        assert_eq!(camera.screen().len(), camera.visible_count());
        assert_eq!(camera.polygons().len(), camera.visible_count());
    }
}
