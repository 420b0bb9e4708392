//! Spaceview Core Library - geometry, linear systems and the camera
//!
//! This library provides the rendering-independent core: small dense
//! matrices with Gauss-Jordan reduction, vectors and geometric primitives,
//! their relations, mesh assets and a camera that culls and projects
//! triangles onto a screen.

pub mod error;
pub mod geometry;
pub mod matrix;
pub mod mesh;
pub mod projection;
pub mod relation;
pub mod screen;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use error::{GeometryError, MeshError};
pub use geometry::{Line3, Plane3, Point3, Triangle3};
pub use matrix::{Matrix, SecondEquation, SolutionKind};
pub use mesh::MeshAsset;
pub use projection::{Camera, DEFAULT_MOVE_DISTANCE, DEFAULT_ROTATION_DEGREES};
pub use relation::{angle_between, intersect_lines, intersect_plane_line, Intersection};
pub use screen::{Polygon, PolygonStyle, Rgba, Screen, ScreenPoint, ScreenTriangle};
pub use transform::{CameraBasis, MoveDirection, RotationAxis, RotationSense};
pub use vector::Vector3;
