//! Mesh assets and their binary file format
//!
//! Layout (little-endian):
//!
//! ```text
//! i32 vertex_count
//! i32 face_count
//! vertex_count x { f64 x, f64 y, f64 z }
//! face_count   x { u8 i0, u8 i1, u8 i2 }
//! ```
//!
//! Face indices are single bytes, so a mesh can address at most 256 vertices.

use std::fs;
use std::io;
use std::path::Path;

use nom::{
    combinator::map,
    multi::count,
    number::complete::{le_f64, le_i32, u8 as byte},
    sequence::tuple,
    IResult,
};
use tracing::debug;

use crate::error::MeshError;
use crate::geometry::{Point3, Triangle3};

const HEADER_SIZE: usize = 8;
const VERTEX_SIZE: usize = 24;
const FACE_SIZE: usize = 3;

/// Vertex positions and the triangles that index into them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshAsset {
    vertices: Vec<Point3>,
    faces: Vec<[u8; 3]>,
}

impl MeshAsset {
    /// Builds a mesh, rejecting faces that point past the vertex list.
    pub fn new(vertices: Vec<Point3>, faces: Vec<[u8; 3]>) -> Result<Self, MeshError> {
        for (face, indices) in faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| usize::from(i) >= vertices.len()) {
                return Err(MeshError::FaceIndexOutOfRange {
                    face,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }
        Ok(Self { vertices, faces })
    }

    /// Reads and parses a mesh file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MeshError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => MeshError::AssetNotFound {
                path: path.to_path_buf(),
            },
            _ => MeshError::Io(err),
        })?;
        let mesh = Self::parse(&data)?;
        debug!(
            path = %path.display(),
            vertices = mesh.vertices.len(),
            faces = mesh.faces.len(),
            "loaded mesh asset"
        );
        Ok(mesh)
    }

    /// Parses a mesh from its binary representation.
    pub fn parse(data: &[u8]) -> Result<Self, MeshError> {
        let (rest, (vertex_count, face_count)) =
            header(data).map_err(|_| MeshError::Truncated { section: "header" })?;
        let vertex_count = checked_count("vertex", vertex_count)?;
        let face_count = checked_count("face", face_count)?;
        if rest.len() < vertex_count.saturating_mul(VERTEX_SIZE) {
            return Err(MeshError::Truncated { section: "vertices" });
        }

        let (rest, vertices) = count(vertex, vertex_count)(rest)
            .map_err(|_| MeshError::Truncated { section: "vertices" })?;
        let (rest, faces) =
            count(face, face_count)(rest).map_err(|_| MeshError::Truncated { section: "faces" })?;
        if !rest.is_empty() {
            debug!(trailing = rest.len(), "ignoring bytes after the last face");
        }

        Self::new(vertices, faces)
    }

    /// Serializes the mesh into the binary layout read by [`MeshAsset::parse`].
    pub fn to_bytes(&self) -> Result<Vec<u8>, MeshError> {
        let vertex_count = encoded_count("vertices", self.vertices.len())?;
        let face_count = encoded_count("faces", self.faces.len())?;

        let mut data = Vec::with_capacity(
            HEADER_SIZE + self.vertices.len() * VERTEX_SIZE + self.faces.len() * FACE_SIZE,
        );
        data.extend_from_slice(&vertex_count.to_le_bytes());
        data.extend_from_slice(&face_count.to_le_bytes());
        for vertex in &self.vertices {
            for coordinate in [vertex.x, vertex.y, vertex.z] {
                data.extend_from_slice(&coordinate.to_le_bytes());
            }
        }
        for indices in &self.faces {
            data.extend_from_slice(indices);
        }
        Ok(data)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MeshError> {
        fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[u8; 3]] {
        &self.faces
    }

    /// Resolves every face into its corner positions.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle3> + '_ {
        self.faces.iter().map(|[a, b, c]| {
            Triangle3::new(
                self.vertices[usize::from(*a)],
                self.vertices[usize::from(*b)],
                self.vertices[usize::from(*c)],
            )
        })
    }

    /// An axis-aligned cube spanning `[0, size]` on every axis.
    ///
    /// Faces are wound clockwise when seen from outside, so the winding normal
    /// of every face points into the cube. This is the orientation the camera's
    /// back-face test keeps.
    pub fn cube(size: f64) -> Self {
        let s = size;
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(s, 0.0, 0.0),
            Point3::new(s, s, 0.0),
            Point3::new(0.0, s, 0.0),
            Point3::new(0.0, 0.0, s),
            Point3::new(s, 0.0, s),
            Point3::new(s, s, s),
            Point3::new(0.0, s, s),
        ];
        let faces = vec![
            // Bottom (z = 0)
            [0, 1, 2],
            [0, 2, 3],
            // Top (z = size)
            [4, 6, 5],
            [4, 7, 6],
            // Front (y = 0)
            [0, 5, 1],
            [0, 4, 5],
            // Back (y = size)
            [3, 2, 6],
            [3, 6, 7],
            // Left (x = 0)
            [0, 3, 7],
            [0, 7, 4],
            // Right (x = size)
            [1, 6, 2],
            [1, 5, 6],
        ];
        Self { vertices, faces }
    }
}

fn header(input: &[u8]) -> IResult<&[u8], (i32, i32)> {
    tuple((le_i32, le_i32))(input)
}

fn vertex(input: &[u8]) -> IResult<&[u8], Point3> {
    map(tuple((le_f64, le_f64, le_f64)), |(x, y, z)| Point3::new(x, y, z))(input)
}

fn face(input: &[u8]) -> IResult<&[u8], [u8; 3]> {
    map(tuple((byte, byte, byte)), |(a, b, c)| [a, b, c])(input)
}

fn checked_count(what: &'static str, count: i32) -> Result<usize, MeshError> {
    usize::try_from(count).map_err(|_| MeshError::NegativeCount { what, count })
}

fn encoded_count(what: &'static str, count: usize) -> Result<i32, MeshError> {
    i32::try_from(count).map_err(|_| MeshError::TooLarge { what, count })
}
