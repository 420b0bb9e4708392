/// Error types for geometry computations and mesh assets
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the matrix engine and the vector helpers built on it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error(
        "cannot {operation} a {}x{} matrix with a {}x{} matrix",
        left.0, left.1, right.0, right.1
    )]
    DimensionMismatch {
        operation: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },
    /// The rotation factory only accepts axes whose rounded length is exactly 1.
    /// No rotation is performed when this is returned.
    #[error("rotation axis must have unit length, got {length}")]
    InvalidRotationAxis { length: f64 },
}

/// Failures raised while reading a mesh asset.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("mesh asset not found: {}", path.display())]
    AssetNotFound { path: PathBuf },
    #[error("failed to read mesh asset")]
    Io(#[from] std::io::Error),
    #[error("negative {what} count in mesh header: {count}")]
    NegativeCount { what: &'static str, count: i32 },
    #[error("mesh data ended early while reading {section}")]
    Truncated { section: &'static str },
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    FaceIndexOutOfRange {
        face: usize,
        index: u8,
        vertex_count: usize,
    },
    #[error("mesh has {count} {what}, more than the format can store")]
    TooLarge { what: &'static str, count: usize },
}
