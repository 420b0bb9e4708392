/// Dense matrices and Gauss-Jordan reduction for small linear systems
use std::fmt;
use std::ops::{Index, IndexMut, Mul};

use tracing::trace;

use crate::error::GeometryError;
use crate::geometry::{Line3, Plane3};
use crate::vector::Vector3;

/// Outcome of classifying a reduced augmented system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionKind {
    /// The matrix is not reduced, or it is not an `n x (n + 1)` augmented system.
    Unknown,
    /// No solution or infinitely many. The two cases are not told apart.
    Degenerate,
    /// Exactly one solution; the last column holds it.
    Unique,
}

/// Which coordinate supplies the second equation of a line/line system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecondEquation {
    #[default]
    Y,
    Z,
}

/// A row-major matrix of `f64` with fixed dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
    reduced: bool,
}

impl Matrix {
    /// A zero-filled matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
            reduced: false,
        }
    }

    /// Builds a matrix from row slices. All rows must have the same length.
    pub fn from_rows(rows: &[&[f64]]) -> Self {
        let cols = rows.first().map_or(0, |row| row.len());
        let mut matrix = Self::new(rows.len(), cols);
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), cols, "row {r} has the wrong length");
            for (c, value) in row.iter().enumerate() {
                matrix[(r, c)] = *value;
            }
        }
        matrix
    }

    /// The augmented system `t * d1 - s * d2 = s2 - s1` over the X row and the
    /// row chosen by `second`.
    ///
    /// After reduction the last column holds the parameter of `line1` in row 0
    /// and the parameter of `line2` in row 1.
    pub fn from_lines(line1: &Line3, line2: &Line3, second: SecondEquation) -> Self {
        let (d1, d2) = (line1.direction, line2.direction);
        let offset = line2.support - line1.support;
        let (d1_second, d2_second, offset_second) = match second {
            SecondEquation::Y => (d1.y, d2.y, offset.y),
            SecondEquation::Z => (d1.z, d2.z, offset.z),
        };
        Self::from_rows(&[
            &[d1.x, -d2.x, offset.x],
            &[d1_second, -d2_second, offset_second],
        ])
    }

    /// The augmented system `a * u + b * v - c * d = s_line - s_plane`, where
    /// `u` and `v` are the plane's directions and `d` the line's direction.
    pub fn from_plane_and_line(plane: &Plane3, line: &Line3) -> Self {
        let [u, v] = plane.directions;
        let d = line.direction;
        let offset = line.support - plane.support;
        Self::from_rows(&[
            &[u.x, v.x, -d.x, offset.x],
            &[u.y, v.y, -d.y, offset.y],
            &[u.z, v.z, -d.z, offset.z],
        ])
    }

    /// Multiplicative identity of size `size`.
    pub fn identity(size: usize) -> Self {
        let mut matrix = Self::new(size, size);
        for i in 0..size {
            matrix[(i, i)] = 1.0;
        }
        matrix
    }

    /// Additive identity of size `size`.
    pub fn zeros(size: usize) -> Self {
        Self::new(size, size)
    }

    /// Rotation by `angle` radians around `axis` (Rodrigues' formula).
    ///
    /// `axis` must already have length 1 after rounding to 10 decimals; there
    /// is no tolerance beyond that rounding. An angle of exactly zero returns
    /// the 3x3 identity.
    pub fn rotation(axis: Vector3, angle: f64) -> Result<Self, GeometryError> {
        let length = axis.length();
        if length != 1.0 {
            return Err(GeometryError::InvalidRotationAxis { length });
        }
        if angle == 0.0 {
            return Ok(Self::identity(3));
        }

        let (sin, cos) = angle.sin_cos();
        let t = 1.0 - cos;
        let Vector3 { x, y, z } = axis;
        Ok(Self::from_rows(&[
            &[cos + x * x * t, x * y * t - z * sin, x * z * t + y * sin],
            &[y * x * t + z * sin, cos + y * y * t, y * z * t - x * sin],
            &[z * x * t - y * sin, z * y * t + x * sin, cos + z * z * t],
        ]))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// True once [`Matrix::reduce`] has run to completion and no row operation
    /// or arithmetic has touched the matrix since.
    pub fn is_reduced(&self) -> bool {
        self.reduced
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn swap_rows(&mut self, first: usize, second: usize) {
        self.reduced = false;
        if first == second {
            return;
        }
        for c in 0..self.cols {
            self.data.swap(first * self.cols + c, second * self.cols + c);
        }
    }

    pub fn multiply_row(&mut self, row: usize, factor: f64) {
        self.reduced = false;
        for value in &mut self.data[row * self.cols..(row + 1) * self.cols] {
            *value *= factor;
        }
    }

    pub fn divide_row(&mut self, row: usize, divisor: f64) {
        self.reduced = false;
        for value in &mut self.data[row * self.cols..(row + 1) * self.cols] {
            *value /= divisor;
        }
    }

    /// `target -= source * factor`
    pub fn subtract_row_from_row(&mut self, target: usize, source: usize, factor: f64) {
        self.reduced = false;
        for c in 0..self.cols {
            let delta = self[(source, c)] * factor;
            self[(target, c)] -= delta;
        }
    }

    /// Brings the matrix into reduced row-echelon form by Gauss-Jordan elimination.
    ///
    /// Pivots are the first non-zero entry at or below the current row; a column
    /// without one is skipped without consuming a row. When the columns run out
    /// before the rows do, reduction stops early and the remaining columns are
    /// free variables. The matrix is marked reduced in every case.
    pub fn reduce(&mut self) {
        self.eliminate();
        self.reduced = true;
    }

    fn eliminate(&mut self) {
        let mut lead = 0;
        for r in 0..self.rows {
            if lead >= self.cols {
                break;
            }
            let mut i = r;
            while self[(i, lead)] == 0.0 {
                i += 1;
                if i == self.rows {
                    i = r;
                    lead += 1;
                    if lead == self.cols {
                        trace!(row = r, "reduction ran out of pivot columns");
                        return;
                    }
                }
            }

            self.swap_rows(i, r);
            let pivot = self[(r, lead)];
            if pivot != 0.0 {
                self.divide_row(r, pivot);
            }
            for other in 0..self.rows {
                if other != r {
                    let factor = self[(other, lead)];
                    self.subtract_row_from_row(other, r, factor);
                }
            }
            lead += 1;
        }
    }

    /// Classifies the solution set of a reduced augmented system.
    pub fn classify_solution(&self) -> SolutionKind {
        if !self.reduced || self.rows == 0 || self.rows + 1 != self.cols {
            return SolutionKind::Unknown;
        }
        if self[(self.rows - 1, self.cols - 2)] == 0.0 {
            SolutionKind::Degenerate
        } else {
            SolutionKind::Unique
        }
    }

    /// The vector held by a 3x1 matrix; `None` for any other shape.
    pub fn to_vector(&self) -> Option<Vector3> {
        if self.dimensions() != (3, 1) {
            return None;
        }
        Some(Vector3::new(self.data[0], self.data[1], self.data[2]))
    }

    pub fn scale(&mut self, scalar: f64) {
        self.reduced = false;
        for value in &mut self.data {
            *value *= scalar;
        }
    }

    pub fn scaled(&self, scalar: f64) -> Self {
        let mut result = self.clone();
        result.scale(scalar);
        result
    }

    /// Adds `other` into `self`.
    pub fn add_in_place(&mut self, other: &Self) -> Result<(), GeometryError> {
        if self.dimensions() != other.dimensions() {
            return Err(GeometryError::DimensionMismatch {
                operation: "add",
                left: self.dimensions(),
                right: other.dimensions(),
            });
        }
        self.reduced = false;
        for (value, addend) in self.data.iter_mut().zip(&other.data) {
            *value += addend;
        }
        Ok(())
    }

    pub fn try_add(&self, other: &Self) -> Result<Self, GeometryError> {
        let mut result = self.clone();
        result.add_in_place(other)?;
        Ok(result)
    }

    pub fn try_mul(&self, other: &Self) -> Result<Self, GeometryError> {
        if self.cols != other.rows {
            return Err(GeometryError::DimensionMismatch {
                operation: "multiply",
                left: self.dimensions(),
                right: other.dimensions(),
            });
        }
        let mut product = Self::new(self.rows, other.cols);
        for r in 0..self.rows {
            for c in 0..other.cols {
                product[(r, c)] = (0..self.cols).map(|k| self[(r, k)] * other[(k, c)]).sum();
            }
        }
        Ok(product)
    }

    /// Matrix-vector product through a 3x1 column matrix.
    pub fn transform_vector(&self, vector: &Vector3) -> Result<Vector3, GeometryError> {
        let product = self.try_mul(&Matrix::from(*vector))?;
        product.to_vector().ok_or(GeometryError::DimensionMismatch {
            operation: "convert to a vector",
            left: product.dimensions(),
            right: (3, 1),
        })
    }
}

impl From<Vector3> for Matrix {
    fn from(v: Vector3) -> Self {
        Self::from_rows(&[&[v.x], &[v.y], &[v.z]])
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.data[row * self.cols + col]
    }
}

impl Mul<f64> for &Matrix {
    type Output = Matrix;

    fn mul(self, scalar: f64) -> Matrix {
        self.scaled(scalar)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            let row: Vec<String> = self.row(r).iter().map(|v| format!("{v:>10.4}")).collect();
            writeln!(f, "[{}]", row.join(" "))?;
        }
        Ok(())
    }
}
