//! Matrix type for 2D numeric data.

use crate::error::{MinivitError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Absolute tolerance used by `PartialEq` for [`Matrix`].
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// A dense 2D matrix of `f64` values (row-major storage).
///
/// `Matrix` owns its buffer: `clone()` performs a deep copy and moving a
/// matrix transfers the buffer. Arithmetic never mutates its operands.
///
/// # Examples
///
/// ```
/// use minivit::primitives::Matrix;
///
/// let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("data length matches rows * cols");
/// assert_eq!(m.shape(), (2, 3));
/// assert_eq!(m.get(1, 2).expect("in bounds"), 6.0);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "MatrixRepr")]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

#[derive(Deserialize)]
struct MatrixRepr {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl TryFrom<MatrixRepr> for Matrix {
    type Error = MinivitError;

    fn try_from(repr: MatrixRepr) -> Result<Self> {
        Self::from_vec(repr.rows, repr.cols, repr.data)
    }
}

impl Matrix {
    /// Creates a `rows x cols` matrix with every entry equal to `fill`.
    #[must_use]
    pub fn new(rows: usize, cols: usize, fill: f64) -> Self {
        Self {
            data: vec![fill; rows * cols],
            rows,
            cols,
        }
    }

    /// Creates a new matrix from a row-major vector of data.
    ///
    /// # Errors
    ///
    /// Returns a shape error if data length doesn't match rows * cols.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(MinivitError::Shape {
                op: "from_vec",
                expected: format!("{} elements", rows * cols),
                actual: format!("{} elements", data.len()),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Creates a matrix from literal rows.
    ///
    /// An empty slice produces the canonical 0x0 matrix.
    ///
    /// # Errors
    ///
    /// Returns a shape error if any row's length differs from the first row's.
    ///
    /// # Examples
    ///
    /// ```
    /// use minivit::primitives::Matrix;
    ///
    /// let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).expect("rows are equal length");
    /// assert_eq!(m.shape(), (2, 2));
    /// assert!(Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).is_err());
    /// ```
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Ok(Self::default());
        };
        let cols = first.as_ref().len();
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(MinivitError::Shape {
                    op: "from_rows",
                    expected: format!("{cols} columns"),
                    actual: format!("{} columns in row {i}", row.len()),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    /// Creates a matrix of zeros.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::new(rows, cols, 0.0)
    }

    /// Creates a matrix of ones.
    #[must_use]
    pub fn ones(rows: usize, cols: usize) -> Self {
        Self::new(rows, cols, 1.0)
    }

    /// Creates an `n x n` identity matrix.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Self {
            data,
            rows: n,
            cols: n,
        }
    }

    /// Creates a matrix with entries drawn uniformly from `[min, max)`.
    ///
    /// Uses an entropy-seeded generator; results are not reproducible.
    /// Use [`Matrix::random_with`] to supply a seeded source.
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error if `min > max` or either bound
    /// is not finite.
    pub fn random(rows: usize, cols: usize, min: f64, max: f64) -> Result<Self> {
        Self::random_with(&mut rand::thread_rng(), rows, cols, min, max)
    }

    /// Creates a uniformly random matrix using the supplied random source.
    ///
    /// When `min == max` every entry equals `min`.
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error if `min > max` or either bound
    /// is not finite.
    pub fn random_with<R: Rng + ?Sized>(
        rng: &mut R,
        rows: usize,
        cols: usize,
        min: f64,
        max: f64,
    ) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(MinivitError::invalid_argument(
                "random bounds",
                format!("[{min}, {max})"),
                "finite bounds",
            ));
        }
        if min > max {
            return Err(MinivitError::invalid_argument(
                "random bounds",
                format!("[{min}, {max})"),
                "min <= max",
            ));
        }
        if min == max {
            return Ok(Self::new(rows, cols, min));
        }
        let data = (0..rows * cols).map(|_| rng.gen_range(min..max)).collect();
        Ok(Self { data, rows, cols })
    }

    /// Returns the shape as (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true when either dimension is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Returns true for square matrices.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    fn check_index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(MinivitError::Index {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }

    /// Builds a matrix from a buffer whose length the caller already checked.
    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { data, rows, cols }
    }

    /// Unchecked read for kernels that iterate within known bounds.
    #[inline]
    pub(crate) fn at(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Gets element at (row, col).
    ///
    /// # Errors
    ///
    /// Returns an index error if the position is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        let idx = self.check_index(row, col)?;
        Ok(self.data[idx])
    }

    /// Sets element at (row, col).
    ///
    /// # Errors
    ///
    /// Returns an index error if the position is out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        let idx = self.check_index(row, col)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Returns a read-only view of one row.
    ///
    /// # Errors
    ///
    /// Returns an index error if `row_idx >= rows`.
    pub fn row(&self, row_idx: usize) -> Result<&[f64]> {
        if row_idx >= self.rows {
            return Err(MinivitError::Index {
                row: row_idx,
                col: 0,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let start = row_idx * self.cols;
        Ok(&self.data[start..start + self.cols])
    }

    /// Returns a copy of one column.
    ///
    /// # Errors
    ///
    /// Returns an index error if `col_idx >= cols`.
    pub fn column(&self, col_idx: usize) -> Result<Vec<f64>> {
        if col_idx >= self.cols {
            return Err(MinivitError::Index {
                row: 0,
                col: col_idx,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok((0..self.rows)
            .map(|row| self.data[row * self.cols + col_idx])
            .collect())
    }

    /// Iterates over the rows as slices.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on a zero chunk size
        let width = self.cols.max(1);
        self.data.chunks_exact(width).take(self.rows)
    }

    /// Returns the underlying data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Consumes the matrix and returns its row-major buffer.
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Reshapes to `rows x cols`, discarding contents and filling with `value`.
    pub fn resize(&mut self, rows: usize, cols: usize, value: f64) {
        self.data.clear();
        self.data.resize(rows * cols, value);
        self.rows = rows;
        self.cols = cols;
    }

    /// Applies `f` to every element, producing a new matrix.
    #[must_use]
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Self {
        Self {
            data: self.data.iter().map(|&x| f(x)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Combines two same-shaped matrices element-wise.
    ///
    /// # Errors
    ///
    /// Returns a shape error if the shapes differ.
    pub(crate) fn zip_map<F: Fn(f64, f64) -> f64>(
        &self,
        other: &Self,
        op: &'static str,
        f: F,
    ) -> Result<Self> {
        if self.shape() != other.shape() {
            return Err(MinivitError::shape(op, self.shape(), other.shape()));
        }
        Ok(Self {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
            rows: self.rows,
            cols: self.cols,
        })
    }

    /// Adds another matrix element-wise.
    ///
    /// # Errors
    ///
    /// Returns a shape error if dimensions don't match.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.zip_map(other, "add", |a, b| a + b)
    }

    /// Subtracts another matrix element-wise.
    ///
    /// # Errors
    ///
    /// Returns a shape error if dimensions don't match.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.zip_map(other, "sub", |a, b| a - b)
    }

    /// Multiplies each element by a scalar.
    #[must_use]
    pub fn scale(&self, scalar: f64) -> Self {
        self.map(|x| x * scalar)
    }

    /// Divides each element by a scalar.
    ///
    /// # Errors
    ///
    /// Returns an arithmetic error when `scalar == 0`.
    pub fn divide_scalar(&self, scalar: f64) -> Result<Self> {
        if scalar == 0.0 {
            return Err(MinivitError::arithmetic("division of matrix by zero"));
        }
        Ok(self.scale(1.0 / scalar))
    }

    /// Compares two matrices with an absolute per-element tolerance.
    ///
    /// Matrices of different shapes are never equal.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, DEFAULT_TOLERANCE)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{value:8.3}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "matrix_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests_matrix_contract.rs"]
mod tests_matrix_contract;
