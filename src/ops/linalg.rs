//! Products, transposition, and small closed-form linear algebra.

use crate::error::{MinivitError, Result};
use crate::primitives::Matrix;

/// Largest square size [`determinant`] handles.
pub const MAX_DETERMINANT_SIZE: usize = 3;

/// Largest square size [`inverse`] handles.
pub const MAX_INVERSE_SIZE: usize = 2;

/// Threshold below which `|det|` is treated as singular.
pub const SINGULAR_THRESHOLD: f64 = 1e-10;

/// Matrix-matrix multiplication.
///
/// # Errors
///
/// Returns a shape error unless `a.cols == b.rows`.
pub fn matmul(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    let (rows, inner) = a.shape();
    let (b_rows, cols) = b.shape();
    if inner != b_rows {
        return Err(MinivitError::Shape {
            op: "matmul",
            expected: format!("{inner}xN right operand"),
            actual: format!("{b_rows}x{cols}"),
        });
    }

    let lhs = a.as_slice();
    let rhs = b.as_slice();
    let mut result = vec![0.0; rows * cols];
    // i-k-j order walks both row-major buffers sequentially
    for i in 0..rows {
        let out_row = &mut result[i * cols..(i + 1) * cols];
        for k in 0..inner {
            let a_ik = lhs[i * inner + k];
            let b_row = &rhs[k * cols..(k + 1) * cols];
            for (out, &b_kj) in out_row.iter_mut().zip(b_row) {
                *out += a_ik * b_kj;
            }
        }
    }

    Ok(Matrix::from_parts(rows, cols, result))
}

/// Transposes the matrix: `(i, j) -> (j, i)`.
#[must_use]
pub fn transpose(m: &Matrix) -> Matrix {
    let (rows, cols) = m.shape();
    let src = m.as_slice();
    let mut data = vec![0.0; rows * cols];
    for i in 0..rows {
        for j in 0..cols {
            data[j * rows + i] = src[i * cols + j];
        }
    }
    Matrix::from_parts(cols, rows, data)
}

/// Stacks `bottom` below `top`.
///
/// # Errors
///
/// Returns a shape error if the column counts differ.
pub fn concat_rows(top: &Matrix, bottom: &Matrix) -> Result<Matrix> {
    if top.n_cols() != bottom.n_cols() {
        return Err(MinivitError::Shape {
            op: "concat_rows",
            expected: format!("{} columns", top.n_cols()),
            actual: format!("{} columns", bottom.n_cols()),
        });
    }
    let mut data = Vec::with_capacity(top.len() + bottom.len());
    data.extend_from_slice(top.as_slice());
    data.extend_from_slice(bottom.as_slice());
    Ok(Matrix::from_parts(
        top.n_rows() + bottom.n_rows(),
        top.n_cols(),
        data,
    ))
}

fn require_square(m: &Matrix, op: &'static str) -> Result<usize> {
    if !m.is_square() {
        let n = m.n_rows();
        return Err(MinivitError::shape(op, (n, n), m.shape()));
    }
    Ok(m.n_rows())
}

/// Sum of the main diagonal.
///
/// # Errors
///
/// Returns a shape error for non-square input.
pub fn trace(m: &Matrix) -> Result<f64> {
    let n = require_square(m, "trace")?;
    Ok((0..n).map(|i| m.at(i, i)).sum())
}

/// Determinant of a 1x1, 2x2, or 3x3 matrix.
///
/// The 3x3 case uses cofactor expansion along the first row.
///
/// # Errors
///
/// Returns a shape error for non-square input and an unsupported-size
/// error for any other size (including 0x0).
pub fn determinant(m: &Matrix) -> Result<f64> {
    let n = require_square(m, "determinant")?;
    let a = |i, j| m.at(i, j);
    match n {
        1 => Ok(a(0, 0)),
        2 => Ok(a(0, 0) * a(1, 1) - a(0, 1) * a(1, 0)),
        3 => Ok(a(0, 0) * (a(1, 1) * a(2, 2) - a(1, 2) * a(2, 1))
            - a(0, 1) * (a(1, 0) * a(2, 2) - a(1, 2) * a(2, 0))
            + a(0, 2) * (a(1, 0) * a(2, 1) - a(1, 1) * a(2, 0))),
        size => Err(MinivitError::UnsupportedSize {
            op: "determinant",
            size,
            max: MAX_DETERMINANT_SIZE,
        }),
    }
}

/// Inverse of a 1x1 or 2x2 matrix.
///
/// # Errors
///
/// - shape error for non-square input
/// - unsupported-size error for anything other than 1x1 or 2x2
/// - singular-matrix error when `|det| < 1e-10`
pub fn inverse(m: &Matrix) -> Result<Matrix> {
    let n = require_square(m, "inverse")?;
    if n == 0 || n > MAX_INVERSE_SIZE {
        return Err(MinivitError::UnsupportedSize {
            op: "inverse",
            size: n,
            max: MAX_INVERSE_SIZE,
        });
    }

    let det = determinant(m)?;
    if det.abs() < SINGULAR_THRESHOLD {
        return Err(MinivitError::SingularMatrix { det });
    }

    if n == 1 {
        return Ok(Matrix::from_parts(1, 1, vec![1.0 / m.at(0, 0)]));
    }

    // adjugate / determinant
    let data = vec![
        m.at(1, 1) / det,
        -m.at(0, 1) / det,
        -m.at(1, 0) / det,
        m.at(0, 0) / det,
    ];
    Ok(Matrix::from_parts(2, 2, data))
}
