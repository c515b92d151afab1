//! Row/column vector broadcasting.

use super::Broadcast;
use crate::error::{MinivitError, Result};
use crate::primitives::Matrix;

fn broadcast_with<F: Fn(f64, f64) -> f64>(
    matrix: &Matrix,
    vector: &Matrix,
    orientation: Broadcast,
    op: &'static str,
    f: F,
) -> Result<Matrix> {
    let (rows, cols) = matrix.shape();
    let expected = match orientation {
        Broadcast::Row => (1, cols),
        Broadcast::Column => (rows, 1),
    };
    if vector.shape() != expected {
        return Err(MinivitError::shape(op, expected, vector.shape()));
    }

    let v = vector.as_slice();
    let data = matrix
        .as_slice()
        .iter()
        .enumerate()
        .map(|(idx, &x)| {
            let operand = match orientation {
                Broadcast::Row => v[idx % cols],
                Broadcast::Column => v[idx / cols],
            };
            f(x, operand)
        })
        .collect();
    Ok(Matrix::from_parts(rows, cols, data))
}

/// Adds a row or column vector to every row or column of `matrix`.
///
/// With [`Broadcast::Row`] the vector must be `1 x matrix.cols`; with
/// [`Broadcast::Column`] it must be `matrix.rows x 1`.
///
/// # Errors
///
/// Returns a shape error if the vector has the wrong shape.
///
/// # Example
///
/// ```
/// use minivit::ops::{add_broadcast, Broadcast};
/// use minivit::primitives::Matrix;
///
/// let m = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).expect("valid");
/// let v = Matrix::from_rows(&[[10.0, 20.0, 30.0]]).expect("valid");
/// let out = add_broadcast(&m, &v, Broadcast::Row).expect("1x3 row vector");
/// assert_eq!(out.as_slice(), &[11.0, 22.0, 33.0, 14.0, 25.0, 36.0]);
/// ```
pub fn add_broadcast(matrix: &Matrix, vector: &Matrix, orientation: Broadcast) -> Result<Matrix> {
    broadcast_with(matrix, vector, orientation, "add_broadcast", |x, v| x + v)
}

/// Multiplies every row or column of `matrix` by a vector, element-wise.
///
/// # Errors
///
/// Returns a shape error if the vector has the wrong shape.
pub fn multiply_broadcast(
    matrix: &Matrix,
    vector: &Matrix,
    orientation: Broadcast,
) -> Result<Matrix> {
    broadcast_with(matrix, vector, orientation, "multiply_broadcast", |x, v| {
        x * v
    })
}
