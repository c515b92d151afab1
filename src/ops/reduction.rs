//! Full and per-axis reductions.

use super::Axis;
use crate::error::{MinivitError, Result};
use crate::primitives::Matrix;

/// Sum of every element.
#[must_use]
pub fn sum(m: &Matrix) -> f64 {
    m.as_slice().iter().sum()
}

/// Mean of every element.
///
/// # Errors
///
/// Returns an arithmetic error for an empty matrix.
pub fn mean(m: &Matrix) -> Result<f64> {
    if m.is_empty() {
        return Err(MinivitError::arithmetic(format!(
            "mean of empty {}x{} matrix",
            m.n_rows(),
            m.n_cols()
        )));
    }
    Ok(sum(m) / m.len() as f64)
}

/// Sums along an axis.
///
/// `Axis::Rows` produces a `1 x cols` matrix of column sums;
/// `Axis::Columns` produces a `rows x 1` matrix of row sums.
#[must_use]
pub fn sum_axis(m: &Matrix, axis: Axis) -> Matrix {
    let (rows, cols) = m.shape();
    match axis {
        Axis::Rows => {
            let mut totals = vec![0.0; cols];
            for row in m.rows_iter() {
                for (total, &x) in totals.iter_mut().zip(row) {
                    *total += x;
                }
            }
            Matrix::from_parts(1, cols, totals)
        }
        Axis::Columns => {
            let totals = if cols == 0 {
                vec![0.0; rows]
            } else {
                m.rows_iter().map(|row| row.iter().sum()).collect()
            };
            Matrix::from_parts(rows, 1, totals)
        }
    }
}

/// Means along an axis, dividing by the number of reduced elements.
///
/// # Errors
///
/// Returns an arithmetic error when the reduced dimension has length zero.
pub fn mean_axis(m: &Matrix, axis: Axis) -> Result<Matrix> {
    let count = match axis {
        Axis::Rows => m.n_rows(),
        Axis::Columns => m.n_cols(),
    };
    if count == 0 {
        return Err(MinivitError::arithmetic(format!(
            "mean over empty axis {} of {}x{} matrix",
            axis.index(),
            m.n_rows(),
            m.n_cols()
        )));
    }
    sum_axis(m, axis).divide_scalar(count as f64)
}
