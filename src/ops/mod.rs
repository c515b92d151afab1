//! Stateless matrix kernels.
//!
//! Every function takes its operands by reference and returns a new
//! [`Matrix`](crate::primitives::Matrix); nothing here mutates its inputs.
//!
//! - [`linalg`]: `matmul`, `transpose`, `concat_rows`, `trace`, `determinant`, `inverse`
//! - [`elementwise`]: Hadamard product/quotient and element-wise `power`, `sqrt`, `exp`, `log`
//! - [`broadcast`]: row/column vector broadcasting
//! - [`reduction`]: full and per-axis `sum` / `mean`
//!
//! # Example
//!
//! ```
//! use minivit::ops;
//! use minivit::primitives::Matrix;
//!
//! let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).expect("valid");
//! let b = Matrix::from_rows(&[[7.0, 8.0], [9.0, 10.0], [11.0, 12.0]]).expect("valid");
//! let c = ops::matmul(&a, &b).expect("2x3 * 3x2");
//! assert_eq!(c, Matrix::from_rows(&[[58.0, 64.0], [139.0, 154.0]]).expect("valid"));
//! ```

pub mod broadcast;
pub mod elementwise;
pub mod linalg;
pub mod reduction;

use crate::error::MinivitError;
use serde::{Deserialize, Serialize};

pub use broadcast::{add_broadcast, multiply_broadcast};
pub use elementwise::{elementwise_divide, elementwise_multiply, exp, log, power, sqrt};
pub use linalg::{concat_rows, determinant, inverse, matmul, trace, transpose};
pub use reduction::{mean, mean_axis, sum, sum_axis};

/// Axis selector for reductions and normalizations.
///
/// `Axis::Rows` (axis 0) reduces across rows and yields one value per
/// column; `Axis::Columns` (axis 1) reduces across columns and yields one
/// value per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Axis 0: reduce over rows, one result per column.
    Rows,
    /// Axis 1: reduce over columns, one result per row.
    Columns,
}

impl Axis {
    /// Numeric index of the axis (0 or 1).
    #[must_use]
    pub fn index(self) -> i32 {
        match self {
            Axis::Rows => 0,
            Axis::Columns => 1,
        }
    }
}

impl TryFrom<i32> for Axis {
    type Error = MinivitError;

    fn try_from(axis: i32) -> Result<Self, Self::Error> {
        match axis {
            0 => Ok(Axis::Rows),
            1 => Ok(Axis::Columns),
            other => Err(MinivitError::invalid_argument("axis", other, "0 or 1")),
        }
    }
}

/// Orientation of the vector in a broadcast operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Broadcast {
    /// A `1 x cols` vector repeated down every row.
    Row,
    /// A `rows x 1` vector repeated across every column.
    Column,
}

impl Broadcast {
    /// Maps an "is row vector" flag onto a broadcast orientation.
    #[must_use]
    pub fn from_row_flag(as_row: bool) -> Self {
        if as_row {
            Broadcast::Row
        } else {
            Broadcast::Column
        }
    }
}


#[cfg(test)]
#[path = "tests_linalg_contract.rs"]
mod tests_linalg_contract;
