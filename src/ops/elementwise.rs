//! Element-wise binary and transcendental kernels.

use crate::error::{MinivitError, Result};
use crate::primitives::Matrix;

/// Hadamard (element-wise) product.
///
/// # Errors
///
/// Returns a shape error unless the shapes are identical.
pub fn elementwise_multiply(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    a.zip_map(b, "elementwise_multiply", |x, y| x * y)
}

/// Element-wise quotient `a / b`.
///
/// # Errors
///
/// Returns a shape error unless the shapes are identical, and an
/// arithmetic error naming the first zero divisor in row-major order.
pub fn elementwise_divide(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if a.shape() != b.shape() {
        return Err(MinivitError::shape(
            "elementwise_divide",
            a.shape(),
            b.shape(),
        ));
    }
    if let Some(idx) = b.as_slice().iter().position(|&d| d == 0.0) {
        let cols = b.n_cols();
        return Err(MinivitError::arithmetic(format!(
            "division by zero at ({}, {})",
            idx / cols,
            idx % cols
        )));
    }
    a.zip_map(b, "elementwise_divide", |x, y| x / y)
}

/// Raises every element to `exponent`.
#[must_use]
pub fn power(m: &Matrix, exponent: f64) -> Matrix {
    m.map(|x| x.powf(exponent))
}

/// Element-wise square root, defined as `power(m, 0.5)`.
///
/// Negative inputs produce NaN; callers supply non-negative data.
#[must_use]
pub fn sqrt(m: &Matrix) -> Matrix {
    power(m, 0.5)
}

/// Element-wise natural exponential.
#[must_use]
pub fn exp(m: &Matrix) -> Matrix {
    m.map(f64::exp)
}

/// Element-wise natural logarithm.
///
/// # Errors
///
/// Returns an invalid argument error if any element is `<= 0`.
pub fn log(m: &Matrix) -> Result<Matrix> {
    if let Some(&bad) = m.as_slice().iter().find(|&&x| x <= 0.0) {
        return Err(MinivitError::invalid_argument(
            "log input",
            bad,
            "strictly positive values",
        ));
    }
    Ok(m.map(f64::ln))
}
