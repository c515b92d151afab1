//! Functional interface for activation and normalization primitives.
//!
//! These are stateless functions over [`Matrix`]. The module wrappers in
//! [`crate::nn`] and the stateful layers delegate here.
//!
//! # Example
//!
//! ```
//! use minivit::nn::F;
//! use minivit::ops::Axis;
//! use minivit::primitives::Matrix;
//!
//! let x = Matrix::from_rows(&[[1.0, 2.0, 3.0]]).expect("valid");
//! let y = F::relu(&x);
//! let probs = F::softmax(&y, Axis::Columns);
//! assert!((probs.as_slice().iter().sum::<f64>() - 1.0).abs() < 1e-12);
//! ```

use crate::error::{MinivitError, Result};
use crate::ops::{self, Axis};
use crate::primitives::Matrix;
use rand::Rng;

/// sqrt(2 / pi), the GELU tanh-approximation scale.
const SQRT_2_OVER_PI: f64 = 0.797_884_560_802_865_4;

/// Cubic coefficient of the GELU tanh approximation.
const GELU_COEFF: f64 = 0.044_715;

/// Default negative slope for [`leaky_relu`].
pub const DEFAULT_LEAKY_SLOPE: f64 = 0.01;

/// Default epsilon for [`layer_norm`].
pub const DEFAULT_LAYER_NORM_EPS: f64 = 1e-5;

/// `ReLU` activation: max(0, x)
#[must_use]
pub fn relu(x: &Matrix) -> Matrix {
    x.map(|v| v.max(0.0))
}

/// `ReLU` derivative: 1 where x > 0, else 0.
#[must_use]
pub fn relu_derivative(x: &Matrix) -> Matrix {
    x.map(|v| if v > 0.0 { 1.0 } else { 0.0 })
}

/// Scalar GELU (tanh approximation).
///
/// Equation: GELU(x) = 0.5 * x * (1 + tanh(sqrt(2/pi) * (x + 0.044715 * x^3)))
#[inline]
#[must_use]
pub fn gelu_scalar(x: f64) -> f64 {
    let inner = SQRT_2_OVER_PI * (x + GELU_COEFF * x * x * x);
    0.5 * x * (1.0 + inner.tanh())
}

/// GELU activation (tanh approximation, not the exact erf form).
#[must_use]
pub fn gelu(x: &Matrix) -> Matrix {
    x.map(gelu_scalar)
}

/// Analytic derivative of the tanh-approximated GELU.
///
/// d/dx = 0.5 * (1 + t) + 0.5 * x * (1 - t^2) * sqrt(2/pi) * (1 + 3 * 0.044715 * x^2)
/// with t = tanh(sqrt(2/pi) * (x + 0.044715 * x^3)).
#[must_use]
pub fn gelu_derivative(x: &Matrix) -> Matrix {
    x.map(|v| {
        let tanh_val = (SQRT_2_OVER_PI * (v + GELU_COEFF * v * v * v)).tanh();
        let sech2 = 1.0 - tanh_val * tanh_val;
        0.5 * (1.0 + tanh_val)
            + 0.5 * v * sech2 * SQRT_2_OVER_PI * (1.0 + 3.0 * GELU_COEFF * v * v)
    })
}

/// Scalar sigmoid: σ(x) = 1 / (1 + exp(-x))
#[inline]
#[must_use]
pub fn sigmoid_scalar(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Sigmoid activation: 1 / (1 + exp(-x))
#[must_use]
pub fn sigmoid(x: &Matrix) -> Matrix {
    x.map(sigmoid_scalar)
}

/// Tanh activation
#[must_use]
pub fn tanh(x: &Matrix) -> Matrix {
    x.map(f64::tanh)
}

/// Leaky `ReLU` activation: x if x > 0, else `negative_slope` * x
#[must_use]
pub fn leaky_relu(x: &Matrix, negative_slope: f64) -> Matrix {
    x.map(|v| if v > 0.0 { v } else { negative_slope * v })
}

/// Clamps every element into `[min_val, max_val]`.
///
/// # Errors
///
/// Returns an invalid argument error if `min_val > max_val` or either bound
/// is NaN.
pub fn clip(x: &Matrix, min_val: f64, max_val: f64) -> Result<Matrix> {
    if min_val.is_nan() || max_val.is_nan() || min_val > max_val {
        return Err(MinivitError::invalid_argument(
            "clip bounds",
            format!("[{min_val}, {max_val}]"),
            "min <= max",
        ));
    }
    Ok(x.map(|v| v.clamp(min_val, max_val)))
}

/// Softmax on a slice, in place.
///
/// Equation: softmax(x)\_i = exp(x\_i - max) / sum\_j exp(x\_j - max)
fn softmax_in_place(values: &mut [f64]) {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut sum = 0.0;
    for v in values.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }
    for v in values.iter_mut() {
        *v /= sum;
    }
}

/// Numerically stable softmax along an axis.
///
/// `Axis::Columns` normalizes each row to sum to 1; `Axis::Rows` normalizes
/// each column. The per-slice maximum is subtracted before exponentiating,
/// so adding a constant to a slice leaves its output unchanged.
#[must_use]
pub fn softmax(x: &Matrix, axis: Axis) -> Matrix {
    match axis {
        Axis::Columns => {
            let mut data = x.as_slice().to_vec();
            let width = x.n_cols().max(1);
            for row in data.chunks_exact_mut(width) {
                softmax_in_place(row);
            }
            Matrix::from_parts(x.n_rows(), x.n_cols(), data)
        }
        Axis::Rows => {
            let t = ops::transpose(x);
            ops::transpose(&softmax(&t, Axis::Columns))
        }
    }
}

/// Dropout with an entropy-seeded random source.
///
/// # Errors
///
/// Returns an invalid argument error unless `rate` is in `[0, 1)`.
pub fn dropout(x: &Matrix, rate: f64, training: bool) -> Result<Matrix> {
    dropout_with(&mut rand::thread_rng(), x, rate, training)
}

/// Inverted dropout using the supplied random source.
///
/// In inference (`training == false`) this is the identity. In training,
/// each element is zeroed with probability `rate` and otherwise scaled by
/// `1 / (1 - rate)`.
///
/// # Errors
///
/// Returns an invalid argument error unless `rate` is in `[0, 1)`.
pub fn dropout_with<R: Rng + ?Sized>(
    rng: &mut R,
    x: &Matrix,
    rate: f64,
    training: bool,
) -> Result<Matrix> {
    if !(0.0..1.0).contains(&rate) {
        return Err(MinivitError::invalid_argument(
            "dropout rate",
            rate,
            "a probability in [0, 1)",
        ));
    }
    if !training || rate == 0.0 {
        return Ok(x.clone());
    }

    let scale = 1.0 / (1.0 - rate);
    let data = x
        .as_slice()
        .iter()
        .map(|&v| if rng.gen::<f64>() < rate { 0.0 } else { v * scale })
        .collect();
    Ok(Matrix::from_parts(x.n_rows(), x.n_cols(), data))
}

/// Per-row or per-column mean and biased variance.
///
/// `Axis::Columns` returns two `rows x 1` matrices (one value per row);
/// `Axis::Rows` returns two `1 x cols` matrices (one value per column).
/// The variance divides by the element count, not count - 1.
///
/// # Errors
///
/// Returns an arithmetic error when the reduced axis is empty.
pub fn mean_and_variance(x: &Matrix, axis: Axis) -> Result<(Matrix, Matrix)> {
    let mean = ops::mean_axis(x, axis)?;
    let centered = match axis {
        Axis::Columns => ops::add_broadcast(x, &mean.scale(-1.0), ops::Broadcast::Column)?,
        Axis::Rows => ops::add_broadcast(x, &mean.scale(-1.0), ops::Broadcast::Row)?,
    };
    let variance = ops::mean_axis(&ops::power(&centered, 2.0), axis)?;
    Ok((mean, variance))
}

/// Layer normalization along an axis.
///
/// Equation: y = gamma * (x - mean) / sqrt(var + eps) + beta
///
/// For `Axis::Columns` each row is normalized and `gamma`/`beta` must be
/// `1 x cols`; for `Axis::Rows` each column is normalized and they must be
/// `rows x 1`.
///
/// # Errors
///
/// - shape error when `gamma` or `beta` has the wrong shape
/// - invalid argument error when `epsilon` is not positive
/// - arithmetic error when the normalized axis is empty
pub fn layer_norm(
    x: &Matrix,
    gamma: &Matrix,
    beta: &Matrix,
    epsilon: f64,
    axis: Axis,
) -> Result<Matrix> {
    if epsilon.is_nan() || epsilon <= 0.0 {
        return Err(MinivitError::invalid_argument(
            "epsilon",
            epsilon,
            "a positive value",
        ));
    }
    let (affine_shape, orientation) = match axis {
        Axis::Columns => ((1, x.n_cols()), ops::Broadcast::Row),
        Axis::Rows => ((x.n_rows(), 1), ops::Broadcast::Column),
    };
    if gamma.shape() != affine_shape {
        return Err(MinivitError::shape("layer_norm gamma", affine_shape, gamma.shape()));
    }
    if beta.shape() != affine_shape {
        return Err(MinivitError::shape("layer_norm beta", affine_shape, beta.shape()));
    }

    let (mean, variance) = mean_and_variance(x, axis)?;
    let inv_std = variance.map(|var| 1.0 / (var + epsilon).sqrt());
    let stats_orientation = match orientation {
        ops::Broadcast::Row => ops::Broadcast::Column,
        ops::Broadcast::Column => ops::Broadcast::Row,
    };

    let centered = ops::add_broadcast(x, &mean.scale(-1.0), stats_orientation)?;
    let normalized = ops::multiply_broadcast(&centered, &inv_std, stats_orientation)?;
    let scaled = ops::multiply_broadcast(&normalized, gamma, orientation)?;
    ops::add_broadcast(&scaled, beta, orientation)
}

#[cfg(test)]
#[path = "functional_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "functional_tests_relu_contract.rs"]
mod tests_relu_contract;

#[cfg(test)]
#[path = "functional_tests_gelu_contract.rs"]
mod tests_gelu_contract;

#[cfg(test)]
#[path = "functional_tests_softmax_contract.rs"]
mod tests_softmax_contract;
