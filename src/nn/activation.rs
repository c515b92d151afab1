//! Activation function modules.
//!
//! These wrap the stateless functions in `nn::functional` behind the
//! [`Module`] trait.
//!
//! # References
//!
//! - Nair, V., & Hinton, G. E. (2010). Rectified linear units improve restricted
//!   Boltzmann machines. ICML.
//! - Hendrycks, D., & Gimpel, K. (2016). Gaussian Error Linear Units (GELUs).

use super::functional as F;
use super::module::Module;
use crate::error::Result;
use crate::ops::Axis;
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};

/// Rectified Linear Unit activation: ReLU(x) = max(0, x)
///
/// # Example
///
/// ```
/// use minivit::nn::{Module, ReLU};
/// use minivit::primitives::Matrix;
///
/// let x = Matrix::from_rows(&[[-2.0, -1.0, 0.0, 1.0, 2.0]]).expect("valid");
/// let y = ReLU::new().forward(&x).expect("infallible");
/// assert_eq!(y.as_slice(), &[0.0, 0.0, 0.0, 1.0, 2.0]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ReLU;

impl ReLU {
    /// Create a new ReLU activation.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Module for ReLU {
    fn forward(&self, input: &Matrix) -> Result<Matrix> {
        Ok(F::relu(input))
    }
}

/// Leaky ReLU activation: LeakyReLU(x) = x if x > 0, else slope * x
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LeakyReLU {
    negative_slope: f64,
}

impl LeakyReLU {
    /// Create a new LeakyReLU with the default negative slope (0.01).
    #[must_use]
    pub fn new() -> Self {
        Self {
            negative_slope: F::DEFAULT_LEAKY_SLOPE,
        }
    }

    /// Create a new LeakyReLU with the given negative slope.
    #[must_use]
    pub fn with_slope(negative_slope: f64) -> Self {
        Self { negative_slope }
    }

    /// The configured negative slope.
    #[must_use]
    pub fn slope(&self) -> f64 {
        self.negative_slope
    }
}

impl Default for LeakyReLU {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for LeakyReLU {
    fn forward(&self, input: &Matrix) -> Result<Matrix> {
        Ok(F::leaky_relu(input, self.negative_slope))
    }
}

/// Sigmoid activation: σ(x) = 1 / (1 + exp(-x))
#[derive(Debug, Clone, Copy, Default)]
pub struct Sigmoid;

impl Sigmoid {
    /// Create a new Sigmoid activation.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Module for Sigmoid {
    fn forward(&self, input: &Matrix) -> Result<Matrix> {
        Ok(F::sigmoid(input))
    }
}

/// Tanh activation, mapping inputs into (-1, 1).
#[derive(Debug, Clone, Copy, Default)]
pub struct Tanh;

impl Tanh {
    /// Create a new Tanh activation.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Module for Tanh {
    fn forward(&self, input: &Matrix) -> Result<Matrix> {
        Ok(F::tanh(input))
    }
}

/// Gaussian Error Linear Unit, tanh approximation:
/// 0.5 * x * (1 + tanh(sqrt(2/π) * (x + 0.044715 * x³)))
#[derive(Debug, Clone, Copy, Default)]
pub struct GELU;

impl GELU {
    /// Create a new GELU activation.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Module for GELU {
    fn forward(&self, input: &Matrix) -> Result<Matrix> {
        Ok(F::gelu(input))
    }
}

/// Softmax activation along an axis.
///
/// The default normalizes each row (`Axis::Columns`), which is the
/// convention for a batch of logits laid out one sample per row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Softmax {
    axis: Axis,
}

impl Softmax {
    /// Create a new Softmax along the given axis.
    #[must_use]
    pub fn new(axis: Axis) -> Self {
        Self { axis }
    }

    /// The axis softmax normalizes over.
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }
}

impl Default for Softmax {
    fn default() -> Self {
        Self::new(Axis::Columns)
    }
}

impl Module for Softmax {
    fn forward(&self, input: &Matrix) -> Result<Matrix> {
        Ok(F::softmax(input, self.axis))
    }
}
