//! Base trait for layers.

use crate::error::Result;
use crate::primitives::Matrix;

/// Common interface for every layer in [`crate::nn`].
///
/// `forward` borrows the layer immutably; stateful layers that need
/// randomness keep it behind interior mutability so the trait stays usable
/// through shared references.
///
/// # Example
///
/// ```
/// use minivit::nn::{Module, ReLU};
/// use minivit::primitives::Matrix;
///
/// let x = Matrix::from_rows(&[[-1.0, 2.0]]).expect("valid");
/// let y = ReLU::new().forward(&x).expect("activations are infallible");
/// assert_eq!(y.as_slice(), &[0.0, 2.0]);
/// ```
pub trait Module {
    /// Runs the layer on `input`.
    ///
    /// # Errors
    ///
    /// Layer-specific: uninitialized state, width mismatch, or a kernel
    /// shape error.
    fn forward(&self, input: &Matrix) -> Result<Matrix>;

    /// Switches to training mode. No-op for stateless layers.
    fn train(&mut self) {}

    /// Switches to inference mode. No-op for stateless layers.
    fn eval(&mut self) {}

    /// Whether the layer is in training mode.
    fn training(&self) -> bool {
        false
    }
}
