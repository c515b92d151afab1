//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use minivit::prelude::*;
//!
//! let x = Matrix::from_rows(&[[1.0, -1.0]]).expect("valid");
//! let y = ReLU::new().forward(&x).expect("infallible");
//! assert_eq!(y.as_slice(), &[1.0, 0.0]);
//! ```

pub use crate::config::ModelConfig;
pub use crate::error::{MinivitError, Result};
pub use crate::nn::{
    Dropout, LayerNorm, LayerNormSource, LeakyReLU, Module, PatchEmbedding, ReLU, Sigmoid,
    Softmax, Tanh, WeightLayout, GELU,
};
pub use crate::ops::{Axis, Broadcast};
pub use crate::primitives::Matrix;
