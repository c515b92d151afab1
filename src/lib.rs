//! Minivit: dense matrices and vision-transformer building blocks in pure Rust.
//!
//! A small row-major `f64` matrix type, the kernels built on it, and the
//! numerically sensitive primitives (softmax, GELU, layer normalization)
//! needed to assemble the forward pass of a minimal vision transformer.
//!
//! # Quick Start
//!
//! ```
//! use minivit::prelude::*;
//! use minivit::ops;
//!
//! let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).expect("valid");
//! let b = Matrix::from_rows(&[[7.0, 8.0], [9.0, 10.0], [11.0, 12.0]]).expect("valid");
//! let c = ops::matmul(&a, &b).expect("2x3 * 3x2");
//! assert_eq!(c, Matrix::from_rows(&[[58.0, 64.0], [139.0, 154.0]]).expect("valid"));
//!
//! let norm = LayerNorm::new(2, 1e-5).expect("valid epsilon");
//! let y = norm.forward(&c).expect("2 features");
//! assert!((y.get(0, 0).expect("in range") + 1.0).abs() < 1e-3);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: the dense [`Matrix`] type
//! - [`ops`]: matmul, transpose, broadcasting, reductions, element-wise math
//! - [`nn`]: activations, layer normalization, patch embedding, dropout
//! - [`serialization`]: CSV table load/save
//! - [`config`]: model dimensions and weight layout
//! - [`error`]: the crate-wide error type
//!
//! The library emits diagnostics through the [`log`] facade and never
//! installs a logger.

pub mod config;
pub mod error;
pub mod nn;
pub mod ops;
pub mod prelude;
pub mod primitives;
pub mod serialization;

pub use error::{MinivitError, Result};
pub use primitives::Matrix;
