//! Neural network building blocks.
//!
//! The nn module is organized around the [`Module`] trait, which defines
//! the interface for all layers:
//!
//! - **Activations**: [`ReLU`], [`LeakyReLU`], [`Sigmoid`], [`Tanh`], [`GELU`], [`Softmax`]
//! - **Normalization**: [`LayerNorm`]
//! - **Embedding**: [`PatchEmbedding`]
//! - **Regularization**: [`Dropout`]
//!
//! Stateless versions of the activations and normalization live in
//! [`functional`] (re-exported as `F`). The on-disk parameter layout used by
//! `load_weights` is described in [`weights`].
//!
//! # Example
//!
//! ```
//! use minivit::nn::{LayerNorm, Module, PatchEmbedding, GELU};
//! use minivit::primitives::Matrix;
//!
//! let embed = PatchEmbedding::new(4, 8);
//! let norm = LayerNorm::new(8, 1e-5).expect("valid epsilon");
//!
//! let patches = Matrix::ones(2, 4);
//! let tokens = embed.forward(&patches).expect("4 patches per row");
//! let hidden = GELU::new().forward(&norm.forward(&tokens).expect("8 features"))
//!     .expect("infallible");
//! assert_eq!(hidden.shape(), (3, 8));
//! ```
//!
//! # References
//!
//! - Ba, J. L., Kiros, J. R., & Hinton, G. E. (2016). Layer normalization.
//! - Dosovitskiy, A., et al. (2021). An image is worth 16x16 words. ICLR.

mod activation;
mod dropout;
mod embedding;
pub mod functional;
mod module;
mod normalization;
pub mod weights;

pub use activation::{LeakyReLU, ReLU, Sigmoid, Softmax, Tanh, GELU};
pub use dropout::Dropout;
pub use embedding::PatchEmbedding;
pub use functional as F;
pub use module::Module;
pub use normalization::LayerNorm;
pub use weights::{LayerNormSource, PatchEmbeddingPaths, WeightLayout};
