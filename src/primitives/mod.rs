//! Core compute primitive (Matrix).
//!
//! Every kernel, activation, and layer in the crate consumes and produces
//! this type.

mod matrix;

pub use matrix::{Matrix, DEFAULT_TOLERANCE};
