//! Weight and table serialization.
//!
//! Parameters are exchanged as plain CSV tables (see [`csv`]); the directory
//! layout that groups them into a model lives in [`crate::nn::weights`].
//!
//! ```text
//! a,b,c          <- optional header row
//! 0.1, 0.2, 0.3
//! 0.4, 0.5, 0.6
//! ```

pub mod csv;

pub use self::csv::{load_matrix, load_row_vector, load_vector, save_matrix};
