//! On-disk weight-file layout.
//!
//! Exported models are a directory of CSV tables, one per parameter:
//!
//! ```text
//! <base>/
//!   norm_weight.csv, norm_bias.csv                      final LayerNorm
//!   transformer_layers/transformer_{i}_{kind}_weight.csv  block LayerNorms
//!   transformer_layers/transformer_{i}_{kind}_bias.csv
//!   other/input_layer_weight.csv, other/input_layer_bias.csv
//!   position_embedding/pos_embedding.csv
//!   class_token/cls_token.csv
//! ```

use crate::error::{MinivitError, Result};
use crate::ops;
use crate::primitives::Matrix;
use crate::serialization::csv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How weight tables are stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightLayout {
    /// Whether each table starts with a header row to skip.
    pub has_header: bool,
}

impl Default for WeightLayout {
    fn default() -> Self {
        Self { has_header: true }
    }
}

impl WeightLayout {
    /// Layout with header rows (the exporter's default).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether tables carry a header row.
    #[must_use]
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Load a table honoring this layout.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`csv::load_matrix`].
    pub fn load(&self, path: &Path) -> Result<Matrix> {
        csv::load_matrix(path, self.has_header)
    }

    /// Load a table that must hold a single row or column, returned as a
    /// `1 x n` row vector.
    ///
    /// # Errors
    ///
    /// Propagates load errors; returns a shape error if the table is a
    /// full matrix rather than a vector.
    pub fn load_row(&self, path: &Path) -> Result<Matrix> {
        let table = self.load(path)?;
        match table.shape() {
            (1, _) => Ok(table),
            (_, 1) => Ok(ops::transpose(&table)),
            (rows, cols) => Err(MinivitError::Shape {
                op: "load_row",
                expected: "1xN or Nx1".to_string(),
                actual: format!("{rows}x{cols}"),
            }),
        }
    }
}

/// Which LayerNorm in the model a weight pair belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerNormSource {
    /// The final norm applied after the encoder stack.
    Final,
    /// A norm inside transformer block `layer`, e.g. kind `"norm1"`.
    Transformer {
        /// Block index
        layer: usize,
        /// Norm name within the block
        kind: String,
    },
}

impl LayerNormSource {
    /// Shorthand for [`LayerNormSource::Transformer`].
    #[must_use]
    pub fn transformer(layer: usize, kind: impl Into<String>) -> Self {
        Self::Transformer {
            layer,
            kind: kind.into(),
        }
    }

    /// Paths of the `(weight, bias)` tables under `base`.
    #[must_use]
    pub fn paths(&self, base: &Path) -> (PathBuf, PathBuf) {
        match self {
            Self::Final => (base.join("norm_weight.csv"), base.join("norm_bias.csv")),
            Self::Transformer { layer, kind } => {
                let dir = base.join("transformer_layers");
                (
                    dir.join(format!("transformer_{layer}_{kind}_weight.csv")),
                    dir.join(format!("transformer_{layer}_{kind}_bias.csv")),
                )
            }
        }
    }
}

impl std::fmt::Display for LayerNormSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Final => write!(f, "final"),
            Self::Transformer { layer, kind } => write!(f, "layer {layer} {kind}"),
        }
    }
}

/// Paths of the four patch-embedding tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchEmbeddingPaths {
    /// Projection weight, `F x P`
    pub proj_weight: PathBuf,
    /// Projection bias, `1 x F` (or `F x 1`)
    pub proj_bias: PathBuf,
    /// Positional embedding, `S x F`
    pub pos_embed: PathBuf,
    /// Class token, `1 x F`
    pub cls_token: PathBuf,
}

impl PatchEmbeddingPaths {
    /// Resolve the tables relative to `base`.
    #[must_use]
    pub fn under(base: &Path) -> Self {
        Self {
            proj_weight: base.join("other").join("input_layer_weight.csv"),
            proj_bias: base.join("other").join("input_layer_bias.csv"),
            pos_embed: base.join("position_embedding").join("pos_embedding.csv"),
            cls_token: base.join("class_token").join("cls_token.csv"),
        }
    }
}
