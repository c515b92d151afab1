//! Patch embedding for vision-transformer inputs.
//!
//! Each input row holds `num_patches` values. The layer projects it into a
//! `features`-wide embedding, prepends a learned class token, and adds the
//! learned positional embedding row-for-row.
//!
//! # References
//!
//! - Dosovitskiy, A., et al. (2021). An image is worth 16x16 words:
//!   Transformers for image recognition at scale. ICLR.

use super::module::Module;
use super::weights::{PatchEmbeddingPaths, WeightLayout};
use crate::config::ModelConfig;
use crate::error::{MinivitError, Result};
use crate::ops::{self, Broadcast};
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};
use std::path::Path;

const LAYER: &str = "PatchEmbedding";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PatchEmbeddingParamsRepr")]
struct PatchEmbeddingParams {
    /// `features x num_patches`
    proj_weight: Matrix,
    /// `1 x features`
    proj_bias: Matrix,
    /// `seq_len x features`
    pos_embed: Matrix,
    /// `1 x features`
    cls_token: Matrix,
}

#[derive(Deserialize)]
struct PatchEmbeddingParamsRepr {
    proj_weight: Matrix,
    proj_bias: Matrix,
    pos_embed: Matrix,
    cls_token: Matrix,
}

impl TryFrom<PatchEmbeddingParamsRepr> for PatchEmbeddingParams {
    type Error = MinivitError;

    fn try_from(repr: PatchEmbeddingParamsRepr) -> Result<Self> {
        let params = Self {
            proj_weight: repr.proj_weight,
            proj_bias: repr.proj_bias,
            pos_embed: repr.pos_embed,
            cls_token: repr.cls_token,
        };
        params.validate()?;
        Ok(params)
    }
}

impl PatchEmbeddingParams {
    fn zeros(num_patches: usize, features: usize) -> Self {
        Self {
            proj_weight: Matrix::zeros(features, num_patches),
            proj_bias: Matrix::zeros(1, features),
            pos_embed: Matrix::zeros(num_patches + 1, features),
            cls_token: Matrix::zeros(1, features),
        }
    }

    fn features(&self) -> usize {
        self.proj_weight.n_rows()
    }

    fn num_patches(&self) -> usize {
        self.proj_weight.n_cols()
    }

    fn seq_len(&self) -> usize {
        self.num_patches() + 1
    }

    /// Shape checks that tie the four tables together.
    fn validate(&self) -> Result<()> {
        let features = self.features();
        let checks = [
            (self.proj_bias.n_rows(), 1),
            (self.proj_bias.n_cols(), features),
            (self.cls_token.n_rows(), 1),
            (self.cls_token.n_cols(), features),
            (self.pos_embed.n_rows(), self.seq_len()),
            (self.pos_embed.n_cols(), features),
        ];
        for (actual, expected) in checks {
            if actual != expected {
                return Err(MinivitError::DimensionMismatch {
                    layer: LAYER,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
enum PatchEmbeddingState {
    #[default]
    Uninitialized,
    Initialized(PatchEmbeddingParams),
}

/// Linear patch projection with class token and positional embedding.
///
/// Parameter shapes, with `P = num_patches`, `F = features` and
/// `S = seq_len = P + 1`:
///
/// | parameter | shape |
/// |---|---|
/// | `proj_weight` | `F x P` |
/// | `proj_bias` | `1 x F` |
/// | `pos_embed` | `S x F` |
/// | `cls_token` | `1 x F` |
///
/// # Example
///
/// ```
/// use minivit::nn::{Module, PatchEmbedding};
/// use minivit::primitives::Matrix;
///
/// let embed = PatchEmbedding::new(4, 8);
/// let patches = Matrix::ones(2, 4);
/// let out = embed.forward(&patches).expect("4 patches per row");
/// assert_eq!(out.shape(), (3, 8)); // class token + 2 rows
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchEmbedding {
    state: PatchEmbeddingState,
}

impl PatchEmbedding {
    /// Create an initialized layer with all parameters zero.
    #[must_use]
    pub fn new(num_patches: usize, features: usize) -> Self {
        Self {
            state: PatchEmbeddingState::Initialized(PatchEmbeddingParams::zeros(
                num_patches,
                features,
            )),
        }
    }

    /// Create a layer with no parameters.
    #[must_use]
    pub fn uninitialized() -> Self {
        Self::default()
    }

    /// Create a zeroed layer sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns a config error if `config` fails validation.
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.num_patches, config.features))
    }

    /// Reset every parameter to zeros of the given size.
    pub fn initialize(&mut self, num_patches: usize, features: usize) {
        self.state =
            PatchEmbeddingState::Initialized(PatchEmbeddingParams::zeros(num_patches, features));
    }

    /// Load all four parameter tables from the layout under `base`.
    ///
    /// Dimensions are re-derived from the projection weight: `features` is
    /// its row count and `num_patches` its column count. On any failure the
    /// layer keeps its previous state.
    ///
    /// # Errors
    ///
    /// Returns [`MinivitError::WeightLoad`] wrapping the underlying I/O,
    /// parse, shape or dimension error.
    pub fn load_weights(&mut self, base: impl AsRef<Path>, layout: &WeightLayout) -> Result<()> {
        let paths = PatchEmbeddingPaths::under(base.as_ref());
        let params =
            Self::read_params(&paths, layout).map_err(|e| MinivitError::weight_load(LAYER, e))?;

        log::info!(
            "PatchEmbedding weights loaded: features={}, patches={}, sequence length={}",
            params.features(),
            params.num_patches(),
            params.seq_len()
        );
        self.state = PatchEmbeddingState::Initialized(params);
        Ok(())
    }

    fn read_params(
        paths: &PatchEmbeddingPaths,
        layout: &WeightLayout,
    ) -> Result<PatchEmbeddingParams> {
        let params = PatchEmbeddingParams {
            proj_weight: layout.load(&paths.proj_weight)?,
            proj_bias: layout.load_row(&paths.proj_bias)?,
            pos_embed: layout.load(&paths.pos_embed)?,
            cls_token: layout.load_row(&paths.cls_token)?,
        };
        params.validate()?;
        Ok(params)
    }

    fn params(&self) -> Option<&PatchEmbeddingParams> {
        match &self.state {
            PatchEmbeddingState::Initialized(params) => Some(params),
            PatchEmbeddingState::Uninitialized => None,
        }
    }

    /// Projection weight, `features x num_patches`.
    #[must_use]
    pub fn proj_weight(&self) -> Option<&Matrix> {
        self.params().map(|p| &p.proj_weight)
    }

    /// Projection bias, `1 x features`.
    #[must_use]
    pub fn proj_bias(&self) -> Option<&Matrix> {
        self.params().map(|p| &p.proj_bias)
    }

    /// Positional embedding, `seq_len x features`.
    #[must_use]
    pub fn pos_embed(&self) -> Option<&Matrix> {
        self.params().map(|p| &p.pos_embed)
    }

    /// Class token, `1 x features`.
    #[must_use]
    pub fn cls_token(&self) -> Option<&Matrix> {
        self.params().map(|p| &p.cls_token)
    }

    /// Values per input row; 0 when uninitialized.
    #[must_use]
    pub fn num_patches(&self) -> usize {
        self.params().map_or(0, PatchEmbeddingParams::num_patches)
    }

    /// Embedding width; 0 when uninitialized.
    #[must_use]
    pub fn features(&self) -> usize {
        self.params().map_or(0, PatchEmbeddingParams::features)
    }

    /// `num_patches + 1`; 0 when uninitialized.
    #[must_use]
    pub fn seq_len(&self) -> usize {
        self.params().map_or(0, PatchEmbeddingParams::seq_len)
    }

    /// Whether parameters are present.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.params().is_some()
    }
}

impl Module for PatchEmbedding {
    /// Embeds `patches` (`B x num_patches`) into `(B + 1) x features`.
    ///
    /// Row 0 of the output is the class token; row `i + 1` is the projection
    /// of input row `i`. Row `j` of `pos_embed` is added to output row `j`,
    /// so `B + 1` may not exceed `seq_len`.
    fn forward(&self, patches: &Matrix) -> Result<Matrix> {
        let params = self
            .params()
            .ok_or(MinivitError::NotInitialized { layer: LAYER })?;
        if patches.n_cols() != params.num_patches() {
            return Err(MinivitError::DimensionMismatch {
                layer: LAYER,
                expected: params.num_patches(),
                actual: patches.n_cols(),
            });
        }

        let projected = ops::matmul(patches, &ops::transpose(&params.proj_weight))?;
        let projected = ops::add_broadcast(&projected, &params.proj_bias, Broadcast::Row)?;
        let with_cls = ops::concat_rows(&params.cls_token, &projected)?;

        let rows = with_cls.n_rows();
        if rows > params.seq_len() {
            return Err(MinivitError::DimensionMismatch {
                layer: LAYER,
                expected: params.seq_len(),
                actual: rows,
            });
        }
        let features = params.features();
        let leading = params
            .pos_embed
            .as_slice()
            .get(..rows * features)
            .ok_or(MinivitError::DimensionMismatch {
                layer: LAYER,
                expected: rows,
                actual: params.pos_embed.n_rows(),
            })?;
        let positions = Matrix::from_vec(rows, features, leading.to_vec())?;
        with_cls.add(&positions)
    }
}

#[cfg(test)]
#[path = "embedding_tests.rs"]
mod tests;
