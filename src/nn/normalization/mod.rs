//! Layer normalization.
//!
//! # References
//!
//! - Ba, J. L., Kiros, J. R., & Hinton, G. E. (2016). Layer normalization.
//!   arXiv:1607.06450.

use super::functional as F;
use super::module::Module;
use super::weights::{LayerNormSource, WeightLayout};
use crate::config::ModelConfig;
use crate::error::{MinivitError, Result};
use crate::ops::Axis;
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};
use std::path::Path;

const LAYER: &str = "LayerNorm";

/// Learned affine parameters, both `1 x features`, and the epsilon they
/// were configured with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LayerNormParamsRepr")]
struct LayerNormParams {
    gamma: Matrix,
    beta: Matrix,
    /// Small constant for numerical stability
    eps: f64,
}

#[derive(Deserialize)]
struct LayerNormParamsRepr {
    gamma: Matrix,
    beta: Matrix,
    eps: f64,
}

impl TryFrom<LayerNormParamsRepr> for LayerNormParams {
    type Error = MinivitError;

    fn try_from(repr: LayerNormParamsRepr) -> Result<Self> {
        check_eps(repr.eps)?;
        for table in [&repr.gamma, &repr.beta] {
            if table.n_rows() != 1 {
                return Err(MinivitError::DimensionMismatch {
                    layer: LAYER,
                    expected: 1,
                    actual: table.n_rows(),
                });
            }
        }
        if repr.beta.n_cols() != repr.gamma.n_cols() {
            return Err(MinivitError::DimensionMismatch {
                layer: LAYER,
                expected: repr.gamma.n_cols(),
                actual: repr.beta.n_cols(),
            });
        }
        Ok(Self {
            gamma: repr.gamma,
            beta: repr.beta,
            eps: repr.eps,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
enum LayerNormState {
    #[default]
    Uninitialized,
    Initialized(LayerNormParams),
}

/// Layer Normalization (Ba et al., 2016).
///
/// Normalizes each row of the input independently, then applies a learned
/// per-feature scale and shift.
///
/// ```text
/// y = (x - E[x]) / sqrt(Var[x] + eps) * gamma + beta
/// ```
///
/// A layer is either uninitialized (no parameters yet) or initialized via
/// [`new`](Self::new), [`initialize`](Self::initialize) or
/// [`load_weights`](Self::load_weights).
///
/// # Example
///
/// ```
/// use minivit::nn::{LayerNorm, Module};
/// use minivit::primitives::Matrix;
///
/// let norm = LayerNorm::new(4, 1e-5).expect("valid");
/// let x = Matrix::from_rows(&[[1.0, 2.0, 3.0, 4.0]]).expect("valid");
/// let y = norm.forward(&x).expect("4 features");
/// let mean: f64 = y.as_slice().iter().sum::<f64>() / 4.0;
/// assert!(mean.abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerNorm {
    state: LayerNormState,
}

fn check_eps(eps: f64) -> Result<()> {
    if eps.is_finite() && eps > 0.0 {
        Ok(())
    } else {
        Err(MinivitError::invalid_argument(
            "epsilon",
            eps,
            "a positive finite value",
        ))
    }
}

impl LayerNorm {
    /// Create an initialized layer with gamma = 1 and beta = 0.
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error if `eps` is not positive.
    pub fn new(features: usize, eps: f64) -> Result<Self> {
        let mut layer = Self::uninitialized();
        layer.initialize(features, eps)?;
        Ok(layer)
    }

    /// Create a layer with no parameters.
    #[must_use]
    pub fn uninitialized() -> Self {
        Self::default()
    }

    /// Create an initialized layer sized by `config.features`.
    ///
    /// # Errors
    ///
    /// Returns a config error if `config` fails validation.
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.features, config.layer_norm_eps)
    }

    /// Reset to gamma = 1, beta = 0 over `features`.
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error if `eps` is not positive; the layer
    /// is left unchanged.
    pub fn initialize(&mut self, features: usize, eps: f64) -> Result<()> {
        check_eps(eps)?;
        self.state = LayerNormState::Initialized(LayerNormParams {
            gamma: Matrix::ones(1, features),
            beta: Matrix::zeros(1, features),
            eps,
        });
        Ok(())
    }

    /// Load gamma and beta from the CSV tables for `source` under `base`.
    ///
    /// Column vectors are transposed into rows. The epsilon of an initialized
    /// layer is kept; an uninitialized layer gets
    /// [`DEFAULT_LAYER_NORM_EPS`](F::DEFAULT_LAYER_NORM_EPS). On any failure
    /// the layer keeps its previous state.
    ///
    /// # Errors
    ///
    /// Returns [`MinivitError::WeightLoad`] wrapping the underlying I/O,
    /// parse, shape or dimension error.
    pub fn load_weights(
        &mut self,
        base: impl AsRef<Path>,
        source: &LayerNormSource,
        layout: &WeightLayout,
    ) -> Result<()> {
        let (weight_path, bias_path) = source.paths(base.as_ref());
        let eps = self.epsilon().unwrap_or(F::DEFAULT_LAYER_NORM_EPS);
        let params = Self::read_params(&weight_path, &bias_path, eps, layout)
            .map_err(|e| MinivitError::weight_load(LAYER, e))?;

        let features = params.gamma.n_cols();
        self.state = LayerNormState::Initialized(params);
        log::info!("LayerNorm weights loaded for {source}: {features} features");
        Ok(())
    }

    fn read_params(
        weight_path: &Path,
        bias_path: &Path,
        eps: f64,
        layout: &WeightLayout,
    ) -> Result<LayerNormParams> {
        let gamma = layout.load_row(weight_path)?;
        let beta = layout.load_row(bias_path)?;
        if beta.n_cols() != gamma.n_cols() {
            return Err(MinivitError::DimensionMismatch {
                layer: LAYER,
                expected: gamma.n_cols(),
                actual: beta.n_cols(),
            });
        }
        Ok(LayerNormParams { gamma, beta, eps })
    }

    fn params(&self) -> Option<&LayerNormParams> {
        match &self.state {
            LayerNormState::Initialized(params) => Some(params),
            LayerNormState::Uninitialized => None,
        }
    }

    /// Scale parameter, `1 x features`.
    #[must_use]
    pub fn gamma(&self) -> Option<&Matrix> {
        self.params().map(|p| &p.gamma)
    }

    /// Shift parameter, `1 x features`.
    #[must_use]
    pub fn beta(&self) -> Option<&Matrix> {
        self.params().map(|p| &p.beta)
    }

    /// Epsilon added to the variance.
    #[must_use]
    pub fn epsilon(&self) -> Option<f64> {
        self.params().map(|p| p.eps)
    }

    /// Normalized width; 0 when uninitialized.
    #[must_use]
    pub fn features(&self) -> usize {
        self.params().map_or(0, |p| p.gamma.n_cols())
    }

    /// Whether parameters are present.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.params().is_some()
    }
}

impl Module for LayerNorm {
    fn forward(&self, input: &Matrix) -> Result<Matrix> {
        let params = self
            .params()
            .ok_or(MinivitError::NotInitialized { layer: LAYER })?;
        let features = params.gamma.n_cols();
        if input.n_cols() != features {
            return Err(MinivitError::DimensionMismatch {
                layer: LAYER,
                expected: features,
                actual: input.n_cols(),
            });
        }
        F::layer_norm(input, &params.gamma, &params.beta, params.eps, Axis::Columns)
    }
}


#[cfg(test)]
#[path = "tests_layernorm_contract.rs"]
mod tests_layernorm_contract;
