//! Model configuration.
//!
//! Shapes and numeric constants for building the layers without weights on
//! disk, or for checking that exported weights match expectations.
//!
//! # Example
//!
//! ```
//! use minivit::config::ModelConfig;
//!
//! let config = ModelConfig::from_json_str(r#"{"num_patches": 16, "features": 64}"#)
//!     .expect("valid config");
//! assert_eq!(config.seq_len(), 17);
//! assert_eq!(config.layer_norm_eps, 1e-5);
//! assert!(config.weights.has_header);
//! ```

use crate::error::{MinivitError, Result};
use crate::nn::functional::DEFAULT_LAYER_NORM_EPS;
use crate::nn::weights::WeightLayout;
use serde::{Deserialize, Serialize};

/// Dimensions and constants shared by the embedding and normalization
/// layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Values per input patch row (P).
    pub num_patches: usize,
    /// Embedding width (F).
    pub features: usize,
    /// LayerNorm epsilon.
    pub layer_norm_eps: f64,
    /// On-disk weight layout.
    pub weights: WeightLayout,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            num_patches: 196,
            features: 768,
            layer_norm_eps: DEFAULT_LAYER_NORM_EPS,
            weights: WeightLayout::default(),
        }
    }
}

impl ModelConfig {
    /// Create a config with the default dimensions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of patches.
    #[must_use]
    pub fn with_num_patches(mut self, num_patches: usize) -> Self {
        self.num_patches = num_patches;
        self
    }

    /// Set the embedding width.
    #[must_use]
    pub fn with_features(mut self, features: usize) -> Self {
        self.features = features;
        self
    }

    /// Set the LayerNorm epsilon.
    #[must_use]
    pub fn with_layer_norm_eps(mut self, eps: f64) -> Self {
        self.layer_norm_eps = eps;
        self
    }

    /// Set the weight layout.
    #[must_use]
    pub fn with_weights(mut self, weights: WeightLayout) -> Self {
        self.weights = weights;
        self
    }

    /// Sequence length including the class token.
    #[must_use]
    pub fn seq_len(&self) -> usize {
        self.num_patches + 1
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MinivitError::Config`] on malformed JSON or a failed
    /// [`validate`](Self::validate).
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| MinivitError::Config {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check dimensions are non-zero and epsilon is positive and finite.
    ///
    /// # Errors
    ///
    /// Returns [`MinivitError::Config`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.num_patches == 0 {
            return Err(MinivitError::Config {
                message: "num_patches must be > 0".to_string(),
            });
        }
        if self.features == 0 {
            return Err(MinivitError::Config {
                message: "features must be > 0".to_string(),
            });
        }
        if !(self.layer_norm_eps.is_finite() && self.layer_norm_eps > 0.0) {
            return Err(MinivitError::Config {
                message: format!(
                    "layer_norm_eps must be positive and finite, got {}",
                    self.layer_norm_eps
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ModelConfig::default();
        assert_eq!(config.num_patches, 196);
        assert_eq!(config.features, 768);
        assert_eq!(config.seq_len(), 197);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ModelConfig::new()
            .with_num_patches(4)
            .with_features(8)
            .with_layer_norm_eps(1e-6)
            .with_weights(WeightLayout::new().with_header(false));
        assert_eq!(config.num_patches, 4);
        assert_eq!(config.features, 8);
        assert_eq!(config.layer_norm_eps, 1e-6);
        assert!(!config.weights.has_header);
    }

    #[test]
    fn test_from_json_nested_layout() {
        let config = ModelConfig::from_json_str(
            r#"{"num_patches": 9, "features": 32, "weights": {"has_header": false}}"#,
        )
        .expect("valid");
        assert_eq!(config.seq_len(), 10);
        assert!(!config.weights.has_header);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let err = ModelConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, MinivitError::Config { .. }));
    }

    #[test]
    fn test_validate_rejects_zero_and_bad_eps() {
        assert!(ModelConfig::new().with_features(0).validate().is_err());
        assert!(ModelConfig::new().with_num_patches(0).validate().is_err());
        assert!(ModelConfig::new().with_layer_norm_eps(0.0).validate().is_err());
        let err = ModelConfig::from_json_str(r#"{"layer_norm_eps": -1.0}"#).unwrap_err();
        assert!(err.to_string().contains("layer_norm_eps"));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = ModelConfig::new().with_features(12);
        let json = serde_json::to_string(&config).expect("serialize");
        let back = ModelConfig::from_json_str(&json).expect("parse");
        assert_eq!(back, config);
    }
}
