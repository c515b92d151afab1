//! Dropout regularization.
//!
//! Dropout randomly zeroes elements during training to prevent co-adaptation
//! of neurons and reduce overfitting.
//!
//! # Reference
//!
//! - Srivastava, N., et al. (2014). Dropout: A simple way to prevent neural
//!   networks from overfitting. JMLR.

use super::functional as F;
use super::module::Module;
use crate::error::{MinivitError, Result};
use crate::primitives::Matrix;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Mutex;

/// Dropout regularization layer.
///
/// During training, randomly zeroes elements with probability `p` and
/// scales the survivors by `1/(1-p)` (inverted dropout). During evaluation,
/// returns input unchanged.
///
/// A new layer starts in evaluation mode; call [`Module::train`] to enable
/// dropping.
///
/// # Example
///
/// ```
/// use minivit::nn::{Dropout, Module};
/// use minivit::primitives::Matrix;
///
/// let mut dropout = Dropout::with_seed(0.5, 42).expect("valid probability");
/// let x = Matrix::ones(10, 10);
///
/// let y_eval = dropout.forward(&x).expect("eval");
/// assert_eq!(y_eval, x);
///
/// dropout.train();
/// let y_train = dropout.forward(&x).expect("train");
/// assert!(y_train.as_slice().iter().all(|&v| v == 0.0 || v == 2.0));
/// ```
pub struct Dropout {
    /// Probability of element being zeroed
    p: f64,

    /// Whether in training mode
    training: bool,

    /// Random number generator (Mutex for thread safety)
    rng: Mutex<StdRng>,
}

impl Dropout {
    /// Create a new Dropout layer seeded from system entropy.
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error if `p` is not in [0, 1).
    pub fn new(p: f64) -> Result<Self> {
        Self::with_rng(p, StdRng::from_entropy())
    }

    /// Create a new Dropout layer with a specific seed for reproducibility.
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error if `p` is not in [0, 1).
    pub fn with_seed(p: f64, seed: u64) -> Result<Self> {
        Self::with_rng(p, StdRng::seed_from_u64(seed))
    }

    fn with_rng(p: f64, rng: StdRng) -> Result<Self> {
        if !(0.0..1.0).contains(&p) {
            return Err(MinivitError::invalid_argument(
                "dropout probability",
                p,
                "a probability in [0, 1)",
            ));
        }
        Ok(Self {
            p,
            training: false,
            rng: Mutex::new(rng),
        })
    }

    /// Get the dropout probability.
    #[must_use]
    pub fn probability(&self) -> f64 {
        self.p
    }
}

impl Module for Dropout {
    fn forward(&self, input: &Matrix) -> Result<Matrix> {
        if !self.training || self.p == 0.0 {
            return Ok(input.clone());
        }

        log::debug!(
            "dropout p={} on {}x{} input",
            self.p,
            input.n_rows(),
            input.n_cols()
        );
        // generator state stays valid across a poisoned lock
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        F::dropout_with(&mut *rng, input, self.p, true)
    }

    fn train(&mut self) {
        self.training = true;
    }

    fn eval(&mut self) {
        self.training = false;
    }

    fn training(&self) -> bool {
        self.training
    }
}

impl std::fmt::Debug for Dropout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dropout")
            .field("p", &self.p)
            .field("training", &self.training)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dropout_starts_in_eval() {
        let dropout = Dropout::new(0.3).expect("valid");
        assert!(!dropout.training());
        assert_eq!(dropout.probability(), 0.3);
    }

    #[test]
    fn test_dropout_rejects_bad_probability() {
        for p in [1.0, 1.5, -0.01] {
            assert!(matches!(
                Dropout::new(p),
                Err(MinivitError::InvalidArgument { .. })
            ));
        }
    }

    #[test]
    fn test_dropout_training_scales_survivors() {
        let mut dropout = Dropout::with_seed(0.25, 3).expect("valid");
        dropout.train();
        let y = dropout.forward(&Matrix::new(8, 8, 3.0)).expect("train");
        let scaled = 3.0 / 0.75;
        assert!(y
            .as_slice()
            .iter()
            .all(|&v| v == 0.0 || (v - scaled).abs() < 1e-12));
    }

    #[test]
    fn test_dropout_train_eval_toggle() {
        let mut dropout = Dropout::with_seed(0.5, 1).expect("valid");
        dropout.train();
        assert!(dropout.training());
        dropout.eval();
        assert!(!dropout.training());
    }

    #[test]
    fn test_dropout_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Dropout>();
    }
}

#[cfg(test)]
mod tests_dropout_contract;
