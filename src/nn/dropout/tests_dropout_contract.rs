// =========================================================================
// FALSIFY-DO: Dropout layer contract
//
// Inverted dropout must be the identity in eval mode and preserve the
// expected value in training mode.
//
// References:
//   - Srivastava et al. (2014) "Dropout: A Simple Way to Prevent NNs from Overfitting"
// =========================================================================

use super::*;

/// FALSIFY-DO-001: Eval mode returns input unchanged
#[test]
fn falsify_do_001_eval_identity() {
    let mut dropout = Dropout::with_seed(0.5, 42).expect("valid");
    dropout.eval();

    let input = Matrix::from_rows(&[[1.0, 2.0, 3.0, 4.0, 5.0]]).expect("valid");
    let output = dropout.forward(&input).expect("eval");
    assert_eq!(output, input, "FALSIFIED DO-001: eval output != input");
}

/// FALSIFY-DO-002: Output shape matches input shape
#[test]
fn falsify_do_002_shape_preserved() {
    let mut dropout = Dropout::with_seed(0.5, 42).expect("valid");
    dropout.train();
    let input = Matrix::ones(2, 3);
    let output = dropout.forward(&input).expect("train");

    assert_eq!(
        output.shape(),
        input.shape(),
        "FALSIFIED DO-002: output shape={:?} != input shape={:?}",
        output.shape(),
        input.shape()
    );
}

/// FALSIFY-DO-003: p=0.0 dropout returns input unchanged (training mode)
#[test]
fn falsify_do_003_zero_p_identity() {
    let mut dropout = Dropout::with_seed(0.0, 42).expect("valid");
    dropout.train();
    let input = Matrix::from_rows(&[[1.0, 2.0, 3.0]]).expect("valid");
    let output = dropout.forward(&input).expect("train");
    assert_eq!(output, input, "FALSIFIED DO-003: p=0 changed the input");
}

/// FALSIFY-DO-004: E[dropout(x)] ≈ x in training mode
#[test]
fn falsify_do_004_expected_value_preserved() {
    let mut dropout = Dropout::with_seed(0.4, 2024).expect("valid");
    dropout.train();
    let input = Matrix::ones(100, 100);
    let output = dropout.forward(&input).expect("train");
    let mean = output.as_slice().iter().sum::<f64>() / output.len() as f64;
    assert!(
        (mean - 1.0).abs() < 0.05,
        "FALSIFIED DO-004: mean after dropout = {mean}, expected ≈ 1"
    );
}

/// FALSIFY-DO-005: same seed gives the same mask
#[test]
fn falsify_do_005_seed_determinism() {
    let input = Matrix::ones(6, 6);
    let run = || {
        let mut dropout = Dropout::with_seed(0.5, 99).expect("valid");
        dropout.train();
        dropout.forward(&input).expect("train")
    };
    assert_eq!(run(), run(), "FALSIFIED DO-005: seeded masks differ");
}
