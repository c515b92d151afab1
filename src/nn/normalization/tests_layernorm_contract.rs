// =========================================================================
// FALSIFY-LN: LayerNorm layer contract
//
// y = (x - E[x]) / sqrt(Var[x] + eps) * gamma + beta, per row.
// Unit tests cover shapes and state; these pin the statistics.
//
// References:
//   - Ba et al. (2016) "Layer Normalization"
// =========================================================================

use super::*;

fn batch() -> Matrix {
    Matrix::from_rows(&[
        [1.0, -2.0, 3.0, 0.5, -1.5, 2.5, -0.5, 1.5],
        [4.0, -1.0, 2.0, -3.0, 0.0, 1.0, -2.0, 3.0],
    ])
    .expect("valid")
}

/// FALSIFY-LN-001: Centering: mean of normalized output ≈ 0
#[test]
fn falsify_ln_001_centering() {
    let norm = LayerNorm::new(8, 1e-5).expect("valid");
    let y = norm.forward(&batch()).expect("8 features");
    for (r, values) in y.rows_iter().enumerate() {
        let mean = values.iter().sum::<f64>() / 8.0;
        assert!(
            mean.abs() < 1e-9,
            "FALSIFIED LN-001: mean(LN(x))[row={r}] = {mean}, expected ≈ 0"
        );
    }
}

/// FALSIFY-LN-002: Standardization: variance of normalized output ≈ 1
#[test]
fn falsify_ln_002_standardization() {
    let norm = LayerNorm::new(8, 1e-5).expect("valid");
    let y = norm.forward(&batch()).expect("8 features");
    for (r, values) in y.rows_iter().enumerate() {
        let mean = values.iter().sum::<f64>() / 8.0;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / 8.0;
        assert!(
            (var - 1.0).abs() < 1e-4,
            "FALSIFIED LN-002: var(LN(x))[row={r}] = {var}, expected ≈ 1"
        );
    }
}

/// FALSIFY-LN-003: Shift invariance: LN(x + c) = LN(x)
#[test]
fn falsify_ln_003_shift_invariance() {
    let norm = LayerNorm::new(8, 1e-5).expect("valid");
    let x = batch();
    let a = norm.forward(&x).expect("8 features");
    let b = norm.forward(&x.map(|v| v + 50.0)).expect("8 features");
    assert!(
        a.approx_eq(&b, 1e-9),
        "FALSIFIED LN-003: LN(x + c) != LN(x)"
    );
}

/// FALSIFY-LN-004: Shape preservation
#[test]
fn falsify_ln_004_shape_preserved() {
    let norm = LayerNorm::new(8, 1e-5).expect("valid");
    let x = batch();
    let y = norm.forward(&x).expect("8 features");
    assert_eq!(
        y.shape(),
        x.shape(),
        "FALSIFIED LN-004: output shape={:?} != input shape={:?}",
        y.shape(),
        x.shape()
    );
}

/// FALSIFY-LN-005: Constant rows map to beta (no division blow-up)
#[test]
fn falsify_ln_005_constant_row_finite() {
    let norm = LayerNorm::new(4, 1e-5).expect("valid");
    let y = norm.forward(&Matrix::new(3, 4, 7.0)).expect("4 features");
    for (i, &v) in y.as_slice().iter().enumerate() {
        assert!(
            v.is_finite() && v.abs() < 1e-9,
            "FALSIFIED LN-005: constant row output[{i}] = {v}, expected 0"
        );
    }
}
