// =========================================================================
// FALSIFY-AK (ReLU): activation kernel contract
//
// ReLU(x) = max(0, x) looks un-falsifiable, which is exactly why the
// invariants are pinned here: sign, identity on positives, idempotence,
// and the derivative's value set.
//
// References:
//   - Nair & Hinton (2010) "Rectified Linear Units"
// =========================================================================

use super::*;

fn sweep() -> Matrix {
    let data = (-10_i32..=10).map(|i| f64::from(i) * 0.75).collect();
    Matrix::from_vec(3, 7, data).expect("21 values")
}

/// FALSIFY-AK-001: ReLU(x) >= 0 (non-negativity)
#[test]
fn falsify_ak_001_relu_non_negative() {
    let output = relu(&sweep());
    for (i, &v) in output.as_slice().iter().enumerate() {
        assert!(v >= 0.0, "FALSIFIED AK-001: ReLU output[{i}] = {v} < 0");
    }
}

/// FALSIFY-AK-002: ReLU(x) = x for x > 0
#[test]
fn falsify_ak_002_relu_positive_identity() {
    let input = sweep();
    let output = relu(&input);
    for (i, (&out, &inp)) in output.as_slice().iter().zip(input.as_slice()).enumerate() {
        if inp > 0.0 {
            assert_eq!(out, inp, "FALSIFIED AK-002: ReLU({inp}) = {out} at [{i}]");
        }
    }
}

/// FALSIFY-AK-003: ReLU(ReLU(x)) = ReLU(x) (idempotence)
#[test]
fn falsify_ak_003_relu_idempotent() {
    let once = relu(&sweep());
    let twice = relu(&once);
    assert_eq!(twice, once, "FALSIFIED AK-003: ReLU is not idempotent");
}

/// FALSIFY-AK-004: ReLU'(x) ∈ {0, 1}
#[test]
fn falsify_ak_004_relu_derivative_binary() {
    let d = relu_derivative(&sweep());
    for (i, &v) in d.as_slice().iter().enumerate() {
        assert!(
            v == 0.0 || v == 1.0,
            "FALSIFIED AK-004: ReLU'[{i}] = {v}, expected 0 or 1"
        );
    }
}

/// FALSIFY-AK-005: shape is preserved
#[test]
fn falsify_ak_005_relu_shape_preserved() {
    let input = sweep();
    assert_eq!(
        relu(&input).shape(),
        input.shape(),
        "FALSIFIED AK-005: ReLU changed the shape"
    );
}
