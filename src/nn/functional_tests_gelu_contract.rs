// =========================================================================
// FALSIFY-GE: GELU (tanh approximation) contract
//
// References:
//   - Hendrycks & Gimpel (2016) "Gaussian Error Linear Units"
// =========================================================================

use super::*;

/// FALSIFY-GE-001: GELU(0) = 0
#[test]
fn falsify_ge_001_gelu_zero() {
    let y = gelu(&Matrix::zeros(1, 1));
    assert_eq!(y.at(0, 0), 0.0, "FALSIFIED GE-001: GELU(0) = {}", y.at(0, 0));
}

/// FALSIFY-GE-002: GELU(x) -> x for large x and -> 0 for very negative x
#[test]
fn falsify_ge_002_gelu_asymptotes() {
    let y = gelu(&Matrix::from_rows(&[[20.0, -20.0]]).expect("valid"));
    assert!(
        (y.at(0, 0) - 20.0).abs() < 1e-9,
        "FALSIFIED GE-002: GELU(20) = {}",
        y.at(0, 0)
    );
    assert!(
        y.at(0, 1).abs() < 1e-9,
        "FALSIFIED GE-002: GELU(-20) = {}",
        y.at(0, 1)
    );
}

/// FALSIFY-GE-003: GELU(x) - GELU(-x) = x (odd part is the identity)
#[test]
fn falsify_ge_003_gelu_odd_part() {
    for i in -8_i32..=8 {
        let x = f64::from(i) * 0.4;
        let diff = gelu_scalar(x) - gelu_scalar(-x);
        assert!(
            (diff - x).abs() < 1e-12,
            "FALSIFIED GE-003: GELU({x}) - GELU(-{x}) = {diff}"
        );
    }
}

/// FALSIFY-GE-004: analytic derivative agrees with central differences
#[test]
fn falsify_ge_004_gelu_derivative_matches_finite_difference() {
    let h = 1e-5;
    for i in -12_i32..=12 {
        let x = f64::from(i) * 0.25;
        let numeric = (gelu_scalar(x + h) - gelu_scalar(x - h)) / (2.0 * h);
        let analytic = gelu_derivative(&Matrix::new(1, 1, x)).at(0, 0);
        assert!(
            (numeric - analytic).abs() < 1e-6,
            "FALSIFIED GE-004: d/dx GELU({x}) analytic={analytic}, numeric={numeric}"
        );
    }
}
