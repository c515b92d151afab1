// =========================================================================
// FALSIFY-SM: numerically stable softmax contract
//
// Softmax must be a probability distribution along the chosen axis, and
// must not overflow for large logits because the slice maximum is
// subtracted first.
//
// References:
//   - Goodfellow et al. (2016) "Deep Learning", §4.1
// =========================================================================

use super::*;

fn logits() -> Matrix {
    Matrix::from_rows(&[
        [1.0, 2.0, 3.0, 4.0],
        [-1.0, 0.0, 1.0, 0.5],
        [10.0, 10.0, 10.0, 10.0],
    ])
    .expect("valid")
}

/// FALSIFY-SM-001: rows sum to 1 for Axis::Columns
#[test]
fn falsify_sm_001_rows_sum_to_one() {
    let y = softmax(&logits(), Axis::Columns);
    for (r, values) in y.rows_iter().enumerate() {
        let total: f64 = values.iter().sum();
        assert!(
            (total - 1.0).abs() < 1e-9,
            "FALSIFIED SM-001: row {r} sums to {total}"
        );
    }
}

/// FALSIFY-SM-002: outputs lie in (0, 1]
#[test]
fn falsify_sm_002_bounded() {
    let y = softmax(&logits(), Axis::Columns);
    for (i, &v) in y.as_slice().iter().enumerate() {
        assert!(
            v > 0.0 && v <= 1.0,
            "FALSIFIED SM-002: softmax[{i}] = {v} outside (0, 1]"
        );
    }
}

/// FALSIFY-SM-003: softmax(x + c) = softmax(x) (shift invariance)
#[test]
fn falsify_sm_003_shift_invariance() {
    let x = logits();
    let shifted = x.map(|v| v + 123.5);
    let a = softmax(&x, Axis::Columns);
    let b = softmax(&shifted, Axis::Columns);
    assert!(
        a.approx_eq(&b, 1e-12),
        "FALSIFIED SM-003: softmax changed under a constant shift"
    );
}

/// FALSIFY-SM-004: no overflow for logits near f64 exp limits
#[test]
fn falsify_sm_004_large_logits_finite() {
    let x = Matrix::from_rows(&[[1000.0, 1001.0, 1002.0]]).expect("valid");
    let y = softmax(&x, Axis::Columns);
    for &v in y.as_slice() {
        assert!(v.is_finite(), "FALSIFIED SM-004: non-finite output {v}");
    }
    let expected = softmax(
        &Matrix::from_rows(&[[0.0, 1.0, 2.0]]).expect("valid"),
        Axis::Columns,
    );
    assert!(y.approx_eq(&expected, 1e-12), "FALSIFIED SM-004: drifted");
}

/// FALSIFY-SM-005: column softmax equals transposed row softmax
#[test]
fn falsify_sm_005_axis_duality() {
    let x = logits();
    let by_rows = softmax(&x, Axis::Rows);
    let via_transpose = ops::transpose(&softmax(&ops::transpose(&x), Axis::Columns));
    assert_eq!(by_rows, via_transpose, "FALSIFIED SM-005: axis mismatch");
}
