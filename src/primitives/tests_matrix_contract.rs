// =========================================================================
// FALSIFY-MX: Matrix container contract
//
// The container owns a row-major buffer of exactly rows*cols values, rejects
// out-of-range access, and every arithmetic method is pure.
//
// References:
//   - Golub & Van Loan (2013) "Matrix Computations"
// =========================================================================

use super::*;

/// FALSIFY-MX-001: buffer length always equals rows * cols
#[test]
fn falsify_mx_001_buffer_length_invariant() {
    let mut m = Matrix::new(3, 4, 0.5);
    assert_eq!(m.len(), 12, "FALSIFIED MX-001: new(3,4) len={}", m.len());

    m.resize(5, 2, 0.0);
    assert_eq!(m.len(), 10, "FALSIFIED MX-001: resize(5,2) len={}", m.len());

    let from_rows = Matrix::from_rows(&[[1.0, 2.0, 3.0]]).expect("valid");
    assert_eq!(
        from_rows.len(),
        3,
        "FALSIFIED MX-001: from_rows len={}",
        from_rows.len()
    );
}

/// FALSIFY-MX-002: every in-bounds cell is addressable, every out-of-bounds cell is rejected
#[test]
fn falsify_mx_002_bounds_checking() {
    let m = Matrix::from_vec(2, 3, (0_i32..6).map(f64::from).collect()).expect("valid");
    for i in 0..2 {
        for j in 0..3 {
            let v = m.get(i, j).expect("in bounds");
            assert_eq!(
                v,
                (i * 3 + j) as f64,
                "FALSIFIED MX-002: get({i},{j})={v}, expected row-major index"
            );
        }
    }
    for (i, j) in [(2, 0), (0, 3), (2, 3), (usize::MAX, 0)] {
        assert!(
            matches!(m.get(i, j), Err(MinivitError::Index { .. })),
            "FALSIFIED MX-002: get({i},{j}) did not fail"
        );
    }
}

/// FALSIFY-MX-003: add then sub returns the input matrix
#[test]
fn falsify_mx_003_add_sub_inverse() {
    let a = Matrix::from_rows(&[[1.5, -2.0, 3.25], [0.0, 7.0, -8.5]]).expect("valid");
    let b = Matrix::from_rows(&[[0.1, 0.2, 0.3], [0.4, 0.5, 0.6]]).expect("valid");
    let back = a
        .add(&b)
        .and_then(|s| s.sub(&b))
        .expect("shapes match");
    assert_eq!(back, a, "FALSIFIED MX-003: (A + B) - B != A");
}

/// FALSIFY-MX-004: scale then divide_scalar returns the input matrix
#[test]
fn falsify_mx_004_scale_divide_inverse() {
    let a = Matrix::from_rows(&[[1.0, -3.0], [4.5, 1e6]]).expect("valid");
    for k in [2.0, -0.5, 1e-3, 1e3] {
        let back = a.scale(k).divide_scalar(k).expect("non-zero");
        assert!(
            back.approx_eq(&a, 1e-6),
            "FALSIFIED MX-004: (A * {k}) / {k} != A"
        );
    }
}

/// FALSIFY-MX-005: equality is symmetric and shape-sensitive
#[test]
fn falsify_mx_005_equality_shape_sensitive() {
    let row = Matrix::ones(1, 4);
    let col = Matrix::ones(4, 1);
    assert_ne!(row, col, "FALSIFIED MX-005: 1x4 ones == 4x1 ones");
    assert_eq!(row, row.clone(), "FALSIFIED MX-005: A != clone(A)");
}
