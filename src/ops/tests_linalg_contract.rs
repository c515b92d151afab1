// =========================================================================
// FALSIFY-LA: dense kernel contract (matmul / transpose / det / inverse)
//
// Algebraic identities every dense kernel must satisfy regardless of the
// loop order used internally.
//
// References:
//   - Golub & Van Loan (2013) "Matrix Computations"
// =========================================================================

use super::*;
use crate::primitives::Matrix;

fn sample(rows: usize, cols: usize, offset: f64) -> Matrix {
    let data = (0..rows * cols)
        .map(|i| ((i as f64) * 0.37 + offset).sin() * 4.0)
        .collect();
    Matrix::from_vec(rows, cols, data).expect("valid")
}

/// FALSIFY-LA-001: Transpose involution: (A^T)^T = A
#[test]
fn falsify_la_001_transpose_involution() {
    for (r, c) in [(1, 1), (2, 3), (5, 1), (4, 7)] {
        let a = sample(r, c, 0.3);
        let att = transpose(&transpose(&a));
        assert_eq!(att, a, "FALSIFIED LA-001: (A^T)^T != A for {r}x{c}");
    }
}

/// FALSIFY-LA-002: Matmul shape: (m×k) * (k×n) = (m×n)
#[test]
fn falsify_la_002_matmul_shape() {
    let a = Matrix::ones(2, 3);
    let b = Matrix::ones(3, 4);
    let c = matmul(&a, &b).expect("compatible dims");
    assert_eq!(
        c.shape(),
        (2, 4),
        "FALSIFIED LA-002: (2x3)*(3x4) shape={:?}, expected (2,4)",
        c.shape()
    );
}

/// FALSIFY-LA-003: Identity matmul: I * A = A and A * I = A
#[test]
fn falsify_la_003_identity_matmul() {
    let a = sample(3, 5, 1.1);
    let left = matmul(&Matrix::identity(3), &a).expect("3x3 * 3x5");
    let right = matmul(&a, &Matrix::identity(5)).expect("3x5 * 5x5");
    assert_eq!(left, a, "FALSIFIED LA-003: I*A != A");
    assert_eq!(right, a, "FALSIFIED LA-003: A*I != A");
}

/// FALSIFY-LA-004: (AB)^T = B^T A^T
#[test]
fn falsify_la_004_transpose_of_product() {
    let a = sample(3, 4, 0.0);
    let b = sample(4, 2, 2.0);
    let lhs = transpose(&matmul(&a, &b).expect("3x4 * 4x2"));
    let rhs = matmul(&transpose(&b), &transpose(&a)).expect("2x4 * 4x3");
    assert!(
        lhs.approx_eq(&rhs, 1e-9),
        "FALSIFIED LA-004: (AB)^T != B^T A^T"
    );
}

/// FALSIFY-LA-005: det(AB) = det(A) det(B) for 3x3
#[test]
fn falsify_la_005_determinant_multiplicative() {
    let a = sample(3, 3, 0.5);
    let b = sample(3, 3, 1.7);
    let ab = matmul(&a, &b).expect("3x3 * 3x3");
    let lhs = determinant(&ab).expect("3x3");
    let rhs = determinant(&a).expect("3x3") * determinant(&b).expect("3x3");
    assert!(
        (lhs - rhs).abs() < 1e-6 * rhs.abs().max(1.0),
        "FALSIFIED LA-005: det(AB)={lhs} != det(A)det(B)={rhs}"
    );
}

/// FALSIFY-LA-006: A * A^-1 = I for non-singular 2x2
#[test]
fn falsify_la_006_inverse_roundtrip() {
    let a = Matrix::from_rows(&[[3.0, -1.5], [2.0, 0.25]]).expect("valid");
    let inv = inverse(&a).expect("det = 3.75");
    let product = matmul(&a, &inv).expect("2x2 * 2x2");
    assert!(
        product.approx_eq(&Matrix::identity(2), 1e-12),
        "FALSIFIED LA-006: A * A^-1 != I"
    );
}

/// FALSIFY-LA-007: size bound is enforced for every size above the limit
#[test]
fn falsify_la_007_size_bounds() {
    for n in 4..8 {
        let eye = Matrix::identity(n);
        assert!(
            matches!(
                determinant(&eye),
                Err(MinivitError::UnsupportedSize { .. })
            ),
            "FALSIFIED LA-007: determinant accepted {n}x{n}"
        );
        assert!(
            matches!(inverse(&eye), Err(MinivitError::UnsupportedSize { .. })),
            "FALSIFIED LA-007: inverse accepted {n}x{n}"
        );
    }
}
