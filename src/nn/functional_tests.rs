use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn row(values: &[f64]) -> Matrix {
    Matrix::from_rows(&[values]).expect("single row")
}

#[test]
fn test_relu_clamps_negatives() {
    let x = row(&[-2.0, -1.0, 0.0, 1.0, 2.0]);
    assert_eq!(relu(&x), row(&[0.0, 0.0, 0.0, 1.0, 2.0]));
}

#[test]
fn test_relu_derivative_zero_at_origin() {
    let x = row(&[-0.5, 0.0, 0.5]);
    assert_eq!(relu_derivative(&x), row(&[0.0, 0.0, 1.0]));
}

#[test]
fn test_gelu_known_values() {
    let y = gelu(&row(&[0.0, 1.0, -1.0]));
    assert!(y.at(0, 0).abs() < 1e-12);
    assert!((y.at(0, 1) - 0.841_191_990_607_88).abs() < 1e-9);
    assert!((y.at(0, 2) + 0.158_808_009_392_12).abs() < 1e-9);
}

#[test]
fn test_gelu_derivative_at_zero_is_half() {
    let d = gelu_derivative(&row(&[0.0]));
    assert!((d.at(0, 0) - 0.5).abs() < 1e-12);
}

#[test]
fn test_sigmoid_and_tanh() {
    let x = row(&[0.0, 2.0]);
    let s = sigmoid(&x);
    assert!((s.at(0, 0) - 0.5).abs() < 1e-12);
    assert!((s.at(0, 1) - 1.0 / (1.0 + (-2.0_f64).exp())).abs() < 1e-12);

    let t = tanh(&x);
    assert_eq!(t.at(0, 0), 0.0);
    assert!((t.at(0, 1) - 2.0_f64.tanh()).abs() < 1e-12);
}

#[test]
fn test_leaky_relu_default_slope() {
    let y = leaky_relu(&row(&[-10.0, 3.0]), DEFAULT_LEAKY_SLOPE);
    assert!((y.at(0, 0) + 0.1).abs() < 1e-12);
    assert_eq!(y.at(0, 1), 3.0);
}

#[test]
fn test_clip_bounds() {
    let y = clip(&row(&[-5.0, 0.5, 5.0]), -1.0, 1.0).expect("valid bounds");
    assert_eq!(y, row(&[-1.0, 0.5, 1.0]));
}

#[test]
fn test_clip_rejects_inverted_bounds() {
    let err = clip(&row(&[1.0]), 2.0, 1.0).unwrap_err();
    assert!(matches!(err, MinivitError::InvalidArgument { .. }));
}

#[test]
fn test_softmax_columns_normalizes_rows() {
    let x = Matrix::from_rows(&[[1.0, 2.0, 3.0], [0.0, 0.0, 0.0]]).expect("valid");
    let y = softmax(&x, Axis::Columns);
    for r in y.rows_iter() {
        assert!((r.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }
    assert!((y.at(1, 0) - 1.0 / 3.0).abs() < 1e-12);
    assert!(y.at(0, 2) > y.at(0, 1));
}

#[test]
fn test_softmax_rows_normalizes_columns() {
    let x = Matrix::from_rows(&[[1.0, 5.0], [2.0, 5.0], [3.0, 5.0]]).expect("valid");
    let y = softmax(&x, Axis::Rows);
    assert_eq!(y.shape(), (3, 2));
    for c in 0..2 {
        let total: f64 = y.column(c).expect("in range").iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
    }
    assert!((y.at(0, 1) - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_softmax_empty_keeps_shape() {
    let x = Matrix::zeros(0, 4);
    assert_eq!(softmax(&x, Axis::Columns).shape(), (0, 4));
    let y = Matrix::zeros(3, 0);
    assert_eq!(softmax(&y, Axis::Rows).shape(), (3, 0));
}

#[test]
fn test_dropout_inference_is_identity() {
    let x = Matrix::new(4, 4, 2.5);
    let y = dropout(&x, 0.9, false).expect("valid rate");
    assert_eq!(y, x);
}

#[test]
fn test_dropout_training_zeroes_or_scales() {
    let mut rng = StdRng::seed_from_u64(7);
    let x = Matrix::ones(20, 20);
    let y = dropout_with(&mut rng, &x, 0.5, true).expect("valid rate");
    let zeros = y.as_slice().iter().filter(|&&v| v == 0.0).count();
    assert!(y.as_slice().iter().all(|&v| v == 0.0 || (v - 2.0).abs() < 1e-12));
    assert!(zeros > 100 && zeros < 300, "zeros = {zeros}");
}

#[test]
fn test_dropout_seeded_is_reproducible() {
    let x = Matrix::ones(5, 5);
    let a = dropout_with(&mut StdRng::seed_from_u64(11), &x, 0.3, true).expect("valid");
    let b = dropout_with(&mut StdRng::seed_from_u64(11), &x, 0.3, true).expect("valid");
    assert_eq!(a, b);
}

#[test]
fn test_dropout_rejects_rate_one() {
    for rate in [1.0, -0.1, f64::NAN] {
        assert!(matches!(
            dropout(&Matrix::ones(1, 1), rate, true),
            Err(MinivitError::InvalidArgument { .. })
        ));
    }
}

#[test]
fn test_mean_and_variance_per_row() {
    let x = Matrix::from_rows(&[[1.0, 2.0, 3.0, 4.0], [2.0, 2.0, 2.0, 2.0]]).expect("valid");
    let (mean, var) = mean_and_variance(&x, Axis::Columns).expect("non-empty");
    assert_eq!(mean.shape(), (2, 1));
    assert_eq!(var.shape(), (2, 1));
    assert!((mean.at(0, 0) - 2.5).abs() < 1e-12);
    assert!((var.at(0, 0) - 1.25).abs() < 1e-12);
    assert_eq!(var.at(1, 0), 0.0);
}

#[test]
fn test_mean_and_variance_per_column() {
    let x = Matrix::from_rows(&[[1.0, 10.0], [3.0, 10.0]]).expect("valid");
    let (mean, var) = mean_and_variance(&x, Axis::Rows).expect("non-empty");
    assert_eq!(mean, row(&[2.0, 10.0]));
    assert_eq!(var, row(&[1.0, 0.0]));
}

#[test]
fn test_layer_norm_applies_affine() {
    let x = row(&[1.0, 3.0]);
    let gamma = row(&[2.0, 2.0]);
    let beta = row(&[1.0, -1.0]);
    let y = layer_norm(&x, &gamma, &beta, 1e-12, Axis::Columns).expect("valid");
    // normalized = [-1, 1]
    assert!((y.at(0, 0) + 1.0).abs() < 1e-6);
    assert!((y.at(0, 1) - 1.0).abs() < 1e-6);
}

#[test]
fn test_layer_norm_per_column() {
    let x = Matrix::from_rows(&[[1.0, 4.0], [3.0, 8.0]]).expect("valid");
    let gamma = Matrix::ones(2, 1);
    let beta = Matrix::zeros(2, 1);
    let y = layer_norm(&x, &gamma, &beta, 1e-12, Axis::Rows).expect("valid");
    assert!((y.at(0, 0) + 1.0).abs() < 1e-6);
    assert!((y.at(1, 1) - 1.0).abs() < 1e-6);
}

#[test]
fn test_layer_norm_constant_row_maps_to_beta() {
    let x = row(&[5.0, 5.0, 5.0]);
    let gamma = Matrix::ones(1, 3);
    let beta = row(&[0.1, 0.2, 0.3]);
    let y = layer_norm(&x, &gamma, &beta, DEFAULT_LAYER_NORM_EPS, Axis::Columns).expect("valid");
    assert!(y.approx_eq(&beta, 1e-12));
}

#[test]
fn test_layer_norm_rejects_wrong_gamma_shape() {
    let x = Matrix::ones(2, 3);
    let err = layer_norm(
        &x,
        &Matrix::ones(1, 2),
        &Matrix::zeros(1, 3),
        DEFAULT_LAYER_NORM_EPS,
        Axis::Columns,
    )
    .unwrap_err();
    assert!(matches!(err, MinivitError::Shape { .. }));

    let err = layer_norm(
        &x,
        &Matrix::ones(1, 3),
        &Matrix::zeros(3, 1),
        DEFAULT_LAYER_NORM_EPS,
        Axis::Columns,
    )
    .unwrap_err();
    assert!(matches!(err, MinivitError::Shape { .. }));
}

#[test]
fn test_layer_norm_rejects_non_positive_epsilon() {
    let x = Matrix::ones(1, 2);
    for eps in [0.0, -1e-5] {
        let err = layer_norm(&x, &Matrix::ones(1, 2), &Matrix::zeros(1, 2), eps, Axis::Columns)
            .unwrap_err();
        assert!(matches!(err, MinivitError::InvalidArgument { .. }));
    }
}
