use crate::error::{Error, Result};
use crate::linalg::{self, Transpose};
use crate::{Matrix, Vector};
use log::{debug, warn};

/// Closed-form ridge regression through the normal equations.
///
/// Solves `(X^T X + lambda I) beta = X^T y` with a Cholesky factorization of
/// the regularized Gram matrix followed by its in-place inversion, and writes
/// the solution into `coefficients`.
///
/// `lambda` is added to every diagonal entry, so a constant intercept column in
/// `x` is penalized like any other coefficient. Use `lambda > 0` whenever `x`
/// may be rank deficient.
///
/// `coefficients` is written only after every fallible step has succeeded: on
/// any error it still holds what the caller passed in.
pub fn ridge_train(x: &Matrix, y: &Vector, coefficients: &mut Vector, lambda: f64) -> Result<()> {
    let (n_samples, n_features) = x.dim();
    if n_samples == 0 {
        return Err(Error::invalid("x", "design matrix must have at least one sample"));
    }
    if y.len() != n_samples {
        return Err(Error::dimension("ridge_train: samples in y", n_samples, y.len()));
    }
    if coefficients.len() != n_features {
        return Err(Error::dimension(
            "ridge_train: coefficients",
            n_features,
            coefficients.len(),
        ));
    }
    if !lambda.is_finite() || lambda < 0.0 {
        return Err(Error::invalid(
            "lambda",
            format!("must be finite and non-negative, got {lambda}"),
        ));
    }

    debug!("ridge_train: {n_samples}x{n_features} design, lambda={lambda}");

    let mut gram = linalg::try_zeros_matrix(n_features, n_features)?;
    let mut xty = linalg::try_zeros_vector(n_features)?;

    linalg::gemm(
        Transpose::Yes,
        Transpose::No,
        1.0,
        x.view(),
        x.view(),
        0.0,
        gram.view_mut(),
    )?;
    linalg::gemv(Transpose::Yes, 1.0, x.view(), y.view(), 0.0, xty.view_mut())?;

    for d in gram.diag_mut() {
        *d += lambda;
    }

    if let Err(err) = linalg::cholesky_decompose(gram.view_mut()) {
        warn!(
            "ridge_train: regularized Gram matrix is not positive definite (lambda={lambda}): {err}"
        );
        return Err(err);
    }
    linalg::cholesky_invert(gram.view_mut())?;

    linalg::gemv(
        Transpose::No,
        1.0,
        gram.view(),
        xty.view(),
        0.0,
        coefficients.view_mut(),
    )?;

    debug!("ridge_train: solved {n_features} coefficients");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Status;
    use crate::metrics::r2_score;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use ndarray::{array, s};
    use ndarray_rand::RandomExt;
    use ndarray_rand::rand_distr::Uniform;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn random_design(seed: u64, n_samples: usize, n_features: usize) -> Matrix {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut x = Matrix::ones((n_samples, n_features + 1));
        let features =
            Matrix::random_using((n_samples, n_features), Uniform::new(-1.0, 1.0), &mut rng);
        x.slice_mut(s![.., 1..]).assign(&features);
        x
    }

    #[test]
    fn test_ridge_unregularized_matches_ols() {
        let x = random_design(7, 40, 3);
        let truth = array![0.5, -1.0, 2.0, 3.5];
        let y = x.dot(&truth);

        let mut coeffs = Vector::zeros(4);
        ridge_train(&x, &y, &mut coeffs, 0.0).unwrap();

        for (got, want) in coeffs.iter().zip(truth.iter()) {
            assert_abs_diff_eq!(*got, *want, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_ridge_simple() {
        let x = array![[1.0, 1.0], [1.0, 2.0], [1.0, 3.0], [1.0, 4.0]];
        let y = array![2.0, 4.0, 6.0, 8.0];

        let mut coeffs = Vector::zeros(2);
        ridge_train(&x, &y, &mut coeffs, 0.0).unwrap();

        assert_abs_diff_eq!(coeffs[0], 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(coeffs[1], 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_ridge_shrinks_with_lambda() {
        let x = random_design(11, 30, 3);
        let mut rng = StdRng::seed_from_u64(12);
        let noise = Vector::random_using(30, Uniform::new(-0.1, 0.1), &mut rng);
        let y = x.dot(&array![1.0, 2.0, -3.0, 0.5]) + noise;

        let mut norms = Vec::new();
        for lambda in [0.0, 0.1, 1.0, 10.0, 100.0] {
            let mut coeffs = Vector::zeros(4);
            ridge_train(&x, &y, &mut coeffs, lambda).unwrap();
            norms.push(coeffs.dot(&coeffs).sqrt());
        }

        for pair in norms.windows(2) {
            assert!(pair[1] < pair[0], "norms not shrinking: {norms:?}");
        }
    }

    #[test]
    fn test_ridge_duplicate_columns_need_regularization() {
        let x = array![[1.0, 2.0, 2.0], [1.0, 3.0, 3.0], [1.0, 5.0, 5.0], [1.0, 7.0, 7.0]];
        let y = array![1.0, 2.0, 3.0, 4.0];

        let mut coeffs = array![9.0, 9.0, 9.0];
        let result = ridge_train(&x, &y, &mut coeffs, 0.0);
        assert_eq!(Status::from(&result), Status::ArithmeticError);
        assert_eq!(coeffs, array![9.0, 9.0, 9.0]);

        ridge_train(&x, &y, &mut coeffs, 10.0).unwrap();
        assert!(coeffs.iter().all(|c| c.is_finite()));
        assert_abs_diff_eq!(coeffs[1], coeffs[2], epsilon = 1e-10);
    }

    #[test]
    fn test_ridge_penalizes_intercept_column() {
        let x = Matrix::ones((4, 1));
        let y = Vector::from_elem(4, 2.0);

        let mut coeffs = Vector::zeros(1);
        ridge_train(&x, &y, &mut coeffs, 4.0).unwrap();

        // m * mean(y) / (m + lambda)
        assert_abs_diff_eq!(coeffs[0], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ridge_mixed_feature_scales() {
        let x = array![[1.0, 1e8], [1.0, 1.1e8], [1.0, 1.3e8], [1.0, 1.6e8]];
        let truth = array![2.0, 3e-8];
        let y = x.dot(&truth);

        let mut coeffs = Vector::zeros(2);
        ridge_train(&x, &y, &mut coeffs, 0.0).unwrap();

        assert_relative_eq!(coeffs[0], truth[0], max_relative = 1e-6);
        assert_relative_eq!(coeffs[1], truth[1], max_relative = 1e-6);
        let fitted = x.dot(&coeffs);
        for (got, want) in fitted.iter().zip(y.iter()) {
            assert_relative_eq!(*got, *want, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_ridge_collinear_design_with_small_lambda() {
        let x = array![
            [1.0, 2.0, 5.0, 7.0],
            [1.0, 3.0, 6.0, 8.0],
            [1.0, 4.0, 7.0, 9.0],
            [1.0, 5.0, 8.0, 10.0],
            [1.0, 6.0, 9.0, 11.0]
        ];
        let y = array![50.0, 60.0, 70.0, 80.0, 90.0];

        let mut coeffs = Vector::zeros(4);
        ridge_train(&x, &y, &mut coeffs, 0.1).unwrap();

        let score = r2_score(&y, &x.dot(&coeffs)).unwrap();
        assert!(score > 0.99, "r2 = {score}");
    }

    #[test]
    fn test_ridge_is_deterministic() {
        let x = random_design(3, 25, 2);
        let y = x.column(1).mapv(|v| 4.0 * v - 1.0);

        let mut first = Vector::zeros(3);
        let mut second = Vector::from_elem(3, 42.0);
        ridge_train(&x, &y, &mut first, 0.5).unwrap();
        ridge_train(&x, &y, &mut second, 0.5).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_ridge_dimension_mismatch() {
        let x = array![[1.0], [2.0]];
        let y = array![1.0, 2.0, 3.0];
        let mut coeffs = Vector::zeros(1);

        let err = ridge_train(&x, &y, &mut coeffs, 0.0).unwrap_err();
        assert_eq!(err.status(), Status::DimensionMismatch);

        let y = array![1.0, 2.0];
        let mut coeffs = Vector::zeros(2);
        let err = ridge_train(&x, &y, &mut coeffs, 0.0).unwrap_err();
        assert_eq!(err.status(), Status::DimensionMismatch);
        assert_eq!(coeffs, Vector::zeros(2));
    }

    #[test]
    fn test_ridge_invalid_lambda() {
        let x = array![[1.0], [2.0]];
        let y = array![1.0, 2.0];
        let mut coeffs = Vector::zeros(1);

        for lambda in [-1.0, f64::NAN, f64::INFINITY] {
            let err = ridge_train(&x, &y, &mut coeffs, lambda).unwrap_err();
            assert_eq!(err.status(), Status::InvalidParameter);
        }
    }

    #[test]
    fn test_ridge_empty_design() {
        let x = Matrix::zeros((0, 2));
        let y = Vector::zeros(0);
        let mut coeffs = Vector::zeros(2);

        assert!(ridge_train(&x, &y, &mut coeffs, 1.0).is_err());
    }
}
