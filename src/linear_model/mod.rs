//! Linear models for regression and classification.
//!
//! This module provides:
//! - [`ridge_train`]: closed-form ridge regression via the normal equations
//! - [`gradient_descent`]: full-batch gradient descent shared by both models,
//!   with [`refine_linear_gradient_descent`] and [`logistic_train`] as the
//!   identity- and sigmoid-link entry points
//! - [`linear_predict`] and [`logistic_predict`]: inference into a
//!   caller-supplied output vector
//! - `LinearRegression` and `LogisticRegression`: estimators built on the above
//!
//! The core functions never resize or replace caller buffers: coefficient and
//! output vectors must already have the right length.
//!
//! # Examples
//!
//! ## Linear Regression
//! ```rust
//! use ridgefit::LinearRegression;
//! use ndarray::array;
//!
//! let x = array![[1.0], [2.0], [3.0]];
//! let y = array![2.0, 4.0, 6.0];
//!
//! let mut model = LinearRegression::new().lambda(0.01).iterations(100);
//! model.fit(&x, &y).unwrap();
//! let predictions = model.predict(&x).unwrap();
//! ```
//!
//! ## Logistic Regression
//! ```rust
//! use ridgefit::{LogisticRegression, Vector};
//! use ridgefit::linear_model::{logistic_predict, logistic_train};
//! use ndarray::array;
//!
//! let x = array![[1.0, -1.0], [1.0, -0.5], [1.0, 0.5], [1.0, 1.0]];
//! let y = array![0.0, 0.0, 1.0, 1.0];
//!
//! let mut weights = Vector::zeros(2);
//! logistic_train(&x, &y, &mut weights, 1000, 0.1).unwrap();
//!
//! let mut labels = Vector::zeros(4);
//! logistic_predict(&x, &weights, &mut labels).unwrap();
//! assert_eq!(labels, y);
//!
//! // The estimator adds the intercept column itself.
//! let features = array![[-1.0], [-0.5], [0.5], [1.0]];
//! let mut model = LogisticRegression::new().learning_rate(0.1);
//! model.fit(&features, &y).unwrap();
//! let probabilities = model.predict_proba(&features).unwrap();
//! ```

use crate::Matrix;
use std::borrow::Cow;

mod gradient_descent;
mod inference;
mod linear_regression;
mod logistic_regression;
mod ridge;

pub use gradient_descent::{
    Link, gradient_descent, logistic_train, refine_linear_gradient_descent, sigmoid,
};
pub use inference::{DECISION_THRESHOLD, classify, linear_predict, logistic_predict};
pub use linear_regression::LinearRegression;
pub use logistic_regression::LogisticRegression;
pub use ridge::ridge_train;

/// `x` with a leading column of ones when an intercept is requested.
fn design_matrix(x: &Matrix, fit_intercept: bool) -> Cow<'_, Matrix> {
    if !fit_intercept {
        return Cow::Borrowed(x);
    }

    let mut with_intercept = Matrix::ones((x.nrows(), x.ncols() + 1));
    with_intercept.slice_mut(ndarray::s![.., 1..]).assign(x);
    Cow::Owned(with_intercept)
}
