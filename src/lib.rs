//! Ridge-regularized least squares and gradient-descent training for linear
//! and logistic regression on dense `ndarray` storage.
//!
//! The crate has two layers. The core functions in [`linear_model`] work on
//! caller-owned buffers and mutate a coefficient vector in place:
//!
//! ```rust
//! use ridgefit::linear_model::{linear_predict, refine_linear_gradient_descent, ridge_train};
//! use ridgefit::Vector;
//! use ndarray::array;
//!
//! // First column is the intercept.
//! let x = array![[1.0, 1.0], [1.0, 2.0], [1.0, 3.0], [1.0, 4.0]];
//! let y = array![3.0, 5.0, 7.0, 9.0];
//!
//! let mut coefficients = Vector::zeros(2);
//! ridge_train(&x, &y, &mut coefficients, 0.0).unwrap();
//! refine_linear_gradient_descent(&x, &y, &mut coefficients, 100, 0.01).unwrap();
//!
//! let x_new = array![[1.0, 5.0]];
//! let mut y_new = Vector::zeros(1);
//! linear_predict(&x_new, &coefficients, &mut y_new).unwrap();
//! assert!((y_new[0] - 11.0).abs() < 1e-6);
//! ```
//!
//! The estimators ([`LinearRegression`], [`LogisticRegression`]) wrap the
//! same calls behind a builder-configured `fit`/`predict` interface.

pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod error;
pub mod linalg;
pub mod linear_model;
pub mod metrics;

pub use error::{Error, Result, Status};
pub use linear_model::{LinearRegression, Link, LogisticRegression};

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;
