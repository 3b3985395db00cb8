use super::{design_matrix, linear_predict, refine_linear_gradient_descent, ridge_train};
use crate::error::{Error, Result};
use crate::{Matrix, Vector};
use ndarray::{ArrayView1, s};

/// Ridge-regularized linear regression: a closed-form solve, optionally
/// followed by gradient-descent refinement of the same coefficients.
#[derive(Clone, Debug)]
pub struct LinearRegression {
    /// Fitted coefficients. With `fit_intercept`, index 0 is the intercept.
    pub coefficients: Option<Vector>,
    lambda: f64,
    learning_rate: f64,
    iterations: usize,
    fit_intercept: bool,
}

impl LinearRegression {
    pub fn new() -> Self {
        Self {
            coefficients: None,
            lambda: 0.0,
            learning_rate: 0.01,
            iterations: 0,
            fit_intercept: true,
        }
    }

    /// Ridge penalty. The intercept, when fitted, is penalized too.
    pub fn lambda(mut self, lambda: f64) -> Self {
        if !lambda.is_finite() || lambda < 0.0 {
            panic!("lambda must be non-negative, got {}", lambda);
        }
        self.lambda = lambda;
        self
    }

    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        if !learning_rate.is_finite() || learning_rate <= 0.0 {
            panic!("learning_rate must be positive, got {}", learning_rate);
        }
        self.learning_rate = learning_rate;
        self
    }

    /// Gradient-descent iterations run after the closed-form solve. Zero
    /// (the default) skips refinement.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    pub fn fit(&mut self, x: &Matrix, y: &Vector) -> Result<()> {
        if x.nrows() != y.len() {
            return Err(Error::dimension("fit: samples in y", x.nrows(), y.len()));
        }

        let design = design_matrix(x, self.fit_intercept);
        let mut coefficients = Vector::zeros(design.ncols());

        ridge_train(&design, y, &mut coefficients, self.lambda)?;
        if self.iterations > 0 {
            refine_linear_gradient_descent(
                &design,
                y,
                &mut coefficients,
                self.iterations,
                self.learning_rate,
            )?;
        }

        self.coefficients = Some(coefficients);
        Ok(())
    }

    pub fn predict(&self, x: &Matrix) -> Result<Vector> {
        let coeffs = self.coefficients.as_ref().ok_or(Error::NotFitted)?;
        let design = design_matrix(x, self.fit_intercept);

        let mut predictions = Vector::zeros(design.nrows());
        linear_predict(&design, coeffs, &mut predictions)?;
        Ok(predictions)
    }

    pub fn score(&self, x: &Matrix, y: &Vector) -> Result<f64> {
        let y_pred = self.predict(x)?;
        crate::metrics::r2_score(y, &y_pred)
    }

    /// `Some(0.0)` when no intercept is fitted, `None` before `fit`.
    pub fn intercept(&self) -> Option<f64> {
        let coeffs = self.coefficients.as_ref()?;
        Some(if self.fit_intercept { coeffs[0] } else { 0.0 })
    }

    /// Feature weights without the intercept.
    pub fn weights(&self) -> Option<ArrayView1<'_, f64>> {
        let coeffs = self.coefficients.as_ref()?;
        let start = usize::from(self.fit_intercept);
        Some(coeffs.slice(s![start..]))
    }
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}
