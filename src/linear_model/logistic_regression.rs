use super::gradient_descent::sigmoid;
use super::{design_matrix, logistic_predict, logistic_train};
use crate::error::{Error, Result};
use crate::{Matrix, Vector};
use ndarray::{ArrayView1, s};

#[derive(Clone, Debug)]
pub struct LogisticRegression {
    /// Fitted weights. With `fit_intercept`, index 0 is the intercept.
    pub coefficients: Option<Vector>,
    fit_intercept: bool,
    learning_rate: f64,
    iterations: usize,
}

impl LogisticRegression {
    pub fn new() -> Self {
        Self {
            coefficients: None,
            fit_intercept: true,
            learning_rate: 0.01,
            iterations: 1000,
        }
    }

    pub fn with_params(learning_rate: f64, iterations: usize, fit_intercept: bool) -> Self {
        Self::new()
            .learning_rate(learning_rate)
            .iterations(iterations)
            .fit_intercept(fit_intercept)
    }

    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        if !learning_rate.is_finite() || learning_rate <= 0.0 {
            panic!("learning_rate must be positive, got {}", learning_rate);
        }
        self.learning_rate = learning_rate;
        self
    }

    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    /// Train from zero weights for the configured number of iterations.
    pub fn fit(&mut self, x: &Matrix, y: &Vector) -> Result<()> {
        if x.nrows() != y.len() {
            return Err(Error::dimension("fit: samples in y", x.nrows(), y.len()));
        }
        self.validate_labels(y)?;

        let design = design_matrix(x, self.fit_intercept);
        let mut weights = Vector::zeros(design.ncols());
        logistic_train(&design, y, &mut weights, self.iterations, self.learning_rate)?;

        self.coefficients = Some(weights);
        Ok(())
    }

    pub fn predict(&self, x: &Matrix) -> Result<Vector> {
        let weights = self.coefficients.as_ref().ok_or(Error::NotFitted)?;
        let design = design_matrix(x, self.fit_intercept);

        let mut labels = Vector::zeros(design.nrows());
        logistic_predict(&design, weights, &mut labels)?;
        Ok(labels)
    }

    /// Probability of class 1 for each row.
    pub fn predict_proba(&self, x: &Matrix) -> Result<Vector> {
        let weights = self.coefficients.as_ref().ok_or(Error::NotFitted)?;
        let design = design_matrix(x, self.fit_intercept);

        if design.ncols() != weights.len() {
            return Err(Error::dimension("predict_proba", weights.len(), design.ncols()));
        }

        Ok(design.dot(weights).mapv(sigmoid))
    }

    /// Fraction of correctly classified samples.
    pub fn score(&self, x: &Matrix, y: &Vector) -> Result<f64> {
        let predictions = self.predict(x)?;
        crate::metrics::accuracy_score(y, &predictions)
    }

    pub fn intercept(&self) -> Option<f64> {
        let weights = self.coefficients.as_ref()?;
        Some(if self.fit_intercept { weights[0] } else { 0.0 })
    }

    pub fn weights(&self) -> Option<ArrayView1<'_, f64>> {
        let weights = self.coefficients.as_ref()?;
        let start = usize::from(self.fit_intercept);
        Some(weights.slice(s![start..]))
    }

    fn validate_labels(&self, y: &Vector) -> Result<()> {
        if y.iter().any(|&label| label != 0.0 && label != 1.0) {
            return Err(Error::invalid("y", "labels must be 0 or 1 for binary classification"));
        }
        Ok(())
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Status;
    use ndarray::array;

    #[test]
    fn test_logistic_regression_simple() {
        let x = array![[1.0], [2.0], [3.0], [4.0]];
        let y = array![0.0, 0.0, 1.0, 1.0];

        let mut model = LogisticRegression::new().learning_rate(0.1).iterations(5000);
        model.fit(&x, &y).unwrap();

        let predictions = model.predict(&x).unwrap();
        let probabilities = model.predict_proba(&x).unwrap();

        assert_eq!(predictions.len(), 4);
        assert_eq!(probabilities.len(), 4);

        assert!(probabilities[0] < 0.5);
        assert!(probabilities[3] > 0.5);
        assert_eq!(predictions, y);
    }

    #[test]
    fn test_logistic_regression_score() {
        let x = array![[1.0, 2.0], [1.5, 1.8], [5.0, 8.0], [8.0, 8.0], [1.0, 0.6], [9.0, 11.0]];
        let y = array![0.0, 0.0, 1.0, 1.0, 0.0, 1.0];

        let mut model = LogisticRegression::with_params(0.05, 3000, true);
        model.fit(&x, &y).unwrap();

        let score = model.score(&x, &y).unwrap();
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_logistic_regression_without_intercept() {
        let x = array![[-2.0], [-1.0], [1.0], [2.0]];
        let y = array![0.0, 0.0, 1.0, 1.0];

        let mut model = LogisticRegression::new().fit_intercept(false).learning_rate(0.5);
        model.fit(&x, &y).unwrap();

        assert_eq!(model.intercept(), Some(0.0));
        assert!(model.weights().unwrap()[0] > 0.0);
        assert_eq!(model.predict(&x).unwrap(), y);
    }

    #[test]
    fn test_logistic_regression_invalid_labels() {
        let x = array![[1.0], [2.0]];
        let y = array![0.5, 2.0];

        let mut model = LogisticRegression::new();
        let err = model.fit(&x, &y).unwrap_err();
        assert_eq!(err.status(), Status::InvalidParameter);
    }

    #[test]
    fn test_logistic_regression_predict_without_fit() {
        let x = array![[1.0], [2.0]];
        let model = LogisticRegression::new();

        assert!(model.predict(&x).is_err());
        assert!(model.predict_proba(&x).is_err());
    }

    #[test]
    fn test_logistic_regression_predict_dimension_mismatch() {
        let mut model = LogisticRegression::new().iterations(10);
        model.fit(&array![[1.0], [2.0]], &array![0.0, 1.0]).unwrap();

        let x = array![[1.0, 2.0]];
        assert_eq!(model.predict(&x).unwrap_err().status(), Status::DimensionMismatch);
        assert_eq!(model.predict_proba(&x).unwrap_err().status(), Status::DimensionMismatch);
    }
}
