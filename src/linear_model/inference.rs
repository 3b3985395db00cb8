use super::gradient_descent::sigmoid;
use crate::error::{Error, Result};
use crate::linalg::{self, Transpose};
use crate::{Matrix, Vector};
use log::debug;

/// Probabilities strictly above this are class 1. Exactly 0.5 is class 0.
pub const DECISION_THRESHOLD: f64 = 0.5;

fn check_shapes(
    context: &'static str,
    x_new: &Matrix,
    coefficients: &Vector,
    output: &Vector,
) -> Result<()> {
    if x_new.ncols() != coefficients.len() {
        return Err(Error::dimension(context, coefficients.len(), x_new.ncols()));
    }
    if output.len() != x_new.nrows() {
        return Err(Error::dimension(context, x_new.nrows(), output.len()));
    }
    Ok(())
}

/// `output <- X_new * beta + output`.
///
/// The prediction is added to whatever `output` already holds. Zero it first
/// unless an offset is intended.
pub fn linear_predict(x_new: &Matrix, coefficients: &Vector, output: &mut Vector) -> Result<()> {
    check_shapes("linear_predict", x_new, coefficients, output)?;
    debug!("linear_predict: {} rows", x_new.nrows());

    linalg::gemv(
        Transpose::No,
        1.0,
        x_new.view(),
        coefficients.view(),
        1.0,
        output.view_mut(),
    )
}

/// Class label for a probability, see [`DECISION_THRESHOLD`].
pub fn classify(probability: f64) -> f64 {
    if probability > DECISION_THRESHOLD { 1.0 } else { 0.0 }
}

/// Overwrite `output` with 0/1 labels for `sigmoid(X_new * beta)`.
pub fn logistic_predict(x_new: &Matrix, weights: &Vector, output: &mut Vector) -> Result<()> {
    check_shapes("logistic_predict", x_new, weights, output)?;
    debug!("logistic_predict: {} rows", x_new.nrows());

    let mut predictor = linalg::try_zeros_vector(x_new.nrows())?;
    linalg::gemv(
        Transpose::No,
        1.0,
        x_new.view(),
        weights.view(),
        0.0,
        predictor.view_mut(),
    )?;

    output.zip_mut_with(&predictor, |label, &z| *label = classify(sigmoid(z)));
    Ok(())
}
