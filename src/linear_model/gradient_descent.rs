use crate::error::{Error, Result};
use crate::linalg::{self, Transpose};
use crate::{Matrix, Vector};
use log::{Level, debug, log_enabled, trace, warn};

/// Maps the linear predictor `z = X beta` onto the response scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Link {
    Identity,
    Logistic,
}

impl Link {
    pub fn apply(self, z: f64) -> f64 {
        match self {
            Link::Identity => z,
            Link::Logistic => sigmoid(z),
        }
    }
}

/// `1 / (1 + e^-z)`, split on the sign of `z` so neither branch overflows.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Full-batch gradient descent on `coefficients`, in place.
///
/// Each iteration computes `z = X beta`, `e = g(z) - y`,
/// `grad = X^T e / m` and `beta -= learning_rate * grad`. The loop always runs
/// exactly `iterations` times. There is no tolerance check, and a learning rate
/// that is too large is allowed to diverge.
///
/// All scratch is allocated before the first update, so an allocation
/// failure leaves `coefficients` untouched.
pub fn gradient_descent(
    link: Link,
    x: &Matrix,
    y: &Vector,
    coefficients: &mut Vector,
    iterations: usize,
    learning_rate: f64,
) -> Result<()> {
    let (n_samples, n_features) = x.dim();
    if n_samples == 0 {
        return Err(Error::invalid("x", "design matrix must have at least one sample"));
    }
    if y.len() != n_samples {
        return Err(Error::dimension("gradient_descent: samples in y", n_samples, y.len()));
    }
    if coefficients.len() != n_features {
        return Err(Error::dimension(
            "gradient_descent: coefficients",
            n_features,
            coefficients.len(),
        ));
    }
    if !learning_rate.is_finite() || learning_rate <= 0.0 {
        return Err(Error::invalid(
            "learning_rate",
            format!("must be finite and positive, got {learning_rate}"),
        ));
    }

    debug!(
        "gradient_descent: {link:?} link, {n_samples}x{n_features} design, \
         {iterations} iterations, learning_rate={learning_rate}"
    );

    let mut predictor = linalg::try_zeros_vector(n_samples)?;
    let mut residual = linalg::try_zeros_vector(n_samples)?;
    let mut gradient = linalg::try_zeros_vector(n_features)?;

    let inv_samples = 1.0 / n_samples as f64;
    let mut diverged = false;

    for iteration in 0..iterations {
        linalg::gemv(
            Transpose::No,
            1.0,
            x.view(),
            coefficients.view(),
            0.0,
            predictor.view_mut(),
        )?;

        residual.zip_mut_with(&predictor, |r, &z| *r = link.apply(z));
        linalg::sub(residual.view_mut(), y.view())?;

        linalg::gemv(
            Transpose::Yes,
            inv_samples,
            x.view(),
            residual.view(),
            0.0,
            gradient.view_mut(),
        )?;
        linalg::axpy(-learning_rate, gradient.view(), coefficients.view_mut())?;

        if log_enabled!(Level::Trace) {
            let grad_norm = gradient.dot(&gradient).sqrt();
            trace!("gradient_descent: iteration {iteration}, |grad| = {grad_norm:e}");
        }

        if !diverged && coefficients.iter().any(|c| !c.is_finite()) {
            diverged = true;
            warn!(
                "gradient_descent: coefficients became non-finite at iteration {iteration} \
                 (learning_rate={learning_rate})"
            );
        }
    }

    Ok(())
}

/// Refine linear-regression coefficients, typically starting from the
/// [`ridge_train`](super::ridge_train) solution.
pub fn refine_linear_gradient_descent(
    x: &Matrix,
    y: &Vector,
    coefficients: &mut Vector,
    iterations: usize,
    learning_rate: f64,
) -> Result<()> {
    gradient_descent(Link::Identity, x, y, coefficients, iterations, learning_rate)
}

/// Train logistic-regression weights. `y` holds 0/1 labels and `weights`
/// is usually zero-initialized by the caller.
pub fn logistic_train(
    x: &Matrix,
    y: &Vector,
    weights: &mut Vector,
    iterations: usize,
    learning_rate: f64,
) -> Result<()> {
    gradient_descent(Link::Logistic, x, y, weights, iterations, learning_rate)
}
