use crate::Vector;
use crate::error::{Error, Result};

fn check_pair(context: &'static str, y_true: &Vector, y_pred: &Vector) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(Error::dimension(context, y_true.len(), y_pred.len()));
    }
    if y_true.is_empty() {
        return Err(Error::invalid("y_true", "must not be empty"));
    }
    Ok(())
}

pub fn mean_squared_error(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_pair("mean_squared_error", y_true, y_pred)?;

    let diff = y_true - y_pred;
    Ok(diff.mapv(|x| x * x).sum() / diff.len() as f64)
}

pub fn mean_absolute_error(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_pair("mean_absolute_error", y_true, y_pred)?;

    let diff = y_true - y_pred;
    Ok(diff.mapv(f64::abs).sum() / diff.len() as f64)
}

/// Coefficient of determination.
///
/// For a constant `y_true` the ratio is undefined: the score is `1.0` when
/// every prediction matches exactly and `0.0` otherwise.
pub fn r2_score(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_pair("r2_score", y_true, y_pred)?;

    let y_mean = y_true.sum() / y_true.len() as f64;
    let ss_res = (y_true - y_pred).mapv(|x| x * x).sum();
    let ss_tot = y_true.mapv(|x| (x - y_mean) * (x - y_mean)).sum();

    if ss_tot == 0.0 {
        return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
    }

    Ok(1.0 - ss_res / ss_tot)
}

/// Fraction of labels predicted exactly.
pub fn accuracy_score(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_pair("accuracy_score", y_true, y_pred)?;

    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(actual, pred)| (*actual - *pred).abs() < 1e-10)
        .count();
    Ok(correct as f64 / y_true.len() as f64)
}
