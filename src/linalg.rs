//! Dense linear-algebra primitives used by the solvers.
//!
//! Every routine checks operand shapes before writing anything and returns
//! [`Error::DimensionMismatch`] on a violation, so a failed call leaves its
//! outputs as they were.

use crate::error::{Error, Result};
use crate::{Matrix, Vector};
use ndarray::linalg::{general_mat_mul, general_mat_vec_mul};
use ndarray::{ArrayView1, ArrayView2, ArrayViewMut1, ArrayViewMut2};

/// Pivot `j` at or below `n * PIVOT_FACTOR * EPSILON * a_jj` is treated as zero.
const PIVOT_FACTOR: f64 = 16.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transpose {
    No,
    Yes,
}

impl Transpose {
    fn apply<'a>(self, a: ArrayView2<'a, f64>) -> ArrayView2<'a, f64> {
        match self {
            Transpose::No => a,
            Transpose::Yes => a.reversed_axes(),
        }
    }
}

/// `y <- alpha * op(A) * x + beta * y`
///
/// With `beta == 0.0` the previous contents of `y` are ignored.
pub fn gemv(
    trans: Transpose,
    alpha: f64,
    a: ArrayView2<f64>,
    x: ArrayView1<f64>,
    beta: f64,
    mut y: ArrayViewMut1<f64>,
) -> Result<()> {
    let a = trans.apply(a);
    if a.ncols() != x.len() {
        return Err(Error::dimension("gemv: columns of op(A) vs x", a.ncols(), x.len()));
    }
    if a.nrows() != y.len() {
        return Err(Error::dimension("gemv: rows of op(A) vs y", a.nrows(), y.len()));
    }

    general_mat_vec_mul(alpha, &a, &x, beta, &mut y);
    Ok(())
}

/// `C <- alpha * op(A) * op(B) + beta * C`
pub fn gemm(
    trans_a: Transpose,
    trans_b: Transpose,
    alpha: f64,
    a: ArrayView2<f64>,
    b: ArrayView2<f64>,
    beta: f64,
    mut c: ArrayViewMut2<f64>,
) -> Result<()> {
    let a = trans_a.apply(a);
    let b = trans_b.apply(b);
    if a.ncols() != b.nrows() {
        return Err(Error::dimension("gemm: inner dimension", a.ncols(), b.nrows()));
    }
    if c.nrows() != a.nrows() {
        return Err(Error::dimension("gemm: rows of C", a.nrows(), c.nrows()));
    }
    if c.ncols() != b.ncols() {
        return Err(Error::dimension("gemm: columns of C", b.ncols(), c.ncols()));
    }

    general_mat_mul(alpha, &a, &b, beta, &mut c);
    Ok(())
}

fn require_square(context: &'static str, a: &ArrayViewMut2<f64>) -> Result<usize> {
    let n = a.nrows();
    if a.ncols() != n {
        return Err(Error::dimension(context, n, a.ncols()));
    }
    Ok(n)
}

/// Cholesky factorization `A = L * L^T`, computed in place.
///
/// Only the lower triangle of `a` is read, so the input is assumed symmetric.
/// On success `a` holds `L` with its strict upper triangle zeroed. On failure
/// `a` is partially overwritten and should be discarded.
///
/// Fails with [`Error::Arithmetic`] when a pivot is not finite or falls below
/// a floor relative to its own original diagonal entry, which is how exact
/// rank deficiency shows up after rounding. The floor is per column, so
/// columns on very different scales do not reject each other.
pub fn cholesky_decompose(mut a: ArrayViewMut2<f64>) -> Result<()> {
    let n = require_square("cholesky_decompose: square matrix", &a)?;

    let tolerance = n as f64 * PIVOT_FACTOR * f64::EPSILON;
    let mut diag = try_zeros_vector(n)?;
    diag.assign(&a.diag());

    for j in 0..n {
        let mut pivot = a[(j, j)];
        for k in 0..j {
            pivot -= a[(j, k)] * a[(j, k)];
        }
        if !pivot.is_finite() || pivot <= tolerance * diag[j].abs() {
            return Err(Error::Arithmetic { index: j, pivot });
        }

        let l_jj = pivot.sqrt();
        a[(j, j)] = l_jj;
        for i in (j + 1)..n {
            let mut sum = a[(i, j)];
            for k in 0..j {
                sum -= a[(i, k)] * a[(j, k)];
            }
            a[(i, j)] = sum / l_jj;
        }
    }

    for i in 0..n {
        for j in (i + 1)..n {
            a[(i, j)] = 0.0;
        }
    }

    Ok(())
}

/// Replace a Cholesky factor `L` (lower triangle) with the full symmetric
/// inverse `(L * L^T)^-1`, in place.
pub fn cholesky_invert(mut a: ArrayViewMut2<f64>) -> Result<()> {
    let n = require_square("cholesky_invert: square matrix", &a)?;

    for j in 0..n {
        let d = a[(j, j)];
        if !d.is_finite() || d == 0.0 {
            return Err(Error::Arithmetic { index: j, pivot: d });
        }
    }

    // L^-1, one column at a time. Column j only reads columns >= j of L,
    // which are still untouched.
    for j in 0..n {
        a[(j, j)] = 1.0 / a[(j, j)];
        for i in (j + 1)..n {
            let mut sum = 0.0;
            for k in j..i {
                sum += a[(i, k)] * a[(k, j)];
            }
            a[(i, j)] = -sum / a[(i, i)];
        }
    }

    // L^-T * L^-1 into the upper triangle. Entry (i, j) only reads positions
    // (k, i) and (k, j) with k >= j >= i, none of which has been written yet.
    for i in 0..n {
        for j in i..n {
            let mut sum = 0.0;
            for k in j..n {
                sum += a[(k, i)] * a[(k, j)];
            }
            a[(i, j)] = sum;
        }
    }

    for i in 0..n {
        for j in 0..i {
            a[(i, j)] = a[(j, i)];
        }
    }

    Ok(())
}

fn require_same_len(context: &'static str, expected: usize, got: usize) -> Result<()> {
    if expected != got {
        return Err(Error::dimension(context, expected, got));
    }
    Ok(())
}

/// `dst <- src`
pub fn copy(src: ArrayView1<f64>, mut dst: ArrayViewMut1<f64>) -> Result<()> {
    require_same_len("copy", src.len(), dst.len())?;
    dst.assign(&src);
    Ok(())
}

/// `a <- a - b`
pub fn sub(mut a: ArrayViewMut1<f64>, b: ArrayView1<f64>) -> Result<()> {
    require_same_len("sub", a.len(), b.len())?;
    a -= &b;
    Ok(())
}

/// `x <- s * x`
pub fn scale(mut x: ArrayViewMut1<f64>, s: f64) {
    x.mapv_inplace(|v| v * s);
}

/// `y <- alpha * x + y`
pub fn axpy(alpha: f64, x: ArrayView1<f64>, mut y: ArrayViewMut1<f64>) -> Result<()> {
    require_same_len("axpy", y.len(), x.len())?;
    y.scaled_add(alpha, &x);
    Ok(())
}

/// Zeroed scratch vector, reporting allocation failure instead of aborting.
pub fn try_zeros_vector(len: usize) -> Result<Vector> {
    let mut buf: Vec<f64> = Vec::new();
    buf.try_reserve_exact(len)?;
    buf.resize(len, 0.0);
    Ok(Vector::from_vec(buf))
}

/// Zeroed scratch matrix, reporting allocation failure instead of aborting.
pub fn try_zeros_matrix(rows: usize, cols: usize) -> Result<Matrix> {
    let len = rows
        .checked_mul(cols)
        .ok_or_else(|| Error::System(format!("{rows}x{cols} scratch matrix overflows usize")))?;
    let mut buf: Vec<f64> = Vec::new();
    buf.try_reserve_exact(len)?;
    buf.resize(len, 0.0);
    Matrix::from_shape_vec((rows, cols), buf).map_err(|e| Error::System(e.to_string()))
}
