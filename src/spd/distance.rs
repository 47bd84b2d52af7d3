//! Dissimilarities between positive-definite matrices.
//!
//! | Metric | Formula |
//! |---|---|
//! | euclidean | ‖A − B‖_F |
//! | affine_invariant | Σ (log λᵢ)², λᵢ eigenvalues of A⁻¹B |
//! | log_euclidean | ‖log(A) − log(B)‖_F |
//! | log_det | tr(A⁻¹B − I) − log det(A⁻¹B) |
//! | symmetric_stein | log det((A+B)/2) − ½ log det(AB) |
//!
//! Only `affine_invariant` and `log_det` are asymmetric in their arguments.

use super::functions::{ensure_same_shape, inverse, log_det as ln_det, logm, real_eigenvalues};
use super::metric::SpdMetric;
use super::stack::MatrixStack;
use crate::error::{Error, Result};
use nalgebra::DMatrix;

/// Frobenius norm of `a − b`.
pub fn euclidean(a: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<f64> {
    ensure_same_shape(a, b)?;
    Ok((a - b).norm())
}

/// Sum of squared logarithms of the eigenvalues of `a⁻¹b`.
pub fn affine_invariant(a: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<f64> {
    ensure_same_shape(a, b)?;
    let ab = inverse(a)? * b;
    let eigenvalues = real_eigenvalues(&ab)?;

    let mut sum = 0.0;
    for &l in eigenvalues.iter() {
        if l <= 0.0 {
            return Err(Error::numerical(
                "affine_invariant",
                format!("eigenvalue {l} of A⁻¹B is not positive"),
            ));
        }
        sum += l.ln().powi(2);
    }
    Ok(sum)
}

/// Frobenius norm of `log(a) − log(b)`.
pub fn log_euclidean(a: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<f64> {
    ensure_same_shape(a, b)?;
    Ok((logm(a)? - logm(b)?).norm())
}

/// Burg/Stein-type divergence `tr(a⁻¹b − I) − log det(a⁻¹b)`.
pub fn log_det(a: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<f64> {
    ensure_same_shape(a, b)?;
    let ab = inverse(a)? * b;
    let p = ab.nrows() as f64;
    // log det(A⁻¹B) = log det B − log det A
    let value = (ab.trace() - p) - (ln_det(b)? - ln_det(a)?);
    finite("log_det", value)
}

/// Symmetric Stein divergence `log det((a+b)/2) − ½ log det(ab)`.
pub fn symmetric_stein(a: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<f64> {
    ensure_same_shape(a, b)?;
    let midpoint = (a + b) * 0.5;
    // log det(AB) = log det A + log det B
    let value = ln_det(&midpoint)? - 0.5 * (ln_det(a)? + ln_det(b)?);
    finite("symmetric_stein", value)
}

/// Pairwise distance matrix between two stacks.
///
/// Entry `(i, j)` is `metric(x[i], y[j])`. A failure is reported with
/// `i` as the matrix index and `j` as the cluster index.
pub fn pairwise_distances(
    x: &MatrixStack,
    y: &MatrixStack,
    metric: SpdMetric,
) -> Result<DMatrix<f64>> {
    if x.dim() != y.dim() {
        return Err(Error::ShapeMismatch {
            expected: vec![x.dim(), x.dim()],
            got: vec![y.dim(), y.dim()],
        });
    }

    let distance = metric.function();
    let mut out = DMatrix::zeros(x.len(), y.len());
    for (i, a) in x.iter().enumerate() {
        for (j, b) in y.iter().enumerate() {
            out[(i, j)] = distance(a, b).map_err(|e| e.at(Some(i), Some(j)))?;
        }
    }
    Ok(out)
}

fn finite(op: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::numerical(op, format!("non-finite result {value}")))
    }
}
