//! Checked linear-algebra primitives for SPD matrices.
//!
//! Every function here either returns a finite result or a
//! [`Error::Numerical`]; none of them lets `NaN` or `inf` escape.

use crate::error::{Error, Result};
use nalgebra::{Cholesky, DMatrix, DVector, SymmetricEigen};

/// Iteration cap handed to the eigensolvers (0 would mean "unbounded").
const EIG_MAX_ITER: usize = 10_000;

/// Relative size below which an imaginary eigenvalue part is treated as rounding noise.
pub const IMAG_TOLERANCE: f64 = 1e-6;

/// Eigendecomposition of a symmetric matrix.
///
/// Eigenpairs are returned in solver order; no re-sorting is applied.
pub fn symmetric_eigen(m: &DMatrix<f64>) -> Result<SymmetricEigen<f64, nalgebra::Dyn>> {
    ensure_square(m)?;
    let eig = SymmetricEigen::try_new(m.clone(), f64::EPSILON, EIG_MAX_ITER)
        .ok_or_else(|| Error::numerical("eig", "symmetric eigensolver did not converge"))?;

    if !eig.eigenvalues.iter().all(|x| x.is_finite())
        || !eig.eigenvectors.iter().all(|x| x.is_finite())
    {
        return Err(Error::numerical("eig", "non-finite eigenpairs"));
    }
    Ok(eig)
}

/// Real eigenvalues of a general square matrix.
///
/// Imaginary parts up to `IMAG_TOLERANCE · max(1, |re|)` are dropped and
/// logged; anything larger fails.
pub fn real_eigenvalues(m: &DMatrix<f64>) -> Result<DVector<f64>> {
    ensure_square(m)?;
    let schur = m
        .clone()
        .try_schur(f64::EPSILON, EIG_MAX_ITER)
        .ok_or_else(|| Error::numerical("eig", "Schur decomposition did not converge"))?;
    let complex = schur.complex_eigenvalues();

    let mut values = DVector::zeros(complex.len());
    let mut max_discarded = 0.0_f64;
    for (i, z) in complex.iter().enumerate() {
        if !z.re.is_finite() || !z.im.is_finite() {
            return Err(Error::numerical("eig", "non-finite eigenvalue"));
        }
        if z.im.abs() > IMAG_TOLERANCE * z.re.abs().max(1.0) {
            return Err(Error::numerical(
                "eig",
                format!("complex eigenvalue {} {:+}i", z.re, z.im),
            ));
        }
        max_discarded = max_discarded.max(z.im.abs());
        values[i] = z.re;
    }

    if max_discarded > 0.0 {
        tracing::debug!(max_discarded, "dropped imaginary eigenvalue parts");
    }
    Ok(values)
}

/// Inverse of a square matrix; fails when singular.
pub fn inverse(m: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    ensure_square(m)?;
    let inv = m
        .clone()
        .try_inverse()
        .ok_or_else(|| Error::numerical("inverse", "matrix is singular"))?;
    if !inv.iter().all(|x| x.is_finite()) {
        return Err(Error::numerical("inverse", "matrix is numerically singular"));
    }
    Ok(inv)
}

/// Natural log of the determinant of a symmetric positive-definite matrix.
///
/// Evaluated as `2 Σ ln Lᵢᵢ` from the Cholesky factor, so it stays finite
/// where the determinant itself would overflow or underflow.
pub fn log_det(m: &DMatrix<f64>) -> Result<f64> {
    ensure_square(m)?;
    let chol = Cholesky::new(m.clone())
        .ok_or_else(|| Error::numerical("log_det", "matrix is not positive-definite"))?;
    let value = 2.0 * chol.l_dirty().diagonal().iter().map(|l| l.ln()).sum::<f64>();
    if !value.is_finite() {
        return Err(Error::numerical(
            "log_det",
            format!("non-finite log-determinant {value}"),
        ));
    }
    Ok(value)
}

/// Principal matrix logarithm of a symmetric positive-definite matrix.
pub fn logm(m: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    let eig = symmetric_eigen(m)?;
    if let Some(bad) = eig.eigenvalues.iter().find(|&&l| l <= 0.0) {
        return Err(Error::numerical(
            "logm",
            format!("eigenvalue {bad} is not positive"),
        ));
    }

    let log_values = eig.eigenvalues.map(f64::ln);
    let v = &eig.eigenvectors;
    Ok(v * DMatrix::from_diagonal(&log_values) * v.transpose())
}

/// Frobenius norm of `m` with its diagonal zeroed.
pub fn off_diagonal_norm(m: &DMatrix<f64>) -> f64 {
    let mut off = m.clone();
    off.fill_diagonal(0.0);
    off.norm()
}

/// Basis change `basisᵀ · m · basis`.
pub fn congruence(basis: &DMatrix<f64>, m: &DMatrix<f64>) -> DMatrix<f64> {
    basis.transpose() * m * basis
}

pub(crate) fn ensure_square(m: &DMatrix<f64>) -> Result<()> {
    if m.nrows() != m.ncols() {
        return Err(Error::ShapeMismatch {
            expected: vec![m.nrows(), m.nrows()],
            got: vec![m.nrows(), m.ncols()],
        });
    }
    Ok(())
}

pub(crate) fn ensure_same_shape(a: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<()> {
    ensure_square(a)?;
    if a.shape() != b.shape() {
        return Err(Error::ShapeMismatch {
            expected: vec![a.nrows(), a.ncols()],
            got: vec![b.nrows(), b.ncols()],
        });
    }
    Ok(())
}
