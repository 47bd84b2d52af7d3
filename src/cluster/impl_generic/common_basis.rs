//! Cluster center and its eigenbasis.

use crate::error::{Error, Result};
use crate::spd::MatrixStack;
use crate::spd::functions::symmetric_eigen;
use nalgebra::{DMatrix, DVector};

/// Mean of a cluster together with the eigenbasis that diagonalizes it.
#[derive(Debug, Clone)]
pub struct CommonBasis {
    /// Element-wise mean of the member matrices.
    pub center: DMatrix<f64>,
    /// Eigenvectors of `center` as columns, in solver order.
    pub basis: DMatrix<f64>,
    /// Eigenvalues of `center`, aligned with the columns of `basis`.
    pub eigenvalues: DVector<f64>,
}

/// Compute the center and eigenbasis of the matrices at `members`.
///
/// Columns are not re-sorted by eigenvalue. Fails with
/// [`Error::EmptyCluster`] when `members` is empty.
pub fn common_basis_impl(
    stack: &MatrixStack,
    cluster: usize,
    members: &[usize],
) -> Result<CommonBasis> {
    let center = stack
        .mean_of(members)
        .ok_or(Error::EmptyCluster { cluster })?;
    let eig = symmetric_eigen(&center).map_err(|e| e.at(None, Some(cluster)))?;

    Ok(CommonBasis {
        center,
        basis: eig.eigenvectors,
        eigenvalues: eig.eigenvalues,
    })
}
