//! Ordered stack of square matrices, the input of both clusterers.

use crate::error::{Error, Result};
use nalgebra::DMatrix;

/// An ordered sequence of `n` real `p×p` matrices.
///
/// Symmetry and positive (semi-)definiteness are a caller contract and are
/// not re-checked here; shapes and finiteness are.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixStack {
    matrices: Vec<DMatrix<f64>>,
    dim: usize,
}

impl MatrixStack {
    /// Build a stack from owned matrices.
    pub fn from_matrices(matrices: Vec<DMatrix<f64>>) -> Result<Self> {
        let Some(first) = matrices.first() else {
            return Err(Error::InvalidArgument {
                arg: "matrices",
                reason: "matrix stack requires at least 1 matrix".into(),
            });
        };
        let dim = first.nrows();
        if dim == 0 {
            return Err(Error::InvalidArgument {
                arg: "matrices",
                reason: "matrices must be at least 1×1".into(),
            });
        }

        for (i, m) in matrices.iter().enumerate() {
            if m.shape() != (dim, dim) {
                return Err(Error::ShapeMismatch {
                    expected: vec![dim, dim],
                    got: vec![m.nrows(), m.ncols()],
                });
            }
            if !m.iter().all(|x| x.is_finite()) {
                return Err(Error::InvalidArgument {
                    arg: "matrices",
                    reason: format!("matrix {i} contains non-finite entries"),
                });
            }
        }

        Ok(Self { matrices, dim })
    }

    /// Build a stack from a row-major buffer of shape `[n, p, p]`.
    pub fn from_slice(data: &[f64], shape: &[usize]) -> Result<Self> {
        if shape.len() != 3 {
            return Err(Error::InvalidArgument {
                arg: "shape",
                reason: format!("matrix stack requires 3D shape [n, p, p], got {}-D", shape.len()),
            });
        }
        let (n, rows, cols) = (shape[0], shape[1], shape[2]);
        if rows != cols {
            return Err(Error::ShapeMismatch {
                expected: vec![n, rows, rows],
                got: shape.to_vec(),
            });
        }
        let expected_len = n
            .checked_mul(rows)
            .and_then(|len| len.checked_mul(cols))
            .ok_or_else(|| Error::InvalidArgument {
                arg: "shape",
                reason: format!("shape {shape:?} overflows the addressable buffer size"),
            })?;
        if data.len() != expected_len {
            return Err(Error::InvalidArgument {
                arg: "data",
                reason: format!(
                    "buffer of length {} does not match shape {:?}",
                    data.len(),
                    shape
                ),
            });
        }

        let block = rows * cols;
        let matrices = (0..n)
            .map(|i| DMatrix::from_row_slice(rows, cols, &data[i * block..(i + 1) * block]))
            .collect();
        Self::from_matrices(matrices)
    }

    /// Number of matrices `n`.
    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    /// Always false; a stack holds at least one matrix.
    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }

    /// Side length `p` of every matrix.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Matrix at position `i`.
    pub fn get(&self, i: usize) -> Option<&DMatrix<f64>> {
        self.matrices.get(i)
    }

    /// Iterate over the matrices in order.
    pub fn iter(&self) -> std::slice::Iter<'_, DMatrix<f64>> {
        self.matrices.iter()
    }

    /// Borrow all matrices.
    pub fn as_slice(&self) -> &[DMatrix<f64>] {
        &self.matrices
    }

    /// Element-wise mean of the matrices at `indices`.
    ///
    /// Returns `None` when `indices` is empty.
    pub fn mean_of(&self, indices: &[usize]) -> Option<DMatrix<f64>> {
        if indices.is_empty() {
            return None;
        }
        let mut sum = DMatrix::zeros(self.dim, self.dim);
        for &i in indices {
            sum += &self.matrices[i];
        }
        Some(sum / indices.len() as f64)
    }
}

impl std::ops::Index<usize> for MatrixStack {
    type Output = DMatrix<f64>;

    fn index(&self, i: usize) -> &DMatrix<f64> {
        &self.matrices[i]
    }
}

impl<'a> IntoIterator for &'a MatrixStack {
    type Item = &'a DMatrix<f64>;
    type IntoIter = std::slice::Iter<'a, DMatrix<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.matrices.iter()
    }
}
