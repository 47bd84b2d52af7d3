//! Tensor (common-eigenbasis) clustering types.

use crate::error::Result;
use crate::spd::MatrixStack;
use nalgebra::{DMatrix, DVector};

/// Options for tensor clustering.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorClusteringOptions {
    /// Number of clusters `K`.
    pub n_clusters: usize,
    /// Maximum refinement iterations per run.
    pub max_iter: usize,
    /// Number of independent runs (lowest final error kept).
    pub n_init: usize,
    /// Seed for the initial assignments; `None` uses the thread-local generator.
    pub seed: Option<u64>,
}

impl Default for TensorClusteringOptions {
    fn default() -> Self {
        Self {
            n_clusters: 2,
            max_iter: 100,
            n_init: 1,
            seed: None,
        }
    }
}

/// Result of tensor clustering.
#[derive(Debug, Clone)]
pub struct TensorClusteringResult {
    /// Cluster assignment for each matrix [n].
    pub labels: Vec<usize>,
    /// Eigenbasis of each cluster center [K]; `None` for clusters empty in the last iteration.
    pub bases: Vec<Option<DMatrix<f64>>>,
    /// Cluster centers (element-wise means) [K]; `None` for empty clusters.
    pub centers: Vec<Option<DMatrix<f64>>>,
    /// Each matrix expressed in the basis of its assigned cluster [n].
    pub transformed: Vec<DMatrix<f64>>,
    /// Diagonal of each transformed matrix [n].
    pub diagonals: Vec<DVector<f64>>,
    /// Mean minimum off-diagonal energy, one entry per iteration.
    pub errors: Vec<f64>,
    /// Number of iterations run.
    pub n_iter: usize,
    /// Whether the error reached a fixed point before `max_iter`.
    pub converged: bool,
}

impl TensorClusteringResult {
    /// Final value of the convergence trace.
    pub fn error(&self) -> f64 {
        self.errors.last().copied().unwrap_or(f64::INFINITY)
    }

    /// Number of matrices assigned to each cluster.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        crate::cluster::impl_generic::refinement::cluster_sizes(&self.labels, self.bases.len())
    }
}

/// Tensor clustering algorithms.
///
/// Implemented for every [`AssignmentSampler`](super::sampler::AssignmentSampler):
/// the sampler supplies the initial assignments.
pub trait TensorClusteringAlgorithms {
    /// Fit tensor clustering to a matrix stack.
    fn tensor_clustering(
        &mut self,
        stack: &MatrixStack,
        options: &TensorClusteringOptions,
    ) -> Result<TensorClusteringResult>;

    /// Assign new matrices to the bases of a fitted result.
    fn tensor_clustering_predict(
        &self,
        result: &TensorClusteringResult,
        stack: &MatrixStack,
    ) -> Result<Vec<usize>>;
}
