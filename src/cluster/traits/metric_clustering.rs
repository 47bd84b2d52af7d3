//! Metric (k-means style) clustering types.

use crate::error::Result;
use crate::spd::{MatrixStack, SpdMetric};
use nalgebra::DMatrix;

/// Options for metric clustering.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricClusteringOptions {
    /// Number of clusters `K`.
    pub n_clusters: usize,
    /// Dissimilarity between a matrix and a cluster center.
    pub metric: SpdMetric,
    /// Maximum refinement iterations per run.
    pub max_iter: usize,
    /// Number of independent runs (lowest final error kept).
    pub n_init: usize,
    /// Seed for the initial assignments; `None` uses the thread-local generator.
    pub seed: Option<u64>,
}

impl Default for MetricClusteringOptions {
    fn default() -> Self {
        Self {
            n_clusters: 2,
            metric: SpdMetric::Euclidean,
            max_iter: 300,
            n_init: 1,
            seed: None,
        }
    }
}

/// Result of metric clustering.
#[derive(Debug, Clone)]
pub struct MetricClusteringResult {
    /// Cluster assignment for each matrix [n].
    pub labels: Vec<usize>,
    /// Arithmetic mean of each cluster [K]; `None` for clusters empty in the last iteration.
    pub centers: Vec<Option<DMatrix<f64>>>,
    /// Mean distance to the nearest center, one entry per iteration.
    pub errors: Vec<f64>,
    /// Metric the clustering was computed under.
    pub metric: SpdMetric,
    /// Number of iterations run.
    pub n_iter: usize,
    /// Whether the error reached a fixed point before `max_iter`.
    pub converged: bool,
}

impl MetricClusteringResult {
    /// Final value of the convergence trace.
    pub fn error(&self) -> f64 {
        self.errors.last().copied().unwrap_or(f64::INFINITY)
    }

    /// Number of matrices assigned to each cluster.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        crate::cluster::impl_generic::refinement::cluster_sizes(&self.labels, self.centers.len())
    }
}

/// Metric clustering algorithms.
///
/// Implemented for every [`AssignmentSampler`](super::sampler::AssignmentSampler):
/// the sampler supplies the initial assignments.
pub trait MetricClusteringAlgorithms {
    /// Fit metric clustering to a matrix stack.
    fn metric_clustering(
        &mut self,
        stack: &MatrixStack,
        options: &MetricClusteringOptions,
    ) -> Result<MetricClusteringResult>;

    /// Assign new matrices to the nearest center of a fitted result.
    fn metric_clustering_predict(
        &self,
        result: &MetricClusteringResult,
        stack: &MatrixStack,
    ) -> Result<Vec<usize>>;
}
