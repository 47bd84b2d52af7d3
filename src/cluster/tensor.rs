//! Tensor clusterer.

use super::impl_generic::{tensor_clustering_impl, tensor_clustering_predict_impl};
use super::traits::sampler::AssignmentSampler;
use super::traits::tensor_clustering::{
    TensorClusteringAlgorithms, TensorClusteringOptions, TensorClusteringResult,
};
use crate::error::Result;
use crate::spd::MatrixStack;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Groups matrices by the eigenbasis that best diagonalizes them.
///
/// ```
/// use nalgebra::DMatrix;
/// use spdclust::cluster::{TensorClusterer, TensorClusteringOptions};
/// use spdclust::spd::MatrixStack;
///
/// let stack = MatrixStack::from_matrices(vec![
///     DMatrix::from_row_slice(2, 2, &[3.0, 1.0, 1.0, 2.0]),
/// ])?;
/// let clusterer = TensorClusterer::new(TensorClusteringOptions {
///     n_clusters: 1,
///     seed: Some(0),
///     ..Default::default()
/// });
/// let result = clusterer.cluster(&stack)?;
/// assert_eq!(result.labels, vec![0]);
/// # Ok::<(), spdclust::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TensorClusterer {
    options: TensorClusteringOptions,
}

impl TensorClusterer {
    /// Create a clusterer with the given options.
    pub fn new(options: TensorClusteringOptions) -> Self {
        Self { options }
    }

    /// The options this clusterer runs with.
    pub fn options(&self) -> &TensorClusteringOptions {
        &self.options
    }

    /// Cluster `stack`, drawing initial assignments from the configured seed.
    pub fn cluster(&self, stack: &MatrixStack) -> Result<TensorClusteringResult> {
        match self.options.seed {
            Some(seed) => self.cluster_with_sampler(stack, &mut StdRng::seed_from_u64(seed)),
            None => self.cluster_with_sampler(stack, &mut rand::rng()),
        }
    }

    /// Cluster `stack`, drawing initial assignments from `sampler`.
    pub fn cluster_with_sampler<S>(
        &self,
        stack: &MatrixStack,
        sampler: &mut S,
    ) -> Result<TensorClusteringResult>
    where
        S: AssignmentSampler + ?Sized,
    {
        sampler.tensor_clustering(stack, &self.options)
    }

    /// Assign new matrices to the bases of a fitted result.
    pub fn predict(&self, result: &TensorClusteringResult, stack: &MatrixStack) -> Result<Vec<usize>> {
        tensor_clustering_predict_impl(result, stack)
    }
}

impl<S: AssignmentSampler + ?Sized> TensorClusteringAlgorithms for S {
    fn tensor_clustering(
        &mut self,
        stack: &MatrixStack,
        options: &TensorClusteringOptions,
    ) -> Result<TensorClusteringResult> {
        tensor_clustering_impl(stack, options, self)
    }

    fn tensor_clustering_predict(
        &self,
        result: &TensorClusteringResult,
        stack: &MatrixStack,
    ) -> Result<Vec<usize>> {
        tensor_clustering_predict_impl(result, stack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    #[test]
    fn test_tensor_clustering_from_rng() {
        let stack = MatrixStack::from_matrices(vec![
            DMatrix::from_row_slice(2, 2, &[3.0, 0.0, 0.0, 1.0]),
            DMatrix::from_row_slice(2, 2, &[5.0, 0.0, 0.0, 2.0]),
        ])
        .unwrap();
        let options = TensorClusteringOptions {
            n_clusters: 1,
            seed: Some(3),
            ..Default::default()
        };

        let mut rng = StdRng::seed_from_u64(3);
        let direct = rng.tensor_clustering(&stack, &options).unwrap();
        let via_clusterer = TensorClusterer::new(options).cluster(&stack).unwrap();

        // Same seed, same draws, same run
        assert_eq!(direct.labels, via_clusterer.labels);
        assert_eq!(direct.errors, via_clusterer.errors);
        assert_eq!(
            rng.tensor_clustering_predict(&direct, &stack).unwrap(),
            vec![0, 0]
        );
    }
}
