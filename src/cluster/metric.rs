//! Metric clusterer.

use super::impl_generic::{metric_clustering_impl, metric_clustering_predict_impl};
use super::traits::metric_clustering::{
    MetricClusteringAlgorithms, MetricClusteringOptions, MetricClusteringResult,
};
use super::traits::sampler::AssignmentSampler;
use crate::error::Result;
use crate::spd::{MatrixStack, SpdMetric};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// k-means over SPD matrices under a chosen [`SpdMetric`].
///
/// ```
/// use spdclust::cluster::MetricClusterer;
///
/// // Unknown names are rejected before any clustering work
/// assert!(MetricClusterer::from_metric_name("bogus", 2).is_err());
///
/// let clusterer = MetricClusterer::from_metric_name("log_euclidean", 2)?;
/// assert_eq!(clusterer.options().metric.name(), "log_euclidean");
/// # Ok::<(), spdclust::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetricClusterer {
    options: MetricClusteringOptions,
}

impl MetricClusterer {
    /// Create a clusterer with the given options.
    pub fn new(options: MetricClusteringOptions) -> Self {
        Self { options }
    }

    /// Create a clusterer for `n_clusters` clusters under the metric called `name`.
    ///
    /// Fails with [`Error::UnknownMetric`](crate::Error::UnknownMetric) for
    /// anything but the five recognized names.
    pub fn from_metric_name(name: &str, n_clusters: usize) -> Result<Self> {
        let metric: SpdMetric = name.parse()?;
        Ok(Self::new(MetricClusteringOptions {
            n_clusters,
            metric,
            ..Default::default()
        }))
    }

    /// The options this clusterer runs with.
    pub fn options(&self) -> &MetricClusteringOptions {
        &self.options
    }

    /// Cluster `stack`, drawing initial assignments from the configured seed.
    pub fn cluster(&self, stack: &MatrixStack) -> Result<MetricClusteringResult> {
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
    ) -> Result<MetricClusteringResult>
    where
        S: AssignmentSampler + ?Sized,
    {
        sampler.metric_clustering(stack, &self.options)
    }

    /// Assign new matrices to the nearest center of a fitted result.
    pub fn predict(&self, result: &MetricClusteringResult, stack: &MatrixStack) -> Result<Vec<usize>> {
        metric_clustering_predict_impl(result, stack)
    }
}

impl<S: AssignmentSampler + ?Sized> MetricClusteringAlgorithms for S {
    fn metric_clustering(
        &mut self,
        stack: &MatrixStack,
        options: &MetricClusteringOptions,
    ) -> Result<MetricClusteringResult> {
        metric_clustering_impl(stack, options, self)
    }

    fn metric_clustering_predict(
        &self,
        result: &MetricClusteringResult,
        stack: &MatrixStack,
    ) -> Result<Vec<usize>> {
        metric_clustering_predict_impl(result, stack)
    }
}
