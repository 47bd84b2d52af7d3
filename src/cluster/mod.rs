//! Clustering algorithms for stacks of positive-definite matrices.
//!
//! - [`TensorClusterer`] - groups matrices by a shared eigenbasis, minimizing
//!   the off-diagonal energy left after the basis change
//! - [`MetricClusterer`] - k-means against arithmetic cluster means under
//!   one of the five [`SpdMetric`](crate::spd::SpdMetric) dissimilarities
//!
//! Both run the same refinement loop: random initial assignment, then
//! alternate centers and reassignment until the error repeats exactly or
//! `max_iter` is reached. A cluster that loses all members is skipped
//! (treated as infinitely far from every matrix) and stays empty for the
//! rest of that run; use `n_init` restarts to recover from a poor start.

pub mod impl_generic;
mod metric;
mod tensor;
pub mod traits;
mod validation;

pub use metric::MetricClusterer;
pub use tensor::TensorClusterer;
pub use traits::metric_clustering::{
    MetricClusteringAlgorithms, MetricClusteringOptions, MetricClusteringResult,
};
pub use traits::sampler::AssignmentSampler;
pub use traits::tensor_clustering::{
    TensorClusteringAlgorithms, TensorClusteringOptions, TensorClusteringResult,
};
pub use validation::*;
