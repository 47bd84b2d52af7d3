//! spdclust - Clustering of Symmetric Positive-Definite Matrices
//!
//! spdclust partitions a stack of symmetric positive-(semi)definite matrices
//! (covariance matrices, diffusion tensors, ...) into `K` groups. Two
//! engines are provided:
//!
//! - **Tensor clustering**: jointly estimates the assignment and one
//!   eigenbasis per cluster, moving each matrix to the cluster whose basis
//!   leaves the least off-diagonal energy after the change of basis.
//! - **Metric clustering**: k-means against arithmetic cluster means under
//!   a Riemannian or information-geometric dissimilarity.
//!
//! # Modules
//!
//! - [`spd`] - matrix stack, checked primitives, the five dissimilarities
//! - [`cluster`] - the two clusterers, their options and results
//!
//! # Metrics
//!
//! | Name | Formula | Symmetric |
//! |------|---------|-----------|
//! | `euclidean` | ‖A − B‖_F | yes |
//! | `affine_invariant` | Σ (log λᵢ)², λᵢ = eig(A⁻¹B) | no |
//! | `log_euclidean` | ‖log A − log B‖_F | yes |
//! | `log_det` | tr(A⁻¹B − I) − log det(A⁻¹B) | no |
//! | `symmetric_stein` | log det((A+B)/2) − ½ log det(AB) | yes |
//!
//! # Numerical failures
//!
//! Singular or non-positive-definite inputs never produce `NaN`. They
//! surface as [`Error::Numerical`], carrying the matrix and cluster index
//! when raised inside a clusterer.
//!
//! # Example
//!
//! ```
//! use nalgebra::DMatrix;
//! use spdclust::cluster::{MetricClusterer, MetricClusteringOptions};
//! use spdclust::spd::{MatrixStack, SpdMetric};
//!
//! let stack = MatrixStack::from_matrices(vec![
//!     DMatrix::from_diagonal_element(2, 2, 1.0),
//!     DMatrix::from_diagonal_element(2, 2, 1.1),
//!     DMatrix::from_diagonal_element(2, 2, 5.0),
//!     DMatrix::from_diagonal_element(2, 2, 5.2),
//! ])?;
//!
//! let clusterer = MetricClusterer::new(MetricClusteringOptions {
//!     n_clusters: 2,
//!     metric: SpdMetric::LogEuclidean,
//!     n_init: 5,
//!     seed: Some(7),
//!     ..Default::default()
//! });
//! let result = clusterer.cluster(&stack)?;
//!
//! assert_eq!(result.labels[0], result.labels[1]);
//! assert_ne!(result.labels[0], result.labels[2]);
//! # Ok::<(), spdclust::Error>(())
//! ```

pub mod cluster;
pub mod error;
pub mod spd;

// Re-export main types for convenience
pub use cluster::{
    AssignmentSampler, MetricClusterer, MetricClusteringAlgorithms, MetricClusteringOptions,
    MetricClusteringResult, TensorClusterer, TensorClusteringAlgorithms, TensorClusteringOptions,
    TensorClusteringResult,
};
pub use error::{Error, Result};
pub use spd::{MatrixStack, SpdMetric, pairwise_distances};
