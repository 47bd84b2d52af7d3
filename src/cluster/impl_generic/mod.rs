//! Generic clustering algorithm implementations.

pub mod common_basis;
pub mod metric_clustering;
pub mod refinement;
pub mod tensor_clustering;

pub use common_basis::{CommonBasis, common_basis_impl};
pub use metric_clustering::{metric_clustering_impl, metric_clustering_predict_impl};
pub use tensor_clustering::{tensor_clustering_impl, tensor_clustering_predict_impl};
