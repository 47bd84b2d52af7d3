//! Clustering options, results and collaborator traits.

pub mod metric_clustering;
pub mod sampler;
pub mod tensor_clustering;
