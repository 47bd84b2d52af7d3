//! Symmetric positive-definite matrix utilities.
//!
//! - [`MatrixStack`] - validated `(n, p, p)` input for the clusterers
//! - [`SpdMetric`] - the five matrix dissimilarities, selectable by name
//! - [`functions`] - checked inverse, log-determinant, logarithm and eigensolvers

pub mod distance;
pub mod functions;
mod metric;
mod stack;

pub use distance::pairwise_distances;
pub use metric::{DistanceFn, SpdMetric};
pub use stack::MatrixStack;
