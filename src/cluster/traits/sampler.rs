//! Source of initial cluster assignments.

use rand::Rng;

/// Uniform integer sampler used to draw initial assignments.
///
/// `sample_uniform(low, high, count)` returns `count` values drawn uniformly and
/// independently from `[low, high)`.
pub trait AssignmentSampler {
    /// Draw `count` integers uniformly from `[low, high)`.
    ///
    /// # Panics
    ///
    /// The blanket implementation for [`Rng`] panics when `low >= high` and
    /// `count > 0`. The clusterers always call it with `[0, n_clusters)`
    /// after validating `n_clusters > 0`.
    fn sample_uniform(&mut self, low: usize, high: usize, count: usize) -> Vec<usize>;
}

impl<G: Rng + ?Sized> AssignmentSampler for G {
    fn sample_uniform(&mut self, low: usize, high: usize, count: usize) -> Vec<usize> {
        assert!(
            count == 0 || low < high,
            "sample_uniform requires low < high, got [{low}, {high})"
        );
        (0..count).map(|_| self.random_range(low..high)).collect()
    }
}
