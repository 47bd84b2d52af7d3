//! Alternating refinement loop shared by the tensor and metric clusterers.
//!
//! Both algorithms run the same state machine: draw two independent
//! assignments, seed the error pair with the sentinels `(4, 2)`, and iterate
//! until the error repeats exactly or `max_iter` is reached. Only the body
//! of an iteration (centers + reassignment) differs.

use crate::cluster::traits::sampler::AssignmentSampler;
use crate::error::{Error, Result};
use nalgebra::DMatrix;

const ERR_PREV_SENTINEL: f64 = 4.0;
const ERR_CURR_SENTINEL: f64 = 2.0;

/// Output of one iteration body.
pub struct Step<S> {
    /// New assignment.
    pub labels: Vec<usize>,
    /// Mean of the per-matrix minimum cost.
    pub error: f64,
    /// Algorithm-specific state of this iteration (centers, bases, ...).
    pub state: S,
}

/// Final state of the refinement loop.
pub struct Refinement<S> {
    /// Assignment after the last iteration.
    pub labels: Vec<usize>,
    /// Error recorded at each iteration.
    pub errors: Vec<f64>,
    /// Number of iterations run.
    pub n_iter: usize,
    /// Whether the loop stopped on a repeated error.
    pub converged: bool,
    /// State produced by the last iteration.
    pub state: S,
}

/// Run the refinement loop.
///
/// `step` receives the assignment of the previous iteration and returns the
/// next one. Any error from `step` aborts the loop.
pub fn refine<S, T, F>(
    n: usize,
    n_clusters: usize,
    max_iter: usize,
    sampler: &mut T,
    op: &'static str,
    mut step: F,
) -> Result<Refinement<S>>
where
    T: AssignmentSampler + ?Sized,
    F: FnMut(&[usize]) -> Result<Step<S>>,
{
    // Two independent draws; the first is replaced before it is ever read.
    let _initial_prev = sampler.sample_uniform(0, n_clusters, n);
    let mut labels_curr = sampler.sample_uniform(0, n_clusters, n);
    let mut err_prev = ERR_PREV_SENTINEL;
    let mut err_curr = ERR_CURR_SENTINEL;
    let mut errors = Vec::new();
    let mut last_state = None;
    let mut iter = 0;

    while err_prev != err_curr && iter < max_iter {
        iter += 1;
        let labels_prev = std::mem::take(&mut labels_curr);
        err_prev = err_curr;

        let Step {
            labels,
            error,
            state,
        } = step(&labels_prev)?;
        debug_assert!(labels.iter().all(|&c| c < n_clusters));

        labels_curr = labels;
        err_curr = error;
        errors.push(error);
        last_state = Some(state);

        tracing::debug!(op, iter, error, "refinement iteration");
    }

    let converged = err_prev == err_curr;
    if !converged {
        tracing::warn!(op, max_iter, error = err_curr, "stopped at max_iter without a fixed point");
    }

    let state = last_state.ok_or_else(|| Error::InvalidArgument {
        arg: "max_iter",
        reason: format!("{op} requires max_iter > 0"),
    })?;

    Ok(Refinement {
        labels: labels_curr,
        errors,
        n_iter: iter,
        converged,
        state,
    })
}

/// Assign every row to its cheapest column.
///
/// `costs` is `[n, K]`. Ties go to the lowest column index. Returns the
/// assignment and the mean of the row minima.
pub fn assign_nearest(costs: &DMatrix<f64>) -> (Vec<usize>, f64) {
    let n = costs.nrows();
    let mut labels = Vec::with_capacity(n);
    let mut total = 0.0;

    for row in costs.row_iter() {
        let mut best = 0;
        let mut best_cost = f64::INFINITY;
        for (c, &cost) in row.iter().enumerate() {
            if cost < best_cost {
                best = c;
                best_cost = cost;
            }
        }
        labels.push(best);
        total += best_cost;
    }

    (labels, total / n as f64)
}

/// Indices of the matrices in each cluster.
pub fn cluster_members(labels: &[usize], n_clusters: usize) -> Vec<Vec<usize>> {
    let mut members = vec![Vec::new(); n_clusters];
    for (i, &c) in labels.iter().enumerate() {
        members[c].push(i);
    }
    members
}

/// Number of matrices in each cluster.
pub fn cluster_sizes(labels: &[usize], n_clusters: usize) -> Vec<usize> {
    let mut sizes = vec![0; n_clusters];
    for &c in labels {
        sizes[c] += 1;
    }
    sizes
}

/// Run `fit` `n_init` times and keep the result with the lowest final error.
///
/// Ties keep the earliest run.
pub fn best_of_runs<R, F>(n_init: usize, error: fn(&R) -> f64, mut fit: F) -> Result<R>
where
    F: FnMut() -> Result<R>,
{
    let mut best = fit()?;
    for run in 1..n_init {
        let candidate = fit()?;
        if error(&candidate) < error(&best) {
            tracing::debug!(run, error = error(&candidate), "restart improved result");
            best = candidate;
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_assign_nearest_ties_go_to_lowest_index() {
        #[rustfmt::skip]
        let costs = DMatrix::from_row_slice(3, 3, &[
            1.0, 1.0, 2.0,
            f64::INFINITY, 0.5, 0.5,
            3.0, 2.0, 1.0,
        ]);
        let (labels, err) = assign_nearest(&costs);
        assert_eq!(labels, vec![0, 1, 2]);
        assert!((err - (1.0 + 0.5 + 1.0) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_members_and_sizes() {
        let labels = [1, 0, 1, 1];
        assert_eq!(
            cluster_members(&labels, 3),
            vec![vec![1], vec![0, 2, 3], vec![]]
        );
        assert_eq!(cluster_sizes(&labels, 3), vec![1, 3, 0]);
    }

    #[test]
    fn test_refine_stops_on_repeated_error() {
        let mut rng = StdRng::seed_from_u64(0);
        // Constant step: error repeats on the second iteration
        let run = refine(4, 2, 50, &mut rng, "test", |_| {
            Ok(Step {
                labels: vec![0, 0, 1, 1],
                error: 0.25,
                state: (),
            })
        })
        .unwrap();
        assert_eq!(run.n_iter, 2);
        assert_eq!(run.errors, vec![0.25, 0.25]);
        assert!(run.converged);
        assert_eq!(run.labels, vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_refine_respects_max_iter() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut calls = 0;
        let run = refine(3, 2, 5, &mut rng, "test", |_| {
            calls += 1;
            Ok(Step {
                labels: vec![0, 1, 0],
                error: calls as f64,
                state: calls,
            })
        })
        .unwrap();
        assert_eq!(run.n_iter, 5);
        assert_eq!(run.errors.len(), 5);
        assert!(!run.converged);
        assert_eq!(run.state, 5);
    }

    #[test]
    fn test_refine_sentinel_error_stops_after_one_pass() {
        let mut rng = StdRng::seed_from_u64(0);
        let run = refine(2, 1, 10, &mut rng, "test", |_| {
            Ok(Step {
                labels: vec![0, 0],
                error: 2.0,
                state: (),
            })
        })
        .unwrap();
        assert_eq!(run.n_iter, 1);
        assert!(run.converged);
    }

    #[test]
    fn test_refine_passes_previous_labels() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = Vec::new();
        refine(3, 2, 3, &mut rng, "test", |prev| {
            seen.push(prev.to_vec());
            Ok(Step {
                labels: vec![1, 1, 0],
                error: seen.len() as f64 * 10.0,
                state: (),
            })
        })
        .unwrap();
        assert_eq!(seen.len(), 3);
        assert!(seen[0].iter().all(|&c| c < 2));
        assert_eq!(seen[1], vec![1, 1, 0]);
        assert_eq!(seen[2], vec![1, 1, 0]);
    }

    #[test]
    fn test_refine_propagates_step_error() {
        let mut rng = StdRng::seed_from_u64(0);
        let result: Result<Refinement<()>> = refine(2, 1, 10, &mut rng, "test", |_| {
            Err(Error::numerical("inverse", "matrix is singular"))
        });
        assert!(matches!(result, Err(Error::Numerical { .. })));
    }

    #[test]
    fn test_best_of_runs_keeps_lowest() {
        let mut errors = vec![3.0, 1.0, 1.0, 2.0].into_iter();
        let mut idx = 0;
        let best = best_of_runs(4, |r: &(usize, f64)| r.1, || {
            idx += 1;
            Ok((idx, errors.next().unwrap()))
        })
        .unwrap();
        assert_eq!(best, (2, 1.0));
    }
}
