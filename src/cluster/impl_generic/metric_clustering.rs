//! Generic metric clustering implementation.
//!
//! Lloyd-style refinement where the assignment step uses one of the
//! [`SpdMetric`] dissimilarities against the arithmetic cluster means.

use super::refinement::{Step, assign_nearest, best_of_runs, cluster_members, refine};
use crate::cluster::traits::metric_clustering::{MetricClusteringOptions, MetricClusteringResult};
use crate::cluster::traits::sampler::AssignmentSampler;
use crate::cluster::validation::{validate_dim, validate_max_iter, validate_n_clusters, validate_n_init};
use crate::error::{Error, Result};
use crate::spd::{MatrixStack, SpdMetric};
use nalgebra::DMatrix;

/// Fit metric clustering to a matrix stack.
///
/// A numerical failure of the metric aborts the whole call; the error
/// carries the offending matrix and cluster index.
pub fn metric_clustering_impl<S>(
    stack: &MatrixStack,
    options: &MetricClusteringOptions,
    sampler: &mut S,
) -> Result<MetricClusteringResult>
where
    S: AssignmentSampler + ?Sized,
{
    validate_n_clusters(options.n_clusters, stack.len(), "metric_clustering")?;
    validate_max_iter(options.max_iter, "metric_clustering")?;
    validate_n_init(options.n_init, "metric_clustering")?;

    best_of_runs(options.n_init, MetricClusteringResult::error, || {
        metric_clustering_run(stack, options, &mut *sampler)
    })
}

/// Assign new matrices to the nearest fitted center.
pub fn metric_clustering_predict_impl(
    result: &MetricClusteringResult,
    stack: &MatrixStack,
) -> Result<Vec<usize>> {
    let dim = result
        .centers
        .iter()
        .flatten()
        .map(|c| c.nrows())
        .next()
        .ok_or_else(|| Error::InvalidArgument {
            arg: "result",
            reason: "clustering result has no non-empty cluster".into(),
        })?;
    validate_dim(dim, stack.dim())?;

    let distances = distances_to_centers(stack, &result.centers, result.metric)?;
    Ok(assign_nearest(&distances).0)
}

fn metric_clustering_run<S>(
    stack: &MatrixStack,
    options: &MetricClusteringOptions,
    sampler: &mut S,
) -> Result<MetricClusteringResult>
where
    S: AssignmentSampler + ?Sized,
{
    let k = options.n_clusters;
    let metric = options.metric;
    let run = refine(
        stack.len(),
        k,
        options.max_iter,
        sampler,
        "metric_clustering",
        |labels| metric_step(stack, labels, k, metric),
    )?;

    Ok(MetricClusteringResult {
        labels: run.labels,
        centers: run.state,
        errors: run.errors,
        metric,
        n_iter: run.n_iter,
        converged: run.converged,
    })
}

fn metric_step(
    stack: &MatrixStack,
    labels: &[usize],
    k: usize,
    metric: SpdMetric,
) -> Result<Step<Vec<Option<DMatrix<f64>>>>> {
    let centers: Vec<Option<DMatrix<f64>>> = cluster_members(labels, k)
        .iter()
        .enumerate()
        .map(|(cluster, members)| {
            let center = stack.mean_of(members);
            if center.is_none() {
                tracing::warn!(cluster, "empty cluster skipped for this iteration");
            }
            center
        })
        .collect();

    let distances = distances_to_centers(stack, &centers, metric)?;
    let (labels, error) = assign_nearest(&distances);
    Ok(Step {
        labels,
        error,
        state: centers,
    })
}

/// `[n, K]` distances from each matrix to each center; `+∞` for empty clusters.
fn distances_to_centers(
    stack: &MatrixStack,
    centers: &[Option<DMatrix<f64>>],
    metric: SpdMetric,
) -> Result<DMatrix<f64>> {
    let distance = metric.function();
    let mut out = DMatrix::from_element(stack.len(), centers.len(), f64::INFINITY);
    for (k, center) in centers.iter().enumerate() {
        let Some(center) = center else { continue };
        for (i, m) in stack.iter().enumerate() {
            out[(i, k)] = distance(m, center).map_err(|e| e.at(Some(i), Some(k)))?;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn two_scales() -> MatrixStack {
        let mut matrices = Vec::new();
        for i in 0..5 {
            let e = 0.02 * i as f64;
            matrices.push(DMatrix::from_row_slice(2, 2, &[1.0 + e, e, e, 1.0 - e]));
        }
        for i in 0..5 {
            let e = 0.05 * i as f64;
            matrices.push(DMatrix::from_row_slice(2, 2, &[6.0 + e, -e, -e, 6.0 - e]));
        }
        MatrixStack::from_matrices(matrices).unwrap()
    }

    fn assert_split(labels: &[usize]) {
        let a = labels[0];
        assert!(labels[..5].iter().all(|&c| c == a), "{labels:?}");
        assert!(labels[5..].iter().all(|&c| c != a), "{labels:?}");
    }

    #[test]
    fn test_all_metrics_separate_scales() {
        let stack = two_scales();
        for metric in SpdMetric::ALL {
            let options = MetricClusteringOptions {
                n_clusters: 2,
                metric,
                n_init: 10,
                ..Default::default()
            };
            let mut rng = StdRng::seed_from_u64(3);
            let result = metric_clustering_impl(&stack, &options, &mut rng).unwrap();
            assert_split(&result.labels);
            assert!(result.converged, "{metric} did not converge");
            assert_eq!(result.metric, metric);
        }
    }

    #[test]
    fn test_trace_ends_on_repeated_error() {
        let stack = two_scales();
        let options = MetricClusteringOptions {
            n_clusters: 2,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(17);
        let result = metric_clustering_impl(&stack, &options, &mut rng).unwrap();

        assert!(result.converged);
        assert_eq!(result.errors.len(), result.n_iter);
        let n = result.errors.len();
        assert!(n >= 2);
        assert_eq!(result.errors[n - 1], result.errors[n - 2]);
    }

    #[test]
    fn test_max_iter_caps_trace() {
        let stack = two_scales();
        let options = MetricClusteringOptions {
            n_clusters: 3,
            max_iter: 1,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let result = metric_clustering_impl(&stack, &options, &mut rng).unwrap();
        assert_eq!(result.n_iter, 1);
        assert_eq!(result.errors.len(), 1);
        assert!(result.labels.iter().all(|&c| c < 3));
    }

    #[test]
    fn test_numerical_error_aborts_with_location() {
        // Second matrix is indefinite, so its matrix logarithm is undefined;
        // the mean of the two is still positive-definite
        let stack = MatrixStack::from_matrices(vec![
            DMatrix::from_diagonal_element(2, 2, 4.0),
            DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 1.0]),
        ])
        .unwrap();
        let options = MetricClusteringOptions {
            n_clusters: 1,
            metric: SpdMetric::LogEuclidean,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let err = metric_clustering_impl(&stack, &options, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            Error::Numerical {
                matrix: Some(1),
                cluster: Some(0),
                ..
            }
        ));
    }

    /// Replays one fixed assignment.
    struct FixedAssignment(Vec<usize>);

    impl AssignmentSampler for FixedAssignment {
        fn sample_uniform(&mut self, _low: usize, _high: usize, _count: usize) -> Vec<usize> {
            self.0.clone()
        }
    }

    #[test]
    fn test_empty_cluster_is_skipped() {
        let stack = MatrixStack::from_matrices(vec![
            DMatrix::from_diagonal_element(2, 2, 1.0),
            DMatrix::from_diagonal_element(2, 2, 1.1),
            DMatrix::from_diagonal_element(2, 2, 5.0),
            DMatrix::from_diagonal_element(2, 2, 5.2),
        ])
        .unwrap();
        let options = MetricClusteringOptions {
            n_clusters: 3,
            ..Default::default()
        };
        let mut sampler = FixedAssignment(vec![0, 0, 1, 1]);
        let result = metric_clustering_impl(&stack, &options, &mut sampler).unwrap();

        // Cluster 2 never receives a member: infinite distance, no center
        assert_eq!(result.labels, vec![0, 0, 1, 1]);
        assert_eq!(result.n_iter, 2);
        assert!(result.converged);
        assert!(result.centers[0].is_some());
        assert!(result.centers[1].is_some());
        assert!(result.centers[2].is_none());
        assert_eq!(result.cluster_sizes(), vec![2, 2, 0]);
        assert!(result.error().is_finite());

        let predicted = metric_clustering_predict_impl(&result, &stack).unwrap();
        assert_eq!(predicted, result.labels);
    }

    #[test]
    fn test_predict() {
        let stack = two_scales();
        let options = MetricClusteringOptions {
            n_clusters: 2,
            metric: SpdMetric::AffineInvariant,
            n_init: 5,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(8);
        let result = metric_clustering_impl(&stack, &options, &mut rng).unwrap();

        let new = MatrixStack::from_matrices(vec![
            DMatrix::from_diagonal_element(2, 2, 5.5),
            DMatrix::from_diagonal_element(2, 2, 0.9),
        ])
        .unwrap();
        let predicted = metric_clustering_predict_impl(&result, &new).unwrap();
        assert_eq!(predicted, vec![result.labels[9], result.labels[0]]);
    }
}
