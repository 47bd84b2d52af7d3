//! Generic tensor clustering implementation.
//!
//! Alternates between (1) the mean and eigenbasis of every non-empty
//! cluster and (2) moving each matrix to the cluster whose basis leaves
//! the least off-diagonal energy after the basis change.

use super::common_basis::{CommonBasis, common_basis_impl};
use super::refinement::{Step, assign_nearest, best_of_runs, cluster_members, refine};
use crate::cluster::traits::sampler::AssignmentSampler;
use crate::cluster::traits::tensor_clustering::{TensorClusteringOptions, TensorClusteringResult};
use crate::cluster::validation::{validate_dim, validate_max_iter, validate_n_clusters, validate_n_init};
use crate::error::{Error, Result};
use crate::spd::MatrixStack;
use crate::spd::functions::{congruence, off_diagonal_norm};
use nalgebra::DMatrix;

/// Per-iteration state kept for the terminal step.
struct TensorState {
    centers: Vec<Option<DMatrix<f64>>>,
    bases: Vec<Option<DMatrix<f64>>>,
    /// `transformed[k][i] = basis_kᵀ · M_i · basis_k`; `None` for empty clusters.
    transformed: Vec<Vec<Option<DMatrix<f64>>>>,
}

/// Fit tensor clustering to a matrix stack.
pub fn tensor_clustering_impl<S>(
    stack: &MatrixStack,
    options: &TensorClusteringOptions,
    sampler: &mut S,
) -> Result<TensorClusteringResult>
where
    S: AssignmentSampler + ?Sized,
{
    validate_n_clusters(options.n_clusters, stack.len(), "tensor_clustering")?;
    validate_max_iter(options.max_iter, "tensor_clustering")?;
    validate_n_init(options.n_init, "tensor_clustering")?;

    best_of_runs(options.n_init, TensorClusteringResult::error, || {
        tensor_clustering_run(stack, options, &mut *sampler)
    })
}

/// Assign new matrices to the fitted bases by minimum off-diagonal energy.
pub fn tensor_clustering_predict_impl(
    result: &TensorClusteringResult,
    stack: &MatrixStack,
) -> Result<Vec<usize>> {
    let dim = fitted_dim(&result.bases)?;
    validate_dim(dim, stack.dim())?;

    let mut energy = DMatrix::from_element(stack.len(), result.bases.len(), f64::INFINITY);
    for (k, basis) in result.bases.iter().enumerate() {
        let Some(basis) = basis else { continue };
        for (i, m) in stack.iter().enumerate() {
            energy[(i, k)] = off_diagonal_norm(&congruence(basis, m));
        }
    }
    Ok(assign_nearest(&energy).0)
}

fn tensor_clustering_run<S>(
    stack: &MatrixStack,
    options: &TensorClusteringOptions,
    sampler: &mut S,
) -> Result<TensorClusteringResult>
where
    S: AssignmentSampler + ?Sized,
{
    let k = options.n_clusters;
    let run = refine(
        stack.len(),
        k,
        options.max_iter,
        sampler,
        "tensor_clustering",
        |labels| tensor_step(stack, labels, k),
    )?;

    let TensorState {
        centers,
        bases,
        mut transformed,
    } = run.state;

    // Keep only the slice belonging to each matrix's final cluster.
    let mut own = Vec::with_capacity(stack.len());
    for (i, &c) in run.labels.iter().enumerate() {
        let t = transformed[c][i]
            .take()
            .ok_or(Error::EmptyCluster { cluster: c })?;
        own.push(t);
    }
    let diagonals = own.iter().map(|t| t.diagonal()).collect();

    Ok(TensorClusteringResult {
        labels: run.labels,
        bases,
        centers,
        transformed: own,
        diagonals,
        errors: run.errors,
        n_iter: run.n_iter,
        converged: run.converged,
    })
}

fn tensor_step(stack: &MatrixStack, labels: &[usize], k: usize) -> Result<Step<TensorState>> {
    let n = stack.len();
    let mut centers = Vec::with_capacity(k);
    let mut bases = Vec::with_capacity(k);

    for (cluster, members) in cluster_members(labels, k).iter().enumerate() {
        match common_basis_impl(stack, cluster, members) {
            Ok(CommonBasis { center, basis, .. }) => {
                centers.push(Some(center));
                bases.push(Some(basis));
            }
            Err(Error::EmptyCluster { cluster }) => {
                tracing::warn!(cluster, "empty cluster skipped for this iteration");
                centers.push(None);
                bases.push(None);
            }
            Err(e) => return Err(e),
        }
    }

    let mut transformed = vec![vec![None; n]; k];
    let mut energy = DMatrix::from_element(n, k, f64::INFINITY);
    for (c, basis) in bases.iter().enumerate() {
        let Some(basis) = basis else { continue };
        for (i, m) in stack.iter().enumerate() {
            let t = congruence(basis, m);
            energy[(i, c)] = off_diagonal_norm(&t);
            transformed[c][i] = Some(t);
        }
    }

    let (labels, error) = assign_nearest(&energy);
    Ok(Step {
        labels,
        error,
        state: TensorState {
            centers,
            bases,
            transformed,
        },
    })
}

fn fitted_dim(bases: &[Option<DMatrix<f64>>]) -> Result<usize> {
    bases
        .iter()
        .flatten()
        .map(|b| b.nrows())
        .next()
        .ok_or_else(|| Error::InvalidArgument {
            arg: "result",
            reason: "clustering result has no non-empty cluster".into(),
        })
}
