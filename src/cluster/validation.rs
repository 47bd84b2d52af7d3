//! Validation helpers for clustering algorithms.

use crate::error::{Error, Result};

/// Validate n_clusters parameter.
pub fn validate_n_clusters(n_clusters: usize, n_matrices: usize, op: &'static str) -> Result<()> {
    if n_clusters == 0 {
        return Err(Error::InvalidArgument {
            arg: "n_clusters",
            reason: format!("{op} requires n_clusters > 0"),
        });
    }
    if n_clusters > n_matrices {
        return Err(Error::InvalidArgument {
            arg: "n_clusters",
            reason: format!(
                "{op}: n_clusters={n_clusters} exceeds number of matrices {n_matrices}"
            ),
        });
    }
    Ok(())
}

/// Validate max_iter parameter.
pub fn validate_max_iter(max_iter: usize, op: &'static str) -> Result<()> {
    if max_iter == 0 {
        return Err(Error::InvalidArgument {
            arg: "max_iter",
            reason: format!("{op} requires max_iter > 0"),
        });
    }
    Ok(())
}

/// Validate n_init parameter.
pub fn validate_n_init(n_init: usize, op: &'static str) -> Result<()> {
    if n_init == 0 {
        return Err(Error::InvalidArgument {
            arg: "n_init",
            reason: format!("{op} requires n_init > 0"),
        });
    }
    Ok(())
}

/// Validate that new matrices match the dimension a model was fitted on.
pub fn validate_dim(expected: usize, got: usize) -> Result<()> {
    if expected != got {
        return Err(Error::ShapeMismatch {
            expected: vec![expected, expected],
            got: vec![got, got],
        });
    }
    Ok(())
}
