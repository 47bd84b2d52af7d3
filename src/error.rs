//! Error types for spdclust

use thiserror::Error;

/// Result type alias using spdclust's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while measuring or clustering SPD matrices
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Metric name is not one of the recognized divergences
    #[error("Unknown metric '{name}': expected one of euclidean, affine_invariant, log_euclidean, log_det, symmetric_stein")]
    UnknownMetric {
        /// The rejected name
        name: String,
    },

    /// A required inverse, determinant, logarithm or eigendecomposition is undefined
    #[error("Numerical error in '{op}'{}: {reason}", location(.matrix, .cluster))]
    Numerical {
        /// The primitive that failed
        op: &'static str,
        /// Why it failed
        reason: String,
        /// Offending matrix index, when known
        matrix: Option<usize>,
        /// Offending cluster index, when known
        cluster: Option<usize>,
    },

    /// A cluster has no members
    #[error("Cluster {cluster} has no members")]
    EmptyCluster {
        /// The empty cluster
        cluster: usize,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Why it is invalid
        reason: String,
    },

    /// Matrix shapes do not agree
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },
}

impl Error {
    /// Create a numerical error without location.
    pub fn numerical(op: &'static str, reason: impl Into<String>) -> Self {
        Error::Numerical {
            op,
            reason: reason.into(),
            matrix: None,
            cluster: None,
        }
    }

    /// Attach the matrix and cluster index to a numerical error.
    ///
    /// Indices already present are kept; other variants pass through unchanged.
    pub fn at(self, at_matrix: Option<usize>, at_cluster: Option<usize>) -> Self {
        match self {
            Error::Numerical {
                op,
                reason,
                matrix,
                cluster,
            } => Error::Numerical {
                op,
                reason,
                matrix: matrix.or(at_matrix),
                cluster: cluster.or(at_cluster),
            },
            other => other,
        }
    }
}

fn location(matrix: &Option<usize>, cluster: &Option<usize>) -> String {
    match (*matrix, *cluster) {
        (Some(i), Some(k)) => format!(" (matrix {i}, cluster {k})"),
        (Some(i), None) => format!(" (matrix {i})"),
        (None, Some(k)) => format!(" (cluster {k})"),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownMetric {
            name: "bogus".to_string(),
        };
        assert!(err.to_string().contains("bogus"));

        let err = Error::numerical("inverse", "matrix is singular").at(Some(3), Some(1));
        let msg = err.to_string();
        assert!(msg.contains("inverse"));
        assert!(msg.contains("matrix 3"));
        assert!(msg.contains("cluster 1"));
    }

    #[test]
    fn test_at_keeps_existing_location() {
        let err = Error::numerical("logm", "non-positive eigenvalue")
            .at(None, Some(2))
            .at(Some(5), Some(7));
        assert_eq!(
            err,
            Error::Numerical {
                op: "logm",
                reason: "non-positive eigenvalue".to_string(),
                matrix: Some(5),
                cluster: Some(2),
            }
        );
    }

    #[test]
    fn test_at_passes_other_variants() {
        let err = Error::EmptyCluster { cluster: 4 }.at(Some(0), Some(0));
        assert_eq!(err, Error::EmptyCluster { cluster: 4 });
    }
}
