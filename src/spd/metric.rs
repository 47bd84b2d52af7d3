//! The five matrix dissimilarities, keyed by name.

use super::distance;
use crate::error::{Error, Result};
use nalgebra::DMatrix;
use std::fmt;
use std::str::FromStr;

/// Signature shared by every dissimilarity in [`distance`].
pub type DistanceFn = fn(&DMatrix<f64>, &DMatrix<f64>) -> Result<f64>;

/// Dissimilarity between two positive-definite matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpdMetric {
    /// Frobenius norm of the difference: ‖A − B‖_F
    #[default]
    Euclidean,
    /// Σ (log λᵢ)² over the eigenvalues of A⁻¹B
    AffineInvariant,
    /// ‖log(A) − log(B)‖_F
    LogEuclidean,
    /// tr(A⁻¹B − I) − log det(A⁻¹B)
    LogDet,
    /// log det((A+B)/2) − ½ log det(AB)
    SymmetricStein,
}

impl SpdMetric {
    /// All metrics, in declaration order.
    pub const ALL: [SpdMetric; 5] = [
        SpdMetric::Euclidean,
        SpdMetric::AffineInvariant,
        SpdMetric::LogEuclidean,
        SpdMetric::LogDet,
        SpdMetric::SymmetricStein,
    ];

    /// The literal name used to select this metric.
    pub fn name(self) -> &'static str {
        match self {
            SpdMetric::Euclidean => "euclidean",
            SpdMetric::AffineInvariant => "affine_invariant",
            SpdMetric::LogEuclidean => "log_euclidean",
            SpdMetric::LogDet => "log_det",
            SpdMetric::SymmetricStein => "symmetric_stein",
        }
    }

    /// Whether `d(A, B) == d(B, A)` holds mathematically.
    pub fn is_symmetric(self) -> bool {
        !matches!(self, SpdMetric::AffineInvariant | SpdMetric::LogDet)
    }

    /// The pure function implementing this metric.
    pub fn function(self) -> DistanceFn {
        match self {
            SpdMetric::Euclidean => distance::euclidean,
            SpdMetric::AffineInvariant => distance::affine_invariant,
            SpdMetric::LogEuclidean => distance::log_euclidean,
            SpdMetric::LogDet => distance::log_det,
            SpdMetric::SymmetricStein => distance::symmetric_stein,
        }
    }

    /// Evaluate the metric on `(a, b)`.
    pub fn distance(self, a: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<f64> {
        (self.function())(a, b)
    }
}

impl fmt::Display for SpdMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpdMetric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SpdMetric::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| Error::UnknownMetric {
                name: s.to_string(),
            })
    }
}
