//! Shared fixtures for integration tests.

#![allow(dead_code)]

use nalgebra::DMatrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spdclust::MatrixStack;

/// Random `p×p` SPD matrix `G Gᵀ + shift·I`.
pub fn random_spd(rng: &mut StdRng, p: usize, shift: f64) -> DMatrix<f64> {
    let g = DMatrix::from_fn(p, p, |_, _| rng.random_range(-1.0..1.0));
    &g * g.transpose() + DMatrix::identity(p, p) * shift
}

/// `n` matrices near `scale·I`, each perturbed by a small symmetric matrix.
pub fn family_near(rng: &mut StdRng, n: usize, p: usize, scale: f64) -> Vec<DMatrix<f64>> {
    (0..n)
        .map(|_| {
            let e = DMatrix::from_fn(p, p, |_, _| rng.random_range(-0.05..0.05));
            DMatrix::identity(p, p) * scale + (&e + e.transpose()) * 0.5
        })
        .collect()
}

/// Two families of ten 2×2 matrices, near `I` and near `5·I`.
pub fn two_families(seed: u64) -> MatrixStack {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut matrices = family_near(&mut rng, 10, 2, 1.0);
    matrices.extend(family_near(&mut rng, 10, 2, 5.0));
    MatrixStack::from_matrices(matrices).unwrap()
}

/// Assert the first `split` labels share one cluster and the rest share another.
pub fn assert_separated(labels: &[usize], split: usize) {
    let a = labels[0];
    let b = labels[split];
    assert_ne!(a, b, "{labels:?}");
    assert!(labels[..split].iter().all(|&c| c == a), "{labels:?}");
    assert!(labels[split..].iter().all(|&c| c == b), "{labels:?}");
}
