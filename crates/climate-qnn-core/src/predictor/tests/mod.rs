//! Tests for the hybrid predictor.

mod construction;
mod thread_safety;

use candle_core::{Device, Tensor};
use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeded `(rows, cols)` batch with values in `[0, 1)`.
pub(super) fn random_batch(rows: usize, cols: usize, seed: u64) -> Tensor {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let dist = Uniform::new(0.0f32, 1.0);
    let values: Vec<f32> = (0..rows * cols).map(|_| dist.sample(&mut rng)).collect();
    Tensor::from_vec(values, (rows, cols), &Device::Cpu).unwrap()
}

pub(super) fn assert_close(a: &[Vec<f32>], b: &[Vec<f32>]) {
    assert_eq!(a.len(), b.len());
    for (row_a, row_b) in a.iter().zip(b) {
        for (x, y) in row_a.iter().zip(row_b) {
            assert!((x - y).abs() < 1e-6, "{} != {}", x, y);
        }
    }
}
