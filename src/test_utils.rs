//! Instances shared by the unit tests.

use rand::Rng;

use crate::distance::DistanceMatrix;
use crate::random::create_rng;

/// Corners of the unit square; the optimal tour has length 4.
pub fn unit_square() -> DistanceMatrix {
    DistanceMatrix::from_coordinates(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap()
}

/// Three cities: too small for any 2-opt move.
pub fn triangle() -> DistanceMatrix {
    DistanceMatrix::from_coordinates(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]).unwrap()
}

/// `n` uniform points in the 100 x 100 square.
pub fn random_instance(n: usize, seed: u64) -> DistanceMatrix {
    let mut rng = create_rng(seed);
    let points: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
        .collect();
    DistanceMatrix::from_coordinates(&points).unwrap()
}
