//! Seedable random number generation and uniform draws.
//!
//! Every solver owns its own [`SolverRng`], created here from an optional
//! seed. Two solvers built with the same seed draw identical sequences.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Random number generator owned by each solver instance.
pub type SolverRng = StdRng;

/// Creates a generator from a fixed seed.
pub fn create_rng(seed: u64) -> SolverRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from an optional seed, drawing a fresh one when `None`.
pub fn rng_from_seed(seed: Option<u64>) -> SolverRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

/// Returns a uniformly random permutation of `0..n`.
pub fn random_permutation<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(rng);
    perm
}

/// Draws two distinct indices from `0..n`, in draw order.
///
/// # Panics
///
/// Panics if `n < 2`.
pub fn random_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    assert!(n >= 2, "random_pair needs at least two indices");
    let first = rng.random_range(0..n);
    // Draw from the n - 1 remaining slots and skip over `first`.
    let mut second = rng.random_range(0..n - 1);
    if second >= first {
        second += 1;
    }
    (first, second)
}
