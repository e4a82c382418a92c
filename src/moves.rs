//! 2-opt moves and their O(1) cost deltas.
//!
//! A move `(i, j)` with `i < j` removes the edges leaving positions `i` and
//! `j` and reconnects the tour by reversing positions `i + 1..=j`:
//!
//! ```text
//! before: ... t[i] -> t[i+1] ... t[j] -> t[j+1] ...
//! after:  ... t[i] -> t[j]   ... t[i+1] -> t[j+1] ...
//! delta = d(t[i], t[j]) + d(t[i+1], t[j+1]) - d(t[i], t[i+1]) - d(t[j], t[j+1])
//! ```
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::distance::DistanceMatrix;
use crate::tour::Tour;

/// Deltas above this (negative) threshold do not count as improvements.
///
/// Moves whose edge sums differ only by rounding would otherwise be
/// accepted back and forth forever.
pub const IMPROVEMENT_TOLERANCE: f64 = 1e-10;

/// Returns whether `delta` is a strict improvement.
#[inline]
pub fn is_improving(delta: f64) -> bool {
    delta < -IMPROVEMENT_TOLERANCE
}

/// Cost change of replacing edges `(a, next_a)` and `(b, next_b)` with
/// `(a, b)` and `(next_a, next_b)`.
///
/// Arguments are city ids. The result is meaningless when the two edges
/// share a city.
#[inline]
pub fn swap_delta(
    matrix: &DistanceMatrix,
    a: usize,
    next_a: usize,
    b: usize,
    next_b: usize,
) -> f64 {
    let added = matrix.get(a, b) + matrix.get(next_a, next_b);
    let removed = matrix.get(a, next_a) + matrix.get(b, next_b);
    added - removed
}

/// A 2-opt move on tour positions `i < j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TwoOptMove {
    pub i: usize,
    pub j: usize,
}

impl TwoOptMove {
    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }

    /// Orders an arbitrary pair of positions so that `i < j`.
    pub fn normalized(a: usize, b: usize) -> Self {
        Self {
            i: a.min(b),
            j: a.max(b),
        }
    }

    /// Whether the two removed edges touch, on a tour of `n` cities.
    ///
    /// Touching edges (`j == i + 1`, or `j` wrapping around to `i`) give
    /// a move that does not change the cycle.
    #[inline]
    pub fn is_degenerate(&self, n: usize) -> bool {
        self.j <= self.i + 1 || self.j >= n || (self.j + 1) % n == self.i
    }

    /// O(1) cost change of applying this move to `tour`.
    #[inline]
    pub fn delta(&self, tour: &Tour, matrix: &DistanceMatrix) -> f64 {
        swap_delta(
            matrix,
            tour[self.i],
            tour[self.i + 1],
            tour[self.j],
            tour[tour.next_position(self.j)],
        )
    }

    /// Applies the move, consuming the tour.
    #[must_use]
    pub fn apply(&self, tour: Tour) -> Tour {
        tour.two_opt_swap(self.i + 1, self.j)
    }
}

/// Non-degenerate moves of a tour of `n` cities in fixed scan order:
/// `i` ascending, then `j` ascending.
pub fn neighborhood(n: usize) -> impl Iterator<Item = TwoOptMove> {
    (0..n)
        .flat_map(move |i| ((i + 2)..n).map(move |j| TwoOptMove::new(i, j)))
        .filter(move |mv| !mv.is_degenerate(n))
}

/// Number of moves yielded by [`neighborhood`].
pub fn neighborhood_size(n: usize) -> usize {
    if n < 4 {
        0
    } else {
        n * (n - 3) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::tour::tour_cost;
    use proptest::prelude::*;

    #[test]
    fn test_neighborhood_square() {
        let moves: Vec<_> = neighborhood(4).collect();
        assert_eq!(moves, vec![TwoOptMove::new(0, 2), TwoOptMove::new(1, 3)]);
    }

    #[test]
    fn test_neighborhood_empty_below_four() {
        for n in 0..4 {
            assert_eq!(neighborhood(n).count(), 0, "n = {n}");
        }
    }

    #[test]
    fn test_neighborhood_size_matches_scan() {
        for n in 0..40 {
            assert_eq!(neighborhood(n).count(), neighborhood_size(n), "n = {n}");
        }
    }

    #[test]
    fn test_neighborhood_order() {
        let moves: Vec<_> = neighborhood(7).collect();
        let mut sorted = moves.clone();
        sorted.sort_by_key(|mv| (mv.i, mv.j));
        assert_eq!(moves, sorted);
        assert!(!moves.contains(&TwoOptMove::new(0, 6)));
        assert!(moves.contains(&TwoOptMove::new(1, 6)));
    }

    #[test]
    fn test_degenerate_moves() {
        assert!(TwoOptMove::new(2, 3).is_degenerate(8));
        assert!(TwoOptMove::new(0, 7).is_degenerate(8));
        assert!(!TwoOptMove::new(1, 7).is_degenerate(8));
        assert!(!TwoOptMove::new(0, 6).is_degenerate(8));
    }

    #[test]
    fn test_uncrossing_square() {
        let m = DistanceMatrix::from_coordinates(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])
            .unwrap();
        let crossed = Tour::new(vec![0, 2, 1, 3]).unwrap();
        let mv = TwoOptMove::new(0, 2);
        let delta = mv.delta(&crossed, &m);
        assert!((delta - (2.0 - 2.0 * 2f64.sqrt())).abs() < 1e-12);

        let fixed = mv.apply(crossed);
        assert!((fixed.cost(&m) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalized() {
        assert_eq!(TwoOptMove::normalized(5, 2), TwoOptMove::new(2, 5));
        assert_eq!(TwoOptMove::normalized(2, 5), TwoOptMove::new(2, 5));
    }

    proptest! {
        #[test]
        fn prop_delta_matches_full_cost(
            points in prop::collection::vec((0.0..100.0f64, 0.0..100.0f64), 4..25),
            seed in any::<u64>(),
        ) {
            let m = DistanceMatrix::from_coordinates(&points).unwrap();
            let mut rng = create_rng(seed);
            let tour = Tour::random(points.len(), &mut rng);
            let before = tour.cost(&m);
            for mv in neighborhood(points.len()) {
                let delta = mv.delta(&tour, &m);
                let after = tour_cost(mv.apply(tour.clone()).as_slice(), &m);
                prop_assert!(
                    (after - before - delta).abs() < 1e-9,
                    "move {:?}: delta {} vs {}", mv, delta, after - before
                );
            }
        }
    }
}
