//! Cyclic tours and their cost.

use std::ops::Index;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::{Result, TspError};
use crate::random::random_permutation;

/// A cyclic visiting order over cities `0..n`.
///
/// Invariant: every city appears exactly once. The tour is closed, so the
/// last city connects back to the first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Tour(Vec<usize>);

impl Tour {
    /// Wraps a visiting order after checking that it is a permutation.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::InvalidInput`] if a city is out of range or repeated.
    pub fn new(order: Vec<usize>) -> Result<Self> {
        let n = order.len();
        let mut seen = vec![false; n];
        for &city in &order {
            if city >= n || seen[city] {
                return Err(TspError::InvalidInput(format!(
                    "tour is not a permutation of 0..{n}: city {city} out of range or repeated"
                )));
            }
            seen[city] = true;
        }
        Ok(Self(order))
    }

    /// Samples a uniformly random tour over `n` cities.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        Self(random_permutation(n, rng))
    }

    /// The tour `0, 1, ..., n - 1`.
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    /// Builds a tour from an order known to be a permutation.
    pub(crate) fn from_permutation(order: Vec<usize>) -> Self {
        debug_assert!(Self::new(order.clone()).is_ok());
        Self(order)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }

    /// Position following `pos` around the cycle.
    #[inline]
    pub fn next_position(&self, pos: usize) -> usize {
        if pos + 1 == self.0.len() {
            0
        } else {
            pos + 1
        }
    }

    /// Total length of the closed tour.
    pub fn cost(&self, matrix: &DistanceMatrix) -> f64 {
        tour_cost(&self.0, matrix)
    }

    /// Reverses positions `start..=end` and returns the resulting tour.
    ///
    /// The prefix before `start` and the suffix after `end` are untouched.
    /// Applying the same swap twice restores the original tour. The caller
    /// gives up the pre-swap tour; the buffer is reused for the result.
    ///
    /// # Panics
    ///
    /// Panics if `end >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tsp_metaheur::Tour;
    ///
    /// let tour = Tour::identity(6).two_opt_swap(1, 4);
    /// assert_eq!(tour.as_slice(), &[0, 4, 3, 2, 1, 5]);
    /// ```
    #[must_use]
    pub fn two_opt_swap(mut self, start: usize, end: usize) -> Self {
        if start < end {
            self.0[start..=end].reverse();
        }
        self
    }
}

impl Index<usize> for Tour {
    type Output = usize;

    #[inline]
    fn index(&self, pos: usize) -> &usize {
        &self.0[pos]
    }
}

impl TryFrom<Vec<usize>> for Tour {
    type Error = TspError;

    fn try_from(order: Vec<usize>) -> Result<Self> {
        Self::new(order)
    }
}

impl From<Tour> for Vec<usize> {
    fn from(tour: Tour) -> Self {
        tour.0
    }
}

/// Sum of distances over consecutive cities, including the closing edge.
pub fn tour_cost(order: &[usize], matrix: &DistanceMatrix) -> f64 {
    match order {
        [] | [_] => 0.0,
        [first, .., last] => {
            order
                .windows(2)
                .map(|w| matrix.get(w[0], w[1]))
                .sum::<f64>()
                + matrix.get(*last, *first)
        }
    }
}
