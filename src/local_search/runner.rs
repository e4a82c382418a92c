//! Local search execution.
//!
//! # Algorithm (2-opt descent)
//!
//! 1. Start from the stored random initial tour
//! 2. Scan moves `(i, j)` in fixed nested order, computing O(1) deltas
//! 3. Greedy: apply the first improving move and restart the scan;
//!    steepest: apply the most improving move once the pass ends
//! 4. Stop when a full pass finds no improving move

use rand::Rng;
use tracing::{debug, trace};

use super::config::LocalSearchConfig;
use crate::distance::DistanceMatrix;
use crate::error::{Result, TspError};
use crate::moves::{is_improving, neighborhood, TwoOptMove};
use crate::random::{rng_from_seed, SolverRng};
use crate::result::SolveResult;
use crate::tour::Tour;

/// 2-opt local search over one instance.
pub struct LocalSearch<'a> {
    matrix: &'a DistanceMatrix,
    rng: SolverRng,
    initial: Tour,
    initial_distance: f64,
}

impl<'a> LocalSearch<'a> {
    /// Creates a local search starting from a random tour.
    ///
    /// # Errors
    ///
    /// Fails if the instance has fewer than four cities.
    pub fn new(matrix: &'a DistanceMatrix, config: &LocalSearchConfig) -> Result<Self> {
        matrix.ensure_searchable()?;
        config.validate()?;

        let mut rng = rng_from_seed(config.seed);
        let initial = Tour::random(matrix.len(), &mut rng);
        let initial_distance = initial.cost(matrix);

        Ok(Self {
            matrix,
            rng,
            initial,
            initial_distance,
        })
    }

    /// Replaces the starting tour.
    ///
    /// # Errors
    ///
    /// Fails if `tour` does not visit exactly the cities of the matrix.
    pub fn with_initial(mut self, tour: Tour) -> Result<Self> {
        if tour.len() != self.matrix.len() {
            return Err(TspError::InvalidInput(format!(
                "initial tour has {} cities, matrix has {}",
                tour.len(),
                self.matrix.len()
            )));
        }
        self.initial_distance = tour.cost(self.matrix);
        self.initial = tour;
        Ok(self)
    }

    /// The starting tour shared by [`greedy`](Self::greedy) and
    /// [`steepest`](Self::steepest).
    pub fn initial(&self) -> &Tour {
        &self.initial
    }

    pub fn initial_distance(&self) -> f64 {
        self.initial_distance
    }

    /// Draws a new random starting tour.
    pub fn reset(&mut self) {
        self.initial = Tour::random(self.matrix.len(), &mut self.rng);
        self.initial_distance = self.initial.cost(self.matrix);
    }

    /// First-improvement 2-opt descent from the initial tour.
    pub fn greedy(&self) -> SolveResult {
        let n = self.matrix.len();
        let mut tour = self.initial.clone();
        let mut distance = self.initial_distance;
        let mut steps = 0usize;
        let mut evaluated = 0usize;

        debug!(cities = n, initial = distance, "greedy descent start");

        'scan: loop {
            for mv in neighborhood(n) {
                let delta = mv.delta(&tour, self.matrix);
                evaluated += 1;

                if is_improving(delta) {
                    tour = mv.apply(tour);
                    distance += delta;
                    steps += 1;
                    trace!(i = mv.i, j = mv.j, delta, distance, "greedy move");
                    continue 'scan;
                }
            }
            break;
        }

        debug!(steps, evaluated, best = distance, "greedy descent end");

        SolveResult {
            best_tour: tour,
            best_distance: distance,
            steps,
            evaluated,
        }
    }

    /// Best-improvement 2-opt descent from the initial tour.
    pub fn steepest(&self) -> SolveResult {
        let n = self.matrix.len();
        let mut tour = self.initial.clone();
        let mut distance = self.initial_distance;
        let mut steps = 0usize;
        let mut evaluated = 0usize;

        debug!(cities = n, initial = distance, "steepest descent start");

        loop {
            let mut best: Option<(TwoOptMove, f64)> = None;

            for mv in neighborhood(n) {
                let delta = mv.delta(&tour, self.matrix);
                evaluated += 1;

                if best.is_none_or(|(_, best_delta)| delta < best_delta) {
                    best = Some((mv, delta));
                }
            }

            match best {
                Some((mv, delta)) if is_improving(delta) => {
                    tour = mv.apply(tour);
                    distance += delta;
                    steps += 1;
                    trace!(i = mv.i, j = mv.j, delta, distance, "steepest move");
                }
                _ => break,
            }
        }

        debug!(steps, evaluated, best = distance, "steepest descent end");

        SolveResult {
            best_tour: tour,
            best_distance: distance,
            steps,
            evaluated,
        }
    }

    /// Nearest-neighbor construction from a uniformly random start city.
    ///
    /// Ties between equally near cities go to the lowest city id. Reports
    /// zero steps and zero evaluated moves.
    pub fn heuristic(&mut self) -> SolveResult {
        let n = self.matrix.len();
        let start = self.rng.random_range(0..n);

        let mut visited = vec![false; n];
        let mut order = Vec::with_capacity(n);
        visited[start] = true;
        order.push(start);

        let mut last = start;
        for _ in 1..n {
            let mut nearest = None;
            let mut nearest_distance = f64::INFINITY;
            for city in 0..n {
                if !visited[city] && self.matrix.get(last, city) < nearest_distance {
                    nearest = Some(city);
                    nearest_distance = self.matrix.get(last, city);
                }
            }
            // Distances are finite, so every unvisited city is a candidate.
            let Some(next) = nearest else { break };
            visited[next] = true;
            order.push(next);
            last = next;
        }

        let tour = Tour::from_permutation(order);
        let distance = tour.cost(self.matrix);

        debug!(cities = n, start, best = distance, "nearest neighbor built");

        SolveResult {
            best_tour: tour,
            best_distance: distance,
            steps: 0,
            evaluated: 0,
        }
    }
}
