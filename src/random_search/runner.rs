//! Random sampling and random walk execution.

use std::time::{Duration, Instant};

use tracing::debug;

use super::config::RandomSearchConfig;
use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::moves::{is_improving, TwoOptMove};
use crate::random::{random_pair, rng_from_seed, SolverRng};
use crate::result::SolveResult;
use crate::tour::Tour;

/// Random search state over one instance.
///
/// Holds the best tour seen so far and a scratch current tour. A fresh
/// instance starts with both set to the same uniform random tour.
pub struct RandomSearch<'a> {
    matrix: &'a DistanceMatrix,
    rng: SolverRng,
    current: Tour,
    current_distance: f64,
    best: Tour,
    best_distance: f64,
}

impl<'a> RandomSearch<'a> {
    /// Creates a searcher over `matrix`.
    ///
    /// # Errors
    ///
    /// Fails if the instance has fewer than four cities or the
    /// configuration is invalid.
    pub fn new(matrix: &'a DistanceMatrix, config: &RandomSearchConfig) -> Result<Self> {
        matrix.ensure_searchable()?;
        config.validate()?;

        let mut rng = rng_from_seed(config.seed);
        let current = Tour::random(matrix.len(), &mut rng);
        let current_distance = current.cost(matrix);

        Ok(Self {
            matrix,
            rng,
            best: current.clone(),
            best_distance: current_distance,
            current,
            current_distance,
        })
    }

    /// Resamples a fresh uniform tour into both current and best.
    pub fn reset(&mut self) {
        self.current = Tour::random(self.matrix.len(), &mut self.rng);
        self.current_distance = self.current.cost(self.matrix);
        self.best = self.current.clone();
        self.best_distance = self.current_distance;
    }

    pub fn best(&self) -> &Tour {
        &self.best
    }

    pub fn best_distance(&self) -> f64 {
        self.best_distance
    }

    /// Pure random sampling until `budget` elapses.
    ///
    /// Every sample is a fresh uniform tour evaluated in full; a sample
    /// replaces the best only when strictly shorter. Reports zero steps and
    /// the number of samples drawn as `evaluated`.
    pub fn search(&mut self, budget: Duration) -> SolveResult {
        let n = self.matrix.len();
        let start = Instant::now();
        let mut samples = 0usize;

        debug!(cities = n, budget_ms = budget.as_millis() as u64, "random search start");

        while start.elapsed() < budget {
            self.current = Tour::random(n, &mut self.rng);
            self.current_distance = self.current.cost(self.matrix);
            samples += 1;

            if self.current_distance < self.best_distance {
                self.best = self.current.clone();
                self.best_distance = self.current_distance;
            }
        }

        debug!(samples, best = self.best_distance, "random search end");

        SolveResult {
            best_tour: self.best.clone(),
            best_distance: self.best_distance,
            steps: 0,
            evaluated: samples,
        }
    }

    /// Random-walk hill climbing until `budget` elapses.
    ///
    /// Proposes uniformly random position pairs on the current tour and
    /// applies a proposal only if its 2-opt delta is improving. Adjacent
    /// pairs are skipped without being evaluated.
    pub fn walk(&mut self, budget: Duration) -> SolveResult {
        let n = self.matrix.len();
        let start = Instant::now();
        let mut steps = 0usize;
        let mut evaluated = 0usize;

        debug!(cities = n, budget_ms = budget.as_millis() as u64, "random walk start");

        while start.elapsed() < budget {
            let (a, b) = random_pair(n, &mut self.rng);
            let mv = TwoOptMove::normalized(a, b);
            if mv.is_degenerate(n) {
                continue;
            }

            let delta = mv.delta(&self.current, self.matrix);
            evaluated += 1;

            if is_improving(delta) {
                let tour = std::mem::take(&mut self.current);
                self.current = mv.apply(tour);
                self.current_distance += delta;
                steps += 1;
            }
        }

        if self.current_distance < self.best_distance {
            self.best = self.current.clone();
            self.best_distance = self.current_distance;
        }

        debug!(steps, evaluated, best = self.best_distance, "random walk end");

        SolveResult {
            best_tour: self.best.clone(),
            best_distance: self.best_distance,
            steps,
            evaluated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TspError;
    use crate::test_utils::{random_instance, triangle, unit_square};

    #[test]
    fn test_rejects_tiny_instance() {
        let m = triangle();
        let err = RandomSearch::new(&m, &RandomSearchConfig::default());
        assert!(matches!(err, Err(TspError::InvalidInput(_))));
    }

    #[test]
    fn test_search_never_worse_than_start() {
        let m = random_instance(15, 1);
        let mut rs = RandomSearch::new(&m, &RandomSearchConfig::default().with_seed(42)).unwrap();
        let start = rs.best_distance();

        let result = rs.search(Duration::from_millis(20));

        assert!(result.best_distance <= start);
        assert_eq!(result.steps, 0);
        assert!(result.evaluated > 0);
        assert!((result.best_tour.cost(&m) - result.best_distance).abs() < 1e-9);
    }

    #[test]
    fn test_walk_tracks_distance_incrementally() {
        let m = random_instance(20, 2);
        let mut rs = RandomSearch::new(&m, &RandomSearchConfig::default().with_seed(7)).unwrap();
        let start = rs.best_distance();

        let result = rs.walk(Duration::from_millis(30));

        assert!(result.best_distance <= start);
        assert!(result.steps <= result.evaluated);
        assert!(
            (result.best_tour.cost(&m) - result.best_distance).abs() < 1e-6,
            "incremental {} vs full {}",
            result.best_distance,
            result.best_tour.cost(&m)
        );
    }

    #[test]
    fn test_walk_solves_unit_square() {
        let m = unit_square();
        let mut rs = RandomSearch::new(&m, &RandomSearchConfig::default().with_seed(3)).unwrap();
        let result = rs.walk(Duration::from_millis(20));
        assert!((result.best_distance - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_reset_resamples() {
        let m = random_instance(30, 3);
        let mut rs = RandomSearch::new(&m, &RandomSearchConfig::default().with_seed(5)).unwrap();
        let first = rs.best().clone();
        rs.reset();
        assert_ne!(rs.best(), &first);
        assert!((rs.best().cost(&m) - rs.best_distance()).abs() < 1e-9);
    }

    #[test]
    fn test_zero_budget_returns_start() {
        let m = random_instance(10, 4);
        let mut rs = RandomSearch::new(&m, &RandomSearchConfig::default().with_seed(1)).unwrap();
        let start = rs.best().clone();
        let result = rs.search(Duration::ZERO);
        assert_eq!(result.evaluated, 0);
        assert_eq!(result.best_tour, start);
    }
}
