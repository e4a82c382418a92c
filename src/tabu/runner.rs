//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Start from a random tour
//! 2. At each iteration:
//!    a. If the elite cache holds moves, re-score them against the current
//!    tour, age all tenures, and drop the cache if its best move no longer
//!    improves the tour by at least `discard_ratio`
//!    b. If the cache is empty, scan the full 2-opt neighborhood (aging
//!    each visited pair) and keep the `max_moves` best moves
//!    c. Apply the first cached move that is not tabu, or that would give a
//!    new global best (aspiration), and make it tabu
//!    d. Update the global best if improved
//! 3. Stop after `max_no_improve` iterations without a new best
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

use tracing::{debug, trace};

use super::config::TabuConfig;
use super::memory::{EliteMoveCache, ScoredMove, TabuList};
use crate::distance::DistanceMatrix;
use crate::error::{Result, TspError};
use crate::moves::{is_improving, neighborhood, neighborhood_size, TwoOptMove};
use crate::random::{rng_from_seed, SolverRng};
use crate::result::SolveResult;
use crate::tour::Tour;

/// Tabu search over one instance.
///
/// The tenure grid and the elite cache are rebuilt at the start of every
/// run, so consecutive runs do not share memory.
pub struct TabuSearch<'a> {
    matrix: &'a DistanceMatrix,
    config: TabuConfig,
    rng: SolverRng,
    iterations: usize,
}

impl<'a> TabuSearch<'a> {
    /// Creates a tabu search over `matrix`.
    ///
    /// # Errors
    ///
    /// Fails if the instance has fewer than four cities or the
    /// configuration is invalid.
    pub fn new(matrix: &'a DistanceMatrix, config: TabuConfig) -> Result<Self> {
        matrix.ensure_searchable()?;
        config.validate()?;

        Ok(Self {
            matrix,
            rng: rng_from_seed(config.seed),
            config,
            iterations: 0,
        })
    }

    /// Iterations executed by the most recent run.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Runs tabu search from a fresh random tour.
    pub fn run(&mut self) -> SolveResult {
        let initial = Tour::random(self.matrix.len(), &mut self.rng);
        self.search(initial)
    }

    /// Runs tabu search from `initial`.
    ///
    /// # Errors
    ///
    /// Fails if `initial` does not visit exactly the cities of the matrix.
    pub fn run_from(&mut self, initial: Tour) -> Result<SolveResult> {
        if initial.len() != self.matrix.len() {
            return Err(TspError::InvalidInput(format!(
                "initial tour has {} cities, matrix has {}",
                initial.len(),
                self.matrix.len()
            )));
        }
        Ok(self.search(initial))
    }

    fn search(&mut self, initial: Tour) -> SolveResult {
        let n = self.matrix.len();
        let tenure = self.config.tenure_for(n);
        let max_moves = self.config.max_moves_for(n);

        let mut state = SearchState::new(initial, self.matrix, max_moves);
        let mut rebuilds = 0usize;
        let mut idle = 0usize;

        debug!(cities = n, tenure, max_moves, initial = state.distance, "tabu search start");

        while state.iteration - state.best_iteration <= self.config.max_no_improve {
            if self.config.max_iterations > 0 && state.iteration >= self.config.max_iterations {
                break;
            }
            let step = self.step(&mut state, tenure);
            rebuilds += usize::from(step.rebuilt);
            idle += usize::from(step.applied.is_none());
        }

        self.iterations = state.iteration;

        debug!(
            iterations = state.iteration,
            best_iteration = state.best_iteration,
            evaluated = state.evaluated,
            rebuilds,
            idle,
            best = state.best_distance,
            "tabu search end"
        );

        SolveResult {
            best_tour: state.best,
            best_distance: state.best_distance,
            steps: state.best_iteration,
            evaluated: state.evaluated,
        }
    }

    /// Runs one iteration on `state`.
    fn step(&self, state: &mut SearchState, tenure: usize) -> Step {
        let n = self.matrix.len();
        state.iteration += 1;
        let iteration = state.iteration;

        if !state.cache.is_empty() {
            let tour = &state.tour;
            state.evaluated += state.cache.rescore(|mv| mv.delta(tour, self.matrix));
            state.tabu.decrement_all();

            let distance = state.distance;
            let stale = state
                .cache
                .best_delta()
                .is_some_and(|delta| delta / distance > -self.config.discard_ratio);
            if stale {
                trace!(iteration, "elite cache discarded");
                state.cache.clear();
            }
        }

        let rebuilt = state.cache.is_empty();
        if rebuilt {
            let matrix = self.matrix;
            let tour = &state.tour;
            let tabu = &mut state.tabu;
            let candidates = neighborhood(n).map(|mv| {
                tabu.decrement(mv);
                ScoredMove {
                    mv,
                    delta: mv.delta(tour, matrix),
                }
            });
            state.cache.rebuild(candidates);
            state.evaluated += neighborhood_size(n);
        }

        let admissible = select_admissible(
            &state.cache,
            &state.tabu,
            state.distance,
            state.best_distance,
            self.config.aspiration,
        );
        let applied = admissible.map(|index| {
            let chosen = state.cache.remove(index);
            let tour = std::mem::take(&mut state.tour);
            state.tour = chosen.mv.apply(tour);
            state.distance += chosen.delta;
            state.tabu.set(chosen.mv, tenure);
            trace!(
                iteration,
                i = chosen.mv.i,
                j = chosen.mv.j,
                delta = chosen.delta,
                distance = state.distance,
                "move applied"
            );
            chosen.mv
        });

        if is_improving(state.distance - state.best_distance) {
            state.best = state.tour.clone();
            state.best_distance = state.distance;
            state.best_iteration = iteration;
            trace!(iteration, best = state.best_distance, "new best");
        }

        Step { applied, rebuilt }
    }
}

/// Mutable memory of one tabu run.
struct SearchState {
    tour: Tour,
    distance: f64,
    best: Tour,
    best_distance: f64,
    best_iteration: usize,
    iteration: usize,
    evaluated: usize,
    tabu: TabuList,
    cache: EliteMoveCache,
}

impl SearchState {
    fn new(initial: Tour, matrix: &DistanceMatrix, max_moves: usize) -> Self {
        let distance = initial.cost(matrix);
        Self {
            tabu: TabuList::new(matrix.len()),
            cache: EliteMoveCache::new(max_moves),
            best: initial.clone(),
            best_distance: distance,
            tour: initial,
            distance,
            best_iteration: 0,
            iteration: 0,
            evaluated: 0,
        }
    }
}

/// What a single iteration did.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Step {
    applied: Option<TwoOptMove>,
    /// The full neighborhood was scanned into the cache.
    rebuilt: bool,
}

/// Index of the first cached move that is not tabu, or that would beat the
/// global best when aspiration is enabled.
fn select_admissible(
    cache: &EliteMoveCache,
    tabu: &TabuList,
    distance: f64,
    best_distance: f64,
    aspiration: bool,
) -> Option<usize> {
    cache.iter().position(|candidate| {
        !tabu.is_tabu(candidate.mv)
            || (aspiration && is_improving(distance + candidate.delta - best_distance))
    })
}
