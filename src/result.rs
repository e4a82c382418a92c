//! Result record returned by every solver.

use serde::{Deserialize, Serialize};

use crate::tour::Tour;

/// Outcome of a single solver run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    /// Best tour found (for simulated annealing: the final tour).
    pub best_tour: Tour,
    /// Cost of `best_tour`.
    pub best_distance: f64,
    /// Solver-specific step count (applied moves, or the iteration of the
    /// best tour for tabu search).
    pub steps: usize,
    /// Number of candidate evaluations (deltas or full tour costs).
    pub evaluated: usize,
}
