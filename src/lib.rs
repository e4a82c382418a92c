//! Metaheuristic solvers for the symmetric traveling salesman problem.
//!
//! Every solver works on a [`DistanceMatrix`] and searches the 2-opt
//! neighborhood of a [`Tour`], evaluating moves with O(1) deltas:
//!
//! - **Random search**: uniform tour sampling and random-walk hill
//!   climbing, both under a wall-clock budget.
//! - **Local search**: greedy (first-improvement) and steepest
//!   (best-improvement) 2-opt descent, plus a nearest-neighbor
//!   construction heuristic.
//! - **Simulated Annealing (SA)**: Metropolis acceptance with a calibrated
//!   starting temperature and Lundy-Mees cooling.
//! - **Tabu Search (TS)**: position-pair tabu tenure, a cache of elite
//!   candidate moves and aspiration by global improvement.
//!
//! # Architecture
//!
//! The core types ([`distance`], [`tour`], [`moves`]) are shared by all
//! solvers. Each solver module follows the same layout: a serde-friendly
//! config with builder methods and `validate()`, and a runner that borrows
//! the matrix and owns its seeded RNG. [`instance`], [`experiment`] and
//! [`report`] form the benchmark layer used by the `tsp-bench` binary.

pub mod distance;
pub mod error;
pub mod experiment;
pub mod instance;
pub mod local_search;
pub mod moves;
pub mod random;
pub mod random_search;
pub mod report;
pub mod result;
pub mod sa;
pub mod tabu;
pub mod tour;

#[cfg(test)]
mod test_utils;

pub use distance::DistanceMatrix;
pub use error::{Result, TspError};
pub use experiment::{Algorithm, ExperimentConfig};
pub use instance::Instance;
pub use moves::TwoOptMove;
pub use result::SolveResult;
pub use tour::Tour;
