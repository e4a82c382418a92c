//! Tabu Search (TS) over the 2-opt neighborhood.
//!
//! A single-solution trajectory metaheuristic that uses memory structures
//! (the tabu list) to forbid recently applied moves, preventing cycling
//! and encouraging exploration of new regions of the search space.
//!
//! Full neighborhood scans are amortized through an elite-move cache: the
//! best moves of one scan are kept and re-scored on later iterations until
//! they stop paying off.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod memory;
mod runner;

pub use config::TabuConfig;
pub use memory::{EliteMoveCache, ScoredMove, TabuList};
pub use runner::TabuSearch;
