//! 2-opt local search and nearest-neighbor construction.
//!
//! - **Greedy** (first improvement): applies the first improving move of the
//!   scan, then restarts the scan from the top.
//! - **Steepest** (best improvement): scans the whole neighborhood and
//!   applies only the most improving move of each pass.
//! - **Heuristic**: one-shot nearest-neighbor tour, no refinement.
//!
//! Both descents accept only strict improvements, so the tour cost never
//! increases and the search stops in a 2-opt local optimum after finitely
//! many passes.
//!
//! # References
//!
//! - Croes, G.A. (1958). "A method for solving traveling salesman problems",
//!   *Operations Research* 6(6), 791-812.
//! - Hansen, P. & Mladenović, N. (2006). "First vs. best improvement: An
//!   empirical study", *Discrete Applied Mathematics* 154(5), 802-817.

mod config;
mod runner;

pub use config::LocalSearchConfig;
pub use runner::LocalSearch;
