//! Random search baselines.
//!
//! Two reference strategies that every metaheuristic should beat:
//!
//! - **Random sampling** draws independent uniform tours and keeps the best.
//! - **Random walk** proposes random 2-opt moves on one evolving tour and
//!   applies only the improving ones.
//!
//! Both run against a wall-clock budget rather than a convergence test.

mod config;
mod runner;

pub use config::RandomSearchConfig;
pub use runner::RandomSearch;
