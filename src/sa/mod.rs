//! Simulated Annealing (SA) over the 2-opt neighborhood.
//!
//! Scans 2-opt moves in order and accepts the first one that passes the
//! Metropolis test. The temperature cools once per outer iteration until it
//! falls below a floor. The starting temperature can be calibrated from a
//! sample of uphill deltas so that an average worsening move is initially
//! accepted with a chosen probability.
//!
//! The run returns the final annealed tour, which need not be the best
//! tour visited.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"
//! - Lundy & Mees (1986), "Convergence of an Annealing Algorithm"

mod config;
mod runner;

pub use config::{CoolingSchedule, SaConfig};
pub use runner::SimulatedAnnealing;
