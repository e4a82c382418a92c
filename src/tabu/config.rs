//! Tabu Search configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TspError};

/// Configuration parameters for Tabu Search.
///
/// Sizes left as `None` scale with the instance: tenure `n / 4` and cache
/// size `max(1, n / 10)`.
///
/// # Examples
///
/// ```
/// use tsp_metaheur::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_max_no_improve(200)
///     .with_tabu_tenure(7)
///     .with_aspiration(true);
/// assert_eq!(config.max_no_improve, 200);
/// assert_eq!(config.tenure_for(40), 7);
/// assert_eq!(config.max_moves_for(40), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabuConfig {
    /// Iterations a move stays tabu after being applied.
    pub tabu_tenure: Option<usize>,
    /// Capacity of the elite-move cache.
    pub max_moves: Option<usize>,
    /// Iterations without a new best before stopping.
    pub max_no_improve: usize,
    /// Hard iteration cap. 0 = no limit.
    pub max_iterations: usize,
    /// The cached moves are dropped and rescanned once the best cached
    /// delta, relative to the current distance, is above `-discard_ratio`.
    pub discard_ratio: f64,
    /// Whether to use aspiration criterion (override tabu if the move
    /// produces a new global best).
    pub aspiration: bool,
    /// Random seed (None for random).
    pub seed: Option<u64>,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            tabu_tenure: None,
            max_moves: None,
            max_no_improve: 100,
            max_iterations: 0,
            discard_ratio: 0.005,
            aspiration: true,
            seed: None,
        }
    }
}

impl TabuConfig {
    /// Sets the tabu tenure (number of iterations a move remains tabu).
    pub fn with_tabu_tenure(mut self, tenure: usize) -> Self {
        self.tabu_tenure = Some(tenure);
        self
    }

    /// Sets the elite-move cache capacity.
    pub fn with_max_moves(mut self, n: usize) -> Self {
        self.max_moves = Some(n);
        self
    }

    /// Sets maximum iterations without improvement.
    pub fn with_max_no_improve(mut self, n: usize) -> Self {
        self.max_no_improve = n;
        self
    }

    /// Sets the hard iteration cap.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_discard_ratio(mut self, ratio: f64) -> Self {
        self.discard_ratio = ratio;
        self
    }

    /// Enables or disables aspiration criterion.
    pub fn with_aspiration(mut self, aspiration: bool) -> Self {
        self.aspiration = aspiration;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Tabu tenure for an instance of `n` cities.
    pub fn tenure_for(&self, n: usize) -> usize {
        self.tabu_tenure.unwrap_or(n / 4)
    }

    /// Elite cache capacity for an instance of `n` cities.
    pub fn max_moves_for(&self, n: usize) -> usize {
        self.max_moves.unwrap_or(n / 10).max(1)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_moves == Some(0) {
            return Err(TspError::InvalidConfig("max_moves must be positive".into()));
        }
        if !(self.discard_ratio > 0.0 && self.discard_ratio.is_finite()) {
            return Err(TspError::InvalidConfig(format!(
                "discard_ratio must be positive, got {}",
                self.discard_ratio
            )));
        }
        Ok(())
    }
}
