//! Local search configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Configuration for [`LocalSearch`](super::LocalSearch).
///
/// The descents are parameter-free; only the random start is configurable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalSearchConfig {
    /// Random seed for the initial tour and the heuristic start city.
    pub seed: Option<u64>,
}

impl LocalSearchConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration. Every value is currently accepted.
    pub fn validate(&self) -> Result<()> {
        Ok(())
    }
}
