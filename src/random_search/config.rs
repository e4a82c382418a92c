//! Random search configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TspError};

/// Configuration for [`RandomSearch`](super::RandomSearch).
///
/// # Examples
///
/// ```
/// use tsp_metaheur::random_search::RandomSearchConfig;
///
/// let config = RandomSearchConfig::default()
///     .with_time_limit_ms(250)
///     .with_seed(42);
/// assert_eq!(config.time_limit_ms, 250);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomSearchConfig {
    /// Wall-clock budget of one `search` or `walk` call, in milliseconds.
    pub time_limit_ms: u64,

    /// Random seed (None for random).
    pub seed: Option<u64>,
}

impl Default for RandomSearchConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: 100,
            seed: None,
        }
    }
}

impl RandomSearchConfig {
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.time_limit_ms == 0 {
            return Err(TspError::InvalidConfig(
                "time_limit_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}
