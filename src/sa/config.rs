//! SA configuration and cooling schedules.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TspError};

/// Cooling schedule applied once per outer iteration.
///
/// # References
///
/// - Geometric: standard textbook approach
/// - LundyMees: Lundy & Mees (1986), with convergence proof
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoolingSchedule {
    /// Geometric (exponential) cooling: `T_{k+1} = alpha * T_k`.
    Geometric {
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Lundy-Mees cooling: `T_{k+1} = T_k / (1 + beta * T_k)`.
    ///
    /// `1 / T` grows by exactly `beta` per step, so any positive `beta`
    /// reaches the temperature floor after finitely many steps.
    LundyMees {
        /// Cooling parameter, must be positive.
        beta: f64,
    },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::LundyMees { beta: 0.99 }
    }
}

impl CoolingSchedule {
    /// Next temperature after one outer iteration.
    pub fn cool(&self, temperature: f64) -> f64 {
        match *self {
            CoolingSchedule::Geometric { alpha } => temperature * alpha,
            CoolingSchedule::LundyMees { beta } => temperature / (1.0 + beta * temperature),
        }
    }
}

/// Configuration for [`SimulatedAnnealing`](super::SimulatedAnnealing).
///
/// # Examples
///
/// ```
/// use tsp_metaheur::sa::{SaConfig, CoolingSchedule};
///
/// let config = SaConfig::default()
///     .with_initial_temperature(100.0)
///     .with_min_temperature(0.001)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.98 })
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaConfig {
    /// Fixed starting temperature. `None` calibrates it from sampled deltas.
    pub initial_temperature: Option<f64>,

    /// The run stops once the temperature drops below this floor.
    pub min_temperature: f64,

    /// Cooling schedule.
    pub cooling: CoolingSchedule,

    /// Acceptance probability of an average uphill move at the calibrated
    /// starting temperature, in (0, 1).
    pub target_acceptance: f64,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: None,
            min_temperature: 0.001,
            cooling: CoolingSchedule::default(),
            target_acceptance: 0.99,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = Some(t);
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_target_acceptance(mut self, p: f64) -> Self {
        self.target_acceptance = p;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if let Some(t) = self.initial_temperature {
            if !(t > 0.0 && t.is_finite()) {
                return Err(TspError::InvalidConfig(format!(
                    "initial_temperature must be positive and finite, got {t}"
                )));
            }
        }
        if !(self.min_temperature > 0.0) {
            return Err(TspError::InvalidConfig(format!(
                "min_temperature must be positive, got {}",
                self.min_temperature
            )));
        }
        if !(self.target_acceptance > 0.0 && self.target_acceptance < 1.0) {
            return Err(TspError::InvalidConfig(format!(
                "target_acceptance must be in (0, 1), got {}",
                self.target_acceptance
            )));
        }
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => {
                if !(alpha > 0.0 && alpha < 1.0) {
                    return Err(TspError::InvalidConfig(format!(
                        "geometric alpha must be in (0, 1), got {alpha}"
                    )));
                }
            }
            CoolingSchedule::LundyMees { beta } => {
                if !(beta > 0.0 && beta.is_finite()) {
                    return Err(TspError::InvalidConfig(format!(
                        "lundy-mees beta must be positive, got {beta}"
                    )));
                }
            }
        }
        Ok(())
    }
}
