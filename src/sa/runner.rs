//! SA execution loop.

use rand::Rng;
use tracing::{debug, trace};

use super::config::SaConfig;
use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::moves::neighborhood;
use crate::random::{rng_from_seed, SolverRng};
use crate::result::SolveResult;
use crate::tour::Tour;

/// Starting temperature used when calibration samples no uphill move.
const FALLBACK_TEMPERATURE: f64 = 1.0;

/// Simulated annealing over one instance.
pub struct SimulatedAnnealing<'a> {
    matrix: &'a DistanceMatrix,
    config: SaConfig,
    rng: SolverRng,
    calibrated: Option<f64>,
}

impl<'a> SimulatedAnnealing<'a> {
    /// Creates an annealer over `matrix`.
    ///
    /// # Errors
    ///
    /// Fails if the instance has fewer than four cities or the
    /// configuration is invalid.
    pub fn new(matrix: &'a DistanceMatrix, config: SaConfig) -> Result<Self> {
        matrix.ensure_searchable()?;
        config.validate()?;

        Ok(Self {
            matrix,
            rng: rng_from_seed(config.seed),
            config,
            calibrated: None,
        })
    }

    /// Estimates a starting temperature from one random tour.
    ///
    /// Scans a random-length prefix (up to `n / 2` moves) of the
    /// neighborhood, averages the positive deltas and solves
    /// `exp(-avg / T0) = target_acceptance` for `T0`. The result is cached
    /// and reused by later runs.
    pub fn calibrate_initial_temperature(&mut self) -> f64 {
        let n = self.matrix.len();
        let tour = Tour::random(n, &mut self.rng);
        let limit = self.rng.random_range(1..=(n / 2).max(1));

        let (sum, count) = neighborhood(n)
            .take(limit)
            .map(|mv| mv.delta(&tour, self.matrix))
            .filter(|&delta| delta > 0.0)
            .fold((0.0, 0usize), |(sum, count), delta| (sum + delta, count + 1));

        let t0 = if count == 0 {
            FALLBACK_TEMPERATURE
        } else {
            -(sum / count as f64) / self.config.target_acceptance.ln()
        };

        debug!(sampled = limit, uphill = count, t0, "calibrated initial temperature");

        self.calibrated = Some(t0);
        t0
    }

    /// Starting temperature: the configured one, else the cached
    /// calibration, else a fresh calibration.
    pub fn initial_temperature(&mut self) -> f64 {
        match (self.config.initial_temperature, self.calibrated) {
            (Some(t), _) | (None, Some(t)) => t,
            (None, None) => self.calibrate_initial_temperature(),
        }
    }

    /// Anneals a fresh random tour until the temperature falls below the floor.
    ///
    /// Each outer iteration scans the neighborhood in order and applies the
    /// first move with `delta < 0` or passing the Metropolis test
    /// `u < exp(-delta / T)`, then cools once whether or not a move was
    /// applied. `steps` counts applied moves and `evaluated` counts deltas.
    /// The returned tour is the final one, not the best one seen.
    pub fn run(&mut self) -> SolveResult {
        let n = self.matrix.len();
        let mut temperature = self.initial_temperature();

        let mut tour = Tour::random(n, &mut self.rng);
        let mut distance = tour.cost(self.matrix);
        let mut steps = 0usize;
        let mut evaluated = 0usize;
        let mut outer = 0usize;

        debug!(cities = n, t0 = temperature, initial = distance, "annealing start");

        while temperature >= self.config.min_temperature {
            for mv in neighborhood(n) {
                let delta = mv.delta(&tour, self.matrix);
                evaluated += 1;

                // Metropolis acceptance criterion
                let accept =
                    delta < 0.0 || self.rng.random::<f64>() < (-delta / temperature).exp();

                if accept {
                    tour = mv.apply(tour);
                    distance += delta;
                    steps += 1;
                    trace!(i = mv.i, j = mv.j, delta, temperature, distance, "accepted");
                    break;
                }
            }

            temperature = self.config.cooling.cool(temperature);
            outer += 1;
        }

        debug!(
            outer,
            steps,
            evaluated,
            final_temperature = temperature,
            distance,
            "annealing end"
        );

        SolveResult {
            best_tour: tour,
            best_distance: distance,
            steps,
            evaluated,
        }
    }
}
