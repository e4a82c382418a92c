//! Benchmark driver: repeated, timed runs of each algorithm.
//!
//! Repetition `k` of an algorithm is seeded with `seed + k`, so a seeded
//! experiment is reproducible run for run.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::distance::DistanceMatrix;
use crate::error::{Result, TspError};
use crate::local_search::{LocalSearch, LocalSearchConfig};
use crate::random_search::{RandomSearch, RandomSearchConfig};
use crate::report::{Phase, ReportStore, RunReport, RunSeries};
use crate::result::SolveResult;
use crate::sa::{SaConfig, SimulatedAnnealing};
use crate::tabu::{TabuConfig, TabuSearch};

/// Solvers the driver can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    RandomSearch,
    RandomWalk,
    Greedy,
    Steepest,
    Heuristic,
    SimulatedAnnealing,
    TabuSearch,
}

impl Algorithm {
    pub const ALL: [Algorithm; 7] = [
        Algorithm::RandomSearch,
        Algorithm::RandomWalk,
        Algorithm::Greedy,
        Algorithm::Steepest,
        Algorithm::Heuristic,
        Algorithm::SimulatedAnnealing,
        Algorithm::TabuSearch,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::RandomSearch => "random_search",
            Algorithm::RandomWalk => "random_walk",
            Algorithm::Greedy => "greedy",
            Algorithm::Steepest => "steepest",
            Algorithm::Heuristic => "heuristic",
            Algorithm::SimulatedAnnealing => "simulated_annealing",
            Algorithm::TabuSearch => "tabu_search",
        }
    }

    /// Whether the starting tours are reported as a separate phase.
    pub fn reports_initial(&self) -> bool {
        matches!(self, Algorithm::Greedy | Algorithm::Steepest)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = TspError;

    fn from_str(s: &str) -> Result<Self> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == s.trim())
            .ok_or_else(|| TspError::InvalidConfig(format!("unknown algorithm '{s}'")))
    }
}

/// Settings of a whole benchmark.
///
/// # Examples
///
/// ```
/// use tsp_metaheur::experiment::{Algorithm, ExperimentConfig};
///
/// let config = ExperimentConfig::default()
///     .with_repetitions(3)
///     .with_algorithms(vec![Algorithm::Greedy, Algorithm::TabuSearch])
///     .with_seed(1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Runs per algorithm.
    pub repetitions: usize,
    /// Base seed; overrides the per-solver seeds when set.
    pub seed: Option<u64>,
    pub algorithms: Vec<Algorithm>,
    pub random_search: RandomSearchConfig,
    pub local_search: LocalSearchConfig,
    pub sa: SaConfig,
    pub tabu: TabuConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            repetitions: 10,
            seed: None,
            algorithms: Algorithm::ALL.to_vec(),
            random_search: RandomSearchConfig::default(),
            local_search: LocalSearchConfig::default(),
            sa: SaConfig::default(),
            tabu: TabuConfig::default(),
        }
    }
}

impl ExperimentConfig {
    /// Reads a JSON configuration; missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_repetitions(mut self, n: usize) -> Self {
        self.repetitions = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_algorithms(mut self, algorithms: Vec<Algorithm>) -> Self {
        self.algorithms = algorithms;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.random_search.time_limit_ms = ms;
        self
    }

    /// Validates the configuration and every solver configuration.
    pub fn validate(&self) -> Result<()> {
        if self.repetitions == 0 {
            return Err(TspError::InvalidConfig("repetitions must be positive".into()));
        }
        if self.algorithms.is_empty() {
            return Err(TspError::InvalidConfig("no algorithms selected".into()));
        }
        self.random_search.validate()?;
        self.local_search.validate()?;
        self.sa.validate()?;
        self.tabu.validate()
    }
}

/// Runs of one algorithm on one instance.
#[derive(Debug, Clone)]
pub struct AlgorithmRuns {
    pub algorithm: Algorithm,
    /// Starting tours, for algorithms that report them.
    pub initial: Option<RunSeries>,
    pub runs: RunSeries,
}

fn repetition_seed(base: Option<u64>, repetition: usize) -> Option<u64> {
    base.map(|seed| seed.wrapping_add(repetition as u64))
}

fn timed<F: FnOnce() -> SolveResult>(solve: F) -> (SolveResult, Duration) {
    let start = Instant::now();
    let result = solve();
    (result, start.elapsed())
}

/// Runs `algorithm` `config.repetitions` times on `matrix`.
pub fn run_algorithm(
    matrix: &DistanceMatrix,
    algorithm: Algorithm,
    config: &ExperimentConfig,
) -> Result<AlgorithmRuns> {
    config.validate()?;

    let mut runs = RunSeries::new();
    let mut initial = algorithm.reports_initial().then(RunSeries::new);

    for k in 0..config.repetitions {
        let (result, elapsed) = match algorithm {
            Algorithm::RandomSearch | Algorithm::RandomWalk => {
                let rs_config = RandomSearchConfig {
                    seed: repetition_seed(config.seed.or(config.random_search.seed), k),
                    ..config.random_search.clone()
                };
                let budget = Duration::from_millis(rs_config.time_limit_ms);
                let mut rs = RandomSearch::new(matrix, &rs_config)?;
                if algorithm == Algorithm::RandomSearch {
                    timed(|| rs.search(budget))
                } else {
                    timed(|| rs.walk(budget))
                }
            }
            Algorithm::Greedy | Algorithm::Steepest | Algorithm::Heuristic => {
                let ls_config = LocalSearchConfig {
                    seed: repetition_seed(config.seed.or(config.local_search.seed), k),
                };
                let mut ls = LocalSearch::new(matrix, &ls_config)?;
                if let Some(series) = initial.as_mut() {
                    let start = SolveResult {
                        best_tour: ls.initial().clone(),
                        best_distance: ls.initial_distance(),
                        steps: 0,
                        evaluated: 0,
                    };
                    series.push(start, Duration::ZERO);
                }
                match algorithm {
                    Algorithm::Greedy => timed(|| ls.greedy()),
                    Algorithm::Steepest => timed(|| ls.steepest()),
                    _ => timed(|| ls.heuristic()),
                }
            }
            Algorithm::SimulatedAnnealing => {
                let sa_config = SaConfig {
                    seed: repetition_seed(config.seed.or(config.sa.seed), k),
                    ..config.sa.clone()
                };
                let mut sa = SimulatedAnnealing::new(matrix, sa_config)?;
                timed(|| sa.run())
            }
            Algorithm::TabuSearch => {
                let tabu_config = TabuConfig {
                    seed: repetition_seed(config.seed.or(config.tabu.seed), k),
                    ..config.tabu.clone()
                };
                let mut ts = TabuSearch::new(matrix, tabu_config)?;
                timed(|| ts.run())
            }
        };
        runs.push(result, elapsed);
    }

    info!(
        algorithm = %algorithm,
        repetitions = config.repetitions,
        average_runtime = runs.average_runtime(),
        best = runs.best_index().map(|i| runs.distances[i]),
        "algorithm finished"
    );

    Ok(AlgorithmRuns {
        algorithm,
        initial,
        runs,
    })
}

/// Runs every configured algorithm and stores one report per phase.
pub fn run_experiment(
    instance: &str,
    matrix: &DistanceMatrix,
    config: &ExperimentConfig,
    store: &ReportStore,
) -> Result<Vec<AlgorithmRuns>> {
    config.validate()?;
    info!(
        instance,
        cities = matrix.len(),
        algorithms = config.algorithms.len(),
        "experiment start"
    );

    let mut all = Vec::with_capacity(config.algorithms.len());
    for &algorithm in &config.algorithms {
        let runs = run_algorithm(matrix, algorithm, config)?;

        if let Some(series) = &runs.initial {
            store.write(
                instance,
                algorithm.name(),
                Phase::Initial,
                &RunReport::from_series(series)?,
            )?;
        }
        store.write(
            instance,
            algorithm.name(),
            Phase::Final,
            &RunReport::from_series(&runs.runs)?,
        )?;

        all.push(runs);
    }

    Ok(all)
}
