//! Aggregated run records and their JSON persistence.
//!
//! A [`RunSeries`] collects the results of repeated runs of one algorithm
//! on one instance. [`RunReport`] condenses it into the record written to
//! disk: the best run's tour and distance plus every run's figures.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TspError};
use crate::result::SolveResult;
use crate::tour::Tour;

/// Which tours a report describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Starting tours, before any improvement.
    Initial,
    /// Tours returned by the solver.
    Final,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Initial => write!(f, "initial"),
            Phase::Final => write!(f, "final"),
        }
    }
}

/// Parallel per-run figures of repeated runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSeries {
    pub tours: Vec<Tour>,
    pub distances: Vec<f64>,
    /// Wall-clock seconds per run.
    pub runtimes: Vec<f64>,
    pub steps: Vec<usize>,
    pub evaluated: Vec<usize>,
}

impl RunSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one run.
    pub fn push(&mut self, result: SolveResult, elapsed: Duration) {
        self.tours.push(result.best_tour);
        self.distances.push(result.best_distance);
        self.runtimes.push(elapsed.as_secs_f64());
        self.steps.push(result.steps);
        self.evaluated.push(result.evaluated);
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Mean runtime in seconds, 0 for an empty series.
    pub fn average_runtime(&self) -> f64 {
        if self.runtimes.is_empty() {
            0.0
        } else {
            self.runtimes.iter().sum::<f64>() / self.runtimes.len() as f64
        }
    }

    /// Index of the run with the smallest distance (first one on ties).
    pub fn best_index(&self) -> Option<usize> {
        self.distances
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(index, _)| index)
    }
}

/// Persisted summary of a [`RunSeries`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub best_distance: f64,
    pub best_solution: Vec<usize>,
    pub distances: Vec<f64>,
    pub runtimes: Vec<f64>,
    pub steps: Vec<usize>,
    pub evaluated: Vec<usize>,
}

impl RunReport {
    /// Summarizes `series` around its shortest run.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::InvalidInput`] for an empty series.
    pub fn from_series(series: &RunSeries) -> Result<Self> {
        let best = series
            .best_index()
            .ok_or_else(|| TspError::InvalidInput("cannot report an empty run series".into()))?;

        Ok(Self {
            best_distance: series.distances[best],
            best_solution: series.tours[best].as_slice().to_vec(),
            distances: series.distances.clone(),
            runtimes: series.runtimes.clone(),
            steps: series.steps.clone(),
            evaluated: series.evaluated.clone(),
        })
    }
}

/// Writes reports as `<root>/<instance>/<algorithm>_<phase>.json`.
#[derive(Debug, Clone)]
pub struct ReportStore {
    root: PathBuf,
}

impl ReportStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File a report is stored in.
    pub fn path_for(&self, instance: &str, algorithm: &str, phase: Phase) -> PathBuf {
        self.root
            .join(instance)
            .join(format!("{algorithm}_{phase}.json"))
    }

    /// Writes `report`, creating parent directories as needed.
    pub fn write(
        &self,
        instance: &str,
        algorithm: &str,
        phase: Phase,
        report: &RunReport,
    ) -> Result<PathBuf> {
        let path = self.path_for(instance, algorithm, phase);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(writer, report)?;

        debug!(path = %path.display(), best = report.best_distance, "report written");
        Ok(path)
    }

    /// Reads back a stored report.
    pub fn load(&self, instance: &str, algorithm: &str, phase: Phase) -> Result<RunReport> {
        let path = self.path_for(instance, algorithm, phase);
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(order: Vec<usize>, distance: f64, steps: usize) -> SolveResult {
        SolveResult {
            best_tour: Tour::new(order).unwrap(),
            best_distance: distance,
            steps,
            evaluated: steps * 10,
        }
    }

    fn sample_series() -> RunSeries {
        let mut series = RunSeries::new();
        series.push(result(vec![0, 1, 2, 3], 12.0, 3), Duration::from_millis(10));
        series.push(result(vec![1, 0, 3, 2], 9.5, 5), Duration::from_millis(30));
        series.push(result(vec![3, 2, 1, 0], 9.5, 4), Duration::from_millis(20));
        series
    }

    #[test]
    fn test_series_statistics() {
        let series = sample_series();
        assert_eq!(series.len(), 3);
        assert_eq!(series.best_index(), Some(1));
        assert!((series.average_runtime() - 0.02).abs() < 1e-12);
        assert_eq!(RunSeries::new().average_runtime(), 0.0);
    }

    #[test]
    fn test_report_picks_best_run() {
        let report = RunReport::from_series(&sample_series()).unwrap();
        assert_eq!(report.best_distance, 9.5);
        assert_eq!(report.best_solution, vec![1, 0, 3, 2]);
        assert_eq!(report.distances, vec![12.0, 9.5, 9.5]);
        assert_eq!(report.steps, vec![3, 5, 4]);
        assert_eq!(report.evaluated, vec![30, 50, 40]);
    }

    #[test]
    fn test_empty_series_rejected() {
        assert!(matches!(
            RunReport::from_series(&RunSeries::new()),
            Err(TspError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path());
        let report = RunReport::from_series(&sample_series()).unwrap();

        let path = store.write("berlin52", "greedy", Phase::Final, &report).unwrap();
        assert_eq!(path, dir.path().join("berlin52").join("greedy_final.json"));

        let loaded = store.load("berlin52", "greedy", Phase::Final).unwrap();
        assert_eq!(loaded, report);
    }

    #[test]
    fn test_record_field_names() {
        let report = RunReport::from_series(&sample_series()).unwrap();
        let value = serde_json::to_value(&report).unwrap();
        let keys = [
            "best_distance",
            "best_solution",
            "distances",
            "runtimes",
            "steps",
            "evaluated",
        ];
        for key in keys {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_load_missing_report() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path());
        assert!(matches!(
            store.load("x", "greedy", Phase::Initial),
            Err(TspError::Io(_))
        ));
    }
}
