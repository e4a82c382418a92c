//! Criterion benchmarks for the TSP solvers.
//!
//! Uses seeded random Euclidean instances so every sample solves the same
//! problem.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tsp_metaheur::local_search::{LocalSearch, LocalSearchConfig};
use tsp_metaheur::moves::neighborhood;
use tsp_metaheur::sa::{SaConfig, SimulatedAnnealing};
use tsp_metaheur::tabu::{TabuConfig, TabuSearch};
use tsp_metaheur::{DistanceMatrix, Tour};

// ===========================================================================
// Instances
// ===========================================================================

fn random_instance(n: usize, seed: u64) -> DistanceMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let points: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)))
        .collect();
    DistanceMatrix::from_coordinates(&points).unwrap()
}

const SIZES: [usize; 3] = [20, 50, 100];

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_delta_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("delta_scan");

    for &n in &SIZES {
        let matrix = random_instance(n, 1);
        let mut rng = StdRng::seed_from_u64(42);
        let tour = Tour::random(n, &mut rng);
        group.bench_with_input(BenchmarkId::from_parameter(n), &(matrix, tour), |b, (m, t)| {
            b.iter(|| {
                let best = neighborhood(m.len())
                    .map(|mv| mv.delta(black_box(t), m))
                    .fold(f64::INFINITY, f64::min);
                black_box(best)
            })
        });
    }
    group.finish();
}

fn bench_local_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("local_search");
    group.sample_size(10);

    for &n in &SIZES {
        let matrix = random_instance(n, 2);
        let ls = LocalSearch::new(&matrix, &LocalSearchConfig::default().with_seed(42)).unwrap();
        group.bench_function(BenchmarkId::new("greedy", n), |b| {
            b.iter(|| black_box(ls.greedy()))
        });
        group.bench_function(BenchmarkId::new("steepest", n), |b| {
            b.iter(|| black_box(ls.steepest()))
        });
    }
    group.finish();
}

fn bench_sa(c: &mut Criterion) {
    let mut group = c.benchmark_group("sa");
    group.sample_size(10);

    for &n in &SIZES {
        let matrix = random_instance(n, 3);
        group.bench_with_input(BenchmarkId::from_parameter(n), &matrix, |b, m| {
            b.iter(|| {
                let mut sa = SimulatedAnnealing::new(m, SaConfig::default().with_seed(42)).unwrap();
                black_box(sa.run())
            })
        });
    }
    group.finish();
}

fn bench_tabu(c: &mut Criterion) {
    let mut group = c.benchmark_group("tabu");
    group.sample_size(10);

    for &n in &SIZES {
        let matrix = random_instance(n, 4);
        let config = TabuConfig::default().with_max_no_improve(50).with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &(matrix, config), |b, (m, c)| {
            b.iter(|| {
                let mut ts = TabuSearch::new(m, c.clone()).unwrap();
                black_box(ts.run())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_delta_scan, bench_local_search, bench_sa, bench_tabu);
criterion_main!(benches);
