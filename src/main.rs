//! A command line benchmark runner for the TSP solvers.

use std::path::PathBuf;
use std::process;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tsp_metaheur::experiment::{run_experiment, Algorithm, ExperimentConfig};
use tsp_metaheur::report::ReportStore;
use tsp_metaheur::{Instance, Result};

fn get_app() -> Command {
    Command::new("tsp-bench")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Runs TSP metaheuristics on TSPLIB instances and stores per-run reports")
        .arg(
            Arg::new("INSTANCE")
                .help("Instance files in TSPLIB format")
                .required(true)
                .num_args(1..)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .help("Directory reports are written to")
                .short('o')
                .long("output")
                .default_value("results")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("config")
                .help("JSON experiment configuration")
                .short('c')
                .long("config")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("repetitions")
                .help("Runs per algorithm")
                .short('r')
                .long("repetitions")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("time-limit-ms")
                .help("Budget of random search and random walk, in milliseconds")
                .short('t')
                .long("time-limit-ms")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("seed")
                .help("Base seed; repetition k uses seed + k")
                .short('s')
                .long("seed")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("algorithms")
                .help("Comma separated algorithms to run")
                .short('a')
                .long("algorithms")
                .value_delimiter(',')
                .action(ArgAction::Append)
                .value_parser(|s: &str| s.parse::<Algorithm>().map_err(|e| e.to_string())),
        )
}

fn build_config(matches: &ArgMatches) -> Result<ExperimentConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => ExperimentConfig::from_file(path)?,
        None => ExperimentConfig::default(),
    };

    if let Some(&repetitions) = matches.get_one::<usize>("repetitions") {
        config = config.with_repetitions(repetitions);
    }
    if let Some(&ms) = matches.get_one::<u64>("time-limit-ms") {
        config = config.with_time_limit_ms(ms);
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config = config.with_seed(seed);
    }
    if let Some(algorithms) = matches.get_many::<Algorithm>("algorithms") {
        config = config.with_algorithms(algorithms.copied().collect());
    }

    config.validate()?;
    Ok(config)
}

fn run(matches: &ArgMatches) -> Result<()> {
    let config = build_config(matches)?;
    let output = matches
        .get_one::<PathBuf>("output")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("results"));
    let store = ReportStore::new(output);

    for path in matches.get_many::<PathBuf>("INSTANCE").into_iter().flatten() {
        let instance = Instance::from_file(path)?;
        let matrix = instance.distance_matrix()?;

        for runs in run_experiment(&instance.name, &matrix, &config, &store)? {
            info!(
                instance = %instance.name,
                algorithm = %runs.algorithm,
                average_runtime = runs.runs.average_runtime(),
                "average runtime (s)"
            );
        }
    }

    info!(output = %store.root().display(), "reports written");
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let matches = get_app().get_matches();

    if let Err(err) = run(&matches) {
        error!(%err, "benchmark failed");
        process::exit(1);
    }
}
