use crate::config::{GaConfig, RunConfig};
use crate::evolution::{run_once, EvolutionError, RunResult};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use std::time::{Duration, Instant};

/// Outcome of one timed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    /// Zero based ordinal within the trial set
    pub run: usize,
    /// Seed the run's generator was built from, `None` when it came from the OS
    pub seed: Option<u64>,
    pub result: RunResult,
    /// Wall clock time spent inside the generation loop
    pub elapsed: Duration,
}

impl RunRecord {
    pub fn fitness(&self) -> u32 {
        self.result.fitness()
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Seed for run `run`, derived from the base seed so every run gets its own stream.
fn run_seed(base: Option<u64>, run: usize) -> Option<u64> {
    base.map(|seed| seed.wrapping_add(run as u64))
}

/// Runs and times the engine once with a generator of its own.
pub fn run_trial(
    ga_config: &GaConfig,
    run: usize,
    seed: Option<u64>,
) -> Result<RunRecord, EvolutionError> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let start = Instant::now();
    let result = run_once(ga_config, rng)?;
    let elapsed = start.elapsed();

    info!(
        "Run {}: Fitness={} | Generations={} | Time={:.3}ms",
        run + 1,
        result.fitness(),
        result.generations,
        elapsed.as_secs_f64() * 1000.0
    );

    Ok(RunRecord {
        run,
        seed,
        result,
        elapsed,
    })
}

/// Performs `run_config.count` independent runs.
///
/// Each run owns its population and generator, so the records are the same whether the runs
/// execute one after the other or on the rayon pool. Records come back in run order.
///
/// # Arguments
/// * `ga_config` - Parameters shared by every run
/// * `run_config` - Number of runs, base seed and whether to run them in parallel
///
/// # Returns
/// `Result<Vec<RunRecord>, EvolutionError>`, the first failing run aborts the whole set
pub fn run_trials(
    ga_config: &GaConfig,
    run_config: &RunConfig,
) -> Result<Vec<RunRecord>, EvolutionError> {
    info!(
        "Starting {} runs ({})",
        run_config.count,
        if run_config.parallel {
            "parallel"
        } else {
            "sequential"
        }
    );

    if run_config.parallel {
        (0..run_config.count)
            .into_par_iter()
            .map(|run| run_trial(ga_config, run, run_seed(run_config.seed, run)))
            .collect()
    } else {
        (0..run_config.count)
            .map(|run| run_trial(ga_config, run, run_seed(run_config.seed, run)))
            .collect()
    }
}
