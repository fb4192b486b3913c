use crate::evaluation::runs::RunRecord;
use serde::{Deserialize, Serialize};

/// Arithmetic mean, `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by `n`), `NaN` for an empty slice.
pub fn standard_deviation(values: &[f64]) -> f64 {
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub mean: f64,
    pub std_dev: f64,
}

impl Summary {
    pub fn of(values: &[f64]) -> Self {
        Self {
            mean: mean(values),
            std_dev: standard_deviation(values),
        }
    }
}

/// Aggregate view of a trial set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStatistics {
    pub runs: usize,
    /// Runs whose best board has no attacks
    pub solved: usize,
    /// Elapsed time per run, in milliseconds
    pub time_ms: Summary,
    pub generations: Summary,
}

impl RunStatistics {
    pub fn from_records(records: &[RunRecord]) -> Self {
        let times: Vec<f64> = records.iter().map(RunRecord::elapsed_ms).collect();
        let generations: Vec<f64> = records
            .iter()
            .map(|record| record.result.generations as f64)
            .collect();

        Self {
            runs: records.len(),
            solved: records
                .iter()
                .filter(|record| record.result.is_solution())
                .count(),
            time_ms: Summary::of(&times),
            generations: Summary::of(&generations),
        }
    }

    /// Fraction of runs that found a solution, in `[0, 1]`
    pub fn success_rate(&self) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        self.solved as f64 / self.runs as f64
    }
}
