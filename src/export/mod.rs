//! JSON export of a finished trial set.
//!
//! The export is a report: it snapshots the configuration, the aggregate statistics and every
//! run so a trial set can be inspected or compared later. It is never used to resume a run.

use crate::config::Config;
use crate::evaluation::runs::RunRecord;
use crate::evaluation::statistics::RunStatistics;
use crate::evolution::queens::Queens;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const SCHEMA_VERSION: &str = "1.0.0";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to access export file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to (de)serialize export: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TrialExport {
    /// Schema version for forward/backward compatibility
    pub schema_version: String,
    /// Unix timestamp when export was generated
    pub generated_at: u64,
    /// Snapshot of the configuration the trials ran with
    pub config: Config,
    pub statistics: RunStatistics,
    pub runs: Vec<RunData>,
}

/// One run, flattened for serialization
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunData {
    /// One based, as printed in the console report
    pub run: usize,
    pub seed: Option<u64>,
    pub fitness: u32,
    pub generations: u32,
    pub elapsed_ms: f64,
    /// Row of the queen in each column
    pub queens: Queens,
}

impl From<&RunRecord> for RunData {
    fn from(record: &RunRecord) -> Self {
        Self {
            run: record.run + 1,
            seed: record.seed,
            fitness: record.fitness(),
            generations: record.result.generations,
            elapsed_ms: record.elapsed_ms(),
            queens: record.result.best,
        }
    }
}

impl TrialExport {
    pub fn new(config: &Config, records: &[RunRecord], statistics: RunStatistics) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            generated_at: chrono::Utc::now().timestamp() as u64,
            config: config.clone(),
            statistics,
            runs: records.iter().map(RunData::from).collect(),
        }
    }
}

/// Writes the export to a JSON file.
pub fn write_export_to_json(export: &TrialExport, output_path: &Path) -> Result<(), ExportError> {
    info!("Writing trial export to '{}'", output_path.display());
    let json = serde_json::to_string_pretty(export)?;
    std::fs::write(output_path, json)?;
    Ok(())
}

/// Reads an export back from a JSON file.
pub fn read_export_from_json(input_path: &Path) -> Result<TrialExport, ExportError> {
    let content = std::fs::read_to_string(input_path)?;
    let export: TrialExport = serde_json::from_str(&content)?;
    Ok(export)
}
