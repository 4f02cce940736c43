//! Sweep report persistence and export
//!
//! A report carries the generating configuration alongside the raw
//! per-trial samples, so a finished run can be re-reduced or re-plotted
//! without re-simulating. Full reports round-trip through JSON; the reduced
//! density table exports as CSV for plotting tools.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{SweepConfig, SweepResult};

/// A completed sweep with its configuration and timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Configuration that produced the result
    pub config: SweepConfig,
    /// Per-density levels with raw samples and reduced statistics
    pub result: SweepResult,
    /// Completion timestamp
    pub recorded_at: DateTime<Utc>,
}

impl SweepReport {
    /// Wrap a finished sweep, stamping the current time
    pub fn new(config: SweepConfig, result: SweepResult) -> Self {
        SweepReport {
            config,
            result,
            recorded_at: Utc::now(),
        }
    }

    /// Load a report from a JSON file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let contents =
            fs::read_to_string(path).map_err(|e| PersistenceError::LoadFailed(e.to_string()))?;

        let report: Self = serde_json::from_str(&contents)
            .map_err(|e| PersistenceError::ParseFailed(e.to_string()))?;

        Ok(report)
    }

    /// Save the report as pretty-printed JSON
    ///
    /// # Errors
    /// Returns error if the report cannot be serialized or written
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PersistenceError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PersistenceError::SerializeFailed(e.to_string()))?;

        fs::write(path, contents).map_err(|e| PersistenceError::SaveFailed(e.to_string()))?;

        Ok(())
    }

    /// Write the reduced density table as CSV
    ///
    /// One row per density level with the retained trial count, failures,
    /// mean burned percentage, and sample standard deviation. Raw samples
    /// stay in the JSON report.
    ///
    /// # Errors
    /// Returns error if the file cannot be written
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), PersistenceError> {
        let file = File::create(path).map_err(|e| PersistenceError::SaveFailed(e.to_string()))?;
        let mut out = BufWriter::new(file);

        writeln!(out, "density,trials,failed,mean_burned,std_dev")
            .map_err(|e| PersistenceError::SaveFailed(e.to_string()))?;
        for level in &self.result.levels {
            writeln!(
                out,
                "{},{},{},{},{}",
                level.density,
                level.samples.len(),
                level.failed_trials,
                level.mean,
                level.std_dev
            )
            .map_err(|e| PersistenceError::SaveFailed(e.to_string()))?;
        }

        out.flush()
            .map_err(|e| PersistenceError::SaveFailed(e.to_string()))?;

        Ok(())
    }
}

/// Errors that can occur with persistence operations
#[derive(Debug)]
pub enum PersistenceError {
    /// Failed to load file
    LoadFailed(String),
    /// Failed to parse file contents
    ParseFailed(String),
    /// Failed to serialize report
    SerializeFailed(String),
    /// Failed to save file
    SaveFailed(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceError::LoadFailed(msg) => write!(f, "Failed to load: {msg}"),
            PersistenceError::ParseFailed(msg) => write!(f, "Failed to parse: {msg}"),
            PersistenceError::SerializeFailed(msg) => write!(f, "Failed to serialize: {msg}"),
            PersistenceError::SaveFailed(msg) => write!(f, "Failed to save: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}
