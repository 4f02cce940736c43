//! Monte Carlo density sweep driver
//!
//! For each density in a configured range the driver samples independent
//! random grids, measures each one's burned area with the connectivity
//! kernel, and reduces the per-density sample to a mean and standard
//! deviation. Trials are independent units of work: one trial's failure is
//! counted and logged but never corrupts the rest of its density level.

mod persistence;
mod stats;

// Re-export main types
pub use persistence::{PersistenceError, SweepReport};
pub use stats::SampleStats;

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::grid::{BernoulliSampler, GridSampler};
use crate::percolation::{burned_area, KernelError};

/// How the driver records a trial whose grid has no occupied cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmptyGridPolicy {
    /// Record 0.0 for the trial: a treeless grid burns nothing
    #[default]
    SentinelZero,
    /// Drop the trial from the sample and count it as failed
    Exclude,
}

/// Configuration for one density sweep
///
/// Everything the sweep needs travels in this struct; there is no
/// process-wide simulation state, so concurrent sweeps with different
/// configurations cannot interfere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Density values to sweep, as occupancy probabilities in [0, 1]
    pub densities: Vec<f64>,
    /// Independent grids sampled per density value
    pub trials_per_density: usize,
    /// Grid rows, fixed across the sweep
    pub rows: usize,
    /// Grid columns, fixed across the sweep
    pub cols: usize,
    /// Seed for the default Bernoulli sampler
    pub seed: u64,
    /// Abort the whole sweep on the first failed trial instead of isolating it
    pub strict: bool,
    /// Empty-grid handling policy
    pub empty_grid_policy: EmptyGridPolicy,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            densities: (1..=99).map(|p| f64::from(p) / 100.0).collect(),
            trials_per_density: 50,
            rows: 100,
            cols: 100,
            seed: 42,
            strict: false,
            empty_grid_policy: EmptyGridPolicy::default(),
        }
    }
}

impl SweepConfig {
    fn validate(&self) -> Result<(), SweepError> {
        if self.densities.is_empty() {
            return Err(SweepError::EmptyDensityRange);
        }
        if self.trials_per_density == 0 {
            return Err(SweepError::ZeroTrials);
        }
        if self.rows == 0 || self.cols == 0 {
            return Err(SweepError::InvalidConfig(format!(
                "grid shape {}x{} has a zero dimension",
                self.rows, self.cols
            )));
        }
        if let Some(&bad) = self
            .densities
            .iter()
            .find(|d| !d.is_finite() || !(0.0..=1.0).contains(*d))
        {
            return Err(SweepError::InvalidConfig(format!(
                "density {bad} outside [0, 1]"
            )));
        }
        Ok(())
    }
}

/// Finalized statistics for one density level
///
/// Populated trial by trial, reduced once all trials for the density have
/// completed, and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityLevel {
    /// Occupancy probability for this level
    pub density: f64,
    /// Burned-area percentages from the successful trials
    pub samples: Vec<f64>,
    /// Trials dropped due to sampling failures, kernel failures, or the
    /// empty-grid exclusion policy
    pub failed_trials: usize,
    /// Sample mean of `samples`, 0.0 when every trial failed
    pub mean: f64,
    /// Sample standard deviation of `samples`
    pub std_dev: f64,
}

/// Ordered per-density results of one sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    /// One entry per configured density, in sweep order
    pub levels: Vec<DensityLevel>,
}

impl SweepResult {
    /// Total failed trials across every density level
    pub fn total_failed_trials(&self) -> usize {
        self.levels.iter().map(|l| l.failed_trials).sum()
    }
}

/// Errors from the sweep driver
#[derive(Debug, Clone, PartialEq)]
pub enum SweepError {
    /// The configured density range is empty
    EmptyDensityRange,
    /// Zero trials per density were requested
    ZeroTrials,
    /// A configuration value is out of domain
    InvalidConfig(String),
    /// A trial failed while running in strict mode
    TrialFailed {
        /// Density level of the failing trial
        density: f64,
        /// Zero-based trial index within the level
        trial: usize,
        /// Underlying failure description
        message: String,
    },
}

impl std::fmt::Display for SweepError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SweepError::EmptyDensityRange => write!(f, "Density range is empty"),
            SweepError::ZeroTrials => write!(f, "Trials per density must be positive"),
            SweepError::InvalidConfig(msg) => write!(f, "Invalid sweep configuration: {msg}"),
            SweepError::TrialFailed {
                density,
                trial,
                message,
            } => write!(
                f,
                "Trial {trial} at density {density:.3} failed in strict mode: {message}"
            ),
        }
    }
}

impl std::error::Error for SweepError {}

/// Run a sweep with the default Bernoulli sampler seeded from the config
///
/// # Errors
/// See [`run_sweep`].
pub fn run(config: &SweepConfig) -> Result<SweepResult, SweepError> {
    let mut sampler = BernoulliSampler::new(config.seed);
    run_sweep(config, &mut sampler)
}

/// Run a density sweep with an injected grid sampler
///
/// Densities are processed in configuration order, trials sequentially
/// within each density. With a deterministic sampler the whole sweep is
/// reproducible. In non-strict mode a failing trial is logged, counted on
/// its level, and excluded from the sample; a level where every trial failed
/// is still reported rather than silently dropped.
///
/// # Errors
/// Returns a validation error for an empty density range, zero trials, a
/// zero grid dimension, or a density outside [0, 1]. In strict mode the
/// first failing trial aborts the sweep with [`SweepError::TrialFailed`].
pub fn run_sweep(
    config: &SweepConfig,
    sampler: &mut dyn GridSampler,
) -> Result<SweepResult, SweepError> {
    config.validate()?;

    info!(
        "starting sweep: {} densities, {} trials each, {}x{} grid, seed {}",
        config.densities.len(),
        config.trials_per_density,
        config.rows,
        config.cols,
        config.seed
    );

    let mut levels = Vec::with_capacity(config.densities.len());
    for &density in &config.densities {
        let started = Instant::now();
        let mut samples = Vec::with_capacity(config.trials_per_density);
        let mut failed = 0usize;

        for trial in 0..config.trials_per_density {
            match run_trial(config, sampler, density) {
                Ok(Some(burned)) => samples.push(burned),
                Ok(None) => failed += 1,
                Err(message) => {
                    if config.strict {
                        return Err(SweepError::TrialFailed {
                            density,
                            trial,
                            message,
                        });
                    }
                    warn!("trial {trial} at density {density:.3} failed: {message}");
                    failed += 1;
                }
            }
        }

        let reduced = SampleStats::from_slice(&samples);
        info!(
            "density {:.3}: mean burned {:.2}%, sd {:.2}, {}/{} trials failed, {:.1}ms",
            density,
            reduced.mean,
            reduced.std_dev,
            failed,
            config.trials_per_density,
            started.elapsed().as_secs_f64() * 1000.0
        );

        levels.push(DensityLevel {
            density,
            samples,
            failed_trials: failed,
            mean: reduced.mean,
            std_dev: reduced.std_dev,
        });
    }

    Ok(SweepResult { levels })
}

/// One independent trial: sample a grid, measure its burned area
///
/// `Ok(None)` marks a trial excluded by the empty-grid policy; `Err` carries
/// a genuine sampler or kernel failure.
fn run_trial(
    config: &SweepConfig,
    sampler: &mut dyn GridSampler,
    density: f64,
) -> Result<Option<f64>, String> {
    let grid = sampler
        .sample(config.rows, config.cols, density)
        .map_err(|e| e.to_string())?;

    match burned_area(&grid) {
        Ok(burned) => {
            debug!("density {density:.3}: burned {burned:.2}%");
            Ok(Some(burned))
        }
        Err(KernelError::EmptyGrid) => match config.empty_grid_policy {
            EmptyGridPolicy::SentinelZero => Ok(Some(0.0)),
            EmptyGridPolicy::Exclude => {
                debug!("density {density:.3}: empty grid excluded from sample");
                Ok(None)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_density_range_rejected() {
        let config = SweepConfig {
            densities: vec![],
            ..SweepConfig::default()
        };
        assert_eq!(run(&config), Err(SweepError::EmptyDensityRange));
    }

    #[test]
    fn test_zero_trials_rejected() {
        let config = SweepConfig {
            trials_per_density: 0,
            ..SweepConfig::default()
        };
        assert_eq!(run(&config), Err(SweepError::ZeroTrials));
    }

    #[test]
    fn test_out_of_domain_density_rejected() {
        let config = SweepConfig {
            densities: vec![0.5, 1.5],
            ..SweepConfig::default()
        };
        assert!(matches!(run(&config), Err(SweepError::InvalidConfig(_))));
    }

    #[test]
    fn test_levels_follow_configuration_order() {
        let config = SweepConfig {
            densities: vec![0.9, 0.1, 0.5],
            trials_per_density: 3,
            rows: 8,
            cols: 8,
            ..SweepConfig::default()
        };
        let result = run(&config).unwrap();
        let swept: Vec<f64> = result.levels.iter().map(|l| l.density).collect();
        assert_eq!(swept, vec![0.9, 0.1, 0.5]);
        for level in &result.levels {
            assert_eq!(level.samples.len() + level.failed_trials, 3);
        }
    }

    #[test]
    fn test_density_one_always_burns_everything() {
        let config = SweepConfig {
            densities: vec![1.0],
            trials_per_density: 5,
            rows: 6,
            cols: 6,
            ..SweepConfig::default()
        };
        let result = run(&config).unwrap();
        let level = &result.levels[0];
        assert_eq!(level.failed_trials, 0);
        assert!(level.samples.iter().all(|&b| b == 100.0));
        assert_eq!(level.mean, 100.0);
        assert_eq!(level.std_dev, 0.0);
    }

    #[test]
    fn test_density_zero_with_sentinel_policy() {
        let config = SweepConfig {
            densities: vec![0.0],
            trials_per_density: 4,
            rows: 5,
            cols: 5,
            empty_grid_policy: EmptyGridPolicy::SentinelZero,
            ..SweepConfig::default()
        };
        let result = run(&config).unwrap();
        let level = &result.levels[0];
        assert_eq!(level.failed_trials, 0);
        assert_eq!(level.samples, vec![0.0; 4]);
        assert_eq!(level.mean, 0.0);
    }

    #[test]
    fn test_density_zero_with_exclude_policy() {
        let config = SweepConfig {
            densities: vec![0.0],
            trials_per_density: 4,
            rows: 5,
            cols: 5,
            empty_grid_policy: EmptyGridPolicy::Exclude,
            ..SweepConfig::default()
        };
        let result = run(&config).unwrap();
        let level = &result.levels[0];
        // Every trial excluded, level still reported
        assert_eq!(level.failed_trials, 4);
        assert!(level.samples.is_empty());
        assert_eq!(level.mean, 0.0);
        assert_eq!(result.total_failed_trials(), 4);
    }
}
