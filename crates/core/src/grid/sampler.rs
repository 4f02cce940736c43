//! Bernoulli occupancy sampling for Monte Carlo trials

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Grid, GridError};

/// Capability that produces one random occupancy grid per trial
///
/// The sweep driver depends on this trait rather than a concrete generator,
/// so tests can inject deterministic or failing samplers.
pub trait GridSampler {
    /// Sample a `rows x cols` grid where each cell is independently occupied
    /// with probability `density`.
    ///
    /// # Errors
    /// Returns a [`GridError`] when the shape or density is invalid, or when
    /// the underlying source cannot produce a grid.
    fn sample(&mut self, rows: usize, cols: usize, density: f64) -> Result<Grid, GridError>;
}

/// Seeded Bernoulli grid sampler
///
/// One generator drives the whole sweep; together with the fixed trial order
/// this makes every sweep reproducible from its seed.
pub struct BernoulliSampler {
    rng: StdRng,
}

impl BernoulliSampler {
    /// Create a sampler seeded for reproducibility
    pub fn new(seed: u64) -> Self {
        BernoulliSampler {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl GridSampler for BernoulliSampler {
    fn sample(&mut self, rows: usize, cols: usize, density: f64) -> Result<Grid, GridError> {
        if !density.is_finite() || !(0.0..=1.0).contains(&density) {
            return Err(GridError::InvalidDensity(density));
        }
        if rows == 0 || cols == 0 {
            return Err(GridError::ZeroDimension { rows, cols });
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for _ in 0..rows * cols {
            cells.push(u8::from(self.rng.random::<f64>() < density));
        }

        Grid::from_cells(rows, cols, cells)
    }
}
