//! Sample statistics for per-density burned-area distributions

use serde::{Deserialize, Serialize};

/// Reduced view of one sample of burned-area percentages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleStats {
    /// Number of retained observations
    pub count: usize,
    /// Arithmetic mean, 0.0 for an empty sample
    pub mean: f64,
    /// Sample standard deviation (Bessel-corrected), 0.0 below two observations
    pub std_dev: f64,
}

impl SampleStats {
    /// Reduce a sample to count, mean, and sample standard deviation
    pub fn from_slice(values: &[f64]) -> Self {
        let count = values.len();
        if count == 0 {
            return SampleStats {
                count: 0,
                mean: 0.0,
                std_dev: 0.0,
            };
        }

        let mean = values.iter().sum::<f64>() / count as f64;
        let std_dev = if count < 2 {
            0.0
        } else {
            let variance =
                values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            variance.sqrt()
        };

        SampleStats {
            count,
            mean,
            std_dev,
        }
    }
}
