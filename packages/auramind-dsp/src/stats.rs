use serde::{Deserialize, Serialize};

/// Summary statistics of one sample sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub rms: f64,
    /// Third standardized moment (population)
    #[serde(default)]
    pub skewness: f64,
    /// Excess kurtosis (population fourth standardized moment minus 3)
    #[serde(default)]
    pub kurtosis: f64,
}

impl SignalStats {
    /// Statistics over the finite samples. Mean and variance use Welford's
    /// algorithm; the higher moments take a second pass around the final mean.
    /// Non-finite samples are skipped; an empty or all-non-finite input yields zeros.
    pub fn compute(data: &[f64]) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut mean = 0.0;
        let mut m2 = 0.0;
        let mut sum_sq = 0.0;
        let mut count = 0usize;

        for &value in data.iter().filter(|v| v.is_finite()) {
            count += 1;
            min = min.min(value);
            max = max.max(value);
            sum_sq += value * value;

            let delta = value - mean;
            mean += delta / count as f64;
            m2 += delta * (value - mean);
        }

        if count == 0 {
            return Self::default();
        }

        let n = count as f64;
        let variance = if count > 1 { m2 / (n - 1.0) } else { 0.0 };

        // Standardized moments use the population deviation, zero for a flat signal
        let pop_std = (m2 / n).sqrt();
        let (skewness, kurtosis) = if pop_std > 0.0 {
            let (s3, s4) = data
                .iter()
                .filter(|v| v.is_finite())
                .map(|&v| (v - mean) / pop_std)
                .fold((0.0, 0.0), |(s3, s4), z| (s3 + z.powi(3), s4 + z.powi(4)));
            (s3 / n, s4 / n - 3.0)
        } else {
            (0.0, 0.0)
        };

        Self {
            count,
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
            rms: (sum_sq / n).sqrt(),
            skewness,
            kurtosis,
        }
    }
}
