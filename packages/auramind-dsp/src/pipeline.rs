//! Preprocessing Pipeline
//!
//! Orchestrates filtering of a sample sequence:
//! 1. Notch filter (power line noise removal, optional)
//! 2. Band-pass filter (high-pass at `low_hz`, then low-pass at `high_hz`)
//! 3. Artifact interpolation (optional, see [`crate::artifacts`])
//!
//! Filtering never resamples: the output always has the input's length.

use crate::artifacts::remove_artifacts;
use crate::config::AnalysisConfig;
use crate::filters::{BiquadCoeffs, SosFilter, DEFAULT_Q};
use rayon::prelude::*;

/// Lowest cutoff the band-pass will design a section for (Hz)
const MIN_LOW_HZ: f64 = 0.001;
/// Minimum width of the clamped passband (Hz)
const MIN_BANDWIDTH_HZ: f64 = 0.1;

/// True when `samples`/`sample_rate` cannot be filtered and must pass through
fn is_degenerate(samples: &[f64], sample_rate: f64) -> bool {
    samples.is_empty() || !sample_rate.is_finite() || sample_rate <= 1.0
}

/// Clamp a requested passband into `[0.001, nyquist - 1]` with `high > low` by at
/// least 0.1 Hz, whatever the caller asked for.
pub fn clamp_band(sample_rate: f64, low_hz: f64, high_hz: f64) -> (f64, f64) {
    let ceiling = sample_rate / 2.0 - 1.0;
    let low = MIN_LOW_HZ.max(low_hz.min(ceiling));
    let high = (low + MIN_BANDWIDTH_HZ).max(high_hz.min(ceiling));
    (low, high)
}

/// Band-pass `samples` to `[low_hz, high_hz]` with a Butterworth-Q high-pass followed
/// by a low-pass section.
///
/// Empty input, or a sample rate that is not finite or is `<= 1`, is returned
/// unchanged.
pub fn bandpass(samples: &[f64], sample_rate: f64, low_hz: f64, high_hz: f64) -> Vec<f64> {
    if is_degenerate(samples, sample_rate) {
        log::warn!(
            "Band-pass skipped ({} samples at {} Hz)",
            samples.len(),
            sample_rate
        );
        return samples.to_vec();
    }

    let (low, high) = clamp_band(sample_rate, low_hz, high_hz);
    log::debug!(
        "Band-pass {}-{} Hz (requested {}-{} Hz) at {} Hz",
        low,
        high,
        low_hz,
        high_hz,
        sample_rate
    );

    let mut cascade = SosFilter::new(vec![
        BiquadCoeffs::highpass(sample_rate, low, DEFAULT_Q),
        BiquadCoeffs::lowpass(sample_rate, high, DEFAULT_Q),
    ]);
    cascade.filter(samples)
}

/// Preprocessing pipeline built from an [`AnalysisConfig`].
///
/// Holds only the configuration; each call designs fresh sections so concurrent
/// callers never share filter history.
#[derive(Debug, Clone)]
pub struct PreprocessingPipeline {
    config: AnalysisConfig,
}

impl PreprocessingPipeline {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Design the cascade for `sample_rate`; `None` when no stage is enabled or the
    /// input is degenerate.
    pub fn build_filter(&self, sample_rate: f64) -> Option<SosFilter> {
        if !sample_rate.is_finite() || sample_rate <= 1.0 {
            return None;
        }
        let config = &self.config;
        let mut cascade = SosFilter::default();

        if config.notch_enabled {
            if config.notch_frequency < sample_rate / 2.0 {
                cascade.push(BiquadCoeffs::notch(
                    sample_rate,
                    config.notch_frequency,
                    config.notch_q,
                ));
            } else {
                log::debug!(
                    "Notch at {} Hz skipped: not below Nyquist ({} Hz)",
                    config.notch_frequency,
                    sample_rate / 2.0
                );
            }
        }

        if config.filter_enabled {
            let (low, high) = clamp_band(sample_rate, config.low_hz, config.high_hz);
            cascade.push(BiquadCoeffs::highpass(sample_rate, low, config.q));
            cascade.push(BiquadCoeffs::lowpass(sample_rate, high, config.q));
        }

        (!cascade.is_empty()).then_some(cascade)
    }

    /// Filter one sequence, then interpolate artifacts if configured (original unchanged)
    pub fn process(&self, samples: &[f64], sample_rate: f64) -> Vec<f64> {
        if samples.is_empty() {
            return Vec::new();
        }
        let filtered = match self.build_filter(sample_rate) {
            Some(mut cascade) => cascade.filter(samples),
            None => samples.to_vec(),
        };
        match self.config.artifact_threshold {
            Some(threshold) => remove_artifacts(&filtered, threshold),
            None => filtered,
        }
    }

    /// Filter independent sequences in parallel
    pub fn process_batch(&self, channels: &[Vec<f64>], sample_rate: f64) -> Vec<Vec<f64>> {
        channels
            .par_iter()
            .map(|channel| self.process(channel, sample_rate))
            .collect()
    }
}
