//! Dashboard metrics
//!
//! Fixed arithmetic over band power fractions plus the signal's mean absolute
//! amplitude ("energy") and its spread around that value ("variance").

use crate::config::AnalysisConfig;
use crate::error::{DspError, Result};
use crate::pipeline::PreprocessingPipeline;
use crate::spectrum::{power_spectrum, power_spectrum_with, BandPowers};
use crate::stats::SignalStats;
use crate::types::{
    AnalysisMetrics, AnalysisReport, CognitiveLoad, Recording, RiskLevel, SleepStages,
    StressLevel,
};
use rayon::prelude::*;

/// Rate assumed by [`run_basic_analysis`] regardless of the data's own rate
pub const ANALYSIS_SAMPLE_RATE: f64 = 256.0;

/// Round half up (towards +inf), NaN stays NaN.
///
/// Exact for `0.49999999999999994` and odd integers above 2^52, where
/// `floor(x + 0.5)` rounds up.
fn round(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Fraction to percent with one decimal
fn percent(fraction: f64) -> f64 {
    round(fraction * 1000.0) / 10.0
}

/// Derive the dashboard metrics for `samples` assuming a 256 Hz sample rate.
///
/// Callers must not pass an empty sequence; doing so yields NaN band metrics.
pub fn run_basic_analysis(samples: &[f64]) -> AnalysisMetrics {
    derive_metrics(samples, &power_spectrum(samples, ANALYSIS_SAMPLE_RATE))
}

/// Metrics from precomputed band fractions
pub fn derive_metrics(samples: &[f64], p: &BandPowers) -> AnalysisMetrics {
    let n = samples.len().max(1) as f64;
    let energy = samples.iter().map(|v| v.abs()).sum::<f64>() / n;
    let variance = samples.iter().map(|v| (v - energy).powi(2)).sum::<f64>() / n;

    let anomalies = round(((variance * 100.0) % 10.0).clamp(0.0, 10.0));
    let seizure_risk_pct = round((p.gamma * 200.0 + variance * 50.0).clamp(0.0, 100.0));

    let load_ratio = p.beta / p.theta.max(0.01);
    let cognitive_load = if load_ratio > 1.5 {
        CognitiveLoad::High
    } else if load_ratio > 0.8 {
        CognitiveLoad::Moderate
    } else {
        CognitiveLoad::Low
    };

    let stress_level = if p.beta > 0.4 || energy > 0.8 {
        StressLevel::High
    } else if p.beta > 0.25 || energy > 0.5 {
        StressLevel::Elevated
    } else {
        StressLevel::Normal
    };

    let rem = round((p.alpha * 100.0).clamp(15.0, 30.0));
    let deep = round((p.delta * 100.0).clamp(10.0, 25.0));
    let sleep_stages = SleepStages {
        rem,
        deep,
        light: round(100.0 - rem - deep),
    };

    let coherence = round(((1.0 - variance) * 100.0).clamp(0.0, 100.0));
    let asymmetry = round(((p.alpha - p.beta).abs() * 200.0).clamp(0.0, 100.0));

    let schizophrenia_risk = round(
        (anomalies * 8.0
            + p.gamma * 150.0
            + p.theta * 100.0
            + asymmetry * 0.3
            + (1.0 - coherence) * 50.0)
            .clamp(0.0, 100.0),
    );

    log::debug!(
        "energy={:.4} variance={:.4} risk={}",
        energy,
        variance,
        schizophrenia_risk
    );

    AnalysisMetrics {
        anomalies,
        sleep_stages,
        seizure_risk_pct,
        cognitive_load,
        stress_level,
        alpha_power: percent(p.alpha),
        beta_power: percent(p.beta),
        theta_power: percent(p.theta),
        delta_power: percent(p.delta),
        gamma_power: percent(p.gamma),
        coherence,
        asymmetry,
        schizophrenia_risk,
        schizophrenia_risk_level: RiskLevel::from_score(schizophrenia_risk),
    }
}

/// Filtering + metrics driven by an [`AnalysisConfig`]
#[derive(Debug, Clone)]
pub struct Analyzer {
    pipeline: PreprocessingPipeline,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            pipeline: PreprocessingPipeline::new(config),
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        self.pipeline.config()
    }

    /// Filtered view of `recording`, or its raw samples when every stage is disabled
    pub fn filtered(&self, recording: &Recording) -> Vec<f64> {
        self.pipeline.process(&recording.samples, recording.sample_rate)
    }

    pub fn analyze(&self, recording: &Recording) -> Result<AnalysisReport> {
        if recording.samples.is_empty() {
            return Err(DspError::EmptySignal);
        }
        let config = self.config();

        let filtering =
            config.filter_enabled || config.notch_enabled || config.artifact_threshold.is_some();
        let filtered = filtering.then(|| self.filtered(recording));
        let input = match (&filtered, config.analyze_filtered) {
            (Some(f), true) => f.as_slice(),
            _ => recording.samples.as_slice(),
        };

        let mut powers =
            power_spectrum_with(input, config.analysis_sample_rate, config.spectrum_method);
        if config.guard_zero_power && !powers.is_finite() {
            log::warn!("{}: no banded power, fractions set to zero", recording.source);
            powers = powers.sanitized();
        }
        let metrics = derive_metrics(input, &powers);

        log::info!(
            "{}: {} samples, risk {} ({})",
            recording.source,
            recording.samples.len(),
            metrics.schizophrenia_risk,
            metrics.schizophrenia_risk_level
        );

        Ok(AnalysisReport::new(
            recording.source.clone(),
            recording.sample_rate,
            recording.samples.len(),
            config.clone(),
            powers,
            metrics,
        )
        .with_stats(
            SignalStats::compute(&recording.samples),
            filtered.as_deref().map(SignalStats::compute),
        ))
    }

    /// Analyze independent recordings in parallel
    pub fn analyze_batch(&self, recordings: &[Recording]) -> Vec<Result<AnalysisReport>> {
        recordings.par_iter().map(|r| self.analyze(r)).collect()
    }
}
