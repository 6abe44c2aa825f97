use crate::config::AnalysisConfig;
use crate::spectrum::BandPowers;
use crate::stats::SignalStats;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A decoded sample sequence with its sample rate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    /// Where the samples came from (file path or label)
    pub source: String,
    pub samples: Vec<f64>,
    /// Sample rate in Hz (256 when the producer cannot tell)
    pub sample_rate: f64,
}

impl Recording {
    pub fn new(source: impl Into<String>, samples: Vec<f64>, sample_rate: f64) -> Self {
        Self {
            source: source.into(),
            samples,
            sample_rate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CognitiveLoad {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StressLevel {
    Normal,
    Elevated,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl RiskLevel {
    /// Thresholds: <10, <25, <50, <75, else. A NaN score maps to `VeryHigh`.
    pub fn from_score(score: f64) -> Self {
        if score < 10.0 {
            RiskLevel::VeryLow
        } else if score < 25.0 {
            RiskLevel::Low
        } else if score < 50.0 {
            RiskLevel::Medium
        } else if score < 75.0 {
            RiskLevel::High
        } else {
            RiskLevel::VeryHigh
        }
    }
}

impl fmt::Display for CognitiveLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CognitiveLoad::Low => "Low",
            CognitiveLoad::Moderate => "Moderate",
            CognitiveLoad::High => "High",
        })
    }
}

impl fmt::Display for StressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StressLevel::Normal => "Normal",
            StressLevel::Elevated => "Elevated",
            StressLevel::High => "High",
        })
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskLevel::VeryLow => "Very Low",
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
        })
    }
}

/// Sleep stage split in percent. `light` is `100 - rem - deep` and is not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SleepStages {
    pub rem: f64,
    pub deep: f64,
    pub light: f64,
}

/// Dashboard metrics derived from one sample sequence.
///
/// Scores are whole numbers stored as `f64` so that a zero banded power total
/// propagates as NaN instead of being coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetrics {
    pub anomalies: f64,
    pub sleep_stages: SleepStages,
    pub seizure_risk_pct: f64,
    pub cognitive_load: CognitiveLoad,
    pub stress_level: StressLevel,
    /// Band powers in percent, one decimal
    pub alpha_power: f64,
    pub beta_power: f64,
    pub theta_power: f64,
    pub delta_power: f64,
    pub gamma_power: f64,
    pub coherence: f64,
    pub asymmetry: f64,
    pub schizophrenia_risk: f64,
    pub schizophrenia_risk_level: RiskLevel,
}

/// Complete result of one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: String,
    pub source: String,
    pub sample_rate: f64,
    pub sample_count: usize,
    pub config: AnalysisConfig,
    pub raw_stats: SignalStats,
    pub filtered_stats: Option<SignalStats>,
    /// Unrounded fractions the metrics were derived from
    pub band_powers: BandPowers,
    pub metrics: AnalysisMetrics,
    pub created_at: String,
}

impl AnalysisReport {
    pub fn new(
        source: String,
        sample_rate: f64,
        sample_count: usize,
        config: AnalysisConfig,
        band_powers: BandPowers,
        metrics: AnalysisMetrics,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            source,
            sample_rate,
            sample_count,
            config,
            raw_stats: SignalStats::default(),
            filtered_stats: None,
            band_powers,
            metrics,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn with_stats(mut self, raw: SignalStats, filtered: Option<SignalStats>) -> Self {
        self.raw_stats = raw;
        self.filtered_stats = filtered;
        self
    }
}
