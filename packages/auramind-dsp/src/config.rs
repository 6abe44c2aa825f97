use crate::error::{DspError, Result};
use crate::filters::DEFAULT_Q;
use crate::spectrum::SpectrumMethod;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for one filtering + analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Sample rate of the data (Hz), used for filtering
    #[serde(default = "default_sample_rate")]
    pub sample_rate: f64,

    /// Enable the band-pass cascade
    #[serde(default = "default_true")]
    pub filter_enabled: bool,

    /// Low cutoff of the passband (Hz)
    #[serde(default = "default_low_hz")]
    pub low_hz: f64,

    /// High cutoff of the passband (Hz)
    #[serde(default = "default_high_hz")]
    pub high_hz: f64,

    /// Q of each band-pass section
    #[serde(default = "default_q")]
    pub q: f64,

    /// Enable notch filter ahead of the band-pass
    #[serde(default)]
    pub notch_enabled: bool,

    /// Notch filter frequency (typically 50 or 60 Hz)
    #[serde(default = "default_notch_frequency")]
    pub notch_frequency: f64,

    /// Q factor for notch filter (higher = narrower)
    #[serde(default = "default_notch_q")]
    pub notch_q: f64,

    /// Derive metrics from the filtered sequence (raw samples otherwise)
    #[serde(default = "default_true")]
    pub analyze_filtered: bool,

    #[serde(default)]
    pub spectrum_method: SpectrumMethod,

    /// Rate assumed when bucketing samples into bands. Fixed at 256 Hz by default,
    /// independent of `sample_rate`, to keep metric values comparable across runs.
    #[serde(default = "default_sample_rate")]
    pub analysis_sample_rate: f64,

    /// Interpolate over samples whose |z-score| exceeds this value, after filtering
    #[serde(default)]
    pub artifact_threshold: Option<f64>,

    /// Replace non-finite band fractions with zero before deriving metrics
    #[serde(default)]
    pub guard_zero_power: bool,

    /// Upper bound on decoded samples per file
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,

    /// Artificial delay before analysis (milliseconds)
    #[serde(default)]
    pub delay_ms: u64,
}

fn default_sample_rate() -> f64 {
    256.0
}
fn default_true() -> bool {
    true
}
fn default_low_hz() -> f64 {
    0.5
}
fn default_high_hz() -> f64 {
    40.0
}
fn default_q() -> f64 {
    DEFAULT_Q
}
fn default_notch_frequency() -> f64 {
    50.0
}
fn default_notch_q() -> f64 {
    30.0
}
fn default_max_samples() -> usize {
    8000
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_rate: 256.0,
            filter_enabled: true,
            low_hz: 0.5,
            high_hz: 40.0,
            q: DEFAULT_Q,
            notch_enabled: false,
            notch_frequency: 50.0,
            notch_q: 30.0,
            analyze_filtered: true,
            spectrum_method: SpectrumMethod::default(),
            analysis_sample_rate: 256.0,
            artifact_threshold: None,
            guard_zero_power: false,
            max_samples: 8000,
            delay_ms: 0,
        }
    }
}

impl AnalysisConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        log::debug!("Loaded analysis config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Enable power line removal at `powerline_freq` (50 or 60 Hz)
    pub fn with_notch(mut self, powerline_freq: f64) -> Self {
        self.notch_enabled = true;
        self.notch_frequency = powerline_freq;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, rate) in [
            ("sample_rate", self.sample_rate),
            ("analysis_sample_rate", self.analysis_sample_rate),
        ] {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(DspError::Config(format!(
                    "{} must be a positive finite number, got {}",
                    name, rate
                )));
            }
        }
        if !self.low_hz.is_finite() || self.low_hz < 0.0 {
            return Err(DspError::Config(format!(
                "low_hz must be non-negative, got {}",
                self.low_hz
            )));
        }
        if !self.high_hz.is_finite() || self.high_hz < 0.0 {
            return Err(DspError::Config(format!(
                "high_hz must be non-negative, got {}",
                self.high_hz
            )));
        }
        if !(self.q > 0.0) || !(self.notch_q > 0.0) {
            return Err(DspError::Config("Q factors must be positive".to_string()));
        }
        if self.notch_enabled && !(self.notch_frequency > 0.0) {
            return Err(DspError::Config(format!(
                "notch_frequency must be positive, got {}",
                self.notch_frequency
            )));
        }
        if let Some(threshold) = self.artifact_threshold {
            if !threshold.is_finite() || threshold <= 0.0 {
                return Err(DspError::Config(format!(
                    "artifact_threshold must be a positive finite number, got {}",
                    threshold
                )));
            }
        }
        if self.max_samples == 0 {
            return Err(DspError::Config("max_samples must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_dashboard() {
        let config = AnalysisConfig::default();
        assert_eq!(config.sample_rate, 256.0);
        assert!(config.filter_enabled);
        assert_eq!(config.low_hz, 0.5);
        assert_eq!(config.high_hz, 40.0);
        assert_eq!(config.analysis_sample_rate, 256.0);
        assert_eq!(config.spectrum_method, SpectrumMethod::IndexBucket);
        assert!(!config.guard_zero_power);
        assert!(config.analyze_filtered);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"low_hz": 1.0, "spectrum_method": "fft"}"#).unwrap();
        assert_eq!(config.low_hz, 1.0);
        assert_eq!(config.high_hz, 40.0);
        assert_eq!(config.spectrum_method, SpectrumMethod::Fft);
        assert_eq!(config.max_samples, 8000);
    }

    #[test]
    fn test_validate_rejects_bad_rates() {
        let mut config = AnalysisConfig::default();
        config.sample_rate = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.q = 0.0;
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.max_samples = 0;
        assert!(config.validate().is_err());

        for threshold in [0.0, -1.0, f64::NAN] {
            let mut config = AnalysisConfig::default();
            config.artifact_threshold = Some(threshold);
            assert!(config.validate().is_err(), "threshold {}", threshold);
        }
    }

    #[test]
    fn test_artifact_threshold_from_json() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"artifact_threshold": 3.0}"#).unwrap();
        assert_eq!(config.artifact_threshold, Some(3.0));
        assert!(config.validate().is_ok());
        assert_eq!(AnalysisConfig::default().artifact_threshold, None);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"sample_rate": 512.0, "notch_enabled": true}"#).unwrap();

        let config = AnalysisConfig::from_file(&path).unwrap();
        assert_eq!(config.sample_rate, 512.0);
        assert!(config.notch_enabled);
        assert_eq!(config.notch_frequency, 50.0);

        std::fs::write(&path, r#"{"sample_rate": -1.0}"#).unwrap();
        assert!(AnalysisConfig::from_file(&path).is_err());
    }
}
