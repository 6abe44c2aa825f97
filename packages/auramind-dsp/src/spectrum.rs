//! Band power decomposition
//!
//! Splits a sample sequence into relative power in the canonical EEG bands.
//! The default [`SpectrumMethod::IndexBucket`] estimator treats sample index `i` of
//! an `N`-sample sequence as frequency `i * fs / N`; downstream metric thresholds are
//! calibrated to it. [`SpectrumMethod::Fft`] is a Hann-windowed periodogram for
//! callers that want a true spectral estimate.

use rustfft::{num_complex::Complex, FftPlanner};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Canonical EEG frequency band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EegBand {
    Delta,
    Theta,
    Alpha,
    Beta,
    Gamma,
}

impl EegBand {
    pub const ALL: [EegBand; 5] = [
        EegBand::Delta,
        EegBand::Theta,
        EegBand::Alpha,
        EegBand::Beta,
        EegBand::Gamma,
    ];

    /// `(low, high)` bounds in Hz
    pub fn range(self) -> (f64, f64) {
        match self {
            EegBand::Delta => (0.5, 4.0),
            EegBand::Theta => (4.0, 8.0),
            EegBand::Alpha => (8.0, 13.0),
            EegBand::Beta => (13.0, 30.0),
            EegBand::Gamma => (30.0, 100.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EegBand::Delta => "delta",
            EegBand::Theta => "theta",
            EegBand::Alpha => "alpha",
            EegBand::Beta => "beta",
            EegBand::Gamma => "gamma",
        }
    }

    fn contains_inclusive(self, freq: f64) -> bool {
        let (lo, hi) = self.range();
        freq >= lo && freq <= hi
    }

    fn contains_half_open(self, freq: f64) -> bool {
        let (lo, hi) = self.range();
        freq >= lo && freq < hi
    }
}

/// Band power estimator selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpectrumMethod {
    /// Sample index as a frequency proxy (dashboard-compatible)
    #[default]
    IndexBucket,
    /// Hann-windowed FFT periodogram
    Fft,
}

/// Relative power per band. Sums to 1 when any banded power is present; every
/// field is NaN when the banded total is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BandPowers {
    pub delta: f64,
    pub theta: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl BandPowers {
    pub fn get(&self, band: EegBand) -> f64 {
        match band {
            EegBand::Delta => self.delta,
            EegBand::Theta => self.theta,
            EegBand::Alpha => self.alpha,
            EegBand::Beta => self.beta,
            EegBand::Gamma => self.gamma,
        }
    }

    fn get_mut(&mut self, band: EegBand) -> &mut f64 {
        match band {
            EegBand::Delta => &mut self.delta,
            EegBand::Theta => &mut self.theta,
            EegBand::Alpha => &mut self.alpha,
            EegBand::Beta => &mut self.beta,
            EegBand::Gamma => &mut self.gamma,
        }
    }

    pub fn total(&self) -> f64 {
        self.delta + self.theta + self.alpha + self.beta + self.gamma
    }

    pub fn is_finite(&self) -> bool {
        EegBand::ALL.iter().all(|&b| self.get(b).is_finite())
    }

    /// Non-finite fractions become 0, everything else is clamped into [0, 1]
    pub fn sanitized(&self) -> Self {
        let mut out = *self;
        for band in EegBand::ALL {
            let v = out.get_mut(band);
            *v = if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        }
        out
    }

    /// Divide accumulated power by the banded total. A zero total is not guarded.
    fn normalized(&self) -> Self {
        let total = self.total();
        if !(total > 0.0) {
            log::warn!("Banded power total is {}; fractions are not finite", total);
        }
        Self {
            delta: self.delta / total,
            theta: self.theta / total,
            alpha: self.alpha / total,
            beta: self.beta / total,
            gamma: self.gamma / total,
        }
    }
}

/// Relative band power with the index-as-frequency estimator
pub fn power_spectrum(samples: &[f64], sample_rate: f64) -> BandPowers {
    power_spectrum_with(samples, sample_rate, SpectrumMethod::IndexBucket)
}

pub fn power_spectrum_with(samples: &[f64], sample_rate: f64, method: SpectrumMethod) -> BandPowers {
    match method {
        SpectrumMethod::IndexBucket => index_bucket(samples, sample_rate),
        SpectrumMethod::Fft => fft_periodogram(samples, sample_rate),
    }
}

// Bands are tested alpha, beta, theta, delta, gamma with inclusive bounds, so a
// shared edge (8, 13, 30 Hz) goes to the first band that claims it.
const BUCKET_ORDER: [EegBand; 5] = [
    EegBand::Alpha,
    EegBand::Beta,
    EegBand::Theta,
    EegBand::Delta,
    EegBand::Gamma,
];

fn index_bucket(samples: &[f64], sample_rate: f64) -> BandPowers {
    let n = samples.len() as f64;
    let mut acc = BandPowers::default();

    for (i, &sample) in samples.iter().enumerate() {
        let freq = (i as f64 * sample_rate) / n;
        let power = sample.abs().powi(2);
        if let Some(band) = BUCKET_ORDER.iter().find(|b| b.contains_inclusive(freq)) {
            *acc.get_mut(*band) += power;
        }
    }

    acc.normalized()
}

fn fft_periodogram(samples: &[f64], sample_rate: f64) -> BandPowers {
    let mut acc = BandPowers::default();
    if samples.is_empty() {
        return acc.normalized();
    }

    let n = samples.len().next_power_of_two();
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);

    let mut buffer: Vec<Complex<f64>> = samples
        .iter()
        .zip(hann_window(samples.len()))
        .map(|(&x, w)| Complex::new(x * w, 0.0))
        .collect();
    buffer.resize(n, Complex::new(0.0, 0.0));

    fft.process(&mut buffer);

    let resolution = sample_rate / n as f64;
    for (k, bin) in buffer.iter().take(n / 2 + 1).enumerate() {
        let freq = k as f64 * resolution;
        if let Some(band) = EegBand::ALL.iter().find(|b| b.contains_half_open(freq)) {
            *acc.get_mut(*band) += bin.norm_sqr();
        }
    }

    acc.normalized()
}

fn hann_window(len: usize) -> Vec<f64> {
    if len < 2 {
        return vec![1.0; len];
    }
    let denom = (len - 1) as f64;
    (0..len)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f64 / denom).cos()))
        .collect()
}
