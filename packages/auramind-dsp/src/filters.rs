//! Digital Filter Sections
//!
//! Second-order IIR sections (biquads) designed from the RBJ audio cookbook:
//! - Low-pass and high-pass sections for band-pass cascades
//! - Notch sections for power line interference (50/60 Hz)
//!
//! Coefficients are stored un-normalized. Division by `a0` happens when a section
//! is instantiated for a streaming pass, so `a0` is never assumed to be 1.

use crate::error::{DspError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// Maximally flat (Butterworth) Q for a single section
pub const DEFAULT_Q: f64 = FRAC_1_SQRT_2;

/// Second-order section coefficients
/// Transfer function: H(z) = (b0 + b1*z^-1 + b2*z^-2) / (a0 + a1*z^-1 + a2*z^-2)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiquadCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a0: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoeffs {
    /// Design a low-pass section.
    ///
    /// No validation is performed; callers must keep `0 < cutoff_hz < sample_rate / 2`
    /// and `q > 0`. See [`BiquadCoeffs::checked_lowpass`] for the validating variant.
    pub fn lowpass(sample_rate: f64, cutoff_hz: f64, q: f64) -> Self {
        let (cos_w0, alpha) = Self::angular(sample_rate, cutoff_hz, q);
        Self {
            b0: (1.0 - cos_w0) / 2.0,
            b1: 1.0 - cos_w0,
            b2: (1.0 - cos_w0) / 2.0,
            a0: 1.0 + alpha,
            a1: -2.0 * cos_w0,
            a2: 1.0 - alpha,
        }
    }

    /// Design a high-pass section (same feedback taps as [`BiquadCoeffs::lowpass`])
    pub fn highpass(sample_rate: f64, cutoff_hz: f64, q: f64) -> Self {
        let (cos_w0, alpha) = Self::angular(sample_rate, cutoff_hz, q);
        Self {
            b0: (1.0 + cos_w0) / 2.0,
            b1: -(1.0 + cos_w0),
            b2: (1.0 + cos_w0) / 2.0,
            a0: 1.0 + alpha,
            a1: -2.0 * cos_w0,
            a2: 1.0 - alpha,
        }
    }

    /// Design a notch (band-reject) section centered on `center_hz`
    ///
    /// # Arguments
    /// * `sample_rate` - Sampling rate (Hz)
    /// * `center_hz` - Frequency to remove (Hz)
    /// * `q` - Quality factor (higher = narrower notch, typical: 30)
    pub fn notch(sample_rate: f64, center_hz: f64, q: f64) -> Self {
        let (cos_w0, alpha) = Self::angular(sample_rate, center_hz, q);
        Self {
            b0: 1.0,
            b1: -2.0 * cos_w0,
            b2: 1.0,
            a0: 1.0 + alpha,
            a1: -2.0 * cos_w0,
            a2: 1.0 - alpha,
        }
    }

    pub fn checked_lowpass(sample_rate: f64, cutoff_hz: f64, q: f64) -> Result<Self> {
        Self::validate(sample_rate, cutoff_hz, q)?;
        Ok(Self::lowpass(sample_rate, cutoff_hz, q))
    }

    pub fn checked_highpass(sample_rate: f64, cutoff_hz: f64, q: f64) -> Result<Self> {
        Self::validate(sample_rate, cutoff_hz, q)?;
        Ok(Self::highpass(sample_rate, cutoff_hz, q))
    }

    pub fn checked_notch(sample_rate: f64, center_hz: f64, q: f64) -> Result<Self> {
        Self::validate(sample_rate, center_hz, q)?;
        Ok(Self::notch(sample_rate, center_hz, q))
    }

    /// Steady-state gain for a constant input
    pub fn dc_gain(&self) -> f64 {
        (self.b0 + self.b1 + self.b2) / (self.a0 + self.a1 + self.a2)
    }

    /// Returns `(cos w0, alpha)` for the given design frequency
    fn angular(sample_rate: f64, freq: f64, q: f64) -> (f64, f64) {
        let w0 = 2.0 * PI * freq / sample_rate;
        (w0.cos(), w0.sin() / (2.0 * q))
    }

    fn validate(sample_rate: f64, freq: f64, q: f64) -> Result<()> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(DspError::InvalidParameter(format!(
                "Sample rate must be a positive finite number, got {}",
                sample_rate
            )));
        }
        let nyquist = sample_rate / 2.0;
        if !(freq > 0.0 && freq < nyquist) {
            return Err(DspError::InvalidParameter(format!(
                "Design frequency ({} Hz) must be between 0 and Nyquist ({} Hz)",
                freq, nyquist
            )));
        }
        if !(q > 0.0) || !q.is_finite() {
            return Err(DspError::InvalidParameter(format!(
                "Q factor must be positive, got {}",
                q
            )));
        }
        Ok(())
    }
}

/// History of a single section (Direct Form I)
#[derive(Debug, Clone, Default)]
struct BiquadState {
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

/// Single biquad filter section with its own history
#[derive(Debug, Clone)]
pub struct BiquadFilter {
    coeffs: BiquadCoeffs,
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
    state: BiquadState,
}

impl BiquadFilter {
    pub fn new(coeffs: BiquadCoeffs) -> Self {
        Self {
            coeffs,
            b0: coeffs.b0 / coeffs.a0,
            b1: coeffs.b1 / coeffs.a0,
            b2: coeffs.b2 / coeffs.a0,
            a1: coeffs.a1 / coeffs.a0,
            a2: coeffs.a2 / coeffs.a0,
            state: BiquadState::default(),
        }
    }

    pub fn coeffs(&self) -> &BiquadCoeffs {
        &self.coeffs
    }

    /// Process a single sample using Direct Form I
    #[inline]
    pub fn process(&mut self, x0: f64) -> f64 {
        let s = &mut self.state;
        let y0 = self.b0 * x0 + self.b1 * s.x1 + self.b2 * s.x2 - self.a1 * s.y1 - self.a2 * s.y2;
        s.x2 = s.x1;
        s.x1 = x0;
        s.y2 = s.y1;
        s.y1 = y0;
        y0
    }

    /// Process a signal and return a new array (original unchanged)
    pub fn filter(&mut self, signal: &[f64]) -> Vec<f64> {
        signal.iter().map(|&s| self.process(s)).collect()
    }

    /// Reset history to a cold start
    pub fn reset(&mut self) {
        self.state = BiquadState::default();
    }
}

/// Cascaded second-order sections filter
#[derive(Debug, Clone, Default)]
pub struct SosFilter {
    sections: Vec<BiquadFilter>,
}

impl SosFilter {
    pub fn new(sections: Vec<BiquadCoeffs>) -> Self {
        Self {
            sections: sections.into_iter().map(BiquadFilter::new).collect(),
        }
    }

    /// Append a section to the end of the cascade
    pub fn push(&mut self, coeffs: BiquadCoeffs) {
        self.sections.push(BiquadFilter::new(coeffs));
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Process a single sample through all sections
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let mut output = input;
        for section in &mut self.sections {
            output = section.process(output);
        }
        output
    }

    /// Process an entire signal array in-place
    pub fn process_signal(&mut self, signal: &mut [f64]) {
        for sample in signal.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Process a signal and return a new array (original unchanged)
    pub fn filter(&mut self, signal: &[f64]) -> Vec<f64> {
        signal.iter().map(|&s| self.process(s)).collect()
    }

    /// Reset all section states
    pub fn reset(&mut self) {
        for section in &mut self.sections {
            section.reset();
        }
    }
}

/// Run one cold-start pass of a single section over `samples`
pub fn apply(samples: &[f64], coeffs: &BiquadCoeffs) -> Vec<f64> {
    BiquadFilter::new(*coeffs).filter(samples)
}
