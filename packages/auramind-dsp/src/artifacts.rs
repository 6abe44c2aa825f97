//! Amplitude artifact removal
//!
//! Samples whose absolute z-score (population standard deviation) exceeds a
//! threshold are treated as missing and rebuilt by linear interpolation between
//! the nearest kept neighbours. Gaps at either end take the nearest kept value.

/// Default z-score threshold
pub const DEFAULT_ARTIFACT_THRESHOLD: f64 = 3.0;

/// Indices of samples with `|x - mean| > std * threshold`.
///
/// Non-finite samples are always reported and do not contribute to the mean or
/// deviation. A flat signal has no artifacts.
pub fn detect_artifacts(samples: &[f64], threshold: f64) -> Vec<usize> {
    let finite: Vec<f64> = samples.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return (0..samples.len()).collect();
    }

    let n = finite.len() as f64;
    let mean = finite.iter().sum::<f64>() / n;
    let std = (finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();

    samples
        .iter()
        .enumerate()
        .filter(|&(_, &v)| !v.is_finite() || (std > 0.0 && (v - mean).abs() > std * threshold))
        .map(|(i, _)| i)
        .collect()
}

/// Replace flagged samples by linear interpolation (original unchanged).
///
/// When every sample is flagged the input is returned as-is.
pub fn remove_artifacts(samples: &[f64], threshold: f64) -> Vec<f64> {
    let flagged = detect_artifacts(samples, threshold);
    if flagged.is_empty() || flagged.len() == samples.len() {
        return samples.to_vec();
    }
    log::debug!(
        "Interpolating {} of {} samples (|z| > {})",
        flagged.len(),
        samples.len(),
        threshold
    );

    let mut keep = vec![true; samples.len()];
    for &i in &flagged {
        keep[i] = false;
    }

    let mut out = samples.to_vec();
    let mut prev: Option<usize> = None;
    let mut i = 0;
    while i < samples.len() {
        if keep[i] {
            prev = Some(i);
            i += 1;
            continue;
        }
        let gap_end = (i..samples.len()).find(|&j| keep[j]);
        for k in i..gap_end.unwrap_or(samples.len()) {
            out[k] = match (prev, gap_end) {
                (Some(a), Some(b)) => {
                    let t = (k - a) as f64 / (b - a) as f64;
                    samples[a] + t * (samples[b] - samples[a])
                }
                (Some(a), None) => samples[a],
                (None, Some(b)) => samples[b],
                (None, None) => samples[k],
            };
        }
        i = gap_end.unwrap_or(samples.len());
    }
    out
}
