//! Serialization for the view layer: waveform CSV and the plain-text report.

use crate::types::AnalysisMetrics;
use chrono::{DateTime, Local};
use std::fmt;

pub const CSV_HEADER: &str = "Sample Index,Amplitude";

/// `Sample Index,Amplitude` header followed by one `index,amplitude` row per sample
pub fn samples_to_csv(samples: &[f64]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + samples.len() * 24);
    if let Err(e) = write_csv(&mut out, samples) {
        log::warn!("CSV serialization stopped early: {}", e);
    }
    out
}

/// Stream the waveform CSV into `out`, stopping at the first write error
pub fn write_csv<W: fmt::Write>(out: &mut W, samples: &[f64]) -> fmt::Result {
    out.write_str(CSV_HEADER)?;
    for (i, sample) in samples.iter().enumerate() {
        write!(out, "\n{},{}", i, sample)?;
    }
    Ok(())
}

/// Render the downloadable text report for one analysis
pub fn render_text(
    metrics: &AnalysisMetrics,
    patient: Option<&str>,
    generated_at: DateTime<Local>,
) -> String {
    let mut out = String::new();
    if let Err(e) = write_text(&mut out, metrics, patient, generated_at) {
        log::warn!("Text report stopped early: {}", e);
    }
    out
}

/// Stream the text report into `out`, stopping at the first write error
pub fn write_text<W: fmt::Write>(
    out: &mut W,
    metrics: &AnalysisMetrics,
    patient: Option<&str>,
    generated_at: DateTime<Local>,
) -> fmt::Result {
    let m = metrics;
    writeln!(out, "AuraMind EEG Analysis Report")?;
    writeln!(out, "Patient: {}", patient.unwrap_or("Unknown"))?;
    writeln!(out, "Date: {}", generated_at.format("%Y-%m-%d"))?;
    writeln!(out, "Time: {}", generated_at.format("%H:%M:%S"))?;
    writeln!(out)?;

    writeln!(out, "ANALYSIS RESULTS:")?;
    writeln!(out, "- Anomalies Detected: {}", m.anomalies)?;
    writeln!(out, "- Seizure Risk: {}%", m.seizure_risk_pct)?;
    writeln!(out, "- Cognitive Load: {}", m.cognitive_load)?;
    writeln!(out, "- Stress Level: {}", m.stress_level)?;
    writeln!(
        out,
        "- Schizophrenia Risk: {}% ({})",
        m.schizophrenia_risk, m.schizophrenia_risk_level
    )?;
    writeln!(out)?;

    writeln!(out, "POWER SPECTRUM:")?;
    writeln!(out, "- Alpha Power: {}%", m.alpha_power)?;
    writeln!(out, "- Beta Power: {}%", m.beta_power)?;
    writeln!(out, "- Theta Power: {}%", m.theta_power)?;
    writeln!(out, "- Delta Power: {}%", m.delta_power)?;
    writeln!(out, "- Gamma Power: {}%", m.gamma_power)?;
    writeln!(out)?;

    writeln!(out, "SLEEP STAGES:")?;
    writeln!(out, "- REM: {}%", m.sleep_stages.rem)?;
    writeln!(out, "- Deep: {}%", m.sleep_stages.deep)?;
    writeln!(out, "- Light: {}%", m.sleep_stages.light)?;
    writeln!(out)?;

    writeln!(out, "SIGNAL QUALITY:")?;
    writeln!(out, "- Coherence: {}%", m.coherence)?;
    writeln!(out, "- Hemispheric Asymmetry: {}%", m.asymmetry)?;
    writeln!(out)?;

    writeln!(out, "RECOMMENDATIONS:")?;
    for line in recommendations(m.schizophrenia_risk) {
        writeln!(out, "- {}", line)?;
    }
    writeln!(out)?;
    writeln!(out, "Generated by AuraMind - Schizophrenia Detection, Simplified")
}

/// Recommendation lines for a risk score, most urgent first
pub fn recommendations(risk: f64) -> Vec<&'static str> {
    let mut lines = Vec::with_capacity(5);
    if risk > 50.0 {
        lines.push("IMMEDIATE: Schedule psychiatric evaluation");
    }
    if risk > 25.0 {
        lines.push("MONITOR: Regular follow-up appointments recommended");
    }
    lines.extend([
        "Continue current treatment plan",
        "Monitor for any behavioral changes",
        "Maintain regular sleep schedule",
    ]);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::run_basic_analysis;
    use chrono::TimeZone;

    #[test]
    fn test_csv_layout() {
        let csv = samples_to_csv(&[0.5, -1.25, 3.0]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec!["Sample Index,Amplitude", "0,0.5", "1,-1.25", "2,3"]);
        assert_eq!(samples_to_csv(&[]), CSV_HEADER);
    }

    /// Accepts `capacity` bytes, then fails every write
    struct Bounded {
        buf: String,
        capacity: usize,
    }

    impl fmt::Write for Bounded {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            if self.buf.len() + s.len() > self.capacity {
                return Err(fmt::Error);
            }
            self.buf.push_str(s);
            Ok(())
        }
    }

    #[test]
    fn test_write_errors_propagate() {
        let metrics = run_basic_analysis(&[1.0, -1.0, 0.5, 2.0]);
        let at = Local.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();

        let mut out = Bounded { buf: String::new(), capacity: 40 };
        assert!(write_text(&mut out, &metrics, None, at).is_err());
        assert!(out.buf.starts_with("AuraMind EEG Analysis Report\n"));
        assert!(!out.buf.contains("ANALYSIS RESULTS"));

        let mut out = Bounded { buf: String::new(), capacity: 30 };
        assert!(write_csv(&mut out, &[1.0, 2.0, 3.0, 4.0, 5.0]).is_err());
        assert!(out.buf.len() <= 30);

        let mut out = Bounded { buf: String::new(), capacity: usize::MAX };
        write_csv(&mut out, &[1.0, 2.0]).unwrap();
        assert_eq!(out.buf, samples_to_csv(&[1.0, 2.0]));
    }

    #[test]
    fn test_recommendations_by_risk() {
        assert_eq!(recommendations(10.0).len(), 3);
        assert_eq!(recommendations(30.0)[0], "MONITOR: Regular follow-up appointments recommended");
        let urgent = recommendations(80.0);
        assert_eq!(urgent.len(), 5);
        assert!(urgent[0].starts_with("IMMEDIATE"));
    }

    #[test]
    fn test_text_report_sections() {
        let samples: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.1).sin()).collect();
        let metrics = run_basic_analysis(&samples);
        let at = Local.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let text = render_text(&metrics, Some("Jane Doe"), at);

        assert!(text.starts_with("AuraMind EEG Analysis Report\nPatient: Jane Doe\n"));
        assert!(text.contains("Date: 2024-03-01"));
        assert!(text.contains("Time: 09:30:00"));
        for section in [
            "ANALYSIS RESULTS:",
            "POWER SPECTRUM:",
            "SLEEP STAGES:",
            "SIGNAL QUALITY:",
            "RECOMMENDATIONS:",
        ] {
            assert!(text.contains(section), "missing {}", section);
        }
        assert!(text.contains(&format!("- Light: {}%", metrics.sleep_stages.light)));
        assert!(text.contains(&format!(
            "({})",
            metrics.schizophrenia_risk_level
        )));
    }
}
