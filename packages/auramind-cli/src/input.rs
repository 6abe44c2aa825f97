//! Decoders turning data files into sample sequences.
//!
//! Supported: `.csv` (header line skipped, cells split on `,` `;` or tab), `.txt`
//! (one value per line) and `.edf` (first channel only). Cells that do not parse to a
//! finite number, `NaN` and `inf` included, are skipped. Every decoder keeps at most
//! `max_samples` values.

use auramind_dsp::{AnalysisConfig, Recording};
use std::path::Path;

const EDF_HEADER_LEN: usize = 256;
/// Bytes of per-signal header fields preceding "number of samples in each record"
const EDF_SIGNAL_FIELDS_BEFORE_SPR: usize = 216;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Csv,
    Txt,
    Edf,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(FileType::Csv),
            "txt" | "ascii" => Some(FileType::Txt),
            "edf" => Some(FileType::Edf),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Samples decoded from one file, with the rate if the container records one
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub samples: Vec<f64>,
    pub sample_rate: Option<f64>,
}

/// Decode `path` into a [`Recording`].
///
/// The sample rate is `sr_override`, else the rate stored in the file, else
/// `config.sample_rate`.
pub fn load_recording(
    path: &str,
    config: &AnalysisConfig,
    sr_override: Option<f64>,
) -> Result<Recording, String> {
    let decoded = decode_file(Path::new(path), config.max_samples)?;
    let sample_rate = sr_override
        .or(decoded.sample_rate)
        .unwrap_or(config.sample_rate);
    log::info!(
        "Decoded {} samples from {} at {} Hz",
        decoded.samples.len(),
        path,
        sample_rate
    );
    Ok(Recording::new(path, decoded.samples, sample_rate))
}

pub fn decode_file(path: &Path, max_samples: usize) -> Result<Decoded, String> {
    if !path.is_file() {
        return Err(format!("File not found: {}", path.display()));
    }
    let file_type = FileType::from_path(path).ok_or_else(|| {
        format!(
            "Unsupported file extension for '{}'. Supported: csv, txt, edf",
            path.display()
        )
    })?;

    match file_type {
        FileType::Csv | FileType::Txt => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
            let samples = if file_type == FileType::Csv {
                parse_csv(&text, max_samples)
            } else {
                parse_txt(&text, max_samples)
            };
            Ok(Decoded {
                samples,
                sample_rate: None,
            })
        }
        FileType::Edf => {
            let bytes = std::fs::read(path)
                .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
            parse_edf(&bytes, max_samples)
        }
    }
}

pub fn parse_csv(text: &str, max_samples: usize) -> Vec<f64> {
    text.trim()
        .lines()
        .skip(1)
        .flat_map(|line| line.split([',', ';', '\t']))
        .filter_map(|cell| cell.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .take(max_samples)
        .collect()
}

pub fn parse_txt(text: &str, max_samples: usize) -> Vec<f64> {
    text.trim()
        .lines()
        .filter_map(|line| line.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .take(max_samples)
        .collect()
}

/// First channel of an EDF file as 16-bit little-endian samples.
///
/// Data records hold each signal's block in turn, so the first `spr[0]` samples of
/// every record belong to channel 0. When the per-signal sample counts are missing
/// the data is read as sample-interleaved frames instead.
pub fn parse_edf(bytes: &[u8], max_samples: usize) -> Result<Decoded, String> {
    if bytes.len() < EDF_HEADER_LEN {
        return Err("File too small for EDF".to_string());
    }

    let num_signals = ascii_field(bytes, 252, 4)
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(1);
    let data_start = EDF_HEADER_LEN + EDF_HEADER_LEN * num_signals;
    if bytes.len() <= data_start {
        return Err("EDF: no data section".to_string());
    }

    let data = &bytes[data_start..];
    let samples: Vec<f64> = match edf_samples_per_record(bytes, num_signals) {
        Some(spr) => {
            let record_len = 2 * spr.iter().sum::<usize>();
            let first_len = 2 * spr[0];
            data.chunks(record_len)
                .flat_map(|record| record[..first_len.min(record.len())].chunks_exact(2))
                .take(max_samples)
                .map(le_sample)
                .collect()
        }
        None => {
            log::debug!("EDF: samples per record missing, reading interleaved frames");
            data.chunks_exact(2)
                .step_by(num_signals)
                .take(max_samples)
                .map(le_sample)
                .collect()
        }
    };

    Ok(Decoded {
        samples,
        sample_rate: edf_sample_rate(bytes, num_signals),
    })
}

fn le_sample(pair: &[u8]) -> f64 {
    i16::from_le_bytes([pair[0], pair[1]]) as f64
}

/// "Number of samples in each data record" for every signal, if all are positive
fn edf_samples_per_record(bytes: &[u8], num_signals: usize) -> Option<Vec<usize>> {
    let offset = EDF_HEADER_LEN + EDF_SIGNAL_FIELDS_BEFORE_SPR * num_signals;
    (0..num_signals)
        .map(|i| {
            ascii_field(bytes, offset + i * 8, 8)?
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
        })
        .collect()
}

/// Samples per record of the first signal divided by the record duration
fn edf_sample_rate(bytes: &[u8], num_signals: usize) -> Option<f64> {
    let duration = ascii_field(bytes, 244, 8)?.parse::<f64>().ok()?;
    let spr_offset = EDF_HEADER_LEN + EDF_SIGNAL_FIELDS_BEFORE_SPR * num_signals;
    let samples_per_record = ascii_field(bytes, spr_offset, 8)?.parse::<f64>().ok()?;
    let rate = samples_per_record / duration;
    (rate.is_finite() && rate > 0.0).then_some(rate)
}

fn ascii_field(bytes: &[u8], offset: usize, len: usize) -> Option<String> {
    let raw = bytes.get(offset..offset + len)?;
    let text = std::str::from_utf8(raw).ok()?.trim();
    (!text.is_empty()).then(|| text.to_string())
}
