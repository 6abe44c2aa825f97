pub mod analysis;
pub mod artifacts;
pub mod config;
pub mod error;
pub mod filters;
pub mod pipeline;
pub mod report;
pub mod spectrum;
pub mod stats;
pub mod types;

pub use analysis::{run_basic_analysis, Analyzer, ANALYSIS_SAMPLE_RATE};
pub use artifacts::{detect_artifacts, remove_artifacts, DEFAULT_ARTIFACT_THRESHOLD};
pub use config::AnalysisConfig;
pub use error::{DspError, Result};
pub use filters::{apply, BiquadCoeffs, BiquadFilter, SosFilter, DEFAULT_Q};
pub use pipeline::{bandpass, PreprocessingPipeline};
pub use report::{render_text, samples_to_csv, write_csv, write_text};
pub use spectrum::{power_spectrum, power_spectrum_with, BandPowers, EegBand, SpectrumMethod};
pub use stats::SignalStats;
pub use types::*;
