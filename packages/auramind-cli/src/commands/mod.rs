pub mod analyze;
pub mod bands;
pub mod batch;
pub mod filter;
pub mod report;

use crate::input;
use auramind_dsp::{AnalysisConfig, Analyzer, Recording};

/// Validate `config` and decode `file` with it
pub(crate) fn prepare(
    file: &str,
    config: AnalysisConfig,
    sr_override: Option<f64>,
) -> Result<(Analyzer, Recording), String> {
    let recording = input::load_recording(file, &config, sr_override)?;
    let analyzer = Analyzer::new(config).map_err(|e| e.to_string())?;
    Ok((analyzer, recording))
}
