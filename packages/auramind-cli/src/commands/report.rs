use crate::cli::ReportArgs;
use crate::exit_codes;
use crate::output;
use auramind_dsp::{render_text, DspError};

pub fn execute(args: ReportArgs) -> i32 {
    let config = match args.processing.resolve_config() {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    let (analyzer, recording) =
        match super::prepare(&args.file, config, args.processing.sr) {
            Ok(pair) => pair,
            Err(msg) => {
                eprintln!("Error: {}", msg);
                return exit_codes::INPUT_ERROR;
            }
        };

    let report = match analyzer.analyze(&recording) {
        Ok(r) => r,
        Err(DspError::EmptySignal) => {
            eprintln!("Error: No samples decoded from {}", args.file);
            return exit_codes::INPUT_ERROR;
        }
        Err(e) => {
            eprintln!("Analysis failed: {}", e);
            return exit_codes::EXECUTION_ERROR;
        }
    };

    let text = render_text(&report.metrics, args.patient.as_deref(), chrono::Local::now());
    if let Err(e) = output::write_output(&text, args.output.as_deref()) {
        eprintln!("Error: {}", e);
        return exit_codes::EXECUTION_ERROR;
    }
    if !args.quiet {
        if let Some(ref path) = args.output {
            eprintln!("Report written to {}", path);
        }
    }
    exit_codes::SUCCESS
}
