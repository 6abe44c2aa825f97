use crate::cli::AnalyzeArgs;
use crate::exit_codes;
use crate::output;
use auramind_dsp::DspError;
use std::time::Duration;

pub async fn execute(args: AnalyzeArgs) -> i32 {
    let mut config = match args.processing.resolve_config() {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };
    if let Some(delay) = args.delay_ms {
        config.delay_ms = delay;
    }
    let delay_ms = config.delay_ms;

    let (analyzer, recording) =
        match super::prepare(&args.file, config, args.processing.sr) {
            Ok(pair) => pair,
            Err(msg) => {
                eprintln!("Error: {}", msg);
                return exit_codes::INPUT_ERROR;
            }
        };

    if !args.quiet {
        eprintln!("Analyzing {}...", args.file);
        eprintln!(
            "  Samples: {} at {} Hz",
            recording.samples.len(),
            recording.sample_rate
        );
    }

    if delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

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

    match output::to_json(&report, args.compact) {
        Ok(json) => {
            if let Err(e) = output::write_output(&json, args.output.as_deref()) {
                eprintln!("Error: {}", e);
                return exit_codes::EXECUTION_ERROR;
            }
            if !args.quiet {
                if let Some(ref path) = args.output {
                    eprintln!("Results written to {}", path);
                }
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            eprintln!("Error serializing result: {}", e);
            exit_codes::EXECUTION_ERROR
        }
    }
}
