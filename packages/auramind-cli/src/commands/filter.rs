use crate::cli::FilterArgs;
use crate::exit_codes;
use crate::output;
use auramind_dsp::samples_to_csv;

pub fn execute(args: FilterArgs) -> i32 {
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

    if !args.quiet {
        let config = analyzer.config();
        if config.filter_enabled {
            eprintln!(
                "Filtering {} ({}-{} Hz at {} Hz)...",
                args.file, config.low_hz, config.high_hz, recording.sample_rate
            );
        } else {
            eprintln!("Band-pass disabled, writing {} unfiltered", args.file);
        }
    }

    let filtered = analyzer.filtered(&recording);
    if let Err(e) = output::write_output(&samples_to_csv(&filtered), args.output.as_deref()) {
        eprintln!("Error: {}", e);
        return exit_codes::EXECUTION_ERROR;
    }
    if !args.quiet {
        if let Some(ref path) = args.output {
            eprintln!("{} samples written to {}", filtered.len(), path);
        }
    }
    exit_codes::SUCCESS
}
