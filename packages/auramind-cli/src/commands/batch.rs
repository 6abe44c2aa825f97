use crate::cli::BatchArgs;
use crate::exit_codes;
use crate::input;
use crate::output;
use auramind_dsp::{Analyzer, Recording};
use rayon::prelude::*;
use std::time::Instant;

pub fn execute(args: BatchArgs) -> i32 {
    let files = match resolve_glob(&args.pattern) {
        Ok(f) => f,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    if files.is_empty() {
        eprintln!("Error: No matching files found");
        return exit_codes::INPUT_ERROR;
    }

    let config = match args.processing.resolve_config() {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };
    let sr = args.processing.sr;

    let total = files.len();
    let start_time = Instant::now();
    if !args.quiet {
        eprintln!("Decoding {} file(s)...", total);
    }

    let decoded: Vec<Result<Recording, String>> = files
        .par_iter()
        .map(|file| input::load_recording(file, &config, sr))
        .collect();

    let analyzer = match Analyzer::new(config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::INPUT_ERROR;
        }
    };

    let mut recordings = Vec::with_capacity(total);
    let mut failed = 0usize;
    for (file, result) in files.iter().zip(decoded) {
        match result {
            Ok(recording) => recordings.push(recording),
            Err(msg) => {
                eprintln!("  {}: {}", file, msg);
                failed += 1;
                if !args.continue_on_error {
                    break;
                }
            }
        }
    }

    let mut lines = String::new();
    let mut succeeded = 0usize;
    for (recording, result) in recordings.iter().zip(analyzer.analyze_batch(&recordings)) {
        let json = result
            .map_err(|e| e.to_string())
            .and_then(|report| output::to_json(&report, true));
        match json {
            Ok(json) => {
                lines.push_str(&json);
                lines.push('\n');
                succeeded += 1;
                if !args.quiet {
                    eprintln!("[{}/{}] {}", succeeded + failed, total, recording.source);
                }
            }
            Err(msg) => {
                eprintln!("  {}: {}", recording.source, msg);
                failed += 1;
                if !args.continue_on_error {
                    break;
                }
            }
        }
    }

    if !lines.is_empty() {
        if let Err(e) = output::write_output(&lines, args.output.as_deref()) {
            eprintln!("Error: {}", e);
            return exit_codes::EXECUTION_ERROR;
        }
    }

    if !args.quiet {
        eprintln!(
            "Batch complete: {}/{} succeeded, {}/{} failed, {:.1}s",
            succeeded,
            total,
            failed,
            total,
            start_time.elapsed().as_secs_f64()
        );
    }

    if failed == 0 {
        exit_codes::SUCCESS
    } else {
        exit_codes::EXECUTION_ERROR
    }
}

fn resolve_glob(pattern: &str) -> Result<Vec<String>, String> {
    let paths =
        glob::glob(pattern).map_err(|e| format!("Invalid glob pattern '{}': {}", pattern, e))?;

    let mut files: Vec<String> = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    if let Some(s) = path.to_str() {
                        files.push(s.to_string());
                    }
                }
            }
            Err(e) => log::warn!("glob error: {}", e),
        }
    }
    files.sort();
    Ok(files)
}
