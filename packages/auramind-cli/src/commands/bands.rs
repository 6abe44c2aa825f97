use crate::cli::BandsArgs;
use crate::exit_codes;
use crate::output;
use auramind_dsp::EegBand;
use serde::Serialize;

#[derive(Serialize)]
struct BandInfo {
    name: &'static str,
    low_hz: f64,
    high_hz: f64,
}

pub fn execute(args: BandsArgs) -> i32 {
    let bands: Vec<BandInfo> = EegBand::ALL
        .iter()
        .map(|&band| {
            let (low_hz, high_hz) = band.range();
            BandInfo {
                name: band.name(),
                low_hz,
                high_hz,
            }
        })
        .collect();

    if args.json {
        match output::to_json(&bands, false) {
            Ok(json) => {
                if let Err(e) = output::write_output(&json, None) {
                    eprintln!("Error: {}", e);
                    return exit_codes::EXECUTION_ERROR;
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return exit_codes::EXECUTION_ERROR;
            }
        }
    } else {
        println!("EEG Frequency Bands:\n");
        println!("  {:<8} {:>8} {:>8}", "Band", "Low Hz", "High Hz");
        println!("  {}", "-".repeat(26));
        for b in &bands {
            println!("  {:<8} {:>8} {:>8}", b.name, b.low_hz, b.high_hz);
        }
        println!();
        println!("Index-bucket spectrum: bounds inclusive, checked alpha, beta, theta, delta, gamma");
        println!("FFT spectrum: bounds half-open [low, high)");
    }

    exit_codes::SUCCESS
}
