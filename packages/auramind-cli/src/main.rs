use clap::Parser;

mod cli;
mod commands;
mod exit_codes;
mod input;
mod output;

use cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    let exit_code = match cli.command {
        cli::Command::Analyze(args) => commands::analyze::execute(args).await,
        cli::Command::Filter(args) => commands::filter::execute(args),
        cli::Command::Report(args) => commands::report::execute(args),
        cli::Command::Batch(args) => commands::batch::execute(args),
        cli::Command::Bands(args) => commands::bands::execute(args),
    };

    std::process::exit(exit_code);
}
