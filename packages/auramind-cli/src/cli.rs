use auramind_dsp::{AnalysisConfig, SpectrumMethod};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "auramind",
    version,
    about = "EEG band-pass filtering and band power analysis",
    long_about = "Filter EEG recordings (CSV, TXT, EDF) and derive band power metrics.\n\
                  Settings come from --config (or $AURAMIND_CONFIG) and are overridden by flags."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Filter a recording and print the analysis as JSON
    Analyze(AnalyzeArgs),
    /// Write the filtered waveform as CSV
    Filter(FilterArgs),
    /// Render the plain-text analysis report
    Report(ReportArgs),
    /// Analyze every file matching a glob pattern (JSON lines)
    Batch(BatchArgs),
    /// List the EEG frequency bands
    Bands(BandsArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    IndexBucket,
    Fft,
}

impl From<MethodArg> for SpectrumMethod {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::IndexBucket => SpectrumMethod::IndexBucket,
            MethodArg::Fft => SpectrumMethod::Fft,
        }
    }
}

/// Settings shared by every command that reads a recording
#[derive(Args, Clone, Debug, Default)]
pub struct ProcessingArgs {
    /// JSON configuration file
    #[arg(long, env = "AURAMIND_CONFIG")]
    pub config: Option<String>,

    /// Sampling rate in Hz (overrides the EDF header)
    #[arg(long, env = "AURAMIND_SAMPLE_RATE")]
    pub sr: Option<f64>,

    /// Low cutoff in Hz
    #[arg(long)]
    pub low: Option<f64>,

    /// High cutoff in Hz
    #[arg(long)]
    pub high: Option<f64>,

    /// Disable the band-pass filter
    #[arg(long, default_value_t = false)]
    pub no_filter: bool,

    /// Remove power line interference at this frequency (50 or 60)
    #[arg(long)]
    pub notch: Option<f64>,

    /// Band power estimator
    #[arg(long, value_enum)]
    pub method: Option<MethodArg>,

    /// Report zero band fractions instead of NaN for a silent signal
    #[arg(long, default_value_t = false)]
    pub guard_zero_power: bool,

    /// Interpolate over samples whose |z-score| exceeds this value (e.g. 3.0)
    #[arg(long)]
    pub artifact_threshold: Option<f64>,

    /// Maximum number of samples decoded per file
    #[arg(long)]
    pub max_samples: Option<usize>,
}

impl ProcessingArgs {
    /// Configuration file (or defaults) with command-line overrides applied
    pub fn resolve_config(&self) -> Result<AnalysisConfig, String> {
        let mut config = match self.config {
            Some(ref path) => AnalysisConfig::from_file(path)
                .map_err(|e| format!("Invalid config '{}': {}", path, e))?,
            None => AnalysisConfig::default(),
        };

        if let Some(sr) = self.sr {
            config.sample_rate = sr;
        }
        if let Some(low) = self.low {
            config.low_hz = low;
        }
        if let Some(high) = self.high {
            config.high_hz = high;
        }
        if self.no_filter {
            config.filter_enabled = false;
        }
        if let Some(freq) = self.notch {
            config = config.with_notch(freq);
        }
        if let Some(method) = self.method {
            config.spectrum_method = method.into();
        }
        if self.guard_zero_power {
            config.guard_zero_power = true;
        }
        if let Some(threshold) = self.artifact_threshold {
            config.artifact_threshold = Some(threshold);
        }
        if let Some(max) = self.max_samples {
            config.max_samples = max;
        }

        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input data file path (CSV, TXT, EDF)
    #[arg(long)]
    pub file: String,

    #[command(flatten)]
    pub processing: ProcessingArgs,

    /// Artificial delay before analysis in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Compact JSON output (no indentation)
    #[arg(long, default_value_t = false)]
    pub compact: bool,

    /// Suppress progress messages on stderr
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct FilterArgs {
    /// Input data file path (CSV, TXT, EDF)
    #[arg(long)]
    pub file: String,

    #[command(flatten)]
    pub processing: ProcessingArgs,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Suppress progress messages on stderr
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct ReportArgs {
    /// Input data file path (CSV, TXT, EDF)
    #[arg(long)]
    pub file: String,

    #[command(flatten)]
    pub processing: ProcessingArgs,

    /// Patient name printed in the report header
    #[arg(long)]
    pub patient: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Suppress progress messages on stderr
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern for input files (e.g., "data/*.csv")
    #[arg(long)]
    pub pattern: String,

    #[command(flatten)]
    pub processing: ProcessingArgs,

    /// Keep going after a file fails
    #[arg(long, default_value_t = false)]
    pub continue_on_error: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Suppress progress messages on stderr
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct BandsArgs {
    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
