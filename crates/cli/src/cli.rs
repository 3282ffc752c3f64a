//! CLI argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CTG Replay - paced HTTP replay of recorded heart-rate and uterine samples
#[derive(Parser, Debug)]
#[command(
    name = "ctg-replay",
    author,
    version,
    about = "Replay recorded CTG samples as paced HTTP requests",
    long_about = "Replays two recorded time series (fetal heart rate and uterine activity) \n\
                  against a receiving service, posting every sample at the offset recorded \n\
                  in its CSV file. Both streams run concurrently from a shared start time."
)]
pub struct Cli {
    /// Path to the bpm CSV data file (offset,value rows after a header)
    #[arg(long, value_name = "PATH", env = "CTG_REPLAY_BPM")]
    pub bpm: PathBuf,

    /// Path to the uterus CSV data file (offset,value rows after a header)
    #[arg(long, value_name = "PATH", env = "CTG_REPLAY_UTERUS")]
    pub uterus: PathBuf,

    /// Target the data is sent to (host:port, or a full http(s) base URL)
    #[arg(long, default_value = "localhost:8080", env = "CTG_REPLAY_URL")]
    pub url: String,

    /// Loop sending data until interrupted
    #[arg(long = "loop")]
    pub loop_playback: bool,

    /// Stop looping after this many cycles (0 = unlimited)
    #[arg(long, default_value = "0", env = "CTG_REPLAY_MAX_CYCLES")]
    pub max_cycles: u64,

    /// Replay speed multiplier (2.0 = twice as fast)
    #[arg(long, default_value = "1.0", env = "CTG_REPLAY_SPEED")]
    pub speed: f64,

    /// Per-request timeout in milliseconds (0 = no timeout)
    #[arg(long, default_value = "0", env = "CTG_REPLAY_REQUEST_TIMEOUT_MS")]
    pub request_timeout_ms: u64,

    /// Load and summarise both files, then exit without sending
    #[arg(long)]
    pub dry_run: bool,

    /// Print the dry-run summary as JSON
    #[arg(long, requires = "dry_run")]
    pub json: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "CTG_REPLAY_METRICS_PORT")]
    pub metrics_port: u16,

    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, env = "CTG_REPLAY_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        env = "CTG_REPLAY_LOG_FORMAT"
    )]
    pub log_format: LogFormat,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable multi-line format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => observability::LogFormat::Json,
            LogFormat::Pretty => observability::LogFormat::Pretty,
            LogFormat::Compact => observability::LogFormat::Compact,
        }
    }
}
