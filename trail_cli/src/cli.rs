//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "trail", version, about = "Record pointer motion into cubic segments and play it back")]
pub struct Cli {
    /// Path to config TOML (missing file means defaults)
    #[arg(long, value_name = "FILE", default_value = "etc/trail.toml")]
    pub config: PathBuf,

    /// Log and print results as JSON lines
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Segment and fit a recorded event file, writing the track as JSON
    Fit {
        /// Events file (.csv with t,x,y[,dx,dy] or .jsonl)
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Write the track here instead of stdout
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Print the position at one or more timestamps (ms)
    Locate {
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Query timestamps in ms
        #[arg(long = "at", value_name = "T", required = true, num_args = 1.., allow_negative_numbers = true)]
        at: Vec<i64>,
    },
    /// Print one position per playback frame
    Replay {
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Frame rate (overrides playback.fps)
        #[arg(long, value_name = "HZ")]
        fps: Option<u32>,
    },
    /// Map a scrub value in [0, playback.scrub_range] to a timestamp and position
    Scrub {
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        #[arg(long, value_name = "V", allow_negative_numbers = true)]
        value: f64,
    },
    /// Fit a built-in stroke and verify endpoint exactness
    SelfCheck,
}
