//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "channelwatch")]
#[command(author, version, about = "Linear-regression price channel watcher")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start watching the configured pair
    Watch(WatchArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct WatchArgs {
    /// Pair code override
    #[arg(short, long)]
    pub pair: Option<String>,

    /// Timeframe override (30s, 1m, 5m, 15m)
    #[arg(short, long)]
    pub timeframe: Option<String>,

    /// Refresh interval override in seconds (5-60)
    #[arg(short, long)]
    pub refresh: Option<u64>,

    /// Replay bars from a CSV file instead of the live endpoint
    #[arg(long)]
    pub data: Option<PathBuf>,
}
