use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "callmatch")]
#[command(about = "Match scorecard entries to call recordings", long_about = None)]
#[command(version)]
pub struct Args {
    /// JSON array of scorecard entries
    #[arg(short, long)]
    pub entries: PathBuf,

    /// JSON array of recording candidates
    #[arg(short, long)]
    pub recordings: PathBuf,

    /// TOML config file (defaults plus CALLMATCH_* env vars when omitted)
    #[arg(short, long, env = "CALLMATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only consider recordings owned by this user (needs strict_user_matching)
    #[arg(short, long)]
    pub user: Option<String>,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print Prometheus metrics to stderr after the run
    #[arg(long)]
    pub metrics: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}
