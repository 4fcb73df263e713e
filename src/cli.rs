//! Command-line interface parsing for Ayumi
//!
//! Flags fall back to environment variables where a deployment would
//! normally configure them (`AYUMI_BACKEND_URL`, `AYUMI_CACHE_DIR`).

use std::path::PathBuf;

use clap::Parser;

/// Backend used when neither the flag nor the environment names one
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";

/// Ayumi - Walking with God daily
#[derive(Parser, Debug)]
#[command(name = "ayumi")]
#[command(about = "Daily devotional dashboard with offline fallback")]
#[command(version)]
pub struct Cli {
    /// Fetch a fresh dashboard even if today's is already cached
    #[arg(long)]
    pub refresh: bool,

    /// Print today's dashboard and exit instead of opening the interactive view
    #[arg(long)]
    pub print: bool,

    /// With --print, write the dashboard as JSON
    #[arg(long, requires = "print", conflicts_with = "devotional")]
    pub json: bool,

    /// With --print, show only the devotional reading
    #[arg(long, requires = "print")]
    pub devotional: bool,

    /// Base URL of the dashboard backend
    #[arg(long, env = "AYUMI_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    /// Directory for the persisted dashboard cache
    #[arg(long, env = "AYUMI_CACHE_DIR", value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Longest time the loading screen may stay up, in milliseconds
    #[arg(long, default_value_t = 1500, value_name = "MS")]
    pub deadline_ms: u64,

    /// Backend request timeout, in seconds
    #[arg(long, default_value_t = 30, value_name = "SECS")]
    pub timeout_secs: u64,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
