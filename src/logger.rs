//! Tracing subscriber setup

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the log file written while the interactive view owns the terminal
pub const LOG_FILE_NAME: &str = "ayumi.log";

fn filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "ayumi=debug,info" } else { "ayumi=info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn open_log_file(dir: &Path) -> io::Result<File> {
    fs::create_dir_all(dir)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))
}

fn log_writer(log_dir: Option<&Path>) -> BoxMakeWriter {
    let Some(dir) = log_dir else {
        return BoxMakeWriter::new(io::stderr);
    };
    match open_log_file(dir) {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        // stderr belongs to the terminal UI here, so events are discarded
        Err(_) => BoxMakeWriter::new(io::sink),
    }
}

/// Installs the global subscriber
///
/// With `log_dir`, events are appended to `ayumi.log` in that directory;
/// otherwise they go to stderr. `RUST_LOG` overrides the default filter.
/// Never fails: an unusable log directory silences logging, and an already
/// installed subscriber is left in place.
pub fn init(verbose: bool, log_dir: Option<&Path>) {
    let _ = tracing_subscriber::registry()
        .with(filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(log_writer(log_dir))
                .with_ansi(log_dir.is_none())
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}
