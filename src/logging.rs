//! Logging configuration using the tracing ecosystem.
//!
//! The library only emits `tracing` events; this module installs the
//! subscriber used by the `jiradc` binary:
//! - Daily rotating log file
//! - Environment-based log level configuration
//! - An optional stderr layer for `--verbose`

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "jira_dc=info,warn";

/// Initialize the logging system.
///
/// Logs are written to a daily rotating file in the platform-specific local
/// data directory:
/// - Linux: `~/.local/share/jiradc/logs/`
/// - macOS: `~/Library/Application Support/jiradc/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\jiradc\logs\`
///
/// The level is taken from `RUST_LOG` (e.g. `RUST_LOG=jira_dc=debug`).
/// With `verbose`, debug events of this crate are mirrored to stderr.
///
/// # Errors
///
/// Returns an error if the log directory cannot be determined or created,
/// or if a global subscriber is already set.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "jiradc.log");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(filter);

    let stderr_layer = verbose.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(EnvFilter::new("jira_dc=debug,warn"))
    });

    let subscriber = tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "jiradc starting up");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(())
}

/// Get the log directory path.
fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("jiradc").join("logs"))
}

/// Get the path where logs are stored.
pub fn log_directory() -> Option<PathBuf> {
    get_log_directory().ok()
}
