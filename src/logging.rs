//! Logging setup for popdash.
//!
//! Logs always go to stderr so that stdout stays clean for report and JSON
//! output. With file logging enabled, a daily-rotating `popdash.<date>.log`
//! is also written to the platform data directory.
//!
//! ```no_run
//! popdash::logging::init(false).expect("Failed to initialize logging");
//! tracing::info!("Dashboard started");
//! ```

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

/// Gets the log directory path based on platform conventions
///
/// Returns:
/// - Windows: `%APPDATA%/popdash/logs`
/// - macOS: `~/Library/Application Support/popdash/logs`
/// - Linux: `~/.local/share/popdash/logs`
///
/// # Errors
///
/// Returns error if the data directory is unknown or cannot be created.
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;
    let log_dir = base_dir.join("popdash").join("logs");

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }

    Ok(log_dir)
}

/// Installs the global subscriber.
///
/// The filter defaults to `info` and can be overridden with `RUST_LOG`.
///
/// # Errors
///
/// Returns error if the env filter is invalid or the file appender cannot be created.
pub fn init(log_to_file: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")?;

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr);

    let file_layer = if log_to_file {
        let log_dir = get_log_dir()?;
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .max_log_files(10)
            .filename_prefix("popdash")
            .filename_suffix("log")
            .build(&log_dir)
            .context("Failed to create log file appender")?;
        Some(
            fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .with_ansi(false)
                .with_writer(appender)
                .boxed(),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::debug!(log_to_file, "Logging initialized");
    Ok(())
}

/// Path of today's log file.
///
/// # Errors
///
/// Returns error if the log directory cannot be determined.
pub fn get_current_log_path() -> Result<PathBuf> {
    let log_dir = get_log_dir()?;
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    Ok(log_dir.join(format!("popdash.{today}.log")))
}
