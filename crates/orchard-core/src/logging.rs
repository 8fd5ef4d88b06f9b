//! Logging infrastructure for Orchard.
//!
//! This module provides structured logging using the `tracing` ecosystem.
//! The dashboard owns the terminal while it runs, so nothing is written to
//! stdout; file output carries the JSON log stream and stderr carries the
//! human-readable one (visible after the terminal is restored).
//!
//! ## Features
//!
//! - JSON lines format for machine parsing
//! - File output to `~/.orchard/logs/orchard.log`
//! - Console output with configurable verbosity
//! - `--verbose` flag support for debug logging
//!
//! ## Example
//!
//! ```no_run
//! use orchard_core::logging;
//!
//! // Initialize logging (call once at startup)
//! let _guard = logging::init_logging(None, false).expect("logging init");
//!
//! // Use tracing macros
//! tracing::info!("dashboard started");
//! tracing::debug!(category = "red apple", "classification received");
//! ```

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::error::{OrchardError, Result};

/// Guard that must be held to ensure log flushing on shutdown.
///
/// When this guard is dropped, it flushes any pending log entries.
/// Keep this guard alive for the lifetime of the application.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the Orchard logging system.
///
/// This sets up:
/// - File logging to `~/.orchard/logs/orchard.log` (JSON lines format)
/// - Console logging to stderr (human-readable format)
///
/// # Arguments
///
/// * `log_dir` - Optional custom log directory. Defaults to `~/.orchard/logs/`
/// * `verbose` - If true, sets log level to DEBUG. Otherwise uses INFO.
///
/// # Returns
///
/// A [`LogGuard`] that must be held for the application lifetime to ensure
/// logs are properly flushed on shutdown.
pub fn init_logging(log_dir: Option<PathBuf>, verbose: bool) -> Result<LogGuard> {
    // Determine log directory
    let log_dir = match log_dir {
        Some(dir) => dir,
        None => default_log_dir()?,
    };

    // Ensure log directory exists
    std::fs::create_dir_all(&log_dir).map_err(|e| OrchardError::DirectoryCreation {
        path: log_dir.clone(),
        source: e,
    })?;

    // Set up file appender for JSON logs
    let file_appender = tracing_appender::rolling::daily(&log_dir, "orchard.log");
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    // Determine log level based on verbose flag and environment
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("orchard={default_level}")));

    // JSON layer for file output
    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_current_span(true)
        .with_span_list(true);

    // Human-readable layer for console output
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(verbose)
        .with_line_number(verbose)
        .compact();

    // Combine layers with filter
    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    tracing::debug!(log_dir = %log_dir.display(), verbose, "logging initialized");

    Ok(LogGuard {
        _file_guard: Some(file_guard),
    })
}

/// Initialize minimal console-only logging for testing.
///
/// This is a simpler alternative to [`init_logging`] that only logs to stderr.
/// Useful for tests and development.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

/// Get the default log directory path.
///
/// Returns `~/.orchard/logs/`
pub fn default_log_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").map_err(|_| OrchardError::Internal {
        message: "HOME environment variable not set".into(),
    })?;

    Ok(PathBuf::from(home).join(".orchard").join("logs"))
}

/// Get the default Orchard log file path.
///
/// Returns `~/.orchard/logs/orchard.log`
pub fn default_log_file() -> Result<PathBuf> {
    Ok(default_log_dir()?.join("orchard.log"))
}
