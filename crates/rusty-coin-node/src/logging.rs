// Rust guideline compliant 2026-10-19

//! Global tracing subscriber setup.

use crate::NodeError;
use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;

/// How log events are written.
#[derive(Debug, Clone)]
pub struct TracingOptions {
    /// Logging level.
    pub log_level: String,
    /// Optional log file path. Events go to stderr when unset.
    pub log_file: Option<PathBuf>,
    /// Emit JSON lines instead of human-readable text.
    pub json: bool,
}

impl Default for TracingOptions {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
            json: false,
        }
    }
}

/// Installs the global subscriber.
///
/// A second call leaves the first subscriber in place.
///
/// # Returns
///
/// The file writer's guard when logging to a file. Dropping it flushes and
/// stops the background writer, so keep it alive until exit.
///
/// # Errors
///
/// Returns an error if the level is unknown or the log file cannot be opened.
pub fn init_tracing(options: &TracingOptions) -> Result<Option<WorkerGuard>, NodeError> {
    let level = parse_log_level(&options.log_level)?;

    if let Some(path) = &options.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let (writer, guard) = tracing_appender::non_blocking(file);
        let subscriber = fmt()
            .with_max_level(level)
            .with_target(false)
            .json()
            .with_writer(writer)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
        return Ok(Some(guard));
    }

    let builder = fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);
    if options.json {
        let _ = tracing::subscriber::set_global_default(builder.json().finish());
    } else {
        let _ = tracing::subscriber::set_global_default(builder.finish());
    }
    Ok(None)
}

/// Parses a level name, case-insensitively.
///
/// # Errors
///
/// Returns [`NodeError::InvalidLogLevel`] for unknown names.
pub fn parse_log_level(level: &str) -> Result<Level, NodeError> {
    match level.to_lowercase().as_str() {
        "error" => Ok(Level::ERROR),
        "warn" => Ok(Level::WARN),
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        "trace" => Ok(Level::TRACE),
        other => Err(NodeError::InvalidLogLevel(other.to_string())),
    }
}
