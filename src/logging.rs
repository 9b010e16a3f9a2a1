//! Logging setup for modboard.
//!
//! Output goes to stdout and, when `logging.file` is set, to a log file.
//! `RUST_LOG` directives take precedence over the configured level.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::{ModboardError, Result};

/// Map a configured level name to a tracing level. Unknown names are `info`.
fn parse_level(level: &str) -> Level {
    match level.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Default filter directives for the given level.
///
/// The crate and HTTP tracing follow the configured level; sqlx is kept at
/// `warn` unless tracing is requested, since it logs every statement.
fn default_directives(level: Level) -> String {
    let sqlx = if level == Level::TRACE { Level::TRACE } else { Level::WARN };
    format!("{level},modboard={level},tower_http={level},sqlx={sqlx}")
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(parse_level(level))))
}

/// Initialize logging to stdout and the configured log file.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(&config.level);

    if config.file.trim().is_empty() {
        return try_init_console(filter);
    }

    if let Some(parent) = Path::new(&config.file).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let log_file = Arc::new(File::create(&config.file)?);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout.and(log_file))
                .with_ansi(false)
                .with_target(true),
        )
        .with(filter)
        .try_init()
        .map_err(|e| ModboardError::Config(format!("logging already initialized: {e}")))
}

/// Initialize console-only logging. Used when the log file cannot be opened.
pub fn init_console_only(level: &str) {
    // A subscriber that is already installed keeps running.
    let _ = try_init_console(build_filter(level));
}

fn try_init_console(filter: EnvFilter) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_target(true),
        )
        .with(filter)
        .try_init()
        .map_err(|e| ModboardError::Config(format!("logging already initialized: {e}")))
}
