// src/logging.rs

//! Logging setup for `jobdag` using `tracing` + `tracing-subscriber`.
//!
//! Level precedence: `--log-level`, then `JOBDAG_LOG`, then `info`. An
//! unrecognised `JOBDAG_LOG` value falls back to `info` rather than failing
//! the run. Logs go to stderr; stdout carries only the scenario output.

use anyhow::{Result, anyhow};
use tracing::Level;

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "JOBDAG_LOG";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_level = std::env::var(LOG_ENV_VAR).ok();
    let level = resolve_level(cli_level, env_level.as_deref());

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!("installing log subscriber: {err}"))
}

/// Pick the effective level from the CLI flag and the raw env value.
pub fn resolve_level(cli_level: Option<LogLevel>, env_level: Option<&str>) -> Level {
    cli_level
        .map(Level::from)
        .or_else(|| env_level.and_then(parse_level_str))
        .unwrap_or(Level::INFO)
}

/// Parse a level name as accepted in `JOBDAG_LOG`.
pub fn parse_level_str(s: &str) -> Option<Level> {
    match s.trim().to_ascii_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}
