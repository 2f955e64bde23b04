// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::{CyclePolicy, UnknownIdPolicy};

/// Command-line arguments for `jobdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "jobdag",
    version,
    about = "Track jobs and their dependencies, and pull them in readiness order.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to a scenario file (TOML).
    ///
    /// If omitted, a built-in three-job demo is run.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Override `[config].unknown_ids` ("ignore" or "error").
    #[arg(long, value_name = "POLICY")]
    pub unknown_ids: Option<UnknownIdPolicy>,

    /// Override `[config].cycles` ("allow", "warn" or "reject").
    #[arg(long, value_name = "POLICY")]
    pub cycles: Option<CyclePolicy>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `JOBDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print jobs and steps, but don't run anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(lvl: LogLevel) -> Self {
        match lvl {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
