// src/errors.rs

//! Errors reported by the strict scheduler operations, scenario loading and
//! the scenario runner.
//!
//! The lenient scheduler operations never fail; they log and carry on.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobdagError {
    #[error("invalid scenario: {0}")]
    ConfigError(String),

    #[error("cannot read scenario {}: {source}", path.display())]
    ScenarioRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failure writing step output.
    #[error("output error: {0}")]
    IoError(#[from] io::Error),

    #[error("job not found: {0}")]
    JobNotFound(String),

    #[error("dependency cycle: {0}")]
    DagCycle(String),

    #[error("scheduler state inconsistent: {0}")]
    Inconsistent(String),

    #[error("malformed scenario TOML: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, JobdagError>;
