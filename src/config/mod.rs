// src/config/mod.rs

//! Scenario loading and validation for jobdag.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a scenario file from disk (`loader.rs`).
//! - Validate ids and, on request, acyclicity (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, parse_str};
pub use model::{ConfigFile, ConfigSection, JobConfig, RawConfigFile, Step};
