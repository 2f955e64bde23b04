// src/engine/mod.rs

//! Scenario engine for jobdag.
//!
//! The pure core state machine lives in [`core`]; it applies one scenario
//! step to a scheduler and reports the result. The IO shell in [`runtime`]
//! drives the core over a whole script and writes the reports out.

pub mod core;
pub mod runtime;

pub use self::core::{ScenarioRunner, StepReport};
pub use runtime::{run_scenario, RunSummary, Runtime};
