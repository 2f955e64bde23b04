// src/dag/mod.rs

//! Job registry, readiness tracking and scheduling.
//!
//! - [`job`] holds the job record and id type.
//! - [`queue`] is the FIFO of jobs awaiting readiness.
//! - [`reverse_index`] maps a dependency id to the jobs waiting on it.
//! - [`scheduler`] owns all three and keeps them consistent.
//! - [`outcome`] defines the result type for a processing step.
//! - [`snapshot`] provides the diagnostic queue / registry dumps.
//! - [`graph`] offers read-only cycle and stall analysis.

pub mod graph;
pub mod job;
pub mod outcome;
pub mod queue;
pub mod reverse_index;
pub mod scheduler;
pub mod snapshot;

pub use job::{Job, JobId};
pub use outcome::ProcessOutcome;
pub use scheduler::Scheduler;
pub use snapshot::{QueueSnapshot, RegistrySnapshot};
