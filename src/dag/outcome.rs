// src/dag/outcome.rs

//! Result type for a single processing step.

use crate::dag::job::{Job, JobId};

/// What [`crate::dag::Scheduler::process_job`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// A ready job was taken from the queue and retired.
    Processed {
        job: Job,
        /// Dependents that became ready because of this step, in queue order.
        unblocked: Vec<JobId>,
    },
    /// No queued job was ready; state is unchanged.
    NoJob,
}

impl ProcessOutcome {
    /// Id of the processed job, if any.
    pub fn processed_id(&self) -> Option<&str> {
        match self {
            ProcessOutcome::Processed { job, .. } => Some(job.id.as_str()),
            ProcessOutcome::NoJob => None,
        }
    }

    pub fn is_no_job(&self) -> bool {
        matches!(self, ProcessOutcome::NoJob)
    }
}
