// src/engine/core.rs

//! Pure scenario core.
//!
//! [`ScenarioRunner`] owns a [`Scheduler`] and applies one [`Step`] at a
//! time, returning a [`StepReport`] that says what happened. It performs no
//! IO; the shell in `engine::runtime` renders reports to a writer.
//!
//! Policies from `[config]` are applied here:
//! - `unknown_ids`: steps naming an unregistered job are skipped or fail.
//! - `cycles`: after a mutating step, cycles are ignored, logged or refused.

use std::fmt;

use tracing::{debug, warn};

use crate::config::model::{ConfigFile, ConfigSection, Step};
use crate::dag::graph::find_cycle;
use crate::dag::{JobId, ProcessOutcome, Scheduler};
use crate::errors::{JobdagError, Result};
use crate::types::{CyclePolicy, UnknownIdPolicy};

/// What a single step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepReport {
    /// A mutation was applied.
    Applied,
    /// A mutation named an unknown job and was skipped.
    Ignored { missing: JobId },
    Processed(ProcessOutcome),
    /// Ids processed by a drain, in order (possibly none).
    Drained(Vec<JobId>),
    /// Rendered diagnostic dump.
    Display(String),
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepReport::Applied | StepReport::Ignored { .. } => Ok(()),
            StepReport::Processed(ProcessOutcome::Processed { job, .. }) => {
                writeln!(f, "Processing job: {}", job.id)
            }
            StepReport::Processed(ProcessOutcome::NoJob) => writeln!(f, "No job to process"),
            StepReport::Drained(ids) if ids.is_empty() => writeln!(f, "No job to process"),
            StepReport::Drained(ids) => {
                for id in ids {
                    writeln!(f, "Processing job: {id}")?;
                }
                Ok(())
            }
            StepReport::Display(text) => f.write_str(text),
        }
    }
}

#[derive(Debug)]
pub struct ScenarioRunner {
    scheduler: Scheduler,
    policy: ConfigSection,
    steps_applied: usize,
}

impl ScenarioRunner {
    pub fn new(policy: ConfigSection) -> Self {
        Self {
            scheduler: Scheduler::new(),
            policy,
            steps_applied: 0,
        }
    }

    /// Build a runner with the scenario's initial jobs already added.
    pub fn from_config(cfg: &ConfigFile) -> Result<Self> {
        let mut runner = Self::new(cfg.config);
        for job in &cfg.job {
            runner.scheduler.add_job(job.id.clone(), job.after.iter().cloned());
        }
        runner.check_cycles("initial jobs")?;
        Ok(runner)
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Apply a single step.
    pub fn step(&mut self, step: &Step) -> Result<StepReport> {
        self.steps_applied += 1;
        debug!(step_no = self.steps_applied, ?step, "applying step");

        let report = match step {
            Step::AddJob { id, after } => {
                self.scheduler.add_job(id.clone(), after.iter().cloned());
                StepReport::Applied
            }
            Step::RemoveJob { id } => {
                let res = self.scheduler.try_remove_job(id).map(|_| ());
                self.apply_policy(res)?
            }
            Step::AddDependency { job, dependency } => {
                let res = self.scheduler.try_add_dependency(job, dependency);
                self.apply_policy(res)?
            }
            Step::RemoveDependency { job, dependency } => {
                let res = self.scheduler.try_remove_dependency(job, dependency);
                self.apply_policy(res)?
            }
            Step::Process => StepReport::Processed(self.scheduler.process_job()),
            Step::Drain => StepReport::Drained(self.scheduler.drain()),
            Step::DisplayQueue => StepReport::Display(self.scheduler.queue_snapshot().to_string()),
            Step::DisplayJobs => {
                StepReport::Display(self.scheduler.registry_snapshot().to_string())
            }
        };

        if step.is_mutation() && report == StepReport::Applied {
            let label = format!("step #{}", self.steps_applied);
            self.check_cycles(&label)?;
        }

        Ok(report)
    }

    fn apply_policy(&self, res: Result<()>) -> Result<StepReport> {
        match res {
            Ok(()) => Ok(StepReport::Applied),
            Err(JobdagError::JobNotFound(missing)) => match self.policy.unknown_ids {
                UnknownIdPolicy::Ignore => {
                    debug!(job = %missing, "step names unknown job; ignoring");
                    Ok(StepReport::Ignored { missing })
                }
                UnknownIdPolicy::Error => Err(JobdagError::JobNotFound(missing)),
            },
            Err(other) => Err(other),
        }
    }

    fn check_cycles(&self, context: &str) -> Result<()> {
        if self.policy.cycles == CyclePolicy::Allow {
            return Ok(());
        }

        let Some(cycle) = find_cycle(&self.scheduler) else {
            return Ok(());
        };

        match self.policy.cycles {
            CyclePolicy::Reject => Err(JobdagError::DagCycle(format!(
                "{context} left a dependency cycle among jobs [{}]",
                cycle.join(", ")
            ))),
            _ => {
                warn!(
                    %context,
                    ?cycle,
                    "dependency cycle present; these jobs will never become ready"
                );
                Ok(())
            }
        }
    }
}
