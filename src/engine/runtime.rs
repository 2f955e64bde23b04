// src/engine/runtime.rs

//! IO shell around [`ScenarioRunner`]: feeds it steps and writes each report
//! to an output sink (stdout in production, a buffer in tests).

use std::io::Write;

use tracing::{info, warn};

use crate::config::model::{ConfigFile, Step};
use crate::dag::graph::stalled_jobs;
use crate::dag::{JobId, Scheduler};
use crate::engine::core::{ScenarioRunner, StepReport};
use crate::errors::Result;

/// Summary of a finished scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Every job processed during the run, in order.
    pub processed: Vec<JobId>,
    /// Jobs still registered when the script ended.
    pub remaining: usize,
    /// Queued jobs that can never become ready without outside help.
    pub stalled: Vec<JobId>,
}

pub struct Runtime<W: Write> {
    core: ScenarioRunner,
    out: W,
}

impl<W: Write> Runtime<W> {
    pub fn new(core: ScenarioRunner, out: W) -> Self {
        Self { core, out }
    }

    pub fn scheduler(&self) -> &Scheduler {
        self.core.scheduler()
    }

    /// Run all steps in order, stopping at the first error.
    pub fn run(&mut self, steps: &[Step]) -> Result<RunSummary> {
        let mut processed = Vec::new();

        for step in steps {
            let report = self.core.step(step)?;
            match &report {
                StepReport::Processed(outcome) => {
                    processed.extend(outcome.processed_id().map(str::to_string));
                }
                StepReport::Drained(ids) => processed.extend(ids.iter().cloned()),
                _ => {}
            }
            write!(self.out, "{report}")?;
        }
        self.out.flush()?;

        let scheduler = self.core.scheduler();
        let stalled = stalled_jobs(scheduler);
        if !stalled.is_empty() {
            warn!(?stalled, "some queued jobs can never become ready");
        }

        let summary = RunSummary {
            processed,
            remaining: scheduler.len(),
            stalled,
        };
        info!(
            processed = summary.processed.len(),
            remaining = summary.remaining,
            "scenario finished"
        );
        Ok(summary)
    }

    pub fn into_inner(self) -> (ScenarioRunner, W) {
        (self.core, self.out)
    }
}

/// Convenience: build a runner from `cfg` and run its effective steps.
pub fn run_scenario<W: Write>(cfg: &ConfigFile, out: W) -> Result<RunSummary> {
    let core = ScenarioRunner::from_config(cfg)?;
    let mut runtime = Runtime::new(core, out);
    runtime.run(&cfg.effective_steps())
}
