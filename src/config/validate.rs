// src/config/validate.rs

use std::collections::HashSet;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::{ConfigFile, RawConfigFile, Step};
use crate::errors::{JobdagError, Result};
use crate::types::CyclePolicy;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::JobdagError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.job, raw.step))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_content(cfg)?;
    validate_jobs(cfg)?;
    validate_steps(cfg)?;
    if cfg.config.cycles == CyclePolicy::Reject {
        validate_dag(cfg)?;
    }
    Ok(())
}

fn ensure_has_content(cfg: &RawConfigFile) -> Result<()> {
    if cfg.job.is_empty() && cfg.step.is_empty() {
        return Err(JobdagError::ConfigError(
            "scenario must contain at least one [[job]] or [[step]] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_jobs(cfg: &RawConfigFile) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();

    for job in cfg.job.iter() {
        if job.id.trim().is_empty() {
            return Err(JobdagError::ConfigError(
                "[[job]] entry has an empty `id`".to_string(),
            ));
        }
        if !seen.insert(job.id.as_str()) {
            return Err(JobdagError::ConfigError(format!(
                "job '{}' is declared more than once",
                job.id
            )));
        }
        if job.after.iter().any(|dep| dep.trim().is_empty()) {
            return Err(JobdagError::ConfigError(format!(
                "job '{}' has an empty id in `after`",
                job.id
            )));
        }
    }
    Ok(())
}

fn validate_steps(cfg: &RawConfigFile) -> Result<()> {
    for (idx, step) in cfg.step.iter().enumerate() {
        let ids: Vec<&str> = match step {
            Step::AddJob { id, after } => std::iter::once(id.as_str())
                .chain(after.iter().map(String::as_str))
                .collect(),
            Step::RemoveJob { id } => vec![id.as_str()],
            Step::AddDependency { job, dependency } | Step::RemoveDependency { job, dependency } => {
                vec![job.as_str(), dependency.as_str()]
            }
            Step::Process | Step::Drain | Step::DisplayQueue | Step::DisplayJobs => Vec::new(),
        };

        if ids.iter().any(|id| id.trim().is_empty()) {
            return Err(JobdagError::ConfigError(format!(
                "step #{} ({:?}) names an empty job id",
                idx + 1,
                step
            )));
        }
    }
    Ok(())
}

fn validate_dag(cfg: &RawConfigFile) -> Result<()> {
    // Edge direction: dep -> job
    // For:
    //   [[job]]
    //   id = "B"
    //   after = ["A"]
    // we add edge A -> B.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for job in cfg.job.iter() {
        graph.add_node(job.id.as_str());
    }

    for job in cfg.job.iter() {
        for dep in job.after.iter() {
            graph.add_edge(dep.as_str(), job.id.as_str(), ());
        }
    }

    // A topological sort will fail if there is a cycle.
    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => {
            let node = cycle.node_id();
            Err(JobdagError::DagCycle(format!(
                "cycle detected in initial jobs involving job '{}'",
                node
            )))
        }
    }
}
