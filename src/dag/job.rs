// src/dag/job.rs

//! Job records held by the scheduler registry.

use std::collections::HashSet;

/// Canonical job identifier type used throughout the crate.
pub type JobId = String;

/// A named unit of work plus the dependency ids it is still waiting on.
///
/// Dependencies are plain identifiers, not references: they may name jobs
/// that were never added, or that have already been removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    /// Dependency ids not yet satisfied for this job.
    pub dependencies: HashSet<JobId>,
}

impl Job {
    /// Build a job, collapsing duplicate dependency ids.
    pub fn new<I, S>(id: impl Into<JobId>, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<JobId>,
    {
        Self {
            id: id.into(),
            dependencies: dependencies.into_iter().map(Into::into).collect(),
        }
    }

    /// A job is ready once its unresolved-dependency set is empty.
    pub fn is_ready(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Number of dependencies still blocking this job.
    pub fn remaining(&self) -> usize {
        self.dependencies.len()
    }

    /// Dependency ids in sorted order, for stable diagnostics.
    pub fn sorted_dependencies(&self) -> Vec<&str> {
        let mut deps: Vec<&str> = self.dependencies.iter().map(|s| s.as_str()).collect();
        deps.sort_unstable();
        deps
    }
}
