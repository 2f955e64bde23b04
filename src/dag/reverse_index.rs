// src/dag/reverse_index.rs

//! Dependency id -> dependents lookup used to propagate completion.

use std::collections::{HashMap, HashSet};

use crate::dag::job::JobId;

/// Maps a dependency id to the set of jobs currently waiting on it.
///
/// Sets are pruned as soon as they become empty, so every key present has at
/// least one dependent.
#[derive(Debug, Default, Clone)]
pub struct ReverseIndex {
    dependents: HashMap<JobId, HashSet<JobId>>,
}

impl ReverseIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `job` waits on `dependency`.
    pub fn link(&mut self, dependency: &str, job: &str) {
        self.dependents
            .entry(dependency.to_string())
            .or_default()
            .insert(job.to_string());
    }

    /// Forget that `job` waits on `dependency`, pruning the entry if it
    /// becomes empty. Returns whether the link existed.
    pub fn unlink(&mut self, dependency: &str, job: &str) -> bool {
        let Some(set) = self.dependents.get_mut(dependency) else {
            return false;
        };
        let removed = set.remove(job);
        if set.is_empty() {
            self.dependents.remove(dependency);
        }
        removed
    }

    /// Remove and return every dependent of `dependency`.
    pub fn take(&mut self, dependency: &str) -> HashSet<JobId> {
        self.dependents.remove(dependency).unwrap_or_default()
    }

    pub fn get(&self, dependency: &str) -> Option<&HashSet<JobId>> {
        self.dependents.get(dependency)
    }

    pub fn contains(&self, dependency: &str, job: &str) -> bool {
        self.dependents
            .get(dependency)
            .is_some_and(|set| set.contains(job))
    }

    /// Number of dependency ids with at least one dependent.
    pub fn len(&self) -> usize {
        self.dependents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&JobId, &HashSet<JobId>)> {
        self.dependents.iter()
    }
}
