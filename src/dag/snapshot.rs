// src/dag/snapshot.rs

//! Diagnostic dumps of scheduler state.
//!
//! The text layout is for humans and is not a stable machine format.

use std::fmt;

use crate::dag::job::JobId;

/// One queue slot: the job id and how many dependencies still block it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    pub id: JobId,
    pub remaining: usize,
}

/// Pending queue in FIFO order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueSnapshot {
    pub entries: Vec<QueueEntry>,
}

impl fmt::Display for QueueSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current job queue:")?;
        for entry in &self.entries {
            writeln!(f, "Job ID: {} Dependencies: {}", entry.id, entry.remaining)?;
        }
        Ok(())
    }
}

/// One registry record with its unresolved dependencies, sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    pub id: JobId,
    pub dependencies: Vec<JobId>,
}

/// Registry contents ordered by job id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrySnapshot {
    pub entries: Vec<RegistryEntry>,
}

impl fmt::Display for RegistrySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "All jobs:")?;
        for entry in &self.entries {
            writeln!(
                f,
                "Job ID: {}, Dependencies: [{}]",
                entry.id,
                entry.dependencies.join(" ")
            )?;
        }
        Ok(())
    }
}
