// src/dag/queue.rs

use std::collections::VecDeque;

use crate::dag::job::JobId;

/// FIFO of job ids awaiting readiness.
///
/// Order is insertion order and is never changed by mutations; entries only
/// leave the queue when they are taken as ready or their job is removed.
#[derive(Debug, Default, Clone)]
pub struct PendingQueue {
    ids: VecDeque<JobId>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn push_back(&mut self, id: JobId) {
        self.ids.push_back(id);
    }

    /// Remove the first entry equal to `id`. Returns whether one was found.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.ids.iter().position(|queued| queued == id) {
            Some(pos) => {
                self.ids.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Remove and return the first id accepted by `is_ready`.
    ///
    /// This is a linear scan from the front; blocked entries are skipped but
    /// keep their position.
    pub fn take_first<F>(&mut self, mut is_ready: F) -> Option<JobId>
    where
        F: FnMut(&str) -> bool,
    {
        let pos = self.ids.iter().position(|id| is_ready(id.as_str()))?;
        self.ids.remove(pos)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|queued| queued == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(|s| s.as_str())
    }
}
