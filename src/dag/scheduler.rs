use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::dag::job::{Job, JobId};
use crate::dag::outcome::ProcessOutcome;
use crate::dag::queue::PendingQueue;
use crate::dag::reverse_index::ReverseIndex;
use crate::dag::snapshot::{QueueEntry, QueueSnapshot, RegistryEntry, RegistrySnapshot};
use crate::errors::{JobdagError, Result};

/// Scheduler owns the job registry, the pending queue and the reverse
/// dependency index, and keeps the three consistent.
///
/// It is responsible for:
/// - registering jobs and their unresolved dependencies
/// - handing out the first queued job whose dependencies are all cleared
/// - clearing a processed job from the dependency sets of its dependents
///
/// Invariants maintained by every operation:
/// - every queued id is registered, and appears at most once
/// - `D` is in job `J`'s dependency set iff `J` is in the reverse index under `D`
/// - the reverse index holds no empty sets
///
/// Operations that name an unknown job are no-ops; the `try_*` variants
/// report [`JobdagError::JobNotFound`] instead.
///
/// Removing a job keeps the reverse index entry under its id, so the second
/// invariant holds for its dependents. They stay blocked, but they are not
/// blocked forever: if a job with the same id is added again and processed,
/// they are released. Use [`Scheduler::remove_dependency`] on each dependent
/// to detach them for good.
#[derive(Debug, Default, Clone)]
pub struct Scheduler {
    jobs: HashMap<JobId, Job>,
    queue: PendingQueue,
    reverse: ReverseIndex,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a job and append it to the pending queue.
    ///
    /// Duplicate dependency ids collapse. Dependencies may name jobs that do
    /// not exist (yet). If `id` is already registered, the previous record is
    /// retired first, exactly as [`Scheduler::remove_job`] would, so the job
    /// moves to the back of the queue with the new dependency set.
    pub fn add_job<I, S>(&mut self, id: impl Into<JobId>, dependencies: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<JobId>,
    {
        let job = Job::new(id, dependencies);

        if self.retire(&job.id).is_some() {
            debug!(job = %job.id, "job re-added; previous record retired");
        }

        for dep in &job.dependencies {
            self.reverse.link(dep, &job.id);
        }
        self.queue.push_back(job.id.clone());

        debug!(
            job = %job.id,
            deps = job.remaining(),
            "job added to pending queue"
        );
        self.jobs.insert(job.id.clone(), job);
    }

    /// Remove a job from the registry and the queue. Unknown ids are ignored.
    ///
    /// Dependents are not touched: they keep `id` as a dependency and stay
    /// blocked until that edge is removed or a job named `id` is processed.
    /// Re-adding `id` after removal therefore picks up the old dependents.
    pub fn remove_job(&mut self, id: &str) {
        if let Err(err) = self.try_remove_job(id) {
            debug!(job = %id, %err, "remove_job: ignoring");
        }
    }

    /// Like [`Scheduler::remove_job`], but reports unknown ids.
    pub fn try_remove_job(&mut self, id: &str) -> Result<Job> {
        let job = self
            .retire(id)
            .ok_or_else(|| JobdagError::JobNotFound(id.to_string()))?;
        debug!(job = %id, "job removed");
        Ok(job)
    }

    /// Add one unresolved dependency to an existing job. Idempotent; unknown
    /// jobs are ignored.
    pub fn add_dependency(&mut self, job_id: &str, dependency_id: &str) {
        if let Err(err) = self.try_add_dependency(job_id, dependency_id) {
            debug!(job = %job_id, dep = %dependency_id, %err, "add_dependency: ignoring");
        }
    }

    /// Like [`Scheduler::add_dependency`], but reports unknown jobs.
    pub fn try_add_dependency(&mut self, job_id: &str, dependency_id: &str) -> Result<()> {
        let job = self
            .jobs
            .get_mut(job_id)
            .ok_or_else(|| JobdagError::JobNotFound(job_id.to_string()))?;

        job.dependencies.insert(dependency_id.to_string());
        self.reverse.link(dependency_id, job_id);

        debug!(job = %job_id, dep = %dependency_id, "dependency added");
        Ok(())
    }

    /// Mark one dependency of a job as satisfied. Unknown jobs are ignored.
    ///
    /// This clears the edge whether or not the depended-on job ever runs.
    pub fn remove_dependency(&mut self, job_id: &str, dependency_id: &str) {
        if let Err(err) = self.try_remove_dependency(job_id, dependency_id) {
            debug!(job = %job_id, dep = %dependency_id, %err, "remove_dependency: ignoring");
        }
    }

    /// Like [`Scheduler::remove_dependency`], but reports unknown jobs.
    pub fn try_remove_dependency(&mut self, job_id: &str, dependency_id: &str) -> Result<()> {
        let job = self
            .jobs
            .get_mut(job_id)
            .ok_or_else(|| JobdagError::JobNotFound(job_id.to_string()))?;

        job.dependencies.remove(dependency_id);
        self.reverse.unlink(dependency_id, job_id);

        debug!(
            job = %job_id,
            dep = %dependency_id,
            remaining = job.remaining(),
            "dependency removed"
        );
        Ok(())
    }

    /// Take the first queued job with no unresolved dependencies.
    ///
    /// The job leaves the queue but stays in the registry. Returns `None` when
    /// every queued job is still blocked.
    pub fn get_next_job(&mut self) -> Option<Job> {
        let jobs = &self.jobs;
        let id = self
            .queue
            .take_first(|id| jobs.get(id).is_some_and(Job::is_ready))?;
        self.jobs.get(&id).cloned()
    }

    /// Process the next ready job: retire it and clear it from the dependency
    /// sets of every job waiting on it.
    ///
    /// Dependents stay where they are in the queue; the next scan picks them
    /// up once their last dependency is gone.
    pub fn process_job(&mut self) -> ProcessOutcome {
        let Some(job) = self.get_next_job() else {
            info!("no job to process");
            return ProcessOutcome::NoJob;
        };

        info!(job = %job.id, "processing job");
        self.jobs.remove(&job.id);

        let mut newly_ready: HashSet<JobId> = HashSet::new();
        for dependent in self.reverse.take(&job.id) {
            if let Some(info) = self.jobs.get_mut(&dependent) {
                info.dependencies.remove(&job.id);
                if info.is_ready() {
                    newly_ready.insert(dependent);
                }
            }
        }

        let unblocked: Vec<JobId> = self
            .queue
            .iter()
            .filter(|id| newly_ready.contains(*id))
            .map(str::to_string)
            .collect();

        if !unblocked.is_empty() {
            debug!(job = %job.id, ?unblocked, "dependents became ready");
        }

        ProcessOutcome::Processed { job, unblocked }
    }

    /// Process jobs until none is ready; returns the processed ids in order.
    pub fn drain(&mut self) -> Vec<JobId> {
        let mut processed = Vec::new();
        while let ProcessOutcome::Processed { job, .. } = self.process_job() {
            processed.push(job.id);
        }
        processed
    }

    /// Number of registered jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.jobs.contains_key(id)
    }

    pub fn job(&self, id: &str) -> Option<&Job> {
        self.jobs.get(id)
    }

    /// All registered jobs, in no particular order.
    pub fn jobs(&self) -> impl Iterator<Item = &Job> {
        self.jobs.values()
    }

    /// Whether `id` has no unresolved dependencies. `None` if unknown.
    pub fn is_ready(&self, id: &str) -> Option<bool> {
        self.jobs.get(id).map(Job::is_ready)
    }

    /// Unresolved dependencies of `id`. `None` if unknown.
    pub fn dependencies_of(&self, id: &str) -> Option<&HashSet<JobId>> {
        self.jobs.get(id).map(|job| &job.dependencies)
    }

    /// Jobs currently waiting on `dependency_id` (which need not be registered).
    pub fn dependents_of(&self, dependency_id: &str) -> Option<&HashSet<JobId>> {
        self.reverse.get(dependency_id)
    }

    /// Queued job ids in FIFO order.
    pub fn queued_ids(&self) -> impl Iterator<Item = &str> {
        self.queue.iter()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Queued job ids that are ready right now, in the order
    /// [`Scheduler::get_next_job`] would hand them out.
    pub fn ready_jobs(&self) -> Vec<&str> {
        self.queue
            .iter()
            .filter(|id| self.jobs.get(*id).is_some_and(Job::is_ready))
            .collect()
    }

    /// Read-only access to the reverse index.
    pub fn reverse_index(&self) -> &ReverseIndex {
        &self.reverse
    }

    /// Queue order with each job's remaining dependency count.
    pub fn queue_snapshot(&self) -> QueueSnapshot {
        let entries = self
            .queue
            .iter()
            .map(|id| QueueEntry {
                id: id.to_string(),
                remaining: self.jobs.get(id).map(Job::remaining).unwrap_or(0),
            })
            .collect();
        QueueSnapshot { entries }
    }

    /// Registry contents ordered by id, with sorted dependency lists.
    pub fn registry_snapshot(&self) -> RegistrySnapshot {
        let mut entries: Vec<RegistryEntry> = self
            .jobs
            .values()
            .map(|job| RegistryEntry {
                id: job.id.clone(),
                dependencies: job
                    .sorted_dependencies()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            })
            .collect();
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        RegistrySnapshot { entries }
    }

    /// Verify the cross-structure invariants, reporting the first violation.
    pub fn check_consistency(&self) -> Result<()> {
        let mut seen: HashSet<&str> = HashSet::new();
        for id in self.queue.iter() {
            if !self.jobs.contains_key(id) {
                return Err(JobdagError::Inconsistent(format!(
                    "queued job '{id}' is not registered"
                )));
            }
            if !seen.insert(id) {
                return Err(JobdagError::Inconsistent(format!(
                    "job '{id}' is queued more than once"
                )));
            }
        }

        for job in self.jobs.values() {
            for dep in &job.dependencies {
                if !self.reverse.contains(dep, &job.id) {
                    return Err(JobdagError::Inconsistent(format!(
                        "job '{}' waits on '{dep}' but is missing from its reverse index entry",
                        job.id
                    )));
                }
            }
        }

        for (dep, dependents) in self.reverse.iter() {
            if dependents.is_empty() {
                return Err(JobdagError::Inconsistent(format!(
                    "reverse index entry for '{dep}' is empty"
                )));
            }
            for dependent in dependents {
                let listed = self
                    .jobs
                    .get(dependent)
                    .is_some_and(|job| job.dependencies.contains(dep));
                if !listed {
                    return Err(JobdagError::Inconsistent(format!(
                        "reverse index lists '{dependent}' under '{dep}' but the job does not wait on it"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Drop a job from the registry, the queue and the reverse index entries
    /// of its own dependencies.
    fn retire(&mut self, id: &str) -> Option<Job> {
        let job = self.jobs.remove(id)?;
        self.queue.remove(id);
        for dep in &job.dependencies {
            self.reverse.unlink(dep, id);
        }
        Some(job)
    }
}
