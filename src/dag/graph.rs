// src/dag/graph.rs

//! Read-only graph analysis over a scheduler's current state.
//!
//! The scheduler never rejects cycles or dangling dependencies; jobs caught
//! in either simply never become ready. These helpers let callers find such
//! jobs without changing scheduler behaviour.

use std::collections::HashSet;

use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;

use crate::dag::job::JobId;
use crate::dag::scheduler::Scheduler;

/// Build a graph over registered jobs with an edge `dep -> job` for every
/// unresolved dependency that is itself registered.
fn registered_graph(scheduler: &Scheduler) -> DiGraphMap<&str, ()> {
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for job in scheduler.jobs() {
        graph.add_node(job.id.as_str());
    }

    for job in scheduler.jobs() {
        for dep in &job.dependencies {
            if scheduler.contains(dep) {
                graph.add_edge(dep.as_str(), job.id.as_str(), ());
            }
        }
    }

    graph
}

/// Every dependency cycle among registered jobs, each as a sorted list of
/// job ids. Self-dependencies count as one-job cycles. Groups are sorted by
/// their first id.
pub fn cycles(scheduler: &Scheduler) -> Vec<Vec<JobId>> {
    let graph = registered_graph(scheduler);

    let mut groups: Vec<Vec<JobId>> = tarjan_scc(&graph)
        .into_iter()
        .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
        .map(|scc| {
            let mut ids: Vec<JobId> = scc.into_iter().map(str::to_string).collect();
            ids.sort();
            ids
        })
        .collect();

    groups.sort();
    groups
}

/// The first dependency cycle found, if any.
pub fn find_cycle(scheduler: &Scheduler) -> Option<Vec<JobId>> {
    cycles(scheduler).into_iter().next()
}

/// Queued jobs that can never become ready through `process_job` alone.
///
/// A queued job can progress if each of its dependencies is a queued job
/// that can itself progress. Anything waiting on an unregistered id, a job
/// no longer in the queue, or a cycle is stalled. Result is in queue order.
pub fn stalled_jobs(scheduler: &Scheduler) -> Vec<JobId> {
    let queued: Vec<&str> = scheduler.queued_ids().collect();
    let mut resolvable: HashSet<&str> = HashSet::new();

    loop {
        let mut changed = false;
        for id in &queued {
            if resolvable.contains(id) {
                continue;
            }
            let deps_ok = scheduler
                .dependencies_of(id)
                .is_some_and(|deps| deps.iter().all(|d| resolvable.contains(d.as_str())));
            if deps_ok {
                resolvable.insert(*id);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    queued
        .into_iter()
        .filter(|id| !resolvable.contains(id))
        .map(str::to_string)
        .collect()
}
