// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod types;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::{ConfigFile, Step};
use crate::engine::run_scenario;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - scenario loading (or the built-in demo)
/// - CLI policy overrides
/// - the scenario engine, writing to stdout
pub fn run(args: CliArgs) -> Result<()> {
    let cfg = load_config(&args)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    info!(
        jobs = cfg.job.len(),
        steps = cfg.effective_steps().len(),
        "running scenario"
    );

    let stdout = std::io::stdout();
    let summary = run_scenario(&cfg, stdout.lock())?;
    debug!(?summary, "run summary");
    Ok(())
}

/// Load the scenario named on the command line, or the demo, and apply
/// policy overrides.
///
/// Overrides are applied before validation so that `--cycles reject`
/// also checks the initial jobs.
fn load_config(args: &CliArgs) -> Result<ConfigFile> {
    let cfg = match args.config {
        Some(ref path) => load_and_validate(path)
            .with_context(|| format!("loading scenario from {path:?}"))?,
        None => {
            debug!("no --config given; using built-in demo");
            ConfigFile::demo()
        }
    };

    if args.unknown_ids.is_none() && args.cycles.is_none() {
        return Ok(cfg);
    }

    let mut raw = config::RawConfigFile {
        config: cfg.config,
        job: cfg.job,
        step: cfg.step,
    };
    if let Some(policy) = args.unknown_ids {
        raw.config.unknown_ids = policy;
    }
    if let Some(policy) = args.cycles {
        raw.config.cycles = policy;
    }
    Ok(ConfigFile::try_from(raw)?)
}

/// Simple dry-run output: print policies, jobs and steps.
fn print_dry_run(cfg: &ConfigFile) {
    println!("jobdag dry-run");
    println!("  config.unknown_ids = {:?}", cfg.config.unknown_ids);
    println!("  config.cycles = {:?}", cfg.config.cycles);
    println!();

    println!("jobs ({}):", cfg.job.len());
    for job in cfg.job.iter() {
        println!("  - {}", job.id);
        if !job.after.is_empty() {
            println!("      after: {:?}", job.after);
        }
    }

    let steps = cfg.effective_steps();
    let label = if cfg.step.is_empty() { " (default script)" } else { "" };
    println!("steps ({}){}:", steps.len(), label);
    for step in steps.iter() {
        println!("  - {}", describe_step(step));
    }

    debug!("dry-run complete (nothing run)");
}

fn describe_step(step: &Step) -> String {
    match step {
        Step::AddJob { id, after } if after.is_empty() => format!("add_job {id}"),
        Step::AddJob { id, after } => format!("add_job {id} after {after:?}"),
        Step::RemoveJob { id } => format!("remove_job {id}"),
        Step::AddDependency { job, dependency } => format!("add_dependency {job} -> {dependency}"),
        Step::RemoveDependency { job, dependency } => {
            format!("remove_dependency {job} -> {dependency}")
        }
        Step::Process => "process".to_string(),
        Step::Drain => "drain".to_string(),
        Step::DisplayQueue => "display_queue".to_string(),
        Step::DisplayJobs => "display_jobs".to_string(),
    }
}
