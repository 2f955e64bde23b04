// tests/integration/scenario_runtime.rs

use jobdag::config::{ConfigFile, Step};
use jobdag::dag::ProcessOutcome;
use jobdag::engine::{run_scenario, Runtime, ScenarioRunner, StepReport};
use jobdag::types::CyclePolicy;
use jobdag_test_utils::builders::ScenarioBuilder;
use jobdag_test_utils::{assert_consistent, init_tracing};

#[test]
fn test_demo_output() {
    init_tracing();
    let mut out = Vec::<u8>::new();
    let summary = run_scenario(&ConfigFile::demo(), &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    let expected = "\
All jobs:
Job ID: job1, Dependencies: []
Job ID: job2, Dependencies: [job1]
Job ID: job3, Dependencies: [job1 job2]
Current job queue:
Job ID: job1 Dependencies: 0
Job ID: job2 Dependencies: 1
Job ID: job3 Dependencies: 2
Processing job: job1
Current job queue:
Job ID: job2 Dependencies: 0
Job ID: job3 Dependencies: 1
Processing job: job2
Current job queue:
Job ID: job3 Dependencies: 0
Processing job: job3
Current job queue:
";
    assert_eq!(text, expected);
    assert_eq!(summary.processed, vec!["job1", "job2", "job3"]);
    assert_eq!(summary.remaining, 0);
    assert!(summary.stalled.is_empty());
}

#[test]
fn test_no_job_notice_is_written() {
    let cfg = ScenarioBuilder::new().with_job("x", &["y"]).process().drain().build();

    let mut out = Vec::<u8>::new();
    let summary = run_scenario(&cfg, &mut out).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "No job to process\nNo job to process\n"
    );
    assert_eq!(summary.remaining, 1);
    assert_eq!(summary.stalled, vec!["x"]);
}

#[test]
fn test_steps_mutate_and_release_jobs() {
    let cfg = ScenarioBuilder::new()
        .with_job("x", &["y"])
        .with_job("z", &["x"])
        .remove_dependency("x", "y")
        .add_job("w", &[])
        .add_dependency("z", "w")
        .drain()
        .build();

    let mut out = Vec::<u8>::new();
    let summary = run_scenario(&cfg, &mut out).unwrap();

    assert_eq!(summary.processed, vec!["x", "w", "z"]);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Processing job: x\nProcessing job: w\nProcessing job: z\n"
    );
}

#[test]
fn test_unknown_ids_are_ignored_by_default() {
    let cfg = ScenarioBuilder::new().with_job("a", &[]).build();
    let mut runner = ScenarioRunner::from_config(&cfg).unwrap();

    let report = runner
        .step(&Step::RemoveJob { id: "ghost".into() })
        .unwrap();
    assert_eq!(report, StepReport::Ignored { missing: "ghost".into() });
    assert!(runner.scheduler().contains("a"));
}

#[test]
fn test_warn_policy_keeps_running_with_cycle() {
    let cfg = ScenarioBuilder::new()
        .with_job("a", &[])
        .with_job("b", &["a"])
        .add_dependency("a", "b")
        .process()
        .cycles(CyclePolicy::Warn)
        .build();

    let mut runner = ScenarioRunner::from_config(&cfg).unwrap();
    for step in cfg.effective_steps() {
        runner.step(&step).unwrap();
    }
    assert_eq!(runner.scheduler().len(), 2);
    assert_consistent(runner.scheduler());
}

#[test]
fn test_runtime_reports_processed_outcome() {
    let cfg = ScenarioBuilder::new()
        .with_job("root", &[])
        .with_job("leaf", &["root"])
        .build();

    let mut runner = ScenarioRunner::from_config(&cfg).unwrap();
    match runner.step(&Step::Process).unwrap() {
        StepReport::Processed(ProcessOutcome::Processed { job, unblocked }) => {
            assert_eq!(job.id, "root");
            assert_eq!(unblocked, vec!["leaf"]);
        }
        other => panic!("expected Processed, got {:?}", other),
    }

    let mut runtime = Runtime::new(runner, Vec::<u8>::new());
    let summary = runtime.run(&[Step::Process, Step::Process]).unwrap();
    assert_eq!(summary.processed, vec!["leaf"]);

    let (_core, out) = runtime.into_inner();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Processing job: leaf\nNo job to process\n"
    );
}
