// tests/integration/error_handling.rs

use std::io::Write;
use tempfile::NamedTempFile;
use jobdag::config::load_and_validate;
use jobdag::engine::run_scenario;
use jobdag::errors::JobdagError;
use jobdag::types::{CyclePolicy, UnknownIdPolicy};
use jobdag_test_utils::builders::ScenarioBuilder;

#[test]
fn test_initial_cycle_rejected_under_reject_policy() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[config]
cycles = "reject"

[[job]]
id = "A"
after = ["B"]

[[job]]
id = "B"
after = ["A"]
"#
    )
    .unwrap();

    let result = load_and_validate(file.path());

    match result {
        Err(JobdagError::DagCycle(msg)) => {
            assert!(msg.contains("cycle detected"));
            assert!(msg.contains("A") || msg.contains("B"));
        }
        Err(e) => panic!("Expected DagCycle error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_initial_cycle_accepted_by_default() {
    let cfg = ScenarioBuilder::new()
        .with_job("A", &["B"])
        .with_job("B", &["A"])
        .build();

    let mut out = Vec::<u8>::new();
    let summary = run_scenario(&cfg, &mut out).unwrap();
    assert!(summary.processed.is_empty());
    assert_eq!(summary.stalled, vec!["A", "B"]);
}

#[test]
fn test_duplicate_job_declaration_returns_config_error() {
    let result = ScenarioBuilder::new()
        .with_job("A", &[])
        .with_job("A", &["B"])
        .try_build();

    match result {
        Err(JobdagError::ConfigError(msg)) => {
            assert!(msg.contains("declared more than once"));
            assert!(msg.contains("A"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_empty_scenario_returns_config_error() {
    let result = ScenarioBuilder::new().try_build();
    assert!(matches!(result, Err(JobdagError::ConfigError(_))));
}

#[test]
fn test_step_with_empty_id_returns_config_error() {
    let result = ScenarioBuilder::new().remove_job("  ").try_build();
    match result {
        Err(JobdagError::ConfigError(msg)) => assert!(msg.contains("step #1")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn test_unknown_id_step_fails_under_error_policy() {
    let cfg = ScenarioBuilder::new()
        .with_job("a", &[])
        .remove_dependency("ghost", "a")
        .unknown_ids(UnknownIdPolicy::Error)
        .build();

    match run_scenario(&cfg, Vec::<u8>::new()) {
        Err(JobdagError::JobNotFound(id)) => assert_eq!(id, "ghost"),
        other => panic!("Expected JobNotFound, got: {:?}", other),
    }
}

#[test]
fn test_step_creating_cycle_fails_under_reject_policy() {
    let cfg = ScenarioBuilder::new()
        .with_job("a", &[])
        .with_job("b", &["a"])
        .add_dependency("a", "b")
        .cycles(CyclePolicy::Reject)
        .build();

    match run_scenario(&cfg, Vec::<u8>::new()) {
        Err(JobdagError::DagCycle(msg)) => {
            assert!(msg.contains("step #1"));
            assert!(msg.contains("a, b"));
        }
        other => panic!("Expected DagCycle, got: {:?}", other),
    }
}

#[test]
fn test_missing_file_reports_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = load_and_validate(&missing).unwrap_err();
    assert!(err.to_string().contains("nope.toml"), "got: {err}");
    match err {
        JobdagError::ScenarioRead { path, source } => {
            assert_eq!(path, missing);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("Expected ScenarioRead, got: {:?}", other),
    }
}

#[test]
fn test_malformed_toml_returns_toml_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[[job]]\nid = \n").unwrap();
    let result = load_and_validate(file.path());
    assert!(matches!(result, Err(JobdagError::TomlError(_))));
}
