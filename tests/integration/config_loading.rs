// tests/integration/config_loading.rs

use std::io::Write;
use tempfile::NamedTempFile;
use jobdag::config::{load_and_validate, parse_str, ConfigFile, Step};
use jobdag::types::{CyclePolicy, UnknownIdPolicy};

#[test]
fn test_full_scenario_file_parses() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[config]
unknown_ids = "error"
cycles = "warn"

[[job]]
id = "build"

[[job]]
id = "test"
after = ["build", "fixtures"]

[[step]]
op = "add_job"
id = "fixtures"

[[step]]
op = "remove_dependency"
job = "test"
dependency = "fixtures"

[[step]]
op = "add_dependency"
job = "test"
dependency = "lint"

[[step]]
op = "remove_job"
id = "fixtures"

[[step]]
op = "drain"

[[step]]
op = "process"

[[step]]
op = "display_queue"

[[step]]
op = "display_jobs"
"#
    )
    .unwrap();

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.config.unknown_ids, UnknownIdPolicy::Error);
    assert_eq!(cfg.config.cycles, CyclePolicy::Warn);
    assert_eq!(cfg.job.len(), 2);
    assert_eq!(cfg.job[1].after, vec!["build", "fixtures"]);
    assert_eq!(
        cfg.step,
        vec![
            Step::AddJob { id: "fixtures".into(), after: vec![] },
            Step::RemoveDependency { job: "test".into(), dependency: "fixtures".into() },
            Step::AddDependency { job: "test".into(), dependency: "lint".into() },
            Step::RemoveJob { id: "fixtures".into() },
            Step::Drain,
            Step::Process,
            Step::DisplayQueue,
            Step::DisplayJobs,
        ]
    );
}

#[test]
fn test_defaults_apply_when_config_section_missing() {
    let raw = parse_str("[[job]]\nid = \"only\"\n").unwrap();
    let cfg = ConfigFile::try_from(raw).unwrap();

    assert_eq!(cfg.config.unknown_ids, UnknownIdPolicy::Ignore);
    assert_eq!(cfg.config.cycles, CyclePolicy::Allow);
    assert!(cfg.job[0].after.is_empty());
}

#[test]
fn test_unknown_policy_value_is_rejected_at_parse_time() {
    let result = parse_str("[config]\ncycles = \"sometimes\"\n");
    assert!(result.is_err());
}

#[test]
fn test_unknown_step_op_is_rejected_at_parse_time() {
    let result = parse_str("[[step]]\nop = \"explode\"\n");
    assert!(result.is_err());
}

#[test]
fn test_default_script_mirrors_demo_sequence() {
    let cfg = ConfigFile::demo();
    let steps = cfg.effective_steps();

    assert_eq!(
        steps,
        vec![
            Step::DisplayJobs,
            Step::DisplayQueue,
            Step::Process,
            Step::DisplayQueue,
            Step::Process,
            Step::DisplayQueue,
            Step::Process,
            Step::DisplayQueue,
        ]
    );
}

#[test]
fn test_policies_parse_from_str() {
    assert_eq!("Error".parse::<UnknownIdPolicy>(), Ok(UnknownIdPolicy::Error));
    assert_eq!(" reject ".parse::<CyclePolicy>(), Ok(CyclePolicy::Reject));
    assert!("maybe".parse::<CyclePolicy>().is_err());
}

#[test]
fn test_bundled_diamond_scenario_runs() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/diamond.toml");
    let cfg = load_and_validate(&path).unwrap();

    let mut out = Vec::<u8>::new();
    let summary = jobdag::engine::run_scenario(&cfg, &mut out).unwrap();

    assert_eq!(summary.processed, vec!["fetch", "compile", "docs", "package", "publish"]);
    assert_eq!(summary.remaining, 0);
    let text = String::from_utf8(out).unwrap();
    assert!(text.ends_with("Processing job: publish\nNo job to process\n"));
}
