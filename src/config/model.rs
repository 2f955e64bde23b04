// src/config/model.rs

use serde::Deserialize;

use crate::types::{CyclePolicy, UnknownIdPolicy};

/// Scenario file exactly as deserialized from TOML, before validation.
///
/// ```toml
/// [config]
/// unknown_ids = "ignore"
/// cycles = "warn"
///
/// [[job]]
/// id = "build"
///
/// [[job]]
/// id = "test"
/// after = ["build"]
///
/// [[step]]
/// op = "drain"
/// ```
///
/// All sections are optional; validation requires at least one job or step.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    /// Initial jobs from `[[job]]`, added in file order.
    #[serde(default)]
    pub job: Vec<JobConfig>,

    /// Script from `[[step]]`. Empty means "use the default script".
    #[serde(default)]
    pub step: Vec<Step>,
}

/// Validated scenario. Build it with `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub job: Vec<JobConfig>,
    pub step: Vec<Step>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(config: ConfigSection, job: Vec<JobConfig>, step: Vec<Step>) -> Self {
        Self { config, job, step }
    }

    /// The built-in demo: three jobs in a chain, default script.
    pub fn demo() -> Self {
        Self::new_unchecked(
            ConfigSection::default(),
            vec![
                JobConfig::new("job1", Vec::<String>::new()),
                JobConfig::new("job2", ["job1"]),
                JobConfig::new("job3", ["job1", "job2"]),
            ],
            Vec::new(),
        )
    }

    /// Steps to run: the declared script, or the default one.
    ///
    /// The default script dumps the registry and the queue, then processes
    /// one job per declared job, dumping the queue after each.
    pub fn effective_steps(&self) -> Vec<Step> {
        if !self.step.is_empty() {
            return self.step.clone();
        }

        let mut steps = vec![Step::DisplayJobs, Step::DisplayQueue];
        for _ in &self.job {
            steps.push(Step::Process);
            steps.push(Step::DisplayQueue);
        }
        steps
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ConfigSection {
    /// `"ignore"` (default) or `"error"`.
    #[serde(default)]
    pub unknown_ids: UnknownIdPolicy,

    /// `"allow"` (default), `"warn"` or `"reject"`.
    #[serde(default)]
    pub cycles: CyclePolicy,
}

/// `[[job]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobConfig {
    pub id: String,

    /// Ids this job waits on. They need not be declared anywhere.
    #[serde(default)]
    pub after: Vec<String>,
}

impl JobConfig {
    pub fn new<I, S>(id: impl Into<String>, after: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            after: after.into_iter().map(Into::into).collect(),
        }
    }
}

/// `[[step]]` entry, tagged by `op`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    AddJob {
        id: String,
        #[serde(default)]
        after: Vec<String>,
    },
    RemoveJob {
        id: String,
    },
    AddDependency {
        job: String,
        dependency: String,
    },
    RemoveDependency {
        job: String,
        dependency: String,
    },
    /// Process the next ready job, or report that there is none.
    Process,
    /// Process until no job is ready.
    Drain,
    DisplayQueue,
    DisplayJobs,
}

impl Step {
    /// Whether this step can change the job graph.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Step::AddJob { .. }
                | Step::RemoveJob { .. }
                | Step::AddDependency { .. }
                | Step::RemoveDependency { .. }
        )
    }
}
