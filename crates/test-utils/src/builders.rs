#![allow(dead_code)]

use jobdag::config::{ConfigFile, ConfigSection, JobConfig, RawConfigFile, Step};
use jobdag::errors::Result;
use jobdag::types::{CyclePolicy, UnknownIdPolicy};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ScenarioBuilder {
    config: RawConfigFile,
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                job: Vec::new(),
                step: Vec::new(),
            },
        }
    }

    pub fn with_job(mut self, id: &str, after: &[&str]) -> Self {
        self.config.job.push(JobConfig::new(id, after.iter().copied()));
        self
    }

    pub fn with_step(mut self, step: Step) -> Self {
        self.config.step.push(step);
        self
    }

    pub fn add_job(self, id: &str, after: &[&str]) -> Self {
        self.with_step(Step::AddJob {
            id: id.to_string(),
            after: after.iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn remove_job(self, id: &str) -> Self {
        self.with_step(Step::RemoveJob { id: id.to_string() })
    }

    pub fn add_dependency(self, job: &str, dependency: &str) -> Self {
        self.with_step(Step::AddDependency {
            job: job.to_string(),
            dependency: dependency.to_string(),
        })
    }

    pub fn remove_dependency(self, job: &str, dependency: &str) -> Self {
        self.with_step(Step::RemoveDependency {
            job: job.to_string(),
            dependency: dependency.to_string(),
        })
    }

    pub fn process(self) -> Self {
        self.with_step(Step::Process)
    }

    pub fn drain(self) -> Self {
        self.with_step(Step::Drain)
    }

    pub fn unknown_ids(mut self, policy: UnknownIdPolicy) -> Self {
        self.config.config.unknown_ids = policy;
        self
    }

    pub fn cycles(mut self, policy: CyclePolicy) -> Self {
        self.config.config.cycles = policy;
        self
    }

    /// Validate and build, surfacing validation errors.
    pub fn try_build(self) -> Result<ConfigFile> {
        ConfigFile::try_from(self.config)
    }

    pub fn build(self) -> ConfigFile {
        self.try_build()
            .expect("Failed to build valid scenario from builder")
    }
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}
