use std::str::FromStr;
use serde::Deserialize;

/// How scenario steps treat operations that name a job which is not
/// registered.
///
/// - `Ignore`: silently skip the step (the scheduler's native behaviour).
/// - `Error`: abort the scenario with [`crate::errors::JobdagError::JobNotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownIdPolicy {
    Ignore,
    Error,
}

impl Default for UnknownIdPolicy {
    fn default() -> Self {
        UnknownIdPolicy::Ignore
    }
}

impl FromStr for UnknownIdPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ignore" => Ok(UnknownIdPolicy::Ignore),
            "error" => Ok(UnknownIdPolicy::Error),
            other => Err(format!(
                "invalid unknown_ids: {other} (expected \"ignore\" or \"error\")"
            )),
        }
    }
}

/// What to do about dependency cycles.
///
/// The scheduler itself never rejects a cycle; jobs on one simply never
/// become ready. This policy only affects config validation and the
/// scenario runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePolicy {
    /// Accept cycles without comment.
    Allow,
    /// Log a warning whenever a step leaves a cycle behind.
    Warn,
    /// Refuse cyclic initial jobs and fail the run when a step creates one.
    Reject,
}

impl Default for CyclePolicy {
    fn default() -> Self {
        CyclePolicy::Allow
    }
}

impl FromStr for CyclePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "allow" => Ok(CyclePolicy::Allow),
            "warn" => Ok(CyclePolicy::Warn),
            "reject" => Ok(CyclePolicy::Reject),
            other => Err(format!(
                "invalid cycles: {other} (expected \"allow\", \"warn\" or \"reject\")"
            )),
        }
    }
}
