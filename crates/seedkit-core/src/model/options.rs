use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::SeedError;

/// What to do when a seed id is already tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Leave the existing document untouched
    #[default]
    Skip,
    /// Rewrite the document when its checksum changed
    Update,
    /// Fail the run
    Error,
}

impl ConflictPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictPolicy::Skip => "skip",
            ConflictPolicy::Update => "update",
            ConflictPolicy::Error => "error",
        }
    }
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConflictPolicy {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skip" => Ok(ConflictPolicy::Skip),
            "update" => Ok(ConflictPolicy::Update),
            "error" => Ok(ConflictPolicy::Error),
            other => Err(SeedError::InvalidConflictPolicy {
                value: other.to_string(),
            }),
        }
    }
}

/// When seeding should run at application startup
///
/// Deserializes from `false`, `true`, `"always"` or `"development"`. Any
/// other string is kept as `Unrecognized` and never runs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "RawRunOnStart")]
pub enum RunOnStart {
    #[default]
    Never,
    Enabled,
    Always,
    Development,
    Unrecognized(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRunOnStart {
    Flag(bool),
    Mode(String),
}

impl From<RawRunOnStart> for RunOnStart {
    fn from(raw: RawRunOnStart) -> Self {
        match raw {
            RawRunOnStart::Flag(true) => RunOnStart::Enabled,
            RawRunOnStart::Flag(false) => RunOnStart::Never,
            RawRunOnStart::Mode(mode) => RunOnStart::from_mode(&mode),
        }
    }
}

impl RunOnStart {
    fn from_mode(mode: &str) -> Self {
        match mode {
            "false" => RunOnStart::Never,
            "true" => RunOnStart::Enabled,
            "always" => RunOnStart::Always,
            "development" => RunOnStart::Development,
            other => RunOnStart::Unrecognized(other.to_string()),
        }
    }
}

impl FromStr for RunOnStart {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RunOnStart::from_mode(s))
    }
}

impl Serialize for RunOnStart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RunOnStart::Never => serializer.serialize_bool(false),
            RunOnStart::Enabled => serializer.serialize_bool(true),
            RunOnStart::Always => serializer.serialize_str("always"),
            RunOnStart::Development => serializer.serialize_str("development"),
            RunOnStart::Unrecognized(raw) => serializer.serialize_str(raw),
        }
    }
}

/// Run-wide seeding configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedingOptions {
    pub on_conflict: ConflictPolicy,
    pub run_on_start: RunOnStart,
    /// Silence the logger collaborator for this run
    pub quiet: bool,
}

impl SeedingOptions {
    pub fn with_on_conflict(mut self, policy: ConflictPolicy) -> Self {
        self.on_conflict = policy;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn with_run_on_start(mut self, run_on_start: RunOnStart) -> Self {
        self.run_on_start = run_on_start;
        self
    }
}
