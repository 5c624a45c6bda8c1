//! Profile resolution and repository settings
//!
//! The profile is taken from the first source that provides one:
//! 1. CLI `--profile`
//! 2. Repo settings (.lintlayer.toml)
//! 3. Detection

mod settings;

pub use settings::{ConfigError, OutputSettings, RepoSettings, SETTINGS_FILE};

use lintlayer_model::ProjectType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the active profile came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileSource {
    Cli,
    Repo,
    Detected,
}

impl fmt::Display for ProfileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cli => write!(f, "cli"),
            Self::Repo => write!(f, "repo"),
            Self::Detected => write!(f, "detected"),
        }
    }
}

/// Pick the profile by precedence: CLI, then repo settings, then detection
pub fn resolve_profile(
    cli: Option<ProjectType>,
    repo: Option<ProjectType>,
    detected: ProjectType,
) -> (ProjectType, ProfileSource) {
    match (cli, repo) {
        (Some(profile), _) => (profile, ProfileSource::Cli),
        (None, Some(profile)) => (profile, ProfileSource::Repo),
        (None, None) => (detected, ProfileSource::Detected),
    }
}
