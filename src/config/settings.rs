//! Repository settings (.lintlayer.toml)
//!
//! Optional, per-repository. Every key has a default, so a missing file is
//! equivalent to an empty one.

use lintlayer_model::ProjectType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Settings file name, looked up in the working directory
pub const SETTINGS_FILE: &str = ".lintlayer.toml";

/// Error types for settings operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Output formatting settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Pretty-print engine JSON
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

/// Repository settings from .lintlayer.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSettings {
    /// Forced profile name (e.g. "react-native"), skipping detection
    pub profile: Option<String>,

    #[serde(default)]
    pub output: OutputSettings,
}

impl RepoSettings {
    /// Load and parse settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    /// Parse settings from a TOML string
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        let settings: RepoSettings = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load `dir/.lintlayer.toml` if present, defaults otherwise
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(SETTINGS_FILE);
        if !path.is_file() {
            debug!(dir = %dir.display(), "no repository settings");
            return Ok(Self::default());
        }
        debug!(settings = %path.display(), "loading repository settings");
        Self::from_file(&path)
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.profile().map(|_| ())
    }

    /// The forced profile, if one is set
    pub fn profile(&self) -> Result<Option<ProjectType>, ConfigError> {
        self.profile
            .as_deref()
            .map(|name| {
                name.parse::<ProjectType>().map_err(|e| {
                    ConfigError::ValidationError(format!("Invalid 'profile': {}", e))
                })
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_empty_settings() {
        let settings = RepoSettings::from_str("").unwrap();
        assert_eq!(settings, RepoSettings::default());
        assert!(settings.output.pretty);
        assert_eq!(settings.profile().unwrap(), None);
    }

    #[test]
    fn test_parse_full_settings() {
        let toml = r#"
profile = "react-native"

[output]
pretty = false
"#;
        let settings = RepoSettings::from_str(toml).unwrap();
        assert_eq!(settings.profile().unwrap(), Some(ProjectType::ReactNative));
        assert!(!settings.output.pretty);
    }

    #[test]
    fn test_output_table_without_pretty_defaults_true() {
        let settings = RepoSettings::from_str("[output]\n").unwrap();
        assert!(settings.output.pretty);
    }

    #[test]
    fn test_unknown_profile_rejected() {
        let result = RepoSettings::from_str(r#"profile = "svelte""#);
        match result {
            Err(ConfigError::ValidationError(msg)) => assert!(msg.contains("svelte")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let result = RepoSettings::from_str("profile = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_from_file() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, r#"profile = "vue""#).unwrap();

        let settings = RepoSettings::from_file(temp.path()).unwrap();
        assert_eq!(settings.profile().unwrap(), Some(ProjectType::Vue));
    }

    #[test]
    fn test_load_from_dir_missing_file() {
        let dir = TempDir::new().unwrap();
        let settings = RepoSettings::load_from_dir(dir.path()).unwrap();
        assert_eq!(settings, RepoSettings::default());
    }

    #[test]
    fn test_load_from_dir_present_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "[output]\npretty = false\n").unwrap();

        let settings = RepoSettings::load_from_dir(dir.path()).unwrap();
        assert!(!settings.output.pretty);
    }
}
