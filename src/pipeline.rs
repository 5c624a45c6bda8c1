//! Pipeline orchestration
//!
//! read evidence → detect → resolve profile → compose. Detection always runs,
//! even when the profile is forced, so the report can show what would have
//! been picked.

use std::path::{Path, PathBuf};

use lintlayer_detect::{explain, Detection, Evidence};
use lintlayer_model::ProjectType;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::catalogue::{Catalogue, CatalogueError};
use crate::compose::{compose, ComposeError, ComposedConfig};
use crate::config::{resolve_profile, ConfigError, ProfileSource, RepoSettings};
use crate::evidence::read_evidence;

/// Schema version for the composition report
pub const SCHEMA_VERSION: u32 = 1;

/// Schema identifier
pub const SCHEMA_ID: &str = "lintlayer/composition@1";

/// Pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("catalogue error: {0}")]
    Catalogue(#[from] CatalogueError),

    #[error("composition error: {0}")]
    Compose(#[from] ComposeError),
}

/// Pipeline inputs
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Directory evidence is read from
    pub working_dir: PathBuf,

    /// Profile forced on the command line
    pub profile_override: Option<ProjectType>,

    /// Explicit settings file (default: `<working_dir>/.lintlayer.toml`)
    pub settings_path: Option<PathBuf>,
}

impl PipelineOptions {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_profile(mut self, profile: Option<ProjectType>) -> Self {
        self.profile_override = profile;
        self
    }

    pub fn with_settings_path(mut self, path: Option<PathBuf>) -> Self {
        self.settings_path = path;
        self
    }

    /// Load the settings this run uses
    pub fn load_settings(&self) -> Result<RepoSettings, ConfigError> {
        match &self.settings_path {
            Some(path) => RepoSettings::from_file(path),
            None => RepoSettings::load_from_dir(&self.working_dir),
        }
    }
}

/// Result of one pipeline run, with provenance
#[derive(Debug, Clone, Serialize)]
pub struct Composition {
    pub schema_version: u32,
    pub schema_id: String,

    /// Active profile
    pub profile: ProjectType,

    /// Where the active profile came from
    pub profile_source: ProfileSource,

    /// What detection concluded, regardless of overrides
    pub detection: Detection,

    /// Evidence detection worked from
    pub evidence: Evidence,

    /// SHA-256 of the canonical engine output
    pub digest: String,

    /// Composed entries with the layers merged into each
    pub config: ComposedConfig,

    /// Pretty-print engine output
    #[serde(skip)]
    pub pretty: bool,
}

impl Composition {
    /// Engine JSON, formatted per settings
    pub fn to_engine_json(&self) -> Result<String, ComposeError> {
        self.config.to_engine_json(self.pretty)
    }

    /// The full report as JSON
    pub fn to_report_json(&self) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

/// Run the pipeline against the built-in catalogue
pub fn run(options: &PipelineOptions) -> Result<Composition, PipelineError> {
    run_with_catalogue(options, Catalogue::builtin()?)
}

/// Run the pipeline against `catalogue`
pub fn run_with_catalogue(
    options: &PipelineOptions,
    catalogue: &Catalogue,
) -> Result<Composition, PipelineError> {
    let settings = options.load_settings()?;
    let evidence = read_evidence(&options.working_dir);
    let detection = explain(&evidence);

    let (profile, profile_source) =
        resolve_profile(options.profile_override, settings.profile()?, detection.profile);
    info!(
        profile = %profile,
        source = %profile_source,
        detected = %detection.summary(),
        "resolved profile"
    );

    let config = compose(profile, catalogue);
    let digest = config.digest()?;

    Ok(Composition {
        schema_version: SCHEMA_VERSION,
        schema_id: SCHEMA_ID.to_string(),
        profile,
        profile_source,
        detection,
        evidence,
        digest,
        config,
        pretty: settings.output.pretty,
    })
}

/// Read evidence and detect without composing
pub fn detect_in(working_dir: &Path) -> (Evidence, Detection) {
    let evidence = read_evidence(working_dir);
    let detection = explain(&evidence);
    (evidence, detection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SETTINGS_FILE;
    use crate::evidence::MANIFEST_FILE;
    use lintlayer_detect::DetectionReason;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_empty_project_composes_javascript() {
        let dir = TempDir::new().unwrap();
        let result = run(&PipelineOptions::new(dir.path())).unwrap();

        assert_eq!(result.profile, ProjectType::Javascript);
        assert_eq!(result.profile_source, ProfileSource::Detected);
        assert_eq!(result.detection.reason, DetectionReason::Fallback);
        assert!(!result.config.is_empty());
        assert_eq!(result.digest, result.config.digest().unwrap());
    }

    #[test]
    fn test_cli_override_keeps_detection() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"{"dependencies": {"react": "^18"}}"#,
        )
        .unwrap();

        let options = PipelineOptions::new(dir.path()).with_profile(Some(ProjectType::Vue));
        let result = run(&options).unwrap();

        assert_eq!(result.profile, ProjectType::Vue);
        assert_eq!(result.profile_source, ProfileSource::Cli);
        assert_eq!(result.detection.profile, ProjectType::React);
    }

    #[test]
    fn test_repo_settings_profile() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(SETTINGS_FILE),
            "profile = \"typescript\"\n[output]\npretty = false\n",
        )
        .unwrap();

        let result = run(&PipelineOptions::new(dir.path())).unwrap();
        assert_eq!(result.profile, ProjectType::Typescript);
        assert_eq!(result.profile_source, ProfileSource::Repo);
        assert!(!result.pretty);
        assert!(!result.to_engine_json().unwrap().contains('\n'));
    }

    #[test]
    fn test_invalid_settings_is_fatal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "profile = \"svelte\"\n").unwrap();

        let result = run(&PipelineOptions::new(dir.path()));
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_missing_explicit_settings_is_fatal() {
        let dir = TempDir::new().unwrap();
        let options = PipelineOptions::new(dir.path())
            .with_settings_path(Some(dir.path().join("absent.toml")));

        assert!(matches!(
            run(&options),
            Err(PipelineError::Config(ConfigError::IoError(_)))
        ));
    }

    #[test]
    fn test_report_json_fields() {
        let dir = TempDir::new().unwrap();
        let result = run(&PipelineOptions::new(dir.path())).unwrap();
        let report: serde_json::Value =
            serde_json::from_str(&result.to_report_json().unwrap()).unwrap();

        assert_eq!(report["schema_id"], SCHEMA_ID);
        assert_eq!(report["profile"], "javascript");
        assert_eq!(report["profile_source"], "detected");
        assert!(report.get("pretty").is_none());
        assert!(report["config"]["entries"].is_array());
    }

    #[test]
    fn test_detect_in() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("tsconfig.json"), "{}").unwrap();

        let (evidence, detection) = detect_in(dir.path());
        assert!(evidence.has_type_config);
        assert_eq!(detection.profile, ProjectType::Typescript);
    }
}
