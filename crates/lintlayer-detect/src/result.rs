//! Detection result types

use lintlayer_model::ProjectType;
use serde::{Deserialize, Serialize};

/// Which predicate selected the profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details", rename_all = "snake_case")]
pub enum DetectionReason {
    /// The manifest declares this package
    Dependency(String),

    /// No dependency evidence, but a file with this extension sits in the
    /// working directory
    Extension(String),

    /// A type-system configuration file is present
    TypeConfig,

    /// Nothing matched
    Fallback,
}

impl DetectionReason {
    /// Machine-readable form, e.g. "dependency:react", "fallback"
    pub fn to_machine_string(&self) -> String {
        match self {
            DetectionReason::Dependency(pkg) => format!("dependency:{}", pkg),
            DetectionReason::Extension(ext) => format!("extension:{}", ext),
            DetectionReason::TypeConfig => "type-config".to_string(),
            DetectionReason::Fallback => "fallback".to_string(),
        }
    }
}

/// Detected profile together with the reason it was picked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    pub profile: ProjectType,
    pub reason: DetectionReason,
}

impl Detection {
    pub fn new(profile: ProjectType, reason: DetectionReason) -> Self {
        Self { profile, reason }
    }

    /// One-line human summary
    pub fn summary(&self) -> String {
        let why = match &self.reason {
            DetectionReason::Dependency(pkg) => format!("manifest declares '{}'", pkg),
            DetectionReason::Extension(ext) => {
                format!("no manifest, found '{}' files", ext)
            }
            DetectionReason::TypeConfig => "type configuration file present".to_string(),
            DetectionReason::Fallback => "no framework or language evidence".to_string(),
        };
        format!("{} ({})", self.profile, why)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_machine_strings() {
        assert_eq!(
            DetectionReason::Dependency("react-native".into()).to_machine_string(),
            "dependency:react-native"
        );
        assert_eq!(
            DetectionReason::Extension(".vue".into()).to_machine_string(),
            "extension:.vue"
        );
        assert_eq!(DetectionReason::TypeConfig.to_machine_string(), "type-config");
        assert_eq!(DetectionReason::Fallback.to_machine_string(), "fallback");
    }

    #[test]
    fn test_summary() {
        let detection = Detection::new(ProjectType::Typescript, DetectionReason::TypeConfig);
        assert_eq!(detection.summary(), "typescript (type configuration file present)");
    }

    #[test]
    fn test_reason_serialization() {
        let json = serde_json::to_value(DetectionReason::Dependency("vue".into())).unwrap();
        assert_eq!(json, serde_json::json!({"type": "dependency", "details": "vue"}));
    }
}
