//! Project profile detection.
//!
//! Maps [`Evidence`] to exactly one [`ProjectType`] by evaluating a fixed,
//! ordered list of predicates. The chain ends in an unconditional fallback,
//! so detection is total and never fails.

mod evidence;
mod result;

pub use evidence::{normalize_extension, Evidence};
pub use result::{Detection, DetectionReason};

use lintlayer_model::ProjectType;
use tracing::debug;

/// Package identifier for React Native.
pub const REACT_NATIVE_PACKAGE: &str = "react-native";

/// Package identifier for Vue.
pub const VUE_PACKAGE: &str = "vue";

/// Package identifier for React.
pub const REACT_PACKAGE: &str = "react";

/// Package identifier for TypeScript.
pub const TYPESCRIPT_PACKAGE: &str = "typescript";

/// Vue single-file-component extension.
pub const VUE_SFC_EXTENSION: &str = ".vue";

/// Detect the project profile.
pub fn detect(evidence: &Evidence) -> ProjectType {
    explain(evidence).profile
}

/// Detect the project profile and report which predicate matched.
///
/// Priority, first match wins:
/// 1. react-native dependency
/// 2. vue dependency, or `.vue` files when no manifest was read and no
///    dependency is known
/// 3. react dependency
/// 4. typescript dependency or a type configuration file
/// 5. javascript
pub fn explain(evidence: &Evidence) -> Detection {
    let detection = if evidence.declares(REACT_NATIVE_PACKAGE) {
        Detection::new(
            ProjectType::ReactNative,
            DetectionReason::Dependency(REACT_NATIVE_PACKAGE.to_string()),
        )
    } else if evidence.declares(VUE_PACKAGE) {
        Detection::new(
            ProjectType::Vue,
            DetectionReason::Dependency(VUE_PACKAGE.to_string()),
        )
    } else if !evidence.has_manifest_evidence() && evidence.has_extension(VUE_SFC_EXTENSION) {
        // any manifest read, even an empty one, disables this
        Detection::new(
            ProjectType::Vue,
            DetectionReason::Extension(VUE_SFC_EXTENSION.to_string()),
        )
    } else if evidence.declares(REACT_PACKAGE) {
        Detection::new(
            ProjectType::React,
            DetectionReason::Dependency(REACT_PACKAGE.to_string()),
        )
    } else if evidence.declares(TYPESCRIPT_PACKAGE) {
        Detection::new(
            ProjectType::Typescript,
            DetectionReason::Dependency(TYPESCRIPT_PACKAGE.to_string()),
        )
    } else if evidence.has_type_config {
        Detection::new(ProjectType::Typescript, DetectionReason::TypeConfig)
    } else {
        Detection::new(ProjectType::Javascript, DetectionReason::Fallback)
    };

    debug!(
        profile = %detection.profile,
        reason = %detection.reason.to_machine_string(),
        "detected project profile"
    );
    detection
}
