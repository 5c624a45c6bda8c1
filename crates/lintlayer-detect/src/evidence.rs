//! Filesystem evidence consumed by the detector.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Signals gathered from the working directory.
///
/// Built fresh per invocation and never mutated once handed to the
/// detector. Every field has an empty default, so a project with no
/// readable evidence still produces a valid value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    /// Union of runtime and development dependency names from the manifest.
    /// Empty when no manifest was found or it could not be read.
    #[serde(default)]
    pub dependency_names: BTreeSet<String>,

    /// Whether a type-system configuration file is present.
    #[serde(default)]
    pub has_type_config: bool,

    /// Lowercased file extensions (with leading dot) seen in the working
    /// directory itself.
    #[serde(default)]
    pub local_extension_hints: BTreeSet<String>,

    /// Manifest the dependency names came from. Set only when a manifest
    /// was read successfully; its presence disables the extension fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_path: Option<PathBuf>,
}

impl Evidence {
    pub fn with_dependencies<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependency_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_type_config(mut self, present: bool) -> Self {
        self.has_type_config = present;
        self
    }

    /// Set extension hints. Each hint is normalized to a lowercase,
    /// dot-prefixed form, so `"vue"` and `".VUE"` are both stored as `".vue"`.
    pub fn with_extension_hints<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.local_extension_hints = extensions
            .into_iter()
            .filter_map(|ext| normalize_extension(ext.as_ref()))
            .collect();
        self
    }

    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = Some(path.into());
        self
    }

    pub fn declares(&self, package: &str) -> bool {
        self.dependency_names.contains(package)
    }

    /// Whether a manifest was read or any dependency is known
    pub fn has_manifest_evidence(&self) -> bool {
        self.manifest_path.is_some() || !self.dependency_names.is_empty()
    }

    pub fn has_extension(&self, extension: &str) -> bool {
        self.local_extension_hints.contains(extension)
    }
}

/// Normalize an extension to `.ext` lowercase form. Returns `None` for
/// empty input.
pub fn normalize_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        return None;
    }
    Some(format!(".{}", trimmed.to_ascii_lowercase()))
}
