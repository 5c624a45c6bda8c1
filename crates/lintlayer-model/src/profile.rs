//! Project profiles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// The detected project classification.
///
/// Exactly one profile is active per invocation. The variant order is the
/// order used for display and listing; detection priority is owned by the
/// detector, not by this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    Javascript,
    Typescript,
    React,
    ReactNative,
    Vue,
}

impl ProjectType {
    /// Every profile, in declaration order.
    pub const ALL: [ProjectType; 5] = [
        ProjectType::Javascript,
        ProjectType::Typescript,
        ProjectType::React,
        ProjectType::ReactNative,
        ProjectType::Vue,
    ];

    /// Stable kebab-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Javascript => "javascript",
            Self::Typescript => "typescript",
            Self::React => "react",
            Self::ReactNative => "react-native",
            Self::Vue => "vue",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ModelError::UnknownProfile(s.to_string()))
    }
}
