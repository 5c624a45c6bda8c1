//! Project manifest (package.json) parsing
//!
//! Only the two dependency tables are read; every other key is ignored.

use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Manifest file name
pub const MANIFEST_FILE: &str = "package.json";

/// Manifests larger than this are treated as unreadable (1 MiB)
pub const MAX_MANIFEST_BYTES: u64 = 1024 * 1024;

/// Errors reading a manifest. Never escape the evidence reader.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("manifest exceeds {limit} bytes")]
    TooLarge { limit: u64 },

    #[error("JSON parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// The dependency tables of a package manifest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    /// Runtime dependencies (name -> version range)
    #[serde(default)]
    pub dependencies: BTreeMap<String, Value>,

    /// Development dependencies (name -> version range)
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, Value>,
}

impl PackageManifest {
    /// Load a manifest, refusing files over [`MAX_MANIFEST_BYTES`]
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let file = File::open(path)?;
        let mut bytes = Vec::new();
        file.take(MAX_MANIFEST_BYTES + 1).read_to_end(&mut bytes)?;
        if bytes.len() as u64 > MAX_MANIFEST_BYTES {
            return Err(ManifestError::TooLarge {
                limit: MAX_MANIFEST_BYTES,
            });
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn from_str(s: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Union of runtime and development dependency names
    pub fn dependency_names(&self) -> BTreeSet<String> {
        self.dependencies
            .keys()
            .chain(self.dev_dependencies.keys())
            .cloned()
            .collect()
    }
}
