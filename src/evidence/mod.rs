//! Evidence reader
//!
//! Gathers the bounded set of filesystem signals the detector works from:
//! - dependency names from the nearest manifest (working dir + up to
//!   [`MANIFEST_SEARCH_DEPTH`] ancestors)
//! - presence of a type configuration file in the working directory
//! - file extensions in the working directory (non-recursive, at most
//!   [`MAX_SCAN_ENTRIES`] entries in file-name order)
//!
//! Reading never fails. Missing, unreadable or malformed inputs degrade the
//! corresponding field to its empty default and are logged.

mod manifest;

pub use manifest::{ManifestError, PackageManifest, MANIFEST_FILE, MAX_MANIFEST_BYTES};

use lintlayer_detect::{normalize_extension, Evidence};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Type-system configuration file whose presence is a signal
pub const TYPE_CONFIG_FILE: &str = "tsconfig.json";

/// Number of ancestor directories searched for a manifest
pub const MANIFEST_SEARCH_DEPTH: usize = 3;

/// Maximum directory entries inspected by the extension scan
pub const MAX_SCAN_ENTRIES: usize = 512;

/// Read evidence for a working directory
pub fn read_evidence(working_dir: &Path) -> Evidence {
    let root = working_dir
        .canonicalize()
        .unwrap_or_else(|_| working_dir.to_path_buf());

    let mut evidence = Evidence::default();

    if let Some(path) = find_manifest(&root) {
        match PackageManifest::from_file(&path) {
            Ok(manifest) => {
                evidence.dependency_names = manifest.dependency_names();
                debug!(
                    manifest = %path.display(),
                    dependencies = evidence.dependency_names.len(),
                    "read project manifest"
                );
                evidence.manifest_path = Some(path);
            }
            Err(e) => {
                warn!(manifest = %path.display(), error = %e, "ignoring unreadable manifest");
            }
        }
    } else {
        debug!(dir = %root.display(), "no manifest found");
    }

    evidence.has_type_config = root.join(TYPE_CONFIG_FILE).is_file();
    evidence.local_extension_hints = scan_extensions(&root);
    evidence
}

/// Find the nearest manifest, walking upward at most
/// [`MANIFEST_SEARCH_DEPTH`] directories above `start`
pub fn find_manifest(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .take(MANIFEST_SEARCH_DEPTH + 1)
        .map(|dir| dir.join(MANIFEST_FILE))
        .find(|candidate| candidate.is_file())
}

/// Collect file extensions present directly in `dir`
pub fn scan_extensions(dir: &Path) -> BTreeSet<String> {
    let mut extensions = BTreeSet::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .take(MAX_SCAN_ENTRIES)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(ext) = entry
            .path()
            .extension()
            .and_then(|ext| normalize_extension(&ext.to_string_lossy()))
        {
            extensions.insert(ext);
        }
    }

    extensions
}
