//! File matching against composed entries

use globset::{Glob, GlobSet, GlobSetBuilder};

use super::{ComposeError, ComposedConfig, ComposedEntry};

/// Normalize a path to the relative, slash-separated form scope globs use
fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let mut trimmed = path.as_str();
    while let Some(rest) = trimmed.strip_prefix("./") {
        trimmed = rest;
    }
    trimmed.to_string()
}

fn scope_matcher(scope: &[String]) -> Result<GlobSet, ComposeError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in scope {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

impl ComposedConfig {
    /// Entries governing `path`: every global entry plus every entry with a
    /// matching scope pattern, in output order
    pub fn entries_for(&self, path: &str) -> Result<Vec<&ComposedEntry>, ComposeError> {
        let path = normalize_path(path);
        let mut matched = Vec::new();

        for entry in &self.entries {
            if entry.is_global() || scope_matcher(&entry.scope)?.is_match(&path) {
                matched.push(entry);
            }
        }

        Ok(matched)
    }
}
