//! Layer compositor
//!
//! Turns a profile and a catalogue into the ordered entry list handed to the
//! lint engine. Composition is a pure filter → sort → group/merge pipeline:
//! 1. keep layers active for the profile
//! 2. order them by stage, ties broken by declaration order (stable)
//! 3. group by identical scope, merging fields in that order
//!
//! Entries are emitted in the order their scope first appears, so base
//! entries come first and framework overlays last.

mod matcher;
mod merge;

pub use merge::{merge_fields, merge_layers, merge_value};

use lintlayer_model::{Fields, Layer, ProjectType};
use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::catalogue::Catalogue;

/// Engine key for an entry's file patterns
pub const FILES_KEY: &str = "files";

/// Engine key grouping parser-related fields
pub const LANGUAGE_OPTIONS_KEY: &str = "languageOptions";

/// Fields the engine expects under [`LANGUAGE_OPTIONS_KEY`]
pub const LANGUAGE_OPTION_FIELDS: &[&str] =
    &["ecmaVersion", "globals", "parser", "parserOptions", "sourceType"];

/// Errors producing engine output
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("JCS canonicalization error: {0}")]
    JcsError(String),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Glob pattern error: {0}")]
    GlobError(#[from] globset::Error),
}

/// One output entry: every selected layer sharing a scope, merged
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposedEntry {
    /// File globs (empty for global entries)
    pub scope: Vec<String>,

    /// Names of the layers merged into this entry, in merge order
    pub layers: Vec<String>,

    /// Merged fields
    pub fields: Fields,
}

impl ComposedEntry {
    pub fn is_global(&self) -> bool {
        self.scope.is_empty()
    }

    /// Render in the engine's flat-config shape
    pub fn to_engine_value(&self) -> Value {
        let mut object = Map::new();
        let mut language_options = Map::new();

        if !self.scope.is_empty() {
            object.insert(
                FILES_KEY.to_string(),
                Value::Array(self.scope.iter().cloned().map(Value::String).collect()),
            );
        }

        for (name, value) in &self.fields {
            if LANGUAGE_OPTION_FIELDS.contains(&name.as_str()) {
                language_options.insert(name.clone(), value.to_value());
            } else {
                object.insert(name.clone(), value.to_value());
            }
        }

        if !language_options.is_empty() {
            object.insert(
                LANGUAGE_OPTIONS_KEY.to_string(),
                Value::Object(language_options),
            );
        }

        Value::Object(object)
    }
}

/// The composed configuration for one profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposedConfig {
    pub profile: ProjectType,
    pub entries: Vec<ComposedEntry>,
}

impl ComposedConfig {
    /// The ordered entry list the lint engine consumes
    pub fn to_engine_value(&self) -> Value {
        Value::Array(self.entries.iter().map(ComposedEntry::to_engine_value).collect())
    }

    pub fn to_engine_json(&self, pretty: bool) -> Result<String, ComposeError> {
        let value = self.to_engine_value();
        if pretty {
            Ok(serde_json::to_string_pretty(&value)?)
        } else {
            Ok(serde_json::to_string(&value)?)
        }
    }

    /// SHA-256 of the JCS (RFC 8785) form of the engine value
    pub fn digest(&self) -> Result<String, ComposeError> {
        let jcs_bytes = serde_json_canonicalizer::to_vec(&self.to_engine_value())
            .map_err(|e| ComposeError::JcsError(e.to_string()))?;

        let mut hasher = Sha256::new();
        hasher.update(&jcs_bytes);
        Ok(hex::encode(hasher.finalize()))
    }

    /// The entry for an exact scope, if any
    pub fn entry<S: AsRef<str>>(&self, scope: &[S]) -> Option<&ComposedEntry> {
        self.entries.iter().find(|e| {
            e.scope.len() == scope.len()
                && e.scope.iter().zip(scope).all(|(a, b)| a == b.as_ref())
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compose the layers active for `profile`
pub fn compose(profile: ProjectType, catalogue: &Catalogue) -> ComposedConfig {
    let mut selected: Vec<(usize, &Layer)> = catalogue
        .layers()
        .iter()
        .enumerate()
        .filter(|(_, layer)| layer.activation().includes(profile))
        .collect();
    selected.sort_by_key(|(index, layer)| (layer.stage(), *index));

    let mut groups: Vec<(&[String], Vec<&Layer>)> = Vec::new();
    for (_, layer) in selected {
        match groups.iter_mut().find(|(scope, _)| *scope == layer.scope()) {
            Some((_, members)) => members.push(layer),
            None => groups.push((layer.scope(), vec![layer])),
        }
    }

    let entries: Vec<ComposedEntry> = groups
        .into_iter()
        .map(|(scope, members)| ComposedEntry {
            scope: scope.to_vec(),
            layers: members.iter().map(|l| l.name().to_string()).collect(),
            fields: merge_layers(members.iter().map(|l| l.fields().clone())),
        })
        .collect();

    let merged: Vec<&str> = entries
        .iter()
        .flat_map(|e| e.layers.iter().map(String::as_str))
        .collect();
    debug!(
        profile = %profile,
        entries = entries.len(),
        layers = ?merged,
        "composed configuration"
    );

    ComposedConfig { profile, entries }
}
