//! Configuration layers
//!
//! A layer is a named bundle of fields scoped to a set of file globs and
//! activated for a set of profiles. Layers are only constructed through
//! [`LayerBuilder`], which rejects malformed declarations up front so the
//! compositor never has to second-guess its input.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::LazyLock;

use crate::{FieldValue, Fields, ModelError, ProjectType};

/// Field names the compositor emits itself; layers may not declare them.
pub const RESERVED_FIELDS: &[&str] = &["files", "languageOptions"];

static LAYER_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9-]*(/[a-z0-9-]+)*$").expect("layer name pattern is valid")
});

/// Composition stage. Later stages win conflicts against earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Universal rules, always included
    Base,
    /// Per-file-type overlays (e.g. TypeScript sources)
    Language,
    /// Per-framework overlays (e.g. React, Vue)
    Framework,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "base"),
            Self::Language => write!(f, "language"),
            Self::Framework => write!(f, "framework"),
        }
    }
}

/// Which profiles include a layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type", content = "profiles")]
pub enum Activation {
    /// Included for every profile
    Always,
    /// Included only for the listed profiles
    Only(Vec<ProjectType>),
}

impl Activation {
    pub fn includes(&self, profile: ProjectType) -> bool {
        match self {
            Self::Always => true,
            Self::Only(profiles) => profiles.contains(&profile),
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => write!(f, "always"),
            Self::Only(profiles) => {
                let names: Vec<&str> = profiles.iter().map(|p| p.as_str()).collect();
                write!(f, "{}", names.join(", "))
            }
        }
    }
}

/// An immutable, validated catalogue entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    name: String,
    stage: Stage,
    scope: Vec<String>,
    activation: Activation,
    fields: Fields,
}

impl Layer {
    pub fn builder(name: impl Into<String>, stage: Stage) -> LayerBuilder {
        LayerBuilder {
            name: name.into(),
            stage,
            scope: Vec::new(),
            activation: Activation::Always,
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// File globs this layer governs. Empty means the layer is global.
    pub fn scope(&self) -> &[String] {
        &self.scope
    }

    pub fn activation(&self) -> &Activation {
        &self.activation
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn is_global(&self) -> bool {
        self.scope.is_empty()
    }
}

/// Builder for [`Layer`]
#[derive(Debug, Clone)]
pub struct LayerBuilder {
    name: String,
    stage: Stage,
    scope: Vec<String>,
    activation: Activation,
    fields: Vec<(String, FieldValue)>,
}

impl LayerBuilder {
    /// Set the file globs this layer governs
    pub fn scope<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scope = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict the layer to the given profiles
    pub fn only<I>(mut self, profiles: I) -> Self
    where
        I: IntoIterator<Item = ProjectType>,
    {
        self.activation = Activation::Only(profiles.into_iter().collect());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.fields.push((name.into(), value));
        self
    }

    pub fn scalar(self, name: impl Into<String>, value: Value) -> Self {
        self.field(name, FieldValue::Scalar(value))
    }

    pub fn sequence(self, name: impl Into<String>, items: Vec<Value>) -> Self {
        self.field(name, FieldValue::Sequence(items))
    }

    pub fn mapping(self, name: impl Into<String>, entries: BTreeMap<String, Value>) -> Self {
        self.field(name, FieldValue::Mapping(entries))
    }

    /// Validate and build the layer
    pub fn build(self) -> Result<Layer, ModelError> {
        if !LAYER_NAME.is_match(&self.name) {
            return Err(ModelError::InvalidLayerName(self.name));
        }

        match &self.activation {
            Activation::Only(profiles) if profiles.is_empty() => {
                return Err(ModelError::EmptyActivation { layer: self.name });
            }
            Activation::Only(_) if self.stage == Stage::Base => {
                return Err(ModelError::ConditionalBaseLayer { layer: self.name });
            }
            _ => {}
        }

        let mut seen = HashSet::new();
        for pattern in &self.scope {
            if pattern.trim().is_empty() {
                return Err(ModelError::EmptyScopePattern { layer: self.name });
            }
            if !seen.insert(pattern.as_str()) {
                return Err(ModelError::DuplicateScopePattern {
                    layer: self.name.clone(),
                    pattern: pattern.clone(),
                });
            }
        }

        if self.fields.is_empty() {
            return Err(ModelError::NoFields { layer: self.name });
        }

        let mut fields = Fields::new();
        for (field, value) in self.fields {
            if RESERVED_FIELDS.contains(&field.as_str()) {
                return Err(ModelError::ReservedField {
                    layer: self.name,
                    field,
                });
            }
            if let FieldValue::Scalar(Value::Array(_) | Value::Object(_)) = value {
                return Err(ModelError::StructuredScalar {
                    layer: self.name,
                    field,
                });
            }
            if fields.contains_key(&field) {
                return Err(ModelError::DuplicateField {
                    layer: self.name,
                    field,
                });
            }
            fields.insert(field, value);
        }

        Ok(Layer {
            name: self.name,
            stage: self.stage,
            scope: self.scope,
            activation: self.activation,
            fields,
        })
    }
}
