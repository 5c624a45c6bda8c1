//! Layer catalogue
//!
//! An ordered, immutable registry of configuration layers. A catalogue is
//! validated as a whole when it is built, so conflicting declarations are
//! caught at load time instead of mis-merging during composition:
//! - layer names are unique
//! - every scope pattern compiles as a glob
//! - layers sharing a scope agree on the kind of every shared field
//!
//! The built-in catalogue is loaded once per process and never written.

mod builtin;

use globset::Glob;
use lintlayer_model::{FieldKind, Layer, ModelError, ProjectType};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static BUILTIN: LazyLock<Result<Catalogue, CatalogueError>> = LazyLock::new(builtin::load);

/// Catalogue validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueError {
    #[error("invalid layer: {0}")]
    Layer(#[from] ModelError),

    #[error("duplicate layer name '{0}'")]
    DuplicateLayer(String),

    #[error("layer '{layer}': invalid glob '{pattern}': {message}")]
    InvalidPattern {
        layer: String,
        pattern: String,
        message: String,
    },

    #[error(
        "field '{field}' is a {first_kind} in layer '{first}' but a {second_kind} in layer '{second}' for the same scope"
    )]
    FieldKindConflict {
        field: String,
        first: String,
        first_kind: FieldKind,
        second: String,
        second_kind: FieldKind,
    },
}

/// An ordered, validated set of layers
#[derive(Debug, Clone)]
pub struct Catalogue {
    layers: Vec<Layer>,
}

impl Catalogue {
    /// Validate and wrap layers, keeping declaration order
    pub fn new(layers: Vec<Layer>) -> Result<Self, CatalogueError> {
        let mut names = HashSet::new();
        let mut field_kinds: HashMap<&[String], HashMap<&str, (&str, FieldKind)>> = HashMap::new();

        for layer in &layers {
            if !names.insert(layer.name()) {
                return Err(CatalogueError::DuplicateLayer(layer.name().to_string()));
            }

            for pattern in layer.scope() {
                Glob::new(pattern).map_err(|e| CatalogueError::InvalidPattern {
                    layer: layer.name().to_string(),
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
            }

            let kinds = field_kinds.entry(layer.scope()).or_default();
            for (field, value) in layer.fields() {
                match kinds.get(field.as_str()) {
                    Some((first, kind)) if *kind != value.kind() => {
                        return Err(CatalogueError::FieldKindConflict {
                            field: field.clone(),
                            first: first.to_string(),
                            first_kind: *kind,
                            second: layer.name().to_string(),
                            second_kind: value.kind(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        kinds.insert(field.as_str(), (layer.name(), value.kind()));
                    }
                }
            }
        }

        Ok(Self { layers })
    }

    /// The built-in catalogue, loaded on first use
    pub fn builtin() -> Result<&'static Catalogue, CatalogueError> {
        BUILTIN.as_ref().map_err(Clone::clone)
    }

    /// All layers in declaration order
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn get(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name() == name)
    }

    /// Layers active for `profile`, in declaration order
    pub fn active_for(&self, profile: ProjectType) -> impl Iterator<Item = &Layer> {
        self.layers
            .iter()
            .filter(move |l| l.activation().includes(profile))
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// All built-in layers, in declaration order
pub fn all_layers() -> Result<&'static [Layer], CatalogueError> {
    Catalogue::builtin().map(Catalogue::layers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintlayer_model::{FieldValue, Stage};
    use serde_json::json;

    fn layer(name: &str, scope: &[&str], field: &str, value: FieldValue) -> Layer {
        Layer::builder(name, Stage::Base)
            .scope(scope.iter().copied())
            .field(field, value)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builtin_catalogue_is_valid() {
        let catalogue = Catalogue::builtin().unwrap();
        assert!(!catalogue.is_empty());
        assert!(catalogue.get("base/common").is_some());
        assert!(catalogue.get("framework/react-native").is_some());
    }

    #[test]
    fn test_all_layers_matches_builtin() {
        let layers = all_layers().unwrap();
        assert_eq!(layers.len(), Catalogue::builtin().unwrap().len());
    }

    #[test]
    fn test_builtin_base_layers_are_always_active() {
        for layer in all_layers().unwrap() {
            if layer.stage() == Stage::Base {
                for profile in ProjectType::ALL {
                    assert!(layer.activation().includes(profile), "{}", layer.name());
                }
            }
        }
    }

    #[test]
    fn test_active_for_filters() {
        let catalogue = Catalogue::builtin().unwrap();
        let names: Vec<&str> = catalogue
            .active_for(ProjectType::Javascript)
            .map(|l| l.name())
            .collect();
        assert_eq!(names, vec!["base/ignores", "base/recommended", "base/common"]);
    }

    #[test]
    fn test_reject_duplicate_layer_name() {
        let result = Catalogue::new(vec![
            layer("base/a", &[], "ignores", FieldValue::strings(["dist/"])),
            layer("base/a", &[], "ignores", FieldValue::strings(["build/"])),
        ]);
        assert_eq!(
            result.unwrap_err(),
            CatalogueError::DuplicateLayer("base/a".to_string())
        );
    }

    #[test]
    fn test_reject_invalid_glob() {
        let result = Catalogue::new(vec![layer(
            "base/a",
            &["**/*.{js"],
            "sourceType",
            FieldValue::Scalar(json!("module")),
        )]);
        assert!(matches!(
            result.unwrap_err(),
            CatalogueError::InvalidPattern { .. }
        ));
    }

    #[test]
    fn test_reject_field_kind_conflict_on_shared_scope() {
        let result = Catalogue::new(vec![
            layer(
                "base/a",
                &["**/*.js"],
                "globals",
                FieldValue::mapping([("window", json!("readonly"))]),
            ),
            layer(
                "base/b",
                &["**/*.js"],
                "globals",
                FieldValue::Scalar(json!("browser")),
            ),
        ]);
        match result.unwrap_err() {
            CatalogueError::FieldKindConflict {
                field,
                first,
                second,
                ..
            } => {
                assert_eq!(field, "globals");
                assert_eq!(first, "base/a");
                assert_eq!(second, "base/b");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_field_kinds_may_differ_across_scopes() {
        let result = Catalogue::new(vec![
            layer(
                "base/a",
                &["**/*.js"],
                "globals",
                FieldValue::mapping([("window", json!("readonly"))]),
            ),
            layer(
                "base/b",
                &["**/*.ts"],
                "globals",
                FieldValue::Scalar(json!("browser")),
            ),
        ]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_builtin_is_loaded_once() {
        let first = Catalogue::builtin().unwrap() as *const Catalogue;
        let second = Catalogue::builtin().unwrap() as *const Catalogue;
        assert_eq!(first, second);
    }
}
