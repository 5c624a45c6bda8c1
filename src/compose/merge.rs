//! Field merge logic
//!
//! Resolves two layers touching the same field for the same scope:
//! - Mappings: union by key, overlay wins per key (one level only)
//! - Sequences: REPLACE (overlay wins entirely)
//! - Scalars: override (overlay wins)

use lintlayer_model::{FieldValue, Fields};

/// Merge two field values.
///
/// Mapping entries are not merged recursively: a rule directive or a
/// settings object under a shared key is replaced as a whole.
pub fn merge_value(base: FieldValue, overlay: FieldValue) -> FieldValue {
    match (base, overlay) {
        (FieldValue::Mapping(mut base_map), FieldValue::Mapping(overlay_map)) => {
            base_map.extend(overlay_map);
            FieldValue::Mapping(base_map)
        }
        // sequences and scalars, or a kind mismatch
        (_, overlay) => overlay,
    }
}

/// Merge two field sets. Fields present on one side pass through unchanged.
pub fn merge_fields(mut base: Fields, overlay: Fields) -> Fields {
    for (name, overlay_value) in overlay {
        let merged = match base.remove(&name) {
            Some(base_value) => merge_value(base_value, overlay_value),
            None => overlay_value,
        };
        base.insert(name, merged);
    }
    base
}

/// Merge field sets in order (first is base, last has highest precedence)
pub fn merge_layers<I>(layers: I) -> Fields
where
    I: IntoIterator<Item = Fields>,
{
    layers.into_iter().fold(Fields::new(), merge_fields)
}
