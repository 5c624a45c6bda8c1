//! Error types for model construction.

/// Errors raised while parsing profiles or building layers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("unknown profile '{0}' (expected one of: javascript, typescript, react, react-native, vue)")]
    UnknownProfile(String),

    #[error("invalid layer name '{0}'")]
    InvalidLayerName(String),

    #[error("layer '{layer}': activation list is empty")]
    EmptyActivation { layer: String },

    #[error("layer '{layer}': base-stage layers must be always active")]
    ConditionalBaseLayer { layer: String },

    #[error("layer '{layer}': duplicate scope pattern '{pattern}'")]
    DuplicateScopePattern { layer: String, pattern: String },

    #[error("layer '{layer}': empty scope pattern")]
    EmptyScopePattern { layer: String },

    #[error("layer '{layer}': field '{field}' declared twice")]
    DuplicateField { layer: String, field: String },

    #[error("layer '{layer}': scalar field '{field}' holds a structured value")]
    StructuredScalar { layer: String, field: String },

    #[error("layer '{layer}': field name '{field}' is reserved")]
    ReservedField { layer: String, field: String },

    #[error("layer '{layer}': no fields declared")]
    NoFields { layer: String },
}
