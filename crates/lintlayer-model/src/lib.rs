//! lintlayer data model
//!
//! Defines the closed set of project profiles and the tagged layer data
//! that the compositor selects and merges.

pub mod error;
pub mod field;
pub mod layer;
pub mod profile;

pub use error::ModelError;
pub use field::{FieldKind, FieldValue, Fields};
pub use layer::{Activation, Layer, LayerBuilder, Stage, RESERVED_FIELDS};
pub use profile::ProjectType;
