//! lintlayer - layered lint configuration composer
//!
//! Inspects a project directory, infers its profile (javascript, typescript,
//! react, react-native or vue) and composes the matching lint configuration
//! from a fixed catalogue of stage-ordered layers.

pub mod catalogue;
pub mod compose;
pub mod config;
pub mod evidence;
pub mod pipeline;

pub use catalogue::{all_layers, Catalogue, CatalogueError};
pub use compose::{compose, ComposeError, ComposedConfig, ComposedEntry};
pub use config::{ConfigError, ProfileSource, RepoSettings};
pub use evidence::read_evidence;
pub use lintlayer_detect::{detect, explain, Detection, DetectionReason, Evidence};
pub use lintlayer_model::{Activation, FieldKind, FieldValue, Fields, Layer, ProjectType, Stage};
pub use pipeline::{run, Composition, PipelineError, PipelineOptions};
