//! Application layer: Use cases and services.
//!
//! Loads the model bundles once, runs the two-stage inference pipeline and
//! pairs outcomes with their advisories.

mod pipeline;
mod registry;
mod service;

pub use pipeline::predict;
pub use registry::{ArtifactPaths, ComponentSlot, LoadFailure, ModelBundle, ModelRegistry};
pub use service::AssessmentService;
