//! Ports layer: Trait definitions for external operations.
//!
//! These traits define the boundary between the inference pipeline and the
//! trained artifacts (model objects and their on-disk codec).

mod artifact;
mod model;

pub use artifact::{ArtifactCodec, CodecError};
pub use model::{Classifier, ModelError, Scaler};
