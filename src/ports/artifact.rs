//! Artifact codec port: turns persisted artifact bytes into model objects.
//!
//! File discovery and the missing/empty checks stay in the registry; a codec
//! only sees the bytes of one artifact.

use std::sync::Arc;

use super::model::{Classifier, Scaler};

/// Error returned when artifact bytes cannot be decoded.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct CodecError(pub String);

/// Trait for artifact decoders.
pub trait ArtifactCodec: Send + Sync {
    /// File extension of the artifacts this codec reads, without the dot.
    fn extension(&self) -> &str;

    /// Decode a scaler artifact.
    ///
    /// # Errors
    /// Returns `CodecError` if the bytes are not a valid scaler.
    fn decode_scaler(&self, bytes: &[u8]) -> Result<Arc<dyn Scaler>, CodecError>;

    /// Decode a classifier artifact.
    ///
    /// # Errors
    /// Returns `CodecError` if the bytes are not a valid classifier.
    fn decode_classifier(&self, bytes: &[u8]) -> Result<Arc<dyn Classifier>, CodecError>;
}
