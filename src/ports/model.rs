//! Model port: the two capabilities a trained bundle exposes.
//!
//! The registry and pipeline only ever see these traits; how the objects were
//! trained or serialized is the artifact codec's concern.

/// Errors raised by a scaler or classifier call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("Shape mismatch: expected {expected} features, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("Empty input matrix")]
    EmptyInput,

    #[error("Non-finite value at column {column}")]
    NonFinite { column: usize },

    #[error("Model failure: {0}")]
    Other(String),
}

/// Feature scaler fitted at training time.
pub trait Scaler: Send + Sync {
    /// Transform a row-major matrix (one row per sample).
    ///
    /// # Errors
    /// Returns `ModelError` if the matrix shape does not match the fit or the
    /// result is not finite.
    fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, ModelError>;

    /// Width the scaler was fitted on, if known.
    fn n_features_in(&self) -> Option<usize> {
        None
    }

    /// Short identifier for logs.
    fn kind(&self) -> &str;
}

/// Binary classifier fitted at training time.
pub trait Classifier: Send + Sync {
    /// Predict one label per row.
    ///
    /// # Errors
    /// Returns `ModelError` if the matrix shape does not match the fit.
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, ModelError>;

    /// Width the classifier was fitted on, if known.
    fn n_features_in(&self) -> Option<usize> {
        None
    }

    /// Short identifier for logs.
    fn kind(&self) -> &str;
}
