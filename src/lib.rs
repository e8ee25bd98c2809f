//! # Clinical Suite
//!
//! Clinical decision-support front end for diabetes, heart-disease and
//! Parkinson's risk screening with pre-trained scaler + classifier bundles.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Diagnostic domains, feature structs, encoder, outcomes, advisories
//! - `ports`: Scaler / classifier capabilities and the artifact codec trait
//! - `adapters`: JSON linear-model codec, log sanitization
//! - `application`: Model registry, inference pipeline, assessment service
//! - `tui`: Terminal presentation shell

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

use std::path::PathBuf;

pub use application::{AssessmentService, ModelBundle, ModelRegistry};
pub use config::SuiteConfig;
pub use domain::{Assessment, DiagnosticDomain, FeatureVector, Outcome, RawInputs};

/// Result type for suite operations
pub type Result<T> = std::result::Result<T, ClinicalError>;

/// Bundle component an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Scaler,
    Classifier,
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scaler => write!(f, "scaler"),
            Self::Classifier => write!(f, "model"),
        }
    }
}

/// Per-artifact load failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArtifactError {
    #[error("Model file not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("Model file is empty: {}", path.display())]
    Empty { path: PathBuf },

    #[error("Model file unreadable: {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("Model file malformed: {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },
}

/// Main error type for the suite
#[derive(Debug, thiserror::Error)]
pub enum ClinicalError {
    #[error("{domain} {component} not loaded: {reason}")]
    ModelUnavailable {
        domain: DiagnosticDomain,
        component: Component,
        reason: ArtifactError,
    },

    #[error("Prediction error ({domain}): {reason}")]
    Inference {
        domain: DiagnosticDomain,
        reason: String,
    },

    #[error("Invalid input: {0}")]
    Encoding(#[from] domain::EncodeError),
}
