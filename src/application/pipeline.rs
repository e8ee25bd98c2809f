//! Two-stage inference: scaler transform, then classifier predict.

use crate::domain::{DiagnosticDomain, FeatureVector, Outcome};
use crate::{ClinicalError, Component, Result};

use super::registry::ModelBundle;

/// Run one feature vector through a domain's bundle.
///
/// Availability is checked before anything is invoked, scaler first. The
/// vector is submitted as a single-row matrix and the first predicted label
/// becomes the outcome.
///
/// # Errors
/// - `ModelUnavailable` if either component failed to load
/// - `Inference` if a stage fails, the vector belongs to another domain, or
///   the label is not 0/1
pub fn predict(
    domain: DiagnosticDomain,
    bundle: &ModelBundle,
    features: &FeatureVector,
) -> Result<Outcome> {
    let scaler = bundle
        .scaler
        .get()
        .map_err(|e| ClinicalError::ModelUnavailable {
            domain,
            component: Component::Scaler,
            reason: e.clone(),
        })?;
    let classifier = bundle
        .classifier
        .get()
        .map_err(|e| ClinicalError::ModelUnavailable {
            domain,
            component: Component::Classifier,
            reason: e.clone(),
        })?;

    let inference_error = |reason: String| ClinicalError::Inference { domain, reason };

    if features.domain() != domain {
        return Err(inference_error(format!(
            "feature vector encoded for {}",
            features.domain()
        )));
    }

    let scaled = scaler
        .transform(&features.to_row_matrix())
        .map_err(|e| inference_error(format!("scaler ({}): {e}", scaler.kind())))?;

    let labels = classifier
        .predict(&scaled)
        .map_err(|e| inference_error(format!("classifier ({}): {e}", classifier.kind())))?;

    let label = *labels
        .first()
        .ok_or_else(|| inference_error("classifier returned no prediction".to_string()))?;

    let outcome = Outcome::from_label(label)
        .ok_or_else(|| inference_error(format!("unexpected class label {label}")))?;

    tracing::debug!("{} inference complete", domain);
    Ok(outcome)
}
