//! Linear model adapter: JSON exports of scikit-learn style scalers and
//! linear classifiers.
//!
//! # Artifact format
//!
//! Scalers (`<domain>_scaler.json`):
//!
//! ```json
//! { "type": "standard_scaler", "mean": [..], "scale": [..] }
//! { "type": "min_max_scaler",  "min":  [..], "scale": [..] }
//! ```
//!
//! Classifiers (`<domain>_model.json`):
//!
//! ```json
//! { "type": "logistic_regression", "coef": [..], "intercept": -1.2, "classes": [0, 1] }
//! { "type": "linear_svc",          "coef": [..], "intercept":  0.4 }
//! ```
//!
//! Arithmetic follows scikit-learn exactly: `(x - mean) / scale` for the
//! standard scaler, `x * scale + min` for min-max, and `classes[1]` when the
//! decision value `coef · x + intercept` is strictly positive.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ports::{ArtifactCodec, Classifier, CodecError, ModelError, Scaler};

/// Scaler parameters as exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScalerArtifact {
    StandardScaler { mean: Vec<f64>, scale: Vec<f64> },
    MinMaxScaler { min: Vec<f64>, scale: Vec<f64> },
}

/// Classifier parameters as exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    LogisticRegression {
        coef: Vec<f64>,
        intercept: f64,
        #[serde(default = "default_classes")]
        classes: [f64; 2],
    },
    LinearSvc {
        coef: Vec<f64>,
        intercept: f64,
        #[serde(default = "default_classes")]
        classes: [f64; 2],
    },
}

fn default_classes() -> [f64; 2] {
    [0.0, 1.0]
}

fn check_params(name: &str, values: &[f64], expected_len: usize) -> Result<(), CodecError> {
    if values.len() != expected_len {
        return Err(CodecError(format!(
            "{name} has {} entries, expected {expected_len}",
            values.len()
        )));
    }
    if let Some(i) = values.iter().position(|v| !v.is_finite()) {
        return Err(CodecError(format!("{name}[{i}] is not finite")));
    }
    Ok(())
}

fn check_rows(rows: &[Vec<f64>], width: usize) -> Result<(), ModelError> {
    if rows.is_empty() {
        return Err(ModelError::EmptyInput);
    }
    for row in rows {
        if row.len() != width {
            return Err(ModelError::ShapeMismatch {
                expected: width,
                got: row.len(),
            });
        }
        if let Some(column) = row.iter().position(|v| !v.is_finite()) {
            return Err(ModelError::NonFinite { column });
        }
    }
    Ok(())
}

fn check_output(rows: &[Vec<f64>]) -> Result<(), ModelError> {
    for row in rows {
        if let Some(column) = row.iter().position(|v| !v.is_finite()) {
            return Err(ModelError::NonFinite { column });
        }
    }
    Ok(())
}

/// Standardization: `(x - mean) / scale`.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// # Errors
    /// Returns `CodecError` on empty, mismatched, non-finite or zero-scale parameters.
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, CodecError> {
        if mean.is_empty() {
            return Err(CodecError("standard_scaler has no features".into()));
        }
        check_params("mean", &mean, mean.len())?;
        check_params("scale", &scale, mean.len())?;
        if let Some(i) = scale.iter().position(|s| *s == 0.0) {
            return Err(CodecError(format!("scale[{i}] is zero")));
        }
        Ok(Self { mean, scale })
    }
}

impl Scaler for StandardScaler {
    fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, ModelError> {
        check_rows(rows, self.mean.len())?;
        let out: Vec<Vec<f64>> = rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(self.mean.iter().zip(&self.scale))
                    .map(|(x, (m, s))| (x - m) / s)
                    .collect()
            })
            .collect();
        check_output(&out)?;
        Ok(out)
    }

    fn n_features_in(&self) -> Option<usize> {
        Some(self.mean.len())
    }

    fn kind(&self) -> &str {
        "standard_scaler"
    }
}

/// Min-max scaling: `x * scale + min`.
#[derive(Debug, Clone)]
pub struct MinMaxScaler {
    min: Vec<f64>,
    scale: Vec<f64>,
}

impl MinMaxScaler {
    /// # Errors
    /// Returns `CodecError` on empty, mismatched or non-finite parameters.
    pub fn new(min: Vec<f64>, scale: Vec<f64>) -> Result<Self, CodecError> {
        if min.is_empty() {
            return Err(CodecError("min_max_scaler has no features".into()));
        }
        check_params("min", &min, min.len())?;
        check_params("scale", &scale, min.len())?;
        Ok(Self { min, scale })
    }
}

impl Scaler for MinMaxScaler {
    fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, ModelError> {
        check_rows(rows, self.min.len())?;
        let out: Vec<Vec<f64>> = rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(self.scale.iter().zip(&self.min))
                    .map(|(x, (s, m))| x * s + m)
                    .collect()
            })
            .collect();
        check_output(&out)?;
        Ok(out)
    }

    fn n_features_in(&self) -> Option<usize> {
        Some(self.min.len())
    }

    fn kind(&self) -> &str {
        "min_max_scaler"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinearKind {
    LogisticRegression,
    LinearSvc,
}

/// Binary linear classifier thresholded on the decision value.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    kind: LinearKind,
    coef: Vec<f64>,
    intercept: f64,
    classes: [f64; 2],
}

impl LinearClassifier {
    /// # Errors
    /// Returns `CodecError` on empty or non-finite parameters.
    pub fn new(
        kind: LinearKind,
        coef: Vec<f64>,
        intercept: f64,
        classes: [f64; 2],
    ) -> Result<Self, CodecError> {
        if coef.is_empty() {
            return Err(CodecError("classifier has no coefficients".into()));
        }
        check_params("coef", &coef, coef.len())?;
        check_params("intercept", &[intercept], 1)?;
        check_params("classes", &classes, 2)?;
        Ok(Self {
            kind,
            coef,
            intercept,
            classes,
        })
    }

    /// Signed distance to the separating hyperplane.
    #[must_use]
    pub fn decision_value(&self, row: &[f64]) -> f64 {
        self.coef.iter().zip(row).map(|(w, x)| w * x).sum::<f64>() + self.intercept
    }
}

impl Classifier for LinearClassifier {
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, ModelError> {
        check_rows(rows, self.coef.len())?;
        rows.iter()
            .map(|row| {
                let d = self.decision_value(row);
                if !d.is_finite() {
                    return Err(ModelError::Other("decision value is not finite".into()));
                }
                Ok(if d > 0.0 { self.classes[1] } else { self.classes[0] })
            })
            .collect()
    }

    fn n_features_in(&self) -> Option<usize> {
        Some(self.coef.len())
    }

    fn kind(&self) -> &str {
        match self.kind {
            LinearKind::LogisticRegression => "logistic_regression",
            LinearKind::LinearSvc => "linear_svc",
        }
    }
}

/// Codec for the JSON linear-model exports.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonArtifactCodec;

impl JsonArtifactCodec {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ArtifactCodec for JsonArtifactCodec {
    fn extension(&self) -> &str {
        "json"
    }

    fn decode_scaler(&self, bytes: &[u8]) -> Result<Arc<dyn Scaler>, CodecError> {
        let artifact: ScalerArtifact = serde_json::from_slice(bytes)
            .map_err(|e| CodecError(format!("Invalid scaler artifact: {e}")))?;

        Ok(match artifact {
            ScalerArtifact::StandardScaler { mean, scale } => {
                Arc::new(StandardScaler::new(mean, scale)?)
            }
            ScalerArtifact::MinMaxScaler { min, scale } => Arc::new(MinMaxScaler::new(min, scale)?),
        })
    }

    fn decode_classifier(&self, bytes: &[u8]) -> Result<Arc<dyn Classifier>, CodecError> {
        let artifact: ClassifierArtifact = serde_json::from_slice(bytes)
            .map_err(|e| CodecError(format!("Invalid classifier artifact: {e}")))?;

        let (kind, coef, intercept, classes) = match artifact {
            ClassifierArtifact::LogisticRegression {
                coef,
                intercept,
                classes,
            } => (LinearKind::LogisticRegression, coef, intercept, classes),
            ClassifierArtifact::LinearSvc {
                coef,
                intercept,
                classes,
            } => (LinearKind::LinearSvc, coef, intercept, classes),
        };

        Ok(Arc::new(LinearClassifier::new(kind, coef, intercept, classes)?))
    }
}
