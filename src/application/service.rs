//! Assessment service: encodes inputs, runs inference, attaches advisories.
//!
//! This is the single entry point the presentation shell talks to. It holds a
//! shared handle to the registry and never mutates it.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::{
    encode, resolve, Advisory, Assessment, AssessmentInput, DiagnosticDomain, EncodeError, Outcome,
    RawInputs,
};
use crate::Result;

use super::pipeline;
use super::registry::{LoadFailure, ModelRegistry};

/// Service for running clinical risk assessments.
#[derive(Debug, Clone)]
pub struct AssessmentService {
    registry: Arc<ModelRegistry>,
}

impl AssessmentService {
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Domains whose bundle loaded completely.
    #[must_use]
    pub fn available_domains(&self) -> BTreeSet<DiagnosticDomain> {
        self.registry.available_domains()
    }

    #[must_use]
    pub fn load_failures(&self) -> Vec<LoadFailure> {
        self.registry.load_failures()
    }

    /// Encode raw form inputs and run them through the domain's bundle.
    ///
    /// # Errors
    /// Returns `Encoding` for malformed inputs, `ModelUnavailable` or
    /// `Inference` from the pipeline.
    pub fn encode_and_predict(&self, domain: DiagnosticDomain, raw: &RawInputs) -> Result<Outcome> {
        let features = encode(domain, raw)
            .inspect_err(|e| tracing::warn!("{}", rejection_message(domain, e)))?;
        tracing::info!("Running {} assessment ({} features)", domain, features.len());

        let outcome = pipeline::predict(domain, self.registry.bundle(domain), &features)
            .inspect_err(|e| tracing::error!("{} assessment failed: {}", domain, e))?;

        tracing::info!("{} assessment complete", domain);
        Ok(outcome)
    }

    /// Advisory for an outcome. Pure lookup.
    #[must_use]
    pub fn recommendation_for(&self, domain: DiagnosticDomain, outcome: Outcome) -> &'static Advisory {
        resolve(domain, outcome)
    }

    /// Assess already-typed inputs.
    ///
    /// # Errors
    /// Returns `ModelUnavailable` or `Inference` from the pipeline.
    pub fn assess(&self, input: &AssessmentInput) -> Result<Assessment> {
        let domain = input.domain();
        let features = input.encode();
        tracing::info!("Running {} assessment ({} features)", domain, features.len());

        let outcome = pipeline::predict(domain, self.registry.bundle(domain), &features)
            .inspect_err(|e| tracing::error!("{} assessment failed: {}", domain, e))?;

        Ok(Assessment::new(domain, outcome))
    }

    /// Assess raw form inputs, producing the full record for display.
    ///
    /// # Errors
    /// Same as [`Self::encode_and_predict`].
    pub fn assess_raw(&self, domain: DiagnosticDomain, raw: &RawInputs) -> Result<Assessment> {
        let outcome = self.encode_and_predict(domain, raw)?;
        Ok(Assessment::new(domain, outcome))
    }
}

fn rejection_message(domain: DiagnosticDomain, err: &EncodeError) -> String {
    format!("{domain} input rejected: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ComponentSlot, ModelBundle};
    use crate::adapters::sanitize::sanitize;
    use crate::domain::DiabetesFeatures;
    use crate::ports::{Classifier, ModelError, Scaler};
    use crate::{ArtifactError, ClinicalError, Component};
    use std::path::PathBuf;

    struct IdentityScaler;

    impl Scaler for IdentityScaler {
        fn transform(&self, rows: &[Vec<f64>]) -> std::result::Result<Vec<Vec<f64>>, ModelError> {
            Ok(rows.to_vec())
        }

        fn kind(&self) -> &str {
            "identity"
        }
    }

    struct FixedClassifier(f64);

    impl Classifier for FixedClassifier {
        fn predict(&self, rows: &[Vec<f64>]) -> std::result::Result<Vec<f64>, ModelError> {
            Ok(vec![self.0; rows.len()])
        }

        fn kind(&self) -> &str {
            "fixed"
        }
    }

    fn service_with_label(label: f64) -> AssessmentService {
        let registry = ModelRegistry::from_bundles(|domain| match domain {
            DiagnosticDomain::Heart => ModelBundle {
                scaler: ComponentSlot::Loaded(Arc::new(IdentityScaler)),
                classifier: ComponentSlot::Unavailable(ArtifactError::Empty {
                    path: PathBuf::from("saved_models/heart_model.json"),
                }),
            },
            _ => ModelBundle::from_parts(Arc::new(IdentityScaler), Arc::new(FixedClassifier(label))),
        });
        AssessmentService::new(Arc::new(registry))
    }

    fn diabetes_raw() -> RawInputs {
        RawInputs::new()
            .with_number("pregnancies", 2.0)
            .with_number("glucose", 130.0)
            .with_number("blood_pressure", 70.0)
            .with_number("skin_thickness", 20.0)
            .with_number("insulin", 80.0)
            .with_number("bmi", 28.5)
            .with_number("diabetes_pedigree", 0.5)
            .with_number("age", 45.0)
    }

    #[test]
    fn test_diabetes_positive_end_to_end() {
        let service = service_with_label(1.0);
        let outcome = service
            .encode_and_predict(DiagnosticDomain::Diabetes, &diabetes_raw())
            .unwrap();
        assert_eq!(outcome, Outcome::Positive);

        let advisory = service.recommendation_for(DiagnosticDomain::Diabetes, outcome);
        assert_eq!(
            advisory,
            resolve(DiagnosticDomain::Diabetes, Outcome::Positive)
        );
    }

    #[test]
    fn test_diabetes_negative_end_to_end() {
        let service = service_with_label(0.0);
        let assessment = service
            .assess_raw(DiagnosticDomain::Diabetes, &diabetes_raw())
            .unwrap();
        assert_eq!(assessment.outcome, Outcome::Negative);
        assert!(std::ptr::eq(
            assessment.advisory,
            resolve(DiagnosticDomain::Diabetes, Outcome::Negative)
        ));
    }

    #[test]
    fn test_available_domains_excludes_partial_bundle() {
        let service = service_with_label(1.0);
        let available = service.available_domains();
        assert!(available.contains(&DiagnosticDomain::Diabetes));
        assert!(available.contains(&DiagnosticDomain::Parkinsons));
        assert!(!available.contains(&DiagnosticDomain::Heart));

        let failures = service.load_failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].domain, DiagnosticDomain::Heart);
    }

    #[test]
    fn test_encoding_runs_before_pipeline() {
        let service = service_with_label(1.0);
        let raw = RawInputs::new()
            .with_number("age", 63.0)
            .with_label("sex", "Male");
        let err = service
            .encode_and_predict(DiagnosticDomain::Heart, &raw)
            .unwrap_err();
        assert!(matches!(err, ClinicalError::Encoding(EncodeError::MissingField(_))));
    }

    #[test]
    fn test_rejection_log_omits_input_values() {
        let raw = RawInputs::new()
            .with_number("pregnancies", 2.0)
            .with_label("glucose", "131 mg/dL");
        let err = encode(DiagnosticDomain::Diabetes, &raw).unwrap_err();
        let line = sanitize(&rejection_message(DiagnosticDomain::Diabetes, &err));
        assert!(line.contains("glucose"));
        assert!(!line.contains("131"));

        let heart = RawInputs::new()
            .with_number("age", 63.0)
            .with_label("sex", "Intersex-7731");
        let err = encode(DiagnosticDomain::Heart, &heart).unwrap_err();
        let line = sanitize(&rejection_message(DiagnosticDomain::Heart, &err));
        assert!(!line.contains("7731"));
    }

    #[test]
    fn test_typed_assessment() {
        let service = service_with_label(1.0);
        let input = AssessmentInput::Diabetes(DiabetesFeatures {
            glucose: 130.0,
            ..DiabetesFeatures::default()
        });
        let assessment = service.assess(&input).unwrap();
        assert_eq!(assessment.domain, DiagnosticDomain::Diabetes);
        assert!(assessment.outcome.is_positive());
    }

    #[test]
    fn test_typed_assessment_unavailable() {
        use crate::domain::{
            ChestPainType, HeartFeatures, RestingEcg, Sex, StSlope, Thalassemia, YesNo,
        };
        let service = service_with_label(1.0);
        let input = AssessmentInput::Heart(HeartFeatures {
            age: 63.0,
            sex: Sex::Male,
            chest_pain: ChestPainType::TypicalAngina,
            resting_bp: 145.0,
            cholesterol: 233.0,
            fasting_blood_sugar: YesNo::Yes,
            resting_ecg: RestingEcg::Normal,
            max_heart_rate: 150.0,
            exercise_angina: YesNo::No,
            st_depression: 2.3,
            st_slope: StSlope::Upsloping,
            major_vessels: 0.0,
            thalassemia: Thalassemia::FixedDefect,
        });
        let err = service.assess(&input).unwrap_err();
        assert!(matches!(
            err,
            ClinicalError::ModelUnavailable {
                domain: DiagnosticDomain::Heart,
                component: Component::Classifier,
                ..
            }
        ));
    }
}
