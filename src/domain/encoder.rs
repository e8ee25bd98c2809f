//! Feature encoder: raw form inputs → typed features → ordered vector.
//!
//! The shell hands over a loose map of field values (numbers, or labels for
//! select boxes). The encoder coerces them into the domain's typed feature
//! struct, which fixes order and categorical codes. No range validation is
//! done here; bounds belong to the form widgets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::categories::Categorical;
use super::condition::DiagnosticDomain;
use super::features::{
    AssessmentInput, DiabetesFeatures, FeatureVector, HeartFeatures, ParkinsonsFeatures,
};

/// Error type for feature encoding.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EncodeError {
    #[error("Missing input field: {0}")]
    MissingField(&'static str),

    #[error("Unexpected input field for {domain}: {field}")]
    UnexpectedField {
        domain: DiagnosticDomain,
        field: String,
    },

    /// `value` is patient input and stays out of the message.
    #[error("{field}: expected a number")]
    ExpectedNumber { field: &'static str, value: String },

    #[error("{field}: expected one of [{accepted}], got a number")]
    ExpectedLabel {
        field: &'static str,
        accepted: String,
    },

    /// `label` is patient input and stays out of the message.
    #[error("{field}: unknown label (accepted: {accepted})")]
    UnknownLabel {
        field: &'static str,
        label: String,
        accepted: String,
    },

    #[error("{field}: value must be a finite number")]
    NonFinite { field: &'static str },
}

/// A single raw form value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Label(String),
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        Self::Label(v.to_string())
    }
}

/// Raw inputs for one assessment, keyed by feature key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawInputs(BTreeMap<String, RawValue>);

impl RawInputs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style numeric field.
    #[must_use]
    pub fn with_number(mut self, key: impl Into<String>, value: f64) -> Self {
        self.insert(key, RawValue::Number(value));
        self
    }

    /// Builder-style label field.
    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.insert(key, RawValue::Label(label.into()));
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: RawValue) {
        self.0.insert(key.into(), value);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Encode raw inputs for `domain` into the model's feature vector.
///
/// # Errors
/// Returns `EncodeError` for missing, unexpected or ill-typed fields and for
/// labels outside the category tables.
pub fn encode(domain: DiagnosticDomain, raw: &RawInputs) -> Result<FeatureVector, EncodeError> {
    Ok(parse_input(domain, raw)?.encode())
}

/// Coerce raw inputs into the domain's typed features.
///
/// # Errors
/// See [`encode`].
pub fn parse_input(
    domain: DiagnosticDomain,
    raw: &RawInputs,
) -> Result<AssessmentInput, EncodeError> {
    let keys = domain.feature_keys();
    if let Some(unexpected) = raw.keys().find(|k| !keys.iter().any(|key| key == k)) {
        return Err(EncodeError::UnexpectedField {
            domain,
            field: unexpected.to_string(),
        });
    }

    let r = FieldReader { raw };
    let input = match domain {
        DiagnosticDomain::Diabetes => AssessmentInput::Diabetes(DiabetesFeatures {
            pregnancies: r.number("pregnancies")?,
            glucose: r.number("glucose")?,
            blood_pressure: r.number("blood_pressure")?,
            skin_thickness: r.number("skin_thickness")?,
            insulin: r.number("insulin")?,
            bmi: r.number("bmi")?,
            diabetes_pedigree: r.number("diabetes_pedigree")?,
            age: r.number("age")?,
        }),
        DiagnosticDomain::Heart => AssessmentInput::Heart(HeartFeatures {
            age: r.number("age")?,
            sex: r.category("sex")?,
            chest_pain: r.category("chest_pain")?,
            resting_bp: r.number("resting_bp")?,
            cholesterol: r.number("cholesterol")?,
            fasting_blood_sugar: r.category("fasting_blood_sugar")?,
            resting_ecg: r.category("resting_ecg")?,
            max_heart_rate: r.number("max_heart_rate")?,
            exercise_angina: r.category("exercise_angina")?,
            st_depression: r.number("st_depression")?,
            st_slope: r.category("st_slope")?,
            major_vessels: r.number("major_vessels")?,
            thalassemia: r.category("thalassemia")?,
        }),
        DiagnosticDomain::Parkinsons => AssessmentInput::Parkinsons(ParkinsonsFeatures {
            fo: r.number("fo")?,
            fhi: r.number("fhi")?,
            flo: r.number("flo")?,
            jitter_percent: r.number("jitter_percent")?,
            jitter_abs: r.number("jitter_abs")?,
            rap: r.number("rap")?,
            ppq: r.number("ppq")?,
            jitter_ddp: r.number("jitter_ddp")?,
            shimmer: r.number("shimmer")?,
            shimmer_db: r.number("shimmer_db")?,
            shimmer_apq3: r.number("shimmer_apq3")?,
            shimmer_apq5: r.number("shimmer_apq5")?,
            apq: r.number("apq")?,
            shimmer_dda: r.number("shimmer_dda")?,
            nhr: r.number("nhr")?,
            hnr: r.number("hnr")?,
            rpde: r.number("rpde")?,
            dfa: r.number("dfa")?,
            spread1: r.number("spread1")?,
            spread2: r.number("spread2")?,
            d2: r.number("d2")?,
            ppe: r.number("ppe")?,
        }),
    };

    Ok(input)
}

struct FieldReader<'a> {
    raw: &'a RawInputs,
}

impl FieldReader<'_> {
    fn number(&self, field: &'static str) -> Result<f64, EncodeError> {
        let value = match self.raw.get(field) {
            None => return Err(EncodeError::MissingField(field)),
            Some(RawValue::Number(v)) => *v,
            Some(RawValue::Label(s)) => {
                s.trim()
                    .parse::<f64>()
                    .map_err(|_| EncodeError::ExpectedNumber {
                        field,
                        value: s.clone(),
                    })?
            }
        };

        if !value.is_finite() {
            return Err(EncodeError::NonFinite { field });
        }
        Ok(value)
    }

    fn category<C: Categorical>(&self, field: &'static str) -> Result<C, EncodeError> {
        match self.raw.get(field) {
            None => Err(EncodeError::MissingField(field)),
            Some(RawValue::Label(label)) => C::from_label(field, label),
            Some(RawValue::Number(_)) => Err(EncodeError::ExpectedLabel {
                field,
                accepted: C::labels().join(", "),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diabetes_inputs() -> RawInputs {
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

    fn heart_inputs() -> RawInputs {
        RawInputs::new()
            .with_number("age", 52.0)
            .with_label("sex", "Female")
            .with_label("chest_pain", "Non-anginal Pain")
            .with_number("resting_bp", 128.0)
            .with_number("cholesterol", 204.0)
            .with_label("fasting_blood_sugar", "Yes")
            .with_label("resting_ecg", "ST-T Abnormality")
            .with_number("max_heart_rate", 156.0)
            .with_label("exercise_angina", "Yes")
            .with_number("st_depression", 1.0)
            .with_label("st_slope", "Flat")
            .with_number("major_vessels", 0.0)
            .with_label("thalassemia", "Reversible Defect")
    }

    #[test]
    fn test_encode_diabetes() {
        let v = encode(DiagnosticDomain::Diabetes, &diabetes_inputs()).expect("should encode");
        assert_eq!(v.as_slice(), &[2.0, 130.0, 70.0, 20.0, 80.0, 28.5, 0.5, 45.0]);
    }

    #[test]
    fn test_encode_heart_maps_categories() {
        let v = encode(DiagnosticDomain::Heart, &heart_inputs()).expect("should encode");
        assert_eq!(
            v.as_slice(),
            &[52.0, 0.0, 2.0, 128.0, 204.0, 1.0, 1.0, 156.0, 1.0, 1.0, 1.0, 0.0, 2.0]
        );
    }

    #[test]
    fn test_encode_parkinsons_follows_key_order() {
        let mut raw = RawInputs::new();
        for (i, key) in DiagnosticDomain::Parkinsons.feature_keys().iter().enumerate() {
            raw.insert(*key, RawValue::Number(i as f64 * 0.5));
        }
        let v = encode(DiagnosticDomain::Parkinsons, &raw).expect("should encode");
        let expected: Vec<f64> = (0..22).map(|i| f64::from(i) * 0.5).collect();
        assert_eq!(v.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let raw = diabetes_inputs().with_label("bmi", " 31.2 ");
        let v = encode(DiagnosticDomain::Diabetes, &raw).expect("should encode");
        assert!((v.as_slice()[5] - 31.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_field() {
        let raw = RawInputs::new().with_number("pregnancies", 1.0);
        let err = encode(DiagnosticDomain::Diabetes, &raw).unwrap_err();
        assert_eq!(err, EncodeError::MissingField("glucose"));
    }

    #[test]
    fn test_unexpected_field() {
        let raw = diabetes_inputs().with_number("cholesterol", 200.0);
        assert!(matches!(
            encode(DiagnosticDomain::Diabetes, &raw),
            Err(EncodeError::UnexpectedField { .. })
        ));
    }

    #[test]
    fn test_unknown_label() {
        let raw = heart_inputs().with_label("chest_pain", "Sharp");
        let err = encode(DiagnosticDomain::Heart, &raw).unwrap_err();
        assert!(matches!(err, EncodeError::UnknownLabel { field: "chest_pain", .. }));
    }

    #[test]
    fn test_number_for_category_rejected() {
        let raw = heart_inputs().with_number("sex", 1.0);
        assert!(matches!(
            encode(DiagnosticDomain::Heart, &raw),
            Err(EncodeError::ExpectedLabel { field: "sex", .. })
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let raw = diabetes_inputs().with_label("glucose", "NaN");
        assert_eq!(
            encode(DiagnosticDomain::Diabetes, &raw).unwrap_err(),
            EncodeError::NonFinite { field: "glucose" }
        );
    }

    #[test]
    fn test_raw_inputs_from_json() {
        let raw: RawInputs =
            serde_json::from_str(r#"{"age": 60, "sex": "Male"}"#).expect("valid json");
        assert_eq!(raw.get("age"), Some(&RawValue::Number(60.0)));
        assert_eq!(raw.get("sex"), Some(&RawValue::Label("Male".into())));
    }
}
