//! Per-domain feature structs and the ordered feature vector.
//!
//! The field order of each `to_array()` is the training-time column order of
//! the corresponding model. Reordering anything here produces structurally
//! valid but clinically wrong predictions.

use serde::{Deserialize, Serialize};

use super::categories::{
    Categorical, ChestPainType, RestingEcg, Sex, StSlope, Thalassemia, YesNo,
};
use super::condition::DiagnosticDomain;

/// Diabetes feature keys in model order.
pub const DIABETES_FEATURE_KEYS: [&str; 8] = [
    "pregnancies",
    "glucose",
    "blood_pressure",
    "skin_thickness",
    "insulin",
    "bmi",
    "diabetes_pedigree",
    "age",
];

/// Heart-disease feature keys in model order.
pub const HEART_FEATURE_KEYS: [&str; 13] = [
    "age",
    "sex",
    "chest_pain",
    "resting_bp",
    "cholesterol",
    "fasting_blood_sugar",
    "resting_ecg",
    "max_heart_rate",
    "exercise_angina",
    "st_depression",
    "st_slope",
    "major_vessels",
    "thalassemia",
];

/// Parkinson's voice-measure keys in model order (MDVP naming).
pub const PARKINSONS_FEATURE_KEYS: [&str; 22] = [
    "fo",
    "fhi",
    "flo",
    "jitter_percent",
    "jitter_abs",
    "rap",
    "ppq",
    "jitter_ddp",
    "shimmer",
    "shimmer_db",
    "shimmer_apq3",
    "shimmer_apq5",
    "apq",
    "shimmer_dda",
    "nhr",
    "hnr",
    "rpde",
    "dfa",
    "spread1",
    "spread2",
    "d2",
    "ppe",
];

/// Pima diabetes screening inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiabetesFeatures {
    pub pregnancies: f64,
    /// Plasma glucose, mg/dL
    pub glucose: f64,
    /// Diastolic blood pressure, mmHg
    pub blood_pressure: f64,
    /// Triceps skin fold thickness, mm
    pub skin_thickness: f64,
    /// 2-hour serum insulin
    pub insulin: f64,
    pub bmi: f64,
    pub diabetes_pedigree: f64,
    pub age: f64,
}

impl DiabetesFeatures {
    #[must_use]
    pub fn to_array(&self) -> [f64; 8] {
        [
            self.pregnancies,
            self.glucose,
            self.blood_pressure,
            self.skin_thickness,
            self.insulin,
            self.bmi,
            self.diabetes_pedigree,
            self.age,
        ]
    }
}

/// Cleveland heart-disease inputs. Categorical fields keep their typed form
/// until encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartFeatures {
    pub age: f64,
    pub sex: Sex,
    pub chest_pain: ChestPainType,
    /// Resting blood pressure, mmHg
    pub resting_bp: f64,
    /// Serum cholesterol, mg/dl
    pub cholesterol: f64,
    /// Fasting blood sugar > 120 mg/dl
    pub fasting_blood_sugar: YesNo,
    pub resting_ecg: RestingEcg,
    pub max_heart_rate: f64,
    pub exercise_angina: YesNo,
    /// ST depression induced by exercise relative to rest
    pub st_depression: f64,
    pub st_slope: StSlope,
    /// Number of major vessels colored by fluoroscopy (0-4)
    pub major_vessels: f64,
    pub thalassemia: Thalassemia,
}

impl HeartFeatures {
    #[must_use]
    pub fn to_array(&self) -> [f64; 13] {
        [
            self.age,
            f64::from(self.sex.code()),
            f64::from(self.chest_pain.code()),
            self.resting_bp,
            self.cholesterol,
            f64::from(self.fasting_blood_sugar.code()),
            f64::from(self.resting_ecg.code()),
            self.max_heart_rate,
            f64::from(self.exercise_angina.code()),
            self.st_depression,
            f64::from(self.st_slope.code()),
            self.major_vessels,
            f64::from(self.thalassemia.code()),
        ]
    }
}

/// Biomedical voice measurements for Parkinson's screening.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParkinsonsFeatures {
    /// MDVP:Fo(Hz), average vocal fundamental frequency
    pub fo: f64,
    /// MDVP:Fhi(Hz)
    pub fhi: f64,
    /// MDVP:Flo(Hz)
    pub flo: f64,
    /// MDVP:Jitter(%)
    pub jitter_percent: f64,
    /// MDVP:Jitter(Abs)
    pub jitter_abs: f64,
    /// MDVP:RAP
    pub rap: f64,
    /// MDVP:PPQ
    pub ppq: f64,
    /// Jitter:DDP
    pub jitter_ddp: f64,
    /// MDVP:Shimmer
    pub shimmer: f64,
    /// MDVP:Shimmer(dB)
    pub shimmer_db: f64,
    /// Shimmer:APQ3
    pub shimmer_apq3: f64,
    /// Shimmer:APQ5
    pub shimmer_apq5: f64,
    /// MDVP:APQ
    pub apq: f64,
    /// Shimmer:DDA
    pub shimmer_dda: f64,
    pub nhr: f64,
    pub hnr: f64,
    pub rpde: f64,
    pub dfa: f64,
    pub spread1: f64,
    pub spread2: f64,
    pub d2: f64,
    pub ppe: f64,
}

impl ParkinsonsFeatures {
    #[must_use]
    pub fn to_array(&self) -> [f64; 22] {
        [
            self.fo,
            self.fhi,
            self.flo,
            self.jitter_percent,
            self.jitter_abs,
            self.rap,
            self.ppq,
            self.jitter_ddp,
            self.shimmer,
            self.shimmer_db,
            self.shimmer_apq3,
            self.shimmer_apq5,
            self.apq,
            self.shimmer_dda,
            self.nhr,
            self.hnr,
            self.rpde,
            self.dfa,
            self.spread1,
            self.spread2,
            self.d2,
            self.ppe,
        ]
    }
}

/// Typed inputs for one assessment, tagged by domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "domain", rename_all = "snake_case")]
pub enum AssessmentInput {
    Diabetes(DiabetesFeatures),
    Heart(HeartFeatures),
    Parkinsons(ParkinsonsFeatures),
}

impl AssessmentInput {
    #[must_use]
    pub fn domain(&self) -> DiagnosticDomain {
        match self {
            Self::Diabetes(_) => DiagnosticDomain::Diabetes,
            Self::Heart(_) => DiagnosticDomain::Heart,
            Self::Parkinsons(_) => DiagnosticDomain::Parkinsons,
        }
    }

    /// Produce the ordered feature vector for the domain's models.
    #[must_use]
    pub fn encode(&self) -> FeatureVector {
        match self {
            Self::Diabetes(f) => f.into(),
            Self::Heart(f) => f.into(),
            Self::Parkinsons(f) => f.into(),
        }
    }
}

/// Ordered numeric encoding of one assessment.
///
/// Only built from the typed feature structs, so `values.len()` always equals
/// `domain.feature_count()`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    domain: DiagnosticDomain,
    values: Vec<f64>,
}

impl FeatureVector {
    fn new(domain: DiagnosticDomain, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), domain.feature_count());
        Self { domain, values }
    }

    #[must_use]
    pub fn domain(&self) -> DiagnosticDomain {
        self.domain
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reshape into a single-row matrix (1 x N).
    #[must_use]
    pub fn to_row_matrix(&self) -> Vec<Vec<f64>> {
        vec![self.values.clone()]
    }
}

impl From<&DiabetesFeatures> for FeatureVector {
    fn from(f: &DiabetesFeatures) -> Self {
        Self::new(DiagnosticDomain::Diabetes, f.to_array().to_vec())
    }
}

impl From<&HeartFeatures> for FeatureVector {
    fn from(f: &HeartFeatures) -> Self {
        Self::new(DiagnosticDomain::Heart, f.to_array().to_vec())
    }
}

impl From<&ParkinsonsFeatures> for FeatureVector {
    fn from(f: &ParkinsonsFeatures) -> Self {
        Self::new(DiagnosticDomain::Parkinsons, f.to_array().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diabetes_order() {
        let features = DiabetesFeatures {
            pregnancies: 2.0,
            glucose: 130.0,
            blood_pressure: 70.0,
            skin_thickness: 20.0,
            insulin: 80.0,
            bmi: 28.5,
            diabetes_pedigree: 0.5,
            age: 45.0,
        };
        assert_eq!(
            features.to_array(),
            [2.0, 130.0, 70.0, 20.0, 80.0, 28.5, 0.5, 45.0]
        );
    }

    #[test]
    fn test_heart_order_and_codes() {
        let features = HeartFeatures {
            age: 63.0,
            sex: Sex::Male,
            chest_pain: ChestPainType::Asymptomatic,
            resting_bp: 145.0,
            cholesterol: 233.0,
            fasting_blood_sugar: YesNo::Yes,
            resting_ecg: RestingEcg::LeftVentricularHypertrophy,
            max_heart_rate: 150.0,
            exercise_angina: YesNo::No,
            st_depression: 2.3,
            st_slope: StSlope::Downsloping,
            major_vessels: 0.0,
            thalassemia: Thalassemia::FixedDefect,
        };
        assert_eq!(
            features.to_array(),
            [63.0, 1.0, 3.0, 145.0, 233.0, 1.0, 2.0, 150.0, 0.0, 2.3, 2.0, 0.0, 1.0]
        );
    }

    #[test]
    fn test_parkinsons_order() {
        // Distinct value per position: position i holds i + 1.
        let features = ParkinsonsFeatures {
            fo: 1.0,
            fhi: 2.0,
            flo: 3.0,
            jitter_percent: 4.0,
            jitter_abs: 5.0,
            rap: 6.0,
            ppq: 7.0,
            jitter_ddp: 8.0,
            shimmer: 9.0,
            shimmer_db: 10.0,
            shimmer_apq3: 11.0,
            shimmer_apq5: 12.0,
            apq: 13.0,
            shimmer_dda: 14.0,
            nhr: 15.0,
            hnr: 16.0,
            rpde: 17.0,
            dfa: 18.0,
            spread1: 19.0,
            spread2: 20.0,
            d2: 21.0,
            ppe: 22.0,
        };
        let expected: Vec<f64> = (1..=22).map(f64::from).collect();
        assert_eq!(features.to_array().to_vec(), expected);
    }

    #[test]
    fn test_vector_matches_domain() {
        let input = AssessmentInput::Parkinsons(ParkinsonsFeatures::default());
        let vector = input.encode();
        assert_eq!(vector.domain(), DiagnosticDomain::Parkinsons);
        assert_eq!(vector.len(), 22);
        assert_eq!(vector.to_row_matrix().len(), 1);
    }
}
