//! Form field metadata used by the presentation shell.
//!
//! One entry per feature, in model order. Numeric bounds are widget bounds
//! enforced by the shell; the encoder does not re-check them.

use super::condition::DiagnosticDomain;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Number {
        min: Option<f64>,
        max: Option<f64>,
        /// Digits after the decimal point accepted by the widget
        decimals: u8,
    },
    Choice { labels: &'static [&'static str] },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Key in `RawInputs`, identical to the feature key
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn int(key: &'static str, label: &'static str, min: f64, max: f64) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Number {
                min: Some(min),
                max: Some(max),
                decimals: 0,
            },
        }
    }

    const fn real(key: &'static str, label: &'static str, min: f64, max: f64, decimals: u8) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Number {
                min: Some(min),
                max: Some(max),
                decimals,
            },
        }
    }

    const fn voice(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Number {
                min: None,
                max: None,
                decimals: 5,
            },
        }
    }

    const fn choice(key: &'static str, label: &'static str, labels: &'static [&'static str]) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Choice { labels },
        }
    }

    /// Human-readable bounds hint, e.g. `0-200`.
    #[must_use]
    pub fn hint(&self) -> String {
        match self.kind {
            FieldKind::Number {
                min: Some(min),
                max: Some(max),
                ..
            } => format!("{min}-{max}"),
            FieldKind::Number { .. } => "any value".to_string(),
            FieldKind::Choice { labels } => labels.join(" / "),
        }
    }

    /// Text a numeric widget starts with: the lower bound, or zero when
    /// unbounded, at the field's precision. `None` for choice fields.
    #[must_use]
    pub fn initial_text(&self) -> Option<String> {
        match self.kind {
            FieldKind::Number { min, decimals, .. } => {
                Some(format!("{:.*}", usize::from(decimals), min.unwrap_or(0.0)))
            }
            FieldKind::Choice { .. } => None,
        }
    }

    /// Check a numeric value against the widget bounds.
    ///
    /// # Errors
    /// Returns a user-facing message when the value is out of range.
    pub fn check_bounds(&self, value: f64) -> Result<(), String> {
        let FieldKind::Number { min, max, .. } = self.kind else {
            return Err(format!("{}: expected a selection", self.label));
        };
        if !value.is_finite() {
            return Err(format!("{}: Invalid number", self.label));
        }
        let below = min.is_some_and(|m| value < m);
        let above = max.is_some_and(|m| value > m);
        if below || above {
            return Err(format!(
                "{}: Value must be between {} and {}",
                self.label,
                min.unwrap_or(f64::NEG_INFINITY),
                max.unwrap_or(f64::INFINITY)
            ));
        }
        Ok(())
    }
}

const YES_NO: &[&str] = &["No", "Yes"];

static DIABETES_FIELDS: [FieldSpec; 8] = [
    FieldSpec::int("pregnancies", "Pregnancies", 0.0, 20.0),
    FieldSpec::int("glucose", "Glucose Level (mg/dL)", 0.0, 200.0),
    FieldSpec::int("blood_pressure", "Blood Pressure (mmHg)", 0.0, 122.0),
    FieldSpec::int("skin_thickness", "Skin Thickness (mm)", 0.0, 99.0),
    FieldSpec::int("insulin", "Insulin Level (IU/mL)", 0.0, 846.0),
    FieldSpec::real("bmi", "BMI", 0.0, 67.1, 1),
    FieldSpec::real("diabetes_pedigree", "Diabetes Pedigree Function", 0.0, 2.42, 2),
    FieldSpec::int("age", "Age", 0.0, 81.0),
];

static HEART_FIELDS: [FieldSpec; 13] = [
    FieldSpec::int("age", "Age", 0.0, 120.0),
    FieldSpec::choice("sex", "Sex", &["Male", "Female"]),
    FieldSpec::choice(
        "chest_pain",
        "Chest Pain Type",
        &["Typical Angina", "Atypical Angina", "Non-anginal Pain", "Asymptomatic"],
    ),
    FieldSpec::int("resting_bp", "Resting Blood Pressure (mmHg)", 0.0, 200.0),
    FieldSpec::int("cholesterol", "Serum Cholesterol (mg/dl)", 100.0, 600.0),
    FieldSpec::choice("fasting_blood_sugar", "Fasting Blood Sugar > 120 mg/dl", YES_NO),
    FieldSpec::choice(
        "resting_ecg",
        "Resting ECG Results",
        &["Normal", "ST-T Abnormality", "Left Ventricular Hypertrophy"],
    ),
    FieldSpec::int("max_heart_rate", "Maximum Heart Rate Achieved", 0.0, 220.0),
    FieldSpec::choice("exercise_angina", "Exercise-Induced Angina", YES_NO),
    FieldSpec::real("st_depression", "ST Depression Induced by Exercise", 0.0, 10.0, 4),
    FieldSpec::choice(
        "st_slope",
        "Slope of the Peak Exercise ST Segment",
        &["Upsloping", "Flat", "Downsloping"],
    ),
    FieldSpec::int("major_vessels", "Number of Major Vessels Colored by Fluoroscopy", 0.0, 4.0),
    FieldSpec::choice(
        "thalassemia",
        "Thalassemia Type",
        &["Normal", "Fixed Defect", "Reversible Defect"],
    ),
];

static PARKINSONS_FIELDS: [FieldSpec; 22] = [
    FieldSpec::voice("fo", "MDVP:Fo(Hz)"),
    FieldSpec::voice("fhi", "MDVP:Fhi(Hz)"),
    FieldSpec::voice("flo", "MDVP:Flo(Hz)"),
    FieldSpec::voice("jitter_percent", "MDVP:Jitter(%)"),
    FieldSpec::voice("jitter_abs", "MDVP:Jitter(Abs)"),
    FieldSpec::voice("rap", "MDVP:RAP"),
    FieldSpec::voice("ppq", "MDVP:PPQ"),
    FieldSpec::voice("jitter_ddp", "Jitter:DDP"),
    FieldSpec::voice("shimmer", "MDVP:Shimmer"),
    FieldSpec::voice("shimmer_db", "MDVP:Shimmer(dB)"),
    FieldSpec::voice("shimmer_apq3", "Shimmer:APQ3"),
    FieldSpec::voice("shimmer_apq5", "Shimmer:APQ5"),
    FieldSpec::voice("apq", "MDVP:APQ"),
    FieldSpec::voice("shimmer_dda", "Shimmer:DDA"),
    FieldSpec::voice("nhr", "NHR"),
    FieldSpec::voice("hnr", "HNR"),
    FieldSpec::voice("rpde", "RPDE"),
    FieldSpec::voice("dfa", "DFA"),
    FieldSpec::voice("spread1", "spread1"),
    FieldSpec::voice("spread2", "spread2"),
    FieldSpec::voice("d2", "D2"),
    FieldSpec::voice("ppe", "PPE"),
];

/// Form fields for a domain, in model order.
#[must_use]
pub fn form_fields(domain: DiagnosticDomain) -> &'static [FieldSpec] {
    match domain {
        DiagnosticDomain::Diabetes => &DIABETES_FIELDS,
        DiagnosticDomain::Heart => &HEART_FIELDS,
        DiagnosticDomain::Parkinsons => &PARKINSONS_FIELDS,
    }
}
