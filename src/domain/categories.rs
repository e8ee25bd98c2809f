//! Closed category tables for the heart-disease features.
//!
//! Each table maps the human-readable label shown in the form to the integer
//! the heart model was trained with. Tables are fixed at compile time.

use serde::{Deserialize, Serialize};

use super::encoder::EncodeError;

/// A categorical clinical field with a fixed label → code table.
pub trait Categorical: Sized + Copy + PartialEq + 'static {
    /// Every variant with its label and model code, in form order.
    const TABLE: &'static [(Self, &'static str, u8)];

    /// Integer code fed to the model.
    fn code(self) -> u8 {
        Self::TABLE
            .iter()
            .find(|(v, _, _)| *v == self)
            .map(|(_, _, code)| *code)
            .unwrap_or_default()
    }

    /// Label shown to the user.
    fn label(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(v, _, _)| *v == self)
            .map(|(_, label, _)| *label)
            .unwrap_or_default()
    }

    /// All accepted labels, in form order.
    fn labels() -> Vec<&'static str> {
        Self::TABLE.iter().map(|(_, label, _)| *label).collect()
    }

    /// Parse an exact label for `field`.
    ///
    /// # Errors
    /// Returns `EncodeError::UnknownLabel` if the label is not in the table.
    fn from_label(field: &'static str, label: &str) -> Result<Self, EncodeError> {
        Self::TABLE
            .iter()
            .find(|(_, l, _)| *l == label)
            .map(|(v, _, _)| *v)
            .ok_or_else(|| EncodeError::UnknownLabel {
                field,
                label: label.to_string(),
                accepted: Self::labels().join(", "),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Categorical for Sex {
    const TABLE: &'static [(Self, &'static str, u8)] =
        &[(Self::Male, "Male", 1), (Self::Female, "Female", 0)];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChestPainType {
    TypicalAngina,
    AtypicalAngina,
    NonAnginalPain,
    Asymptomatic,
}

impl Categorical for ChestPainType {
    const TABLE: &'static [(Self, &'static str, u8)] = &[
        (Self::TypicalAngina, "Typical Angina", 0),
        (Self::AtypicalAngina, "Atypical Angina", 1),
        (Self::NonAnginalPain, "Non-anginal Pain", 2),
        (Self::Asymptomatic, "Asymptomatic", 3),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestingEcg {
    Normal,
    StTAbnormality,
    LeftVentricularHypertrophy,
}

impl Categorical for RestingEcg {
    const TABLE: &'static [(Self, &'static str, u8)] = &[
        (Self::Normal, "Normal", 0),
        (Self::StTAbnormality, "ST-T Abnormality", 1),
        (Self::LeftVentricularHypertrophy, "Left Ventricular Hypertrophy", 2),
    ];
}

/// Slope of the peak exercise ST segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StSlope {
    Upsloping,
    Flat,
    Downsloping,
}

impl Categorical for StSlope {
    const TABLE: &'static [(Self, &'static str, u8)] = &[
        (Self::Upsloping, "Upsloping", 0),
        (Self::Flat, "Flat", 1),
        (Self::Downsloping, "Downsloping", 2),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Thalassemia {
    Normal,
    FixedDefect,
    ReversibleDefect,
}

impl Categorical for Thalassemia {
    const TABLE: &'static [(Self, &'static str, u8)] = &[
        (Self::Normal, "Normal", 0),
        (Self::FixedDefect, "Fixed Defect", 1),
        (Self::ReversibleDefect, "Reversible Defect", 2),
    ];
}

/// Binary yes/no answer (fasting blood sugar > 120 mg/dl, exercise angina).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    No,
    Yes,
}

impl Categorical for YesNo {
    const TABLE: &'static [(Self, &'static str, u8)] = &[(Self::No, "No", 0), (Self::Yes, "Yes", 1)];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes<C: Categorical>() -> Vec<(&'static str, u8)> {
        C::TABLE.iter().map(|(v, l, _)| (*l, v.code())).collect()
    }

    #[test]
    fn test_documented_codes() {
        assert_eq!(codes::<Sex>(), [("Male", 1), ("Female", 0)]);
        assert_eq!(
            codes::<ChestPainType>(),
            [
                ("Typical Angina", 0),
                ("Atypical Angina", 1),
                ("Non-anginal Pain", 2),
                ("Asymptomatic", 3)
            ]
        );
        assert_eq!(
            codes::<RestingEcg>(),
            [
                ("Normal", 0),
                ("ST-T Abnormality", 1),
                ("Left Ventricular Hypertrophy", 2)
            ]
        );
        assert_eq!(
            codes::<StSlope>(),
            [("Upsloping", 0), ("Flat", 1), ("Downsloping", 2)]
        );
        assert_eq!(
            codes::<Thalassemia>(),
            [("Normal", 0), ("Fixed Defect", 1), ("Reversible Defect", 2)]
        );
        assert_eq!(codes::<YesNo>(), [("No", 0), ("Yes", 1)]);
    }

    fn assert_tabled<C: Categorical + std::fmt::Debug>(variants: &[C]) {
        assert_eq!(variants.len(), C::TABLE.len());
        for v in variants {
            assert!(
                C::TABLE.iter().any(|(t, _, _)| t == v),
                "{v:?} has no table entry"
            );
        }
    }

    #[test]
    fn test_every_variant_has_a_table_entry() {
        assert_tabled(&[Sex::Male, Sex::Female]);
        assert_tabled(&[
            ChestPainType::TypicalAngina,
            ChestPainType::AtypicalAngina,
            ChestPainType::NonAnginalPain,
            ChestPainType::Asymptomatic,
        ]);
        assert_tabled(&[
            RestingEcg::Normal,
            RestingEcg::StTAbnormality,
            RestingEcg::LeftVentricularHypertrophy,
        ]);
        assert_tabled(&[StSlope::Upsloping, StSlope::Flat, StSlope::Downsloping]);
        assert_tabled(&[
            Thalassemia::Normal,
            Thalassemia::FixedDefect,
            Thalassemia::ReversibleDefect,
        ]);
        assert_tabled(&[YesNo::No, YesNo::Yes]);

        assert_eq!(Sex::Male.code(), 1);
        assert_eq!(Thalassemia::ReversibleDefect.code(), 2);
        assert_eq!(RestingEcg::LeftVentricularHypertrophy.label(), "Left Ventricular Hypertrophy");
    }

    #[test]
    fn test_label_roundtrip_is_total() {
        for (variant, label, _) in ChestPainType::TABLE {
            assert_eq!(ChestPainType::from_label("cp", label).unwrap(), *variant);
            assert_eq!(variant.label(), *label);
        }
    }

    #[test]
    fn test_unknown_labels_rejected() {
        assert!(Sex::from_label("sex", "male").is_err());
        assert!(YesNo::from_label("fbs", "Maybe").is_err());
        let err = Thalassemia::from_label("thal", "Unknown").unwrap_err();
        assert!(err.to_string().contains("Reversible Defect"));
    }
}
