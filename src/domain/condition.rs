//! Diagnostic domains supported by the suite.

use serde::{Deserialize, Serialize};

/// One of the three independent diagnostic contexts.
///
/// Every per-domain table in the crate (feature order, form fields,
/// advisories, registry slots) is keyed by this enum, never by a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticDomain {
    Diabetes,
    Heart,
    Parkinsons,
}

impl DiagnosticDomain {
    /// All domains, in menu order.
    pub const ALL: [Self; 3] = [Self::Diabetes, Self::Heart, Self::Parkinsons];

    /// Stable key used in artifact file names (`<key>_model.<ext>`).
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Diabetes => "diabetes",
            Self::Heart => "heart",
            Self::Parkinsons => "parkinsons",
        }
    }

    /// Dense index for array-backed lookup tables.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Diabetes => 0,
            Self::Heart => 1,
            Self::Parkinsons => 2,
        }
    }

    /// Number of features the domain's models were trained on.
    #[must_use]
    pub fn feature_count(self) -> usize {
        self.feature_keys().len()
    }

    /// Feature keys in model order.
    #[must_use]
    pub fn feature_keys(self) -> &'static [&'static str] {
        match self {
            Self::Diabetes => &super::features::DIABETES_FEATURE_KEYS,
            Self::Heart => &super::features::HEART_FEATURE_KEYS,
            Self::Parkinsons => &super::features::PARKINSONS_FEATURE_KEYS,
        }
    }

    /// Navigation label.
    #[must_use]
    pub fn menu_label(self) -> &'static str {
        match self {
            Self::Diabetes => "Diabetes Analysis",
            Self::Heart => "Heart Health Check",
            Self::Parkinsons => "Parkinson's Screening",
        }
    }

    /// Title of the assessment screen.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Diabetes => "Diabetes Risk Assessment",
            Self::Heart => "Heart Disease Risk Assessment",
            Self::Parkinsons => "Parkinson's Disease Assessment",
        }
    }

    /// Label of the action that triggers inference.
    #[must_use]
    pub fn action_label(self) -> &'static str {
        match self {
            Self::Diabetes => "Assess Diabetes Risk",
            Self::Heart => "Assess Heart Disease Risk",
            Self::Parkinsons => "Assess Parkinson's Risk",
        }
    }

    /// Message shown when the domain's bundle did not load.
    #[must_use]
    pub fn unavailable_message(self) -> &'static str {
        match self {
            Self::Diabetes => "Diabetes Diagnostic Module Unavailable",
            Self::Heart => "Heart Disease Module Unavailable",
            Self::Parkinsons => "Parkinson's Diagnostic Module Unavailable",
        }
    }
}

impl std::fmt::Display for DiagnosticDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_counts() {
        assert_eq!(DiagnosticDomain::Diabetes.feature_count(), 8);
        assert_eq!(DiagnosticDomain::Heart.feature_count(), 13);
        assert_eq!(DiagnosticDomain::Parkinsons.feature_count(), 22);
    }

    #[test]
    fn test_indices_are_dense() {
        for (i, domain) in DiagnosticDomain::ALL.iter().enumerate() {
            assert_eq!(domain.index(), i);
        }
    }

    #[test]
    fn test_keys_match_artifact_names() {
        let keys: Vec<_> = DiagnosticDomain::ALL.iter().map(|d| d.key()).collect();
        assert_eq!(keys, ["diabetes", "heart", "parkinsons"]);
    }
}
