//! Prediction outcome and assessment record.
//!
//! Represents the output of one scaler + classifier pass.

use serde::{Deserialize, Serialize};

use super::advisory::{resolve, Advisory};
use super::condition::DiagnosticDomain;

/// Binary risk verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Label 0: no significant risk identified
    Negative,
    /// Label 1: risk detected
    Positive,
}

impl Outcome {
    /// Interpret a classifier label.
    ///
    /// Returns `None` for anything other than 0 or 1.
    #[must_use]
    pub fn from_label(label: f64) -> Option<Self> {
        if label == 1.0 {
            Some(Self::Positive)
        } else if label == 0.0 {
            Some(Self::Negative)
        } else {
            None
        }
    }

    #[must_use]
    pub fn label(self) -> u8 {
        match self {
            Self::Negative => 0,
            Self::Positive => 1,
        }
    }

    #[must_use]
    pub fn is_positive(self) -> bool {
        matches!(self, Self::Positive)
    }
}

impl From<bool> for Outcome {
    fn from(positive: bool) -> Self {
        if positive {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negative => write!(f, "NEGATIVE"),
            Self::Positive => write!(f, "POSITIVE"),
        }
    }
}

/// Completed assessment as shown to the user. Not persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub domain: DiagnosticDomain,
    pub outcome: Outcome,
    pub advisory: &'static Advisory,
    pub assessed_at: chrono::DateTime<chrono::Utc>,
}

impl Assessment {
    #[must_use]
    pub fn new(domain: DiagnosticDomain, outcome: Outcome) -> Self {
        Self {
            domain,
            outcome,
            advisory: resolve(domain, outcome),
            assessed_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label() {
        assert_eq!(Outcome::from_label(1.0), Some(Outcome::Positive));
        assert_eq!(Outcome::from_label(0.0), Some(Outcome::Negative));
        assert_eq!(Outcome::from_label(2.0), None);
        assert_eq!(Outcome::from_label(f64::NAN), None);
    }

    #[test]
    fn test_assessment_picks_matching_advisory() {
        let a = Assessment::new(DiagnosticDomain::Heart, Outcome::Positive);
        assert_eq!(a.advisory, resolve(DiagnosticDomain::Heart, Outcome::Positive));
        assert_eq!(a.outcome.label(), 1);
    }
}
