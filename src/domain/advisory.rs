//! Static advisory text per domain and outcome.

use serde::Serialize;

use super::condition::DiagnosticDomain;
use super::outcome::Outcome;

/// A canned recommendation block.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Advisory {
    /// Verdict line
    pub headline: &'static str,
    pub heading: &'static str,
    pub items: &'static [&'static str],
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.headline)?;
        writeln!(f, "{}:", self.heading)?;
        for item in self.items {
            writeln!(f, "- {item}")?;
        }
        Ok(())
    }
}

/// `[negative, positive]` blocks, indexed by `DiagnosticDomain::index()`.
static ADVISORIES: [[Advisory; 2]; 3] = [
    [
        Advisory {
            headline: "No Significant Diabetes Risk Identified",
            heading: "Preventive Advice",
            items: &[
                "Maintain a healthy BMI and active lifestyle",
                "Monitor glucose levels regularly (HbA1c, FBG tests)",
                "Annual preventive health checkups",
                "Stay hydrated and reduce processed sugar intake",
            ],
        },
        Advisory {
            headline: "High Risk of Diabetes Detected",
            heading: "Clinical Recommendations",
            items: &[
                "Schedule fasting blood glucose test",
                "Implement dietary modifications (low sugar, high fiber diet)",
                "Consult an endocrinologist for further evaluation",
                "Adopt a structured physical activity plan",
            ],
        },
    ],
    [
        Advisory {
            headline: "No Significant Heart Disease Risk Identified",
            heading: "Heart Health Maintenance Tips",
            items: &[
                "Engage in at least 150 minutes of exercise per week",
                "Consume heart-healthy foods like nuts, fish, and leafy greens",
                "Avoid smoking and limit alcohol intake",
                "Annual cardiovascular screening for long-term wellness",
            ],
        },
        Advisory {
            headline: "High Risk of Heart Disease Detected",
            heading: "Urgent Medical Recommendations",
            items: &[
                "Schedule an ECG and lipid profile test",
                "Adopt a heart-healthy diet (low sodium, high fiber, omega-3 rich foods)",
                "Increase daily physical activity (minimum 30 min walk)",
                "Consult a cardiologist for medication and lifestyle guidance",
            ],
        },
    ],
    [
        Advisory {
            headline: "No Significant Parkinson's Risk Identified",
            heading: "Preventive Neurological Health Tips",
            items: &[
                "Consume an antioxidant-rich diet (berries, nuts, green tea)",
                "Engage in cognitive exercises like puzzles and memory games",
                "Maintain an active lifestyle with strength & balance exercises",
                "Regular neurological checkups for early detection",
            ],
        },
        Advisory {
            headline: "High Risk of Parkinson's Disease Detected",
            heading: "Immediate Recommendations",
            items: &[
                "Neurological assessment by a specialist",
                "Schedule MRI/CT scans for brain imaging",
                "Medication evaluation for symptom management",
                "Engage in physical therapy and motor function exercises",
            ],
        },
    ],
];

/// Select the advisory block for a domain and outcome.
#[must_use]
pub fn resolve(domain: DiagnosticDomain, outcome: Outcome) -> &'static Advisory {
    &ADVISORIES[domain.index()][usize::from(outcome.label())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_are_distinct_and_non_empty() {
        for domain in DiagnosticDomain::ALL {
            let pos = resolve(domain, Outcome::Positive);
            let neg = resolve(domain, Outcome::Negative);
            assert_ne!(pos, neg);
            for block in [pos, neg] {
                assert!(!block.headline.is_empty());
                assert!(!block.items.is_empty());
            }
        }
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let a = resolve(DiagnosticDomain::Parkinsons, Outcome::Positive);
        let b = resolve(DiagnosticDomain::Parkinsons, Outcome::Positive);
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_positive_blocks_report_risk() {
        assert!(resolve(DiagnosticDomain::Diabetes, Outcome::Positive)
            .headline
            .contains("High Risk of Diabetes"));
        assert!(resolve(DiagnosticDomain::Heart, Outcome::Negative)
            .headline
            .starts_with("No Significant"));
    }

    #[test]
    fn test_display_lists_items() {
        let text = resolve(DiagnosticDomain::Diabetes, Outcome::Negative).to_string();
        assert!(text.contains("Preventive Advice:"));
        assert_eq!(text.lines().filter(|l| l.starts_with("- ")).count(), 4);
    }
}
