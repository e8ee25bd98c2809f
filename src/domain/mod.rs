//! Domain layer: Core clinical types and logic.
//!
//! Pure Rust types with no I/O: diagnostic domains, feature structs and their
//! fixed ordering, category tables, the encoder, outcomes and advisory text.

pub mod advisory;
pub mod categories;
mod condition;
pub mod encoder;
pub mod features;
pub mod fields;
mod outcome;

pub use advisory::{resolve, Advisory};
pub use categories::{Categorical, ChestPainType, RestingEcg, Sex, StSlope, Thalassemia, YesNo};
pub use condition::DiagnosticDomain;
pub use encoder::{encode, EncodeError, RawInputs, RawValue};
pub use features::{
    AssessmentInput, DiabetesFeatures, FeatureVector, HeartFeatures, ParkinsonsFeatures,
};
pub use fields::{form_fields, FieldKind, FieldSpec};
pub use outcome::{Assessment, Outcome};
