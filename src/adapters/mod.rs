//! Adapters layer: Concrete implementations of ports.
//!
//! - `linear`: JSON exports of scikit-learn style scalers and linear classifiers
//! - `sanitize`: Patient-value filtering for logs

pub mod linear;
pub mod sanitize;
