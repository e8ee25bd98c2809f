//! TUI module: Terminal User Interface using Ratatui.
//!
//! Presentation shell for the assessment service:
//! - Menu with per-domain model availability
//! - Input form per domain, bounds enforced on submit
//! - Result view with verdict and advisory

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::MedicalTheme;
