//! Clinical Suite: diabetes, heart-disease and Parkinson's risk screening.
//!
//! Main entry point for the terminal application.

use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use clinical_suite::adapters::linear::JsonArtifactCodec;
use clinical_suite::adapters::sanitize::SanitizingMakeWriter;
use clinical_suite::tui::App;
use clinical_suite::{AssessmentService, ModelRegistry, SuiteConfig};

fn main() -> Result<()> {
    let config = SuiteConfig::from_env();

    // Logs written to the terminal would corrupt the TUI's alternate screen.
    let interactive = std::io::stdout().is_terminal();
    let (writer, _guard) = if config.log_mode().use_file(interactive) {
        let log_file = config.log_file();
        if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
            .with_context(|| format!("Failed to open log file {}", log_file.display()))?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    tracing::info!("Starting Clinical Suite...");

    let registry = Arc::new(ModelRegistry::load(
        config.models_dir(),
        &JsonArtifactCodec::new(),
    ));
    let service = AssessmentService::new(registry);

    let mut app = App::new(service);
    app.run()?;

    tracing::info!("Clinical Suite shutdown complete.");
    Ok(())
}
