//! Runtime configuration.
//!
//! The artifact base directory is the only value read from the environment
//! (`CLINICAL_SUITE_MODELS_DIR`). Everything else uses defaults that the
//! composition root may override with the builder methods.

use std::path::{Path, PathBuf};

/// Environment variable naming the artifact directory.
pub const MODELS_DIR_ENV: &str = "CLINICAL_SUITE_MODELS_DIR";

const DEFAULT_MODELS_DIR: &str = "saved_models";
const DEFAULT_LOG_FILE: &str = "clinical-suite.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    /// File when stdout is a terminal (the TUI owns the screen), stdout otherwise
    #[default]
    Auto,
    File,
    Stdout,
}

impl LogMode {
    /// Resolve `Auto` against the terminal state.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    models_dir: PathBuf,
    log_file: PathBuf,
    log_mode: LogMode,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from(DEFAULT_MODELS_DIR),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_mode: LogMode::Auto,
        }
    }
}

impl SuiteConfig {
    /// Build from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(dir) = lookup(MODELS_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            config.models_dir = PathBuf::from(dir.trim());
        }
        config
    }

    #[must_use]
    pub fn with_models_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.models_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }

    #[must_use]
    pub fn with_log_mode(mut self, mode: LogMode) -> Self {
        self.log_mode = mode;
        self
    }

    #[must_use]
    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    #[must_use]
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    #[must_use]
    pub fn log_mode(&self) -> LogMode {
        self.log_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SuiteConfig::from_lookup(|_| None);
        assert_eq!(config.models_dir(), Path::new("saved_models"));
        assert_eq!(config.log_mode(), LogMode::Auto);
    }

    #[test]
    fn test_models_dir_from_env() {
        let config = SuiteConfig::from_lookup(|key| {
            (key == MODELS_DIR_ENV).then(|| "/srv/models".to_string())
        });
        assert_eq!(config.models_dir(), Path::new("/srv/models"));
    }

    #[test]
    fn test_blank_env_keeps_default() {
        let config = SuiteConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config.models_dir(), Path::new("saved_models"));
    }

    #[test]
    fn test_log_mode_resolution() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stdout.use_file(true));
    }
}
