//! Model registry: loads the three (scaler, classifier) bundles once.
//!
//! Loading never fails as a whole. Each artifact is read and decoded on its
//! own; a failed artifact leaves a marker carrying the error in its slot, and
//! the other component and the other domains stay usable.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::DiagnosticDomain;
use crate::ports::{ArtifactCodec, Classifier, Scaler};
use crate::{ArtifactError, Component};

/// One bundle component: either loaded, or the reason it is missing.
pub enum ComponentSlot<T: ?Sized> {
    Loaded(Arc<T>),
    Unavailable(ArtifactError),
}

impl<T: ?Sized> ComponentSlot<T> {
    /// # Errors
    /// Returns the load error when the component is missing.
    pub fn get(&self) -> Result<&Arc<T>, &ArtifactError> {
        match self {
            Self::Loaded(component) => Ok(component),
            Self::Unavailable(err) => Err(err),
        }
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    #[must_use]
    pub fn error(&self) -> Option<&ArtifactError> {
        match self {
            Self::Loaded(_) => None,
            Self::Unavailable(err) => Some(err),
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for ComponentSlot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loaded(_) => f.write_str("Loaded"),
            Self::Unavailable(err) => f.debug_tuple("Unavailable").field(err).finish(),
        }
    }
}

/// Trained artifacts of one diagnostic domain.
///
/// Scaler and classifier availability are tracked separately so the pipeline
/// can report which one is missing.
#[derive(Debug)]
pub struct ModelBundle {
    pub scaler: ComponentSlot<dyn Scaler>,
    pub classifier: ComponentSlot<dyn Classifier>,
}

impl ModelBundle {
    /// Bundle with both components present.
    #[must_use]
    pub fn from_parts(scaler: Arc<dyn Scaler>, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            scaler: ComponentSlot::Loaded(scaler),
            classifier: ComponentSlot::Loaded(classifier),
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.scaler.is_loaded() && self.classifier.is_loaded()
    }
}

/// On-disk locations of one domain's artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub scaler: PathBuf,
    pub classifier: PathBuf,
}

impl ArtifactPaths {
    /// `<dir>/<domain>_scaler.<ext>` and `<dir>/<domain>_model.<ext>`.
    #[must_use]
    pub fn for_domain(dir: &Path, domain: DiagnosticDomain, extension: &str) -> Self {
        Self {
            scaler: dir.join(format!("{}_scaler.{extension}", domain.key())),
            classifier: dir.join(format!("{}_model.{extension}", domain.key())),
        }
    }
}

/// A failed artifact, for user-visible diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadFailure {
    pub domain: DiagnosticDomain,
    pub component: Component,
    pub error: ArtifactError,
}

impl std::fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

/// Read-only container of all bundles, indexed by domain.
///
/// Built once before the presentation loop and shared behind an `Arc`.
#[derive(Debug)]
pub struct ModelRegistry {
    bundles: [ModelBundle; 3],
}

impl ModelRegistry {
    /// Load every domain's artifacts from `dir`.
    pub fn load(dir: &Path, codec: &dyn ArtifactCodec) -> Self {
        tracing::info!("Loading model bundles from {:?}", dir);

        let registry = Self::from_bundles(|domain| {
            let paths = ArtifactPaths::for_domain(dir, domain, codec.extension());
            let bundle = ModelBundle {
                scaler: load_slot(&paths.scaler, |bytes| codec.decode_scaler(bytes)),
                classifier: load_slot(&paths.classifier, |bytes| codec.decode_classifier(bytes)),
            };
            check_widths(domain, &bundle);
            bundle
        });

        for failure in registry.load_failures() {
            tracing::warn!(
                "{} {} unavailable: {}",
                failure.domain,
                failure.component,
                failure.error
            );
        }
        tracing::info!(
            "Model registry ready: {}/{} domains available",
            registry.available_domains().len(),
            DiagnosticDomain::ALL.len()
        );

        registry
    }

    /// Build from one bundle per domain.
    pub fn from_bundles<F>(mut bundle_for: F) -> Self
    where
        F: FnMut(DiagnosticDomain) -> ModelBundle,
    {
        Self {
            bundles: DiagnosticDomain::ALL.map(&mut bundle_for),
        }
    }

    #[must_use]
    pub fn bundle(&self, domain: DiagnosticDomain) -> &ModelBundle {
        &self.bundles[domain.index()]
    }

    #[must_use]
    pub fn is_available(&self, domain: DiagnosticDomain) -> bool {
        self.bundle(domain).is_available()
    }

    /// Domains whose scaler and classifier both loaded.
    #[must_use]
    pub fn available_domains(&self) -> BTreeSet<DiagnosticDomain> {
        DiagnosticDomain::ALL
            .into_iter()
            .filter(|d| self.is_available(*d))
            .collect()
    }

    /// Every failed artifact, scaler before classifier, in domain order.
    #[must_use]
    pub fn load_failures(&self) -> Vec<LoadFailure> {
        let mut failures = Vec::new();
        for domain in DiagnosticDomain::ALL {
            let bundle = self.bundle(domain);
            let components = [
                (Component::Scaler, bundle.scaler.error()),
                (Component::Classifier, bundle.classifier.error()),
            ];
            for (component, error) in components {
                if let Some(error) = error {
                    failures.push(LoadFailure {
                        domain,
                        component,
                        error: error.clone(),
                    });
                }
            }
        }
        failures
    }
}

fn read_artifact(path: &Path) -> Result<Vec<u8>, ArtifactError> {
    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ArtifactError::Missing {
                path: path.to_path_buf(),
            })
        }
        Err(e) => {
            return Err(ArtifactError::Unreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        }
    };

    if metadata.is_file() && metadata.len() == 0 {
        return Err(ArtifactError::Empty {
            path: path.to_path_buf(),
        });
    }

    std::fs::read(path).map_err(|e| ArtifactError::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn load_slot<T, D>(path: &Path, decode: D) -> ComponentSlot<T>
where
    T: ?Sized,
    D: FnOnce(&[u8]) -> Result<Arc<T>, crate::ports::CodecError>,
{
    let loaded = read_artifact(path).and_then(|bytes| {
        decode(&bytes).map_err(|e| ArtifactError::Malformed {
            path: path.to_path_buf(),
            reason: e.0,
        })
    });

    match loaded {
        Ok(component) => {
            tracing::debug!("Loaded artifact {:?}", path);
            ComponentSlot::Loaded(component)
        }
        Err(e) => ComponentSlot::Unavailable(e),
    }
}

fn check_widths(domain: DiagnosticDomain, bundle: &ModelBundle) {
    let expected = domain.feature_count();
    let widths = [
        (
            Component::Scaler,
            bundle.scaler.get().ok().and_then(|s| s.n_features_in()),
        ),
        (
            Component::Classifier,
            bundle.classifier.get().ok().and_then(|c| c.n_features_in()),
        ),
    ];
    for (component, width) in widths {
        if let Some(width) = width.filter(|w| *w != expected) {
            tracing::warn!(
                "{domain} {component} expects {width} features, encoder produces {expected}; \
                 inference for this domain will fail"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::linear::JsonArtifactCodec;
    use tempfile::tempdir;

    fn scaler_json(n: usize) -> String {
        format!(
            r#"{{"type":"standard_scaler","mean":{:?},"scale":{:?}}}"#,
            vec![0.0; n],
            vec![1.0; n]
        )
    }

    fn model_json(n: usize) -> String {
        format!(
            r#"{{"type":"logistic_regression","coef":{:?},"intercept":0.0}}"#,
            vec![0.1; n]
        )
    }

    fn write_domain(dir: &Path, domain: DiagnosticDomain) {
        let paths = ArtifactPaths::for_domain(dir, domain, "json");
        let n = domain.feature_count();
        std::fs::write(paths.scaler, scaler_json(n)).expect("write scaler");
        std::fs::write(paths.classifier, model_json(n)).expect("write model");
    }

    #[test]
    fn test_artifact_paths() {
        let paths = ArtifactPaths::for_domain(Path::new("saved"), DiagnosticDomain::Heart, "json");
        assert_eq!(paths.scaler, Path::new("saved/heart_scaler.json"));
        assert_eq!(paths.classifier, Path::new("saved/heart_model.json"));
    }

    #[test]
    fn test_load_all_domains() {
        let temp = tempdir().expect("tempdir");
        for domain in DiagnosticDomain::ALL {
            write_domain(temp.path(), domain);
        }

        let registry = ModelRegistry::load(temp.path(), &JsonArtifactCodec::new());
        assert_eq!(registry.available_domains().len(), 3);
        assert!(registry.load_failures().is_empty());
    }

    #[test]
    fn test_empty_classifier_only_disables_its_domain() {
        let temp = tempdir().expect("tempdir");
        for domain in DiagnosticDomain::ALL {
            write_domain(temp.path(), domain);
        }
        let heart = ArtifactPaths::for_domain(temp.path(), DiagnosticDomain::Heart, "json");
        std::fs::write(&heart.classifier, b"").expect("truncate");

        let registry = ModelRegistry::load(temp.path(), &JsonArtifactCodec::new());

        assert!(registry.is_available(DiagnosticDomain::Diabetes));
        assert!(registry.is_available(DiagnosticDomain::Parkinsons));
        assert!(!registry.is_available(DiagnosticDomain::Heart));

        let bundle = registry.bundle(DiagnosticDomain::Heart);
        assert!(bundle.scaler.is_loaded());
        assert_eq!(
            bundle.classifier.error(),
            Some(&ArtifactError::Empty {
                path: heart.classifier.clone()
            })
        );

        let failures = registry.load_failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].component, Component::Classifier);
        assert!(failures[0].to_string().contains("Model file is empty"));
    }

    #[test]
    fn test_missing_directory_marks_everything_missing() {
        let temp = tempdir().expect("tempdir");
        let registry = ModelRegistry::load(&temp.path().join("absent"), &JsonArtifactCodec::new());

        assert!(registry.available_domains().is_empty());
        let failures = registry.load_failures();
        assert_eq!(failures.len(), 6);
        assert!(failures
            .iter()
            .all(|f| matches!(f.error, ArtifactError::Missing { .. })));
    }

    #[test]
    fn test_directory_in_place_of_artifact_is_unreadable() {
        let temp = tempdir().expect("tempdir");
        write_domain(temp.path(), DiagnosticDomain::Parkinsons);
        let paths = ArtifactPaths::for_domain(temp.path(), DiagnosticDomain::Parkinsons, "json");
        std::fs::remove_file(&paths.scaler).expect("remove scaler");
        std::fs::create_dir(&paths.scaler).expect("create dir");

        let registry = ModelRegistry::load(temp.path(), &JsonArtifactCodec::new());
        let bundle = registry.bundle(DiagnosticDomain::Parkinsons);
        assert!(matches!(
            bundle.scaler.error(),
            Some(ArtifactError::Unreadable { path, .. }) if *path == paths.scaler
        ));
        assert!(bundle.classifier.is_loaded());
        assert!(!registry.is_available(DiagnosticDomain::Parkinsons));
    }

    #[test]
    fn test_malformed_artifact_is_per_component() {
        let temp = tempdir().expect("tempdir");
        write_domain(temp.path(), DiagnosticDomain::Diabetes);
        let paths = ArtifactPaths::for_domain(temp.path(), DiagnosticDomain::Diabetes, "json");
        std::fs::write(&paths.scaler, b"\x80\x04pickle").expect("overwrite");

        let registry = ModelRegistry::load(temp.path(), &JsonArtifactCodec::new());
        let bundle = registry.bundle(DiagnosticDomain::Diabetes);
        assert!(matches!(
            bundle.scaler.error(),
            Some(ArtifactError::Malformed { .. })
        ));
        assert!(bundle.classifier.is_loaded());
    }
}
