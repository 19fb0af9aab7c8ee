use std::sync::{Arc, OnceLock};
use tracing::debug;
use crate::loader::{load_models, ModelRegistry};
use crate::Config;

/// Loads the model registry on first use and hands out the same instance for
/// the rest of the process.
#[derive(Debug)]
pub struct ModelCache {
    config: Config,
    registry: OnceLock<Arc<ModelRegistry>>,
}

impl ModelCache {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            registry: OnceLock::new(),
        }
    }

    /// A cache that is already filled, for callers that built the registry
    /// themselves.
    pub fn preloaded(config: Config, registry: ModelRegistry) -> Self {
        let cache = Self::new(config);
        let _ = cache.registry.set(Arc::new(registry));
        cache
    }

    pub fn is_loaded(&self) -> bool {
        self.registry.get().is_some()
    }

    pub fn get(&self) -> Arc<ModelRegistry> {
        self.registry
            .get_or_init(|| {
                debug!("Loading models from {}", self.config.model_dir.display());
                Arc::new(load_models(&self.config))
            })
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::LoadError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_loads_once() {
        let dir = TempDir::new().unwrap();
        let cache = ModelCache::new(Config::default().with_model_dir(dir.path()));
        assert!(!cache.is_loaded());
        let first = cache.get();
        assert!(cache.is_loaded());
        assert_eq!(first.load_errors().len(), 2);

        // later calls must not go back to disk
        fs::write(dir.path().join("svm_model.onnx"), "not a model").unwrap();
        let second = cache.get();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(
            second.load_errors()[1],
            LoadError::Missing { path: dir.path().join("svm_model.onnx") }
        );
    }

    #[test]
    fn test_preloaded_skips_disk() {
        let cache = ModelCache::preloaded(
            Config::default().with_model_dir("/nonexistent"),
            ModelRegistry::default(),
        );
        assert!(cache.is_loaded());
        assert!(cache.get().slots().is_empty());
    }
}
