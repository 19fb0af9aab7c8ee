use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use fnd_core::Classifier;
use crate::models::OnnxClassifier;
use crate::Config;

/// A named model position that may be empty when its artifact failed to load.
#[derive(Debug, Clone)]
pub struct ModelSlot {
    pub name: String,
    pub path: PathBuf,
    pub model: Option<Arc<dyn Classifier>>,
}

impl ModelSlot {
    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }
}

/// Why a slot ended up empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    Missing { path: PathBuf },
    Invalid { path: PathBuf, reason: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Missing { path } => write!(f, "Không tìm thấy file: {}", path.display()),
            LoadError::Invalid { path, reason } => {
                write!(f, "Không đọc được file: {} ({})", path.display(), reason)
            }
        }
    }
}

/// Models keyed by slot name, in display order, plus whatever went wrong
/// while loading them. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    slots: Vec<ModelSlot>,
    load_errors: Vec<LoadError>,
}

impl ModelRegistry {
    pub fn new(slots: Vec<ModelSlot>, load_errors: Vec<LoadError>) -> Self {
        Self { slots, load_errors }
    }

    pub fn slots(&self) -> &[ModelSlot] {
        &self.slots
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Classifier>> {
        self.slots
            .iter()
            .find(|slot| slot.name == name)
            .and_then(|slot| slot.model.as_ref())
    }

    pub fn load_errors(&self) -> &[LoadError] {
        &self.load_errors
    }

    pub fn loaded_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_loaded()).count()
    }
}

/// Load every configured slot. A missing or unreadable artifact empties its
/// slot and is recorded; it never stops the other slot from loading.
pub fn load_models(config: &Config) -> ModelRegistry {
    let mut slots = Vec::new();
    let mut load_errors = Vec::new();

    for (name, path) in config.slot_paths() {
        let model = if !path.exists() {
            let err = LoadError::Missing { path: path.clone() };
            error!("❌ {} model unavailable: {}", name, err);
            load_errors.push(err);
            None
        } else {
            match OnnxClassifier::load(&path, name, config.onnx_threads) {
                Ok(model) => {
                    info!("🧠 Loaded {} model from {}", name, path.display());
                    Some(Arc::new(model) as Arc<dyn Classifier>)
                }
                Err(e) => {
                    let err = LoadError::Invalid {
                        path: path.clone(),
                        reason: e.to_string(),
                    };
                    error!("❌ {} model unavailable: {}", name, err);
                    load_errors.push(err);
                    None
                }
            }
        };
        slots.push(ModelSlot {
            name: name.to_string(),
            path,
            model,
        });
    }

    ModelRegistry::new(slots, load_errors)
}
