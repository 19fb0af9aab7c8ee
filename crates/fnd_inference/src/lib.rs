use std::path::PathBuf;

pub mod models;
pub mod loader;
pub mod cache;
pub mod invoke;

pub const DECISION_TREE_SLOT: &str = "Decision Tree";
pub const SVM_SLOT: &str = "SVM";

/// Where the exported models live and how their sessions run.
#[derive(Debug, Clone)]
pub struct Config {
    pub model_dir: PathBuf,
    pub decision_tree_file: String,
    pub svm_file: String,
    /// Intra-op threads for each ONNX Runtime session.
    pub onnx_threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("model"),
            decision_tree_file: "decision_tree_model.onnx".to_string(),
            svm_file: "svm_model.onnx".to_string(),
            onnx_threads: 1,
        }
    }
}

impl Config {
    pub fn with_model_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.model_dir = dir.into();
        self
    }

    pub fn with_threads(mut self, onnx_threads: usize) -> Self {
        self.onnx_threads = onnx_threads.max(1);
        self
    }

    /// Slot names paired with their artifact paths, in display order.
    pub fn slot_paths(&self) -> [(&'static str, PathBuf); 2] {
        [
            (DECISION_TREE_SLOT, self.model_dir.join(&self.decision_tree_file)),
            (SVM_SLOT, self.model_dir.join(&self.svm_file)),
        ]
    }
}

pub mod prelude {
    pub use super::Config;
    pub use super::cache::ModelCache;
    pub use super::invoke::{evaluate, FailureKind, InvokeMode, Panel, PanelOutcome};
    pub use super::loader::{load_models, LoadError, ModelRegistry, ModelSlot};
    pub use super::models::OnnxClassifier;
    pub use fnd_core::{Classifier, Error, RawLabel, Record, Result, Submission};
}

pub use cache::ModelCache;
pub use loader::{load_models, ModelRegistry};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_slot_paths() {
        let config = Config::default();
        let [(dt_name, dt_path), (svm_name, svm_path)] = config.slot_paths();
        assert_eq!(dt_name, "Decision Tree");
        assert_eq!(dt_path, PathBuf::from("model/decision_tree_model.onnx"));
        assert_eq!(svm_name, "SVM");
        assert_eq!(svm_path, PathBuf::from("model/svm_model.onnx"));
        assert_eq!(config.onnx_threads, 1);
    }

    #[test]
    fn test_thread_count_is_at_least_one() {
        assert_eq!(Config::default().with_threads(0).onnx_threads, 1);
        assert_eq!(Config::default().with_threads(4).onnx_threads, 4);
    }
}
