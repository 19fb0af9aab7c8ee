use std::sync::Arc;
use fnd_inference::{invoke::InvokeMode, ModelCache, ModelRegistry};
use crate::render::{Message, Severity};

pub struct AppState {
    pub models: Arc<ModelCache>,
    pub mode: InvokeMode,
}

impl AppState {
    pub fn new(models: Arc<ModelCache>, mode: InvokeMode) -> Self {
        Self { models, mode }
    }
}

/// Load errors as page messages. They stay on the page for as long as the
/// slots they describe are empty.
pub fn load_notices(registry: &ModelRegistry) -> Vec<Message> {
    registry
        .load_errors()
        .iter()
        .map(|e| Message::new(Severity::Error, e.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fnd_inference::loader::LoadError;

    #[test]
    fn test_load_notices_are_not_consumed() {
        let registry = ModelRegistry::new(
            vec![],
            vec![LoadError::Missing { path: "model/svm_model.onnx".into() }],
        );
        let expected = vec![Message::new(Severity::Error, "Không tìm thấy file: model/svm_model.onnx")];
        assert_eq!(load_notices(&registry), expected);
        assert_eq!(load_notices(&registry), expected);
        assert!(load_notices(&ModelRegistry::default()).is_empty());
    }
}
