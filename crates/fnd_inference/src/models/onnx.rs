use std::fmt;
use std::path::Path;
use std::sync::Mutex;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::{DynValue, Tensor};
use tracing::{debug, info};
use fnd_core::{Classifier, Error, PredictError, RawLabel, Record, Result};
use super::outputs::{
    bind_inputs, extract_label, extract_probabilities, find_label_output,
    find_probability_output, runtime_error,
};

/// A fitted classifier running inside an ONNX Runtime session.
pub struct OnnxClassifier {
    name: String,
    // `Session::run` takes `&mut self`
    session: Mutex<Session>,
    input_names: Vec<String>,
    label_output: String,
    probability_output: Option<String>,
}

impl fmt::Debug for OnnxClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnnxClassifier")
            .field("name", &self.name)
            .field("inputs", &self.input_names)
            .field("label_output", &self.label_output)
            .field("probability_output", &self.probability_output)
            .finish()
    }
}

fn build_session(path: &Path, threads: usize) -> ort::Result<Session> {
    Session::builder()?
        .with_optimization_level(GraphOptimizationLevel::Level3)?
        .with_intra_threads(threads)?
        .commit_from_file(path)
}

impl OnnxClassifier {
    /// Open an exported model and check that it emits a label.
    pub fn load(path: &Path, name: &str, threads: usize) -> Result<Self> {
        info!(model = %name, path = %path.display(), threads, "Loading ONNX model");

        let session = build_session(path, threads).map_err(|e| Error::Artifact(e.to_string()))?;

        let input_names: Vec<String> = session.inputs.iter().map(|i| i.name.clone()).collect();
        let output_names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();
        let label_output = find_label_output(&output_names).ok_or_else(|| {
            Error::Artifact(format!("no label output among {:?}", output_names))
        })?;
        let probability_output = find_probability_output(&output_names);

        info!(
            model = %name,
            inputs = ?input_names,
            label = %label_output,
            probability = ?probability_output,
            "Model loaded successfully"
        );

        Ok(Self {
            name: name.to_string(),
            session: Mutex::new(session),
            input_names,
            label_output,
            probability_output,
        })
    }

    /// Feed the record's columns to the session and read one named output.
    fn run<T>(
        &self,
        record: &Record,
        output: &str,
        extract: impl FnOnce(&DynValue) -> std::result::Result<T, PredictError>,
    ) -> std::result::Result<T, PredictError> {
        let inputs = bind_inputs(record, &self.input_names)?
            .into_iter()
            .map(|(name, value)| {
                // skl2onnx string inputs are shaped [batch, 1]
                Tensor::from_string_array((vec![1_i64, 1], std::slice::from_ref(&value))).map(|t| (name, t))
            })
            .collect::<ort::Result<Vec<_>>>()
            .map_err(runtime_error)?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| PredictError::Runtime(format!("Lock error: {}", e)))?;
        let outputs = session.run(inputs).map_err(runtime_error)?;
        let value = outputs
            .get(output)
            .ok_or_else(|| PredictError::Malformed(format!("no '{}' output", output)))?;

        debug!(model = %self.name, output, "Inference complete");
        extract(value)
    }
}

impl Classifier for OnnxClassifier {
    fn kind(&self) -> &str {
        "onnx"
    }

    fn predict(&self, record: &Record) -> std::result::Result<Vec<RawLabel>, PredictError> {
        self.run(record, &self.label_output, extract_label)
    }

    fn predict_proba(&self, record: &Record) -> std::result::Result<Vec<Vec<f64>>, PredictError> {
        let output = self
            .probability_output
            .as_deref()
            .ok_or(PredictError::ProbabilityUnsupported)?;
        self.run(record, output, extract_probabilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_garbage_file_is_an_artifact_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("svm_model.onnx");
        fs::write(&path, b"not a protobuf").unwrap();

        let err = OnnxClassifier::load(&path, "SVM", 1).unwrap_err();
        assert!(matches!(err, Error::Artifact(_)), "{:?}", err);
    }
}
