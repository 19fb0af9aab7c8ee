use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid artifact: {0}")]
    Artifact(String),
}

/// Failures raised while a loaded model evaluates a record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    /// The record lacks a column the model takes as input.
    #[error("columns are missing: {{'{0}'}}")]
    MissingColumn(String),

    /// Probabilities requested from a model exported without them.
    #[error("predict_proba is not available when probability estimates were not enabled at training time")]
    ProbabilityUnsupported,

    #[error("model returned no output")]
    EmptyOutput,

    #[error("malformed model output: {0}")]
    Malformed(String),

    #[error("ONNX runtime error: {0}")]
    Runtime(String),
}
