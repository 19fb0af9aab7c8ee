use std::fmt;
use crate::error::PredictError;
use crate::types::{RawLabel, Record};

/// A fully trained classifier loaded from an artifact.
///
/// Implementations are immutable after loading, so a single instance can be
/// shared across request handlers behind an `Arc`.
pub trait Classifier: Send + Sync + fmt::Debug {
    /// Short identifier of the model runtime, e.g. `onnx`.
    fn kind(&self) -> &str;

    /// Predict one label per row of the record.
    fn predict(&self, record: &Record) -> Result<Vec<RawLabel>, PredictError>;

    /// Class probabilities per row, in the order the model emits them.
    fn predict_proba(&self, record: &Record) -> Result<Vec<Vec<f64>>, PredictError>;
}
