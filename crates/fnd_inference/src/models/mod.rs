//! Classifiers backed by ONNX Runtime sessions.
//!
//! Artifacts are scikit-learn pipelines exported whole with skl2onnx: the
//! vectorizers travel inside the graph, so a model takes the raw `title` and
//! `text` strings and emits `output_label` plus, when the estimator supports
//! it, `output_probability`.

pub mod onnx;
pub mod outputs;

pub use onnx::OnnxClassifier;
