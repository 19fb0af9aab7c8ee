use serde::Serialize;
use tracing::{debug, warn};
use fnd_core::{Classifier, PredictError, RawLabel, Record};
use crate::loader::ModelRegistry;

/// Whether confidence scores are requested alongside labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvokeMode {
    #[default]
    LabelOnly,
    WithConfidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The model cannot estimate probabilities.
    ProbabilityUnsupported,
    Prediction,
}

/// What one model produced for one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PanelOutcome {
    Unavailable,
    Predicted {
        label: RawLabel,
        confidence: Option<f64>,
    },
    Failed {
        kind: FailureKind,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub model: String,
    #[serde(flatten)]
    pub outcome: PanelOutcome,
}

/// Run one model against the record, turning any failure into an outcome.
pub fn invoke_model(model: &dyn Classifier, record: &Record, mode: InvokeMode) -> PanelOutcome {
    match run(model, record, mode) {
        Ok((label, confidence)) => PanelOutcome::Predicted { label, confidence },
        Err(PredictError::ProbabilityUnsupported) => PanelOutcome::Failed {
            kind: FailureKind::ProbabilityUnsupported,
            message: PredictError::ProbabilityUnsupported.to_string(),
        },
        Err(e) => PanelOutcome::Failed {
            kind: FailureKind::Prediction,
            message: e.to_string(),
        },
    }
}

fn run(
    model: &dyn Classifier,
    record: &Record,
    mode: InvokeMode,
) -> Result<(RawLabel, Option<f64>), PredictError> {
    let label = model
        .predict(record)?
        .into_iter()
        .next()
        .ok_or(PredictError::EmptyOutput)?;

    let confidence = match mode {
        InvokeMode::LabelOnly => None,
        InvokeMode::WithConfidence => {
            let proba = model
                .predict_proba(record)?
                .into_iter()
                .next()
                .ok_or(PredictError::EmptyOutput)?;
            let max = proba.into_iter().fold(f64::NAN, f64::max);
            if max.is_nan() {
                return Err(PredictError::EmptyOutput);
            }
            Some(max)
        }
    };
    Ok((label, confidence))
}

/// Evaluate every slot of the registry independently, in slot order.
pub fn evaluate(registry: &ModelRegistry, record: &Record, mode: InvokeMode) -> Vec<Panel> {
    registry
        .slots()
        .iter()
        .map(|slot| {
            let outcome = match &slot.model {
                None => PanelOutcome::Unavailable,
                Some(model) => invoke_model(model.as_ref(), record, mode),
            };
            match &outcome {
                PanelOutcome::Failed { message, .. } => warn!("{} prediction failed: {}", slot.name, message),
                other => debug!("{} -> {:?}", slot.name, other),
            }
            Panel {
                model: slot.name.clone(),
                outcome,
            }
        })
        .collect()
}
