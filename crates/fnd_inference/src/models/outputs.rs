//! Reading skl2onnx classifier outputs back into labels and probabilities.

use std::fmt;
use ort::memory::Allocator;
use ort::value::{DowncastableTarget, DynMapValueType, DynSequenceValueType, DynValue};
use fnd_core::{PredictError, RawLabel, Record};

pub const LABEL_OUTPUT: &str = "output_label";
pub const PROBABILITY_OUTPUT: &str = "output_probability";

pub(crate) fn runtime_error(e: impl fmt::Display) -> PredictError {
    PredictError::Runtime(e.to_string())
}

/// Pair every model input with the record column of the same name.
pub fn bind_inputs(record: &Record, input_names: &[String]) -> Result<Vec<(String, String)>, PredictError> {
    input_names
        .iter()
        .map(|name| {
            record
                .get(name)
                .map(|value| (name.clone(), value.to_string()))
                .ok_or_else(|| PredictError::MissingColumn(name.clone()))
        })
        .collect()
}

pub fn find_label_output(names: &[String]) -> Option<String> {
    names
        .iter()
        .find(|n| n.as_str() == LABEL_OUTPUT)
        .or_else(|| names.iter().find(|n| n.contains("label")))
        .cloned()
}

/// `None` when the estimator was exported without `predict_proba`, e.g. an
/// SVC fitted with `probability=False`.
pub fn find_probability_output(names: &[String]) -> Option<String> {
    names
        .iter()
        .find(|n| n.as_str() == PROBABILITY_OUTPUT)
        .or_else(|| names.iter().find(|n| n.contains("prob")))
        .cloned()
}

/// One label per row. Integer classes come back as `int64`, string classes as
/// a string tensor.
pub fn extract_label(value: &DynValue) -> Result<Vec<RawLabel>, PredictError> {
    let labels: Vec<RawLabel> = if let Ok((_, data)) = value.try_extract_tensor::<i64>() {
        data.iter().map(|&v| RawLabel::Int(v)).collect()
    } else if let Ok((_, data)) = value.try_extract_strings() {
        data.into_iter().map(RawLabel::Text).collect()
    } else if let Ok((_, data)) = value.try_extract_tensor::<bool>() {
        data.iter().map(|&v| RawLabel::Bool(v)).collect()
    } else if let Ok((_, data)) = value.try_extract_tensor::<f32>() {
        data.iter().map(|&v| RawLabel::Float(v as f64)).collect()
    } else {
        return Err(PredictError::Malformed(format!(
            "unsupported label type {:?}",
            value.dtype()
        )));
    };

    if labels.is_empty() {
        return Err(PredictError::EmptyOutput);
    }
    Ok(labels)
}

/// Class probabilities per row, from either a `[batch, classes]` float tensor
/// (`zipmap=False`) or the default `seq(map(class, float))`.
pub fn extract_probabilities(value: &DynValue) -> Result<Vec<Vec<f64>>, PredictError> {
    if let Ok((shape, data)) = value.try_extract_tensor::<f32>() {
        let width = shape.iter().copied().last().unwrap_or(data.len() as i64).max(1) as usize;
        return Ok(split_rows(data, width));
    }

    let dtype = value.dtype();
    if DynSequenceValueType::can_downcast(&dtype) {
        return extract_from_sequence_map(value);
    }

    Err(PredictError::Malformed(format!(
        "unsupported probability type {:?}",
        dtype
    )))
}

fn extract_from_sequence_map(value: &DynValue) -> Result<Vec<Vec<f64>>, PredictError> {
    let allocator = Allocator::default();
    let sequence = value
        .downcast_ref::<DynSequenceValueType>()
        .map_err(runtime_error)?;
    let maps = sequence
        .try_extract_sequence::<DynMapValueType>(&allocator)
        .map_err(runtime_error)?;
    if maps.is_empty() {
        return Err(PredictError::EmptyOutput);
    }

    maps.iter()
        .map(|map| {
            // integer classes map from int64, string classes from string
            let probs: Vec<f64> = match map.try_extract_key_values::<i64, f32>() {
                Ok(pairs) => pairs.into_iter().map(|(_, p)| p as f64).collect(),
                Err(_) => map
                    .try_extract_key_values::<String, f32>()
                    .map_err(runtime_error)?
                    .into_iter()
                    .map(|(_, p)| p as f64)
                    .collect(),
            };
            Ok::<_, PredictError>(probs)
        })
        .collect()
}

fn split_rows(data: &[f32], width: usize) -> Vec<Vec<f64>> {
    data.chunks(width)
        .map(|row| row.iter().map(|&p| p as f64).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fnd_core::Submission;
    use ort::value::Tensor;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_bind_inputs_follows_model_order() {
        let record = Submission::new("Shock", "rumour").to_record();
        let bound = bind_inputs(&record, &names(&["text", "title"])).unwrap();
        assert_eq!(
            bound,
            vec![
                ("text".to_string(), "rumour".to_string()),
                ("title".to_string(), "Shock".to_string()),
            ]
        );
    }

    #[test]
    fn test_bind_inputs_reports_missing_column() {
        let record = Record::new().with_column("title", "Shock");
        let err = bind_inputs(&record, &names(&["title", "text"])).unwrap_err();
        assert_eq!(err, PredictError::MissingColumn("text".to_string()));
        assert_eq!(err.to_string(), "columns are missing: {'text'}");
    }

    #[test]
    fn test_output_discovery() {
        let full = names(&["output_label", "output_probability"]);
        assert_eq!(find_label_output(&full).as_deref(), Some("output_label"));
        assert_eq!(find_probability_output(&full).as_deref(), Some("output_probability"));

        let label_only = names(&["output_label"]);
        assert_eq!(find_probability_output(&label_only), None);
        assert_eq!(find_label_output(&names(&["probabilities"])), None);
    }

    #[test]
    fn test_split_rows() {
        assert_eq!(
            split_rows(&[0.25, 0.75, 0.5, 0.5], 2),
            vec![vec![0.25, 0.75], vec![0.5, 0.5]]
        );
    }

    #[test]
    fn test_extract_int_label() {
        let value = Tensor::from_array((vec![1_i64], vec![1_i64])).unwrap().into_dyn();
        assert_eq!(extract_label(&value).unwrap(), vec![RawLabel::Int(1)]);
    }

    #[test]
    fn test_extract_string_label() {
        let value = Tensor::from_string_array((vec![1_i64], &["Fake".to_string()][..]))
            .unwrap()
            .into_dyn();
        assert_eq!(extract_label(&value).unwrap(), vec![RawLabel::from("Fake")]);
    }

    #[test]
    fn test_extract_probability_tensor() {
        let value = Tensor::from_array((vec![1_i64, 2], vec![0.25_f32, 0.75]))
            .unwrap()
            .into_dyn();
        assert_eq!(extract_probabilities(&value).unwrap(), vec![vec![0.25, 0.75]]);
    }
}
