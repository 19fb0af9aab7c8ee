use std::fmt;
use serde::{Deserialize, Serialize};

pub const TITLE_COLUMN: &str = "title";
pub const TEXT_COLUMN: &str = "text";

/// The two free-text fields a user submits for checking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
}

impl Submission {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }

    /// Both fields carry something other than whitespace.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.text.trim().is_empty()
    }

    /// Single-row record with the `title` and `text` columns.
    pub fn to_record(&self) -> Record {
        Record::new()
            .with_column(TITLE_COLUMN, self.title.clone())
            .with_column(TEXT_COLUMN, self.text.clone())
    }
}

/// A single row of named string columns, handed to every classifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    columns: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column, replacing any existing value under the same name.
    pub fn with_column(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.columns.push((name, value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }
}

/// A class label exactly as a model emits it.
///
/// Training pipelines disagree on label encoding (`0`/`1`, `"Fake"`/`"Real"`,
/// lower-case variants), so labels are kept verbatim and interpreted later.
/// ONNX exports yield `int64`, `string`, `bool` or `float` label tensors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawLabel {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl fmt::Display for RawLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawLabel::Bool(true) => write!(f, "True"),
            RawLabel::Bool(false) => write!(f, "False"),
            RawLabel::Int(v) => write!(f, "{}", v),
            RawLabel::Float(v) => write!(f, "{:?}", v),
            RawLabel::Text(s) => write!(f, "{}", s),
            RawLabel::Missing => write!(f, "None"),
        }
    }
}

impl From<i64> for RawLabel {
    fn from(v: i64) -> Self {
        RawLabel::Int(v)
    }
}

impl From<&str> for RawLabel {
    fn from(v: &str) -> Self {
        RawLabel::Text(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_completeness() {
        assert!(Submission::new("Title", "Body").is_complete());
        assert!(!Submission::new("", "Body").is_complete());
        assert!(!Submission::new("Title", "  \n\t ").is_complete());
        assert!(!Submission::default().is_complete());
    }

    #[test]
    fn test_record_keeps_raw_fields() {
        let record = Submission::new("  Breaking ", "Body text\n").to_record();
        assert_eq!(record.get("title"), Some("  Breaking "));
        assert_eq!(record.get("text"), Some("Body text\n"));
        assert_eq!(record.column_names().collect::<Vec<_>>(), vec!["title", "text"]);
        assert_eq!(record.get("content"), None);
    }

    #[test]
    fn test_raw_label_serializes_untagged() {
        let labels = vec![
            RawLabel::Int(1),
            RawLabel::Float(0.0),
            RawLabel::Bool(true),
            RawLabel::from("Fake"),
            RawLabel::Missing,
        ];
        assert_eq!(
            serde_json::to_value(&labels).unwrap(),
            serde_json::json!([1, 0.0, true, "Fake", null])
        );
    }

    #[test]
    fn test_raw_label_display() {
        assert_eq!(RawLabel::Int(2).to_string(), "2");
        assert_eq!(RawLabel::Float(1.0).to_string(), "1.0");
        assert_eq!(RawLabel::from("unknown").to_string(), "unknown");
        assert_eq!(RawLabel::Missing.to_string(), "None");
    }
}
