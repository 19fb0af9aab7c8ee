use serde::Serialize;
use tracing::warn;
use fnd_core::RawLabel;
use fnd_inference::invoke::{FailureKind, PanelOutcome};

pub const FAKE_TEXT: &str = "TIN GIẢ (Fake)";
pub const REAL_TEXT: &str = "TIN THẬT (Real)";
pub const UNAVAILABLE_TEXT: &str = "Model chưa được tải.";

/// Canonical reading of a raw model label.
///
/// | raw label                                   | verdict        |
/// |---------------------------------------------|----------------|
/// | `1`, `1.0`, `true`, `"Fake"`, `"fake"`      | `Fake`         |
/// | `0`, `0.0`, `false`, `"Real"`, `"real"`     | `Real`         |
/// | anything else                               | `Unrecognized` |
///
/// Unrecognized labels are displayed like a real verdict with the raw value
/// as text. That hides labels from a training run with a different encoding,
/// so they are logged whenever they show up.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Fake,
    Real,
    Unrecognized(RawLabel),
}

impl From<&RawLabel> for Verdict {
    fn from(label: &RawLabel) -> Self {
        match label {
            RawLabel::Int(1) | RawLabel::Bool(true) => Verdict::Fake,
            RawLabel::Int(0) | RawLabel::Bool(false) => Verdict::Real,
            RawLabel::Float(v) if *v == 1.0 => Verdict::Fake,
            RawLabel::Float(v) if *v == 0.0 => Verdict::Real,
            RawLabel::Text(s) if s == "Fake" || s == "fake" => Verdict::Fake,
            RawLabel::Text(s) if s == "Real" || s == "real" => Verdict::Real,
            other => Verdict::Unrecognized(other.clone()),
        }
    }
}

impl Verdict {
    pub fn is_fake(&self) -> bool {
        matches!(self, Verdict::Fake)
    }

    pub fn display_text(&self) -> String {
        match self {
            Verdict::Fake => FAKE_TEXT.to_string(),
            Verdict::Real => REAL_TEXT.to_string(),
            Verdict::Unrecognized(raw) => raw.to_string(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Verdict::Fake => "fake",
            Verdict::Real => "real",
            Verdict::Unrecognized(_) => "unrecognized",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Success,
    Info,
    Plain,
}

impl Severity {
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Plain => "plain",
        }
    }
}

/// A coloured line of text on the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub severity: Severity,
    pub text: String,
}

impl Message {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }
}

/// `0.856` becomes `85.6%`.
pub fn format_confidence(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

pub fn render_prediction(label: &RawLabel, confidence: Option<f64>) -> Message {
    let verdict = Verdict::from(label);
    if let Verdict::Unrecognized(raw) = &verdict {
        warn!("Unrecognized model label {:?}, displaying it verbatim", raw);
    }

    let mut text = if verdict.is_fake() {
        format!("🚨 {}", verdict.display_text())
    } else {
        format!("✅ {}", verdict.display_text())
    };
    if let Some(p) = confidence {
        text.push_str(&format!(" (Độ tin cậy: {})", format_confidence(p)));
    }

    let severity = if verdict.is_fake() {
        Severity::Error
    } else {
        Severity::Success
    };
    Message::new(severity, text)
}

pub fn render_outcome(outcome: &PanelOutcome) -> Message {
    match outcome {
        PanelOutcome::Unavailable => Message::new(Severity::Plain, UNAVAILABLE_TEXT),
        PanelOutcome::Predicted { label, confidence } => render_prediction(label, *confidence),
        PanelOutcome::Failed { kind: FailureKind::ProbabilityUnsupported, message } => Message::new(
            Severity::Error,
            format!(
                "Model không hỗ trợ tính độ tin cậy (predict_proba). Có thể model chưa được huấn luyện với probability=True. Chi tiết: {}",
                message
            ),
        ),
        PanelOutcome::Failed { kind: FailureKind::Prediction, message } => {
            Message::new(Severity::Error, format!("Lỗi khi dự đoán: {}", message))
        }
    }
}

/// Heading shown above a model's panel.
pub fn panel_heading(model: &str) -> Message {
    let icon = match model {
        fnd_inference::DECISION_TREE_SLOT => "🌲",
        fnd_inference::SVM_SLOT => "⚡",
        _ => "🤖",
    };
    Message::new(Severity::Info, format!("{} {} Model", icon, model))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_labels() {
        for raw in [RawLabel::Int(1), RawLabel::from("Fake"), RawLabel::from("fake")] {
            let message = render_prediction(&raw, None);
            assert_eq!(message.severity, Severity::Error, "{:?}", raw);
            assert_eq!(message.text, "🚨 TIN GIẢ (Fake)");
        }
    }

    #[test]
    fn test_real_labels() {
        for raw in [RawLabel::Int(0), RawLabel::from("Real"), RawLabel::from("real")] {
            let message = render_prediction(&raw, None);
            assert_eq!(message.severity, Severity::Success, "{:?}", raw);
            assert_eq!(message.text, "✅ TIN THẬT (Real)");
        }
    }

    #[test]
    fn test_numeric_equivalents() {
        assert_eq!(Verdict::from(&RawLabel::Float(1.0)), Verdict::Fake);
        assert_eq!(Verdict::from(&RawLabel::Bool(false)), Verdict::Real);
    }

    #[test]
    fn test_unrecognized_labels_render_verbatim() {
        let cases = [
            (RawLabel::Int(2), "✅ 2"),
            (RawLabel::from("unknown"), "✅ unknown"),
            (RawLabel::from("FAKE"), "✅ FAKE"),
            (RawLabel::Missing, "✅ None"),
        ];
        for (raw, expected) in cases {
            assert!(matches!(Verdict::from(&raw), Verdict::Unrecognized(_)));
            let message = render_prediction(&raw, None);
            assert_eq!(message.severity, Severity::Success);
            assert_eq!(message.text, expected);
        }
    }

    #[test]
    fn test_confidence_formatting() {
        assert_eq!(format_confidence(0.856), "85.6%");
        assert_eq!(format_confidence(1.0), "100.0%");
        assert_eq!(format_confidence(0.5), "50.0%");
        let message = render_prediction(&RawLabel::Int(1), Some(0.856));
        assert_eq!(message.text, "🚨 TIN GIẢ (Fake) (Độ tin cậy: 85.6%)");
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(
            render_outcome(&PanelOutcome::Unavailable),
            Message::new(Severity::Plain, UNAVAILABLE_TEXT)
        );

        let failed = render_outcome(&PanelOutcome::Failed {
            kind: FailureKind::Prediction,
            message: "boom".to_string(),
        });
        assert_eq!(failed, Message::new(Severity::Error, "Lỗi khi dự đoán: boom"));

        let proba = render_outcome(&PanelOutcome::Failed {
            kind: FailureKind::ProbabilityUnsupported,
            message: "no proba".to_string(),
        });
        assert_eq!(proba.severity, Severity::Error);
        assert!(proba.text.contains("probability=True"));
        assert!(!proba.text.starts_with("Lỗi khi dự đoán"));
    }

    #[test]
    fn test_panel_heading() {
        assert_eq!(
            panel_heading("Decision Tree"),
            Message::new(Severity::Info, "🌲 Decision Tree Model")
        );
        assert_eq!(panel_heading("SVM").text, "⚡ SVM Model");
        assert_eq!(panel_heading("Ensemble").text, "🤖 Ensemble Model");
    }
}
