use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use fnd_core::{Record, Submission};
use fnd_inference::invoke::{evaluate, Panel, PanelOutcome};
use crate::form::{validate, ValidationError};
use crate::page::{render_page, PageView, PanelView};
use crate::render::{panel_heading, render_outcome, Message, Severity, Verdict};
use crate::state::load_notices;
use crate::AppState;

fn run_models(state: &AppState, record: &Record) -> Vec<Panel> {
    let registry = state.models.get();
    let panels = evaluate(&registry, record, state.mode);
    info!("📊 Evaluated {} model panels", panels.len());
    panels
}

fn page_for(state: &AppState, submission: Submission) -> PageView {
    let registry = state.models.get();
    PageView {
        notices: load_notices(&registry),
        submission,
        ..PageView::default()
    }
}

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_page(&page_for(&state, Submission::default())))
}

pub async fn submit(
    State(state): State<Arc<AppState>>,
    Form(submission): Form<Submission>,
) -> Html<String> {
    let mut view = page_for(&state, submission.clone());

    match validate(&submission) {
        Err(e) => {
            warn!("Rejected submission: {}", e);
            view.warning = Some(Message::new(Severity::Warning, format!("⚠️ {}", e)));
        }
        Ok(record) => {
            let panels = run_models(&state, &record)
                .iter()
                .map(|panel| PanelView {
                    heading: panel_heading(&panel.model),
                    message: render_outcome(&panel.outcome),
                })
                .collect();
            view.panels = Some(panels);
        }
    }

    Html(render_page(&view))
}

#[derive(Debug, Serialize)]
pub struct ApiPanel {
    #[serde(flatten)]
    pub panel: Panel,
    pub verdict: Option<&'static str>,
    pub display: Message,
}

impl From<Panel> for ApiPanel {
    fn from(panel: Panel) -> Self {
        let verdict = match &panel.outcome {
            PanelOutcome::Predicted { label, .. } => Some(Verdict::from(label).name()),
            _ => None,
        };
        let display = render_outcome(&panel.outcome);
        Self {
            panel,
            verdict,
            display,
        }
    }
}

#[derive(Debug, Serialize)]
struct ApiError {
    error: String,
}

pub async fn api_predict(
    State(state): State<Arc<AppState>>,
    Json(submission): Json<Submission>,
) -> Response {
    let record = match validate(&submission) {
        Ok(record) => record,
        Err(e @ ValidationError::IncompleteSubmission) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiError { error: e.to_string() }),
            )
                .into_response();
        }
    };

    let panels: Vec<ApiPanel> = run_models(&state, &record)
        .into_iter()
        .map(ApiPanel::from)
        .collect();
    Json(serde_json::json!({ "panels": panels })).into_response()
}

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub name: String,
    pub path: String,
    pub loaded: bool,
    pub kind: Option<String>,
}

pub async fn list_models(State(state): State<Arc<AppState>>) -> Json<Vec<ModelInfo>> {
    let registry = state.models.get();
    Json(
        registry
            .slots()
            .iter()
            .map(|slot| ModelInfo {
                name: slot.name.clone(),
                path: slot.path.display().to_string(),
                loaded: slot.is_loaded(),
                kind: slot.model.as_ref().map(|m| m.kind().to_string()),
            })
            .collect(),
    )
}
