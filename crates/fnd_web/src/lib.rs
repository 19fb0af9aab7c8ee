use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod form;
pub mod handlers;
pub mod page;
pub mod render;
pub mod state;

pub use state::AppState;

#[derive(Debug, Clone)]
pub struct WebConfig {
    pub bind: SocketAddr,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8501)),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::index).post(handlers::submit))
        .route("/api/predict", post(handlers::api_predict))
        .route("/api/models", get(handlers::list_models))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(config: WebConfig, state: AppState) -> fnd_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("🌐 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use fnd_core::{Error, Result, Submission};
    pub use crate::{create_app, serve, AppState, WebConfig};
}
