// Router assembly
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    dashboard, health_check, index, stream_selection, update_selection,
};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(health_check))
        .route("/api/dashboard", get(dashboard))
        .route("/api/selection", get(update_selection))
        .route("/api/selection/stream", get(stream_selection))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
