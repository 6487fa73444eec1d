// HTTP request handlers
use crate::domain::selection::{SelectionEvent, SessionContext};
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::page::render_page;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse},
};
use serde::Deserialize;
use std::sync::Arc;

/// Dropdown value; absent or empty means cleared.
#[derive(Deserialize)]
pub struct SelectionQuery {
    pub day: Option<String>,
}

/// Map the dropdown query to an event. A query that does not parse, such as
/// a repeated `day`, clears the selection instead of failing the update.
fn selection_event(query: Result<Query<SelectionQuery>, QueryRejection>) -> SelectionEvent {
    match query {
        Ok(Query(query)) => SelectionEvent::from_value(query.day.as_deref()),
        Err(rejection) => {
            tracing::debug!("Unusable selection query ({}); clearing", rejection);
            SelectionEvent::Clear
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// The dashboard page
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match render_page(&state.dashboard_service.page()) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Error rendering dashboard page: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Static page model as JSON
pub async fn dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let page = state.dashboard_service.page();
    match json_response(page.as_ref(), accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Recompute the reactive views for a dropdown value
pub async fn update_selection(
    query: Result<Query<SelectionQuery>, QueryRejection>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let mut ctx = SessionContext::default();
    let patch = state.selection_service.handle(&mut ctx, selection_event(query));

    match json_response(&patch, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => {
            // Fall back to the default view rather than failing the session
            let mut ctx = SessionContext::default();
            let fallback = state
                .selection_service
                .handle(&mut ctx, SelectionEvent::Clear);
            match json_response(&fallback, false).await {
                Ok(response) => response,
                Err(_) => status.into_response(),
            }
        }
    }
}

/// Stream the reactive views for a dropdown value (progressive loading)
pub async fn stream_selection(
    query: Result<Query<SelectionQuery>, QueryRejection>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let mut ctx = SessionContext::default();
    let rx = state.selection_service.stream(&mut ctx, selection_event(query));
    stream_from_receiver(rx)
}
