//! Dashboard routes

use crate::{views, ApiError, AppState};
use a11y_core::{summarize, summarize_latest, DashboardView};
use axum::{extract::State, response::Html, Json};
use std::sync::Arc;

/// HTML dashboard; an unreadable store shows the empty state
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Html<String> {
    let view = summarize_latest(state.store.as_ref()).await.unwrap_or_else(|e| {
        tracing::error!("Could not load the latest result: {}", e);
        summarize(None)
    });
    Html(views::dashboard_page(&view))
}

pub async fn dashboard_json(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardView>, ApiError> {
    Ok(Json(summarize_latest(state.store.as_ref()).await?))
}
