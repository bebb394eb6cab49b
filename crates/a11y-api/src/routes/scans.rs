//! JSON scan routes

use crate::models::{ListQuery, ScanListItem, ScanListResponse, UrlForm};
use crate::workers::run_scan;
use crate::{ApiError, AppState};
use a11y_core::{summarize, ScanOutcome};
use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

const DEFAULT_PAGE_SIZE: usize = 20;
const MAX_PAGE_SIZE: usize = 100;

/// Scan a URL and return the outcome as JSON
pub async fn create_scan(
    State(state): State<Arc<AppState>>,
    Json(form): Json<UrlForm>,
) -> Result<Json<ScanOutcome>, ApiError> {
    let url = form.validate().map_err(ApiError::BadRequest)?;
    let outcome = run_scan(&state, url.as_str()).await?;
    Ok(Json(outcome))
}

/// Stored scans, newest first
pub async fn list_scans(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ScanListResponse>, ApiError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = (page - 1).saturating_mul(limit);

    let records = state.store.recent(limit, offset).await?;
    let total = state.store.count().await?;

    let scans = records
        .iter()
        .map(|record| {
            let view = summarize(Some(record));
            ScanListItem {
                id: record.id,
                url: record.url.clone(),
                timestamp: record.timestamp.to_rfc3339(),
                failure_count: view.failure_count,
                warning_count: view.warning_count,
                skipped_count: view.skipped_count,
                success_count: view.success_count,
            }
        })
        .collect();

    Ok(Json(ScanListResponse { scans, total }))
}
