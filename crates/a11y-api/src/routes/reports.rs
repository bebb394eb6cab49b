//! Result download routes

use crate::{ApiError, AppState};
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

pub const DOWNLOAD_FILENAME: &str = "accessibility_results.json";

/// Serve the newest stored payload exactly as it was saved
pub async fn download_json(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let record = state
        .store
        .latest()
        .await?
        .ok_or_else(|| ApiError::NotFound("No results found to download".to_string()))?;

    tracing::debug!("Downloading result {} for {}", record.id, record.url);

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DOWNLOAD_FILENAME),
            ),
        ],
        record.json_response,
    )
        .into_response())
}
