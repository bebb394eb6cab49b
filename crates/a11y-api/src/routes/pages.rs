//! URL form routes

use crate::models::UrlForm;
use crate::workers::run_scan;
use crate::{views, AppState};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use std::sync::Arc;

pub async fn check_url_form() -> Html<String> {
    Html(views::check_url_page("", None, None))
}

/// Validate the submitted URL, scan it and render the outcome under the form
pub async fn check_url(State(state): State<Arc<AppState>>, Form(form): Form<UrlForm>) -> Response {
    let url = match form.validate() {
        Ok(url) => url,
        Err(message) => {
            return Html(views::check_url_page(&form.url, Some(&message), None)).into_response();
        }
    };

    match run_scan(&state, url.as_str()).await {
        Ok(outcome) => Html(views::check_url_page(&form.url, None, Some(&outcome))).into_response(),
        Err(e) => {
            let message = format!("The scan could not be completed: {}", e);
            let page = views::check_url_page(&form.url, Some(&message), None);
            (StatusCode::INTERNAL_SERVER_ERROR, Html(page)).into_response()
        }
    }
}
