//! Accessibility Scanner API
//!
//! Serves the URL form, the dashboard and the JSON download, plus a small
//! JSON API over the same scan pipeline.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod views;
pub mod workers;

pub use config::AppConfig;
pub use error::ApiError;

use a11y_core::{
    DiagnosticSink, JsonDirSink, ResultStore, ScanConfig, Scanner, TracingSink, ValidatorRegistry,
};
use a11y_tools::{wcag_zoo_registry, PageFetcher, PageSource, ToolResult};
use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
pub struct AppState {
    pub store: Arc<dyn ResultStore>,
    pub scanner: Scanner,
    pub pages: Arc<dyn PageSource>,
    pub config: AppConfig,
}

impl AppState {
    /// State wired to the wcag_zoo validators and a real HTTP fetcher
    pub fn from_config(config: AppConfig, store: Arc<dyn ResultStore>) -> ToolResult<Self> {
        let pages = Arc::new(PageFetcher::new(&config.fetch)?);
        let validators = wcag_zoo_registry(&config.tools);
        Ok(Self::with_parts(config, store, validators, pages))
    }

    pub fn with_parts(
        config: AppConfig,
        store: Arc<dyn ResultStore>,
        validators: ValidatorRegistry,
        pages: Arc<dyn PageSource>,
    ) -> Self {
        let sink: Box<dyn DiagnosticSink> = match &config.diagnostics_dir {
            Some(dir) => Box::new(JsonDirSink::new(dir.clone())),
            None => Box::new(TracingSink),
        };
        let scan_config = ScanConfig {
            failure_policy: config.failure_policy,
        };
        let scanner = Scanner::with_config(validators, scan_config).with_sink(sink);

        Self {
            store,
            scanner,
            pages,
            config,
        }
    }
}

/// Build the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(routes::health_check))

        // Pages
        .route("/", get(routes::pages::check_url_form).post(routes::pages::check_url))
        .route("/dashboard", get(routes::dashboard::dashboard))
        .route("/dashboard/", get(routes::dashboard::dashboard))
        .route("/download_json", get(routes::reports::download_json))
        .route("/download_json/", get(routes::reports::download_json))

        // JSON API
        .route("/api/scans", get(routes::scans::list_scans).post(routes::scans::create_scan))
        .route("/api/dashboard", get(routes::dashboard::dashboard_json))

        // CORS
        .layer(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any))

        // Tracing
        .layer(TraceLayer::new_for_http())

        // State
        .with_state(state)
}
