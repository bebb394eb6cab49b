use a11y_api::{build_router, AppConfig, AppState};
use a11y_core::{
    CoreError, CoreResult, FetchedPage, MemoryStore, ResultStore, StaticValidator,
    StoredScanRecord, ValidatorRegistry,
};
use a11y_tools::{PageSource, ToolError, ToolResult};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const PAGE: &str = r#"<html><body style="font-family: Georgia, serif"><img src="a.png"></body></html>"#;

/// Serves one canned page, or fails every fetch
struct StubPages {
    status: u16,
    fail: bool,
}

#[async_trait]
impl PageSource for StubPages {
    async fn fetch(&self, url: &str) -> ToolResult<FetchedPage> {
        if self.fail {
            return Err(ToolError::ExecutionFailed("connection refused".to_string()));
        }
        Ok(FetchedPage::new(url, self.status, PAGE))
    }
}

fn validators() -> ValidatorRegistry {
    ValidatorRegistry::new().with(Box::new(StaticValidator::new(
        "Anteater",
        json!({
            "failures": {
                "1.1.1": {
                    "H37": [{
                        "guideline": "1.1.1",
                        "technique": "H37",
                        "message": "Example failure - img",
                        "id": "logo"
                    }]
                }
            }
        }),
    )))
}

/// Store whose every call fails, as when the database is down
struct UnavailableStore;

#[async_trait]
impl ResultStore for UnavailableStore {
    async fn save(&self, _url: &str, _json_response: &str) -> CoreResult<StoredScanRecord> {
        Err(CoreError::Store("connection refused".to_string()))
    }

    async fn latest(&self) -> CoreResult<Option<StoredScanRecord>> {
        Err(CoreError::Store("connection refused".to_string()))
    }

    async fn recent(&self, _limit: usize, _offset: usize) -> CoreResult<Vec<StoredScanRecord>> {
        Err(CoreError::Store("connection refused".to_string()))
    }

    async fn count(&self) -> CoreResult<u64> {
        Err(CoreError::Store("connection refused".to_string()))
    }
}

fn malformed_validators() -> ValidatorRegistry {
    ValidatorRegistry::new().with(Box::new(StaticValidator::new(
        "Anteater",
        json!({ "failures": "not a mapping" }),
    )))
}

fn build(store: Arc<dyn ResultStore>, validators: ValidatorRegistry, pages: StubPages) -> Router {
    let state = AppState::with_parts(AppConfig::default(), store, validators, Arc::new(pages));
    build_router(Arc::new(state))
}

fn app_with(store: Arc<MemoryStore>, pages: StubPages) -> Router {
    build(store, validators(), pages)
}

fn app(store: Arc<MemoryStore>) -> Router {
    app_with(store, StubPages { status: 200, fail: false })
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(url: &str) -> Request<Body> {
    let body = format!("url={}", url.replace(':', "%3A").replace('/', "%2F").replace(' ', "+"));
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn post_json(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/scans")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = app(Arc::new(MemoryStore::new())).oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_download_without_results_is_404() {
    let response = app(Arc::new(MemoryStore::new()))
        .oneshot(get("/download_json/"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body, json!({ "error": "No results found to download" }));
}

#[tokio::test]
async fn test_download_serves_latest_payload_verbatim() {
    let store = Arc::new(MemoryStore::new());
    store.save("https://old.example/", r#"{"failures": []}"#).await.unwrap();
    store.save("https://new.example/", r#"{"error": "Error with request: 500"}"#).await.unwrap();

    let response = app(store).oneshot(get("/download_json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"accessibility_results.json\""
    );
    assert_eq!(body_text(response).await, r#"{"error": "Error with request: 500"}"#);
}

#[tokio::test]
async fn test_dashboard_without_results_shows_defaults() {
    let response = app(Arc::new(MemoryStore::new()))
        .oneshot(get("/dashboard/"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("No URL checked yet"));
    assert!(html.contains("No failures recorded"));
    assert!(html.contains("No result recorded"));
}

#[tokio::test]
async fn test_form_scan_renders_and_stores_results() {
    let store = Arc::new(MemoryStore::new());
    let response = app(store.clone())
        .oneshot(post_form("https://example.com/"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Failures (1)"));
    assert!(html.contains("Example failure - img"));
    assert!(html.contains("Serif font found"));

    let latest = store.latest().await.unwrap().unwrap();
    assert_eq!(latest.url, "https://example.com/");
    let stored: Value = serde_json::from_str(&latest.json_response).unwrap();
    assert_eq!(stored["failures"][0]["element_id"], "logo");
}

#[tokio::test]
async fn test_form_fetch_failure_stores_nothing() {
    let store = Arc::new(MemoryStore::new());
    let response = app_with(store.clone(), StubPages { status: 200, fail: true })
        .oneshot(post_form("https://unreachable.example/"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Could not fetch the URL. Error: "));
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_form_rejects_invalid_url_without_fetching() {
    let store = Arc::new(MemoryStore::new());
    let response = app(store.clone()).oneshot(post_form("not a url")).await.unwrap();

    let html = body_text(response).await;
    assert!(html.contains("Enter a valid URL."));
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_json_scan_then_dashboard() {
    let store = Arc::new(MemoryStore::new());
    let app = app(store);

    let response = app
        .clone()
        .oneshot(post_json(json!({ "url": "https://example.com/" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let outcome: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(outcome["failures"].as_array().unwrap().len(), 1);
    assert_eq!(outcome["serif_font_check"], json!(["Serif font found in url."]));

    let response = app.oneshot(get("/api/dashboard")).await.unwrap();
    let view: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(view["failure_count"], 1);
    assert_eq!(view["failure_example"], "Example failure");
    assert_eq!(view["url"], "https://example.com/");
}

#[tokio::test]
async fn test_json_scan_non_200_stores_error() {
    let store = Arc::new(MemoryStore::new());
    let response = app_with(store.clone(), StubPages { status: 404, fail: false })
        .oneshot(post_json(json!({ "url": "https://example.com/missing" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let outcome: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(outcome, json!({ "error": "Error with request: 404" }));
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_json_scan_rejects_bad_url() {
    let response = app(Arc::new(MemoryStore::new()))
        .oneshot(post_json(json!({ "url": "ftp://example.com/" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_scans_newest_first() {
    let store = Arc::new(MemoryStore::new());
    store.save("https://a.example/", r#"{"failures": [{"message": "x"}]}"#).await.unwrap();
    store.save("https://b.example/", "{}").await.unwrap();

    let response = app(store).oneshot(get("/api/scans?limit=1")).await.unwrap();
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["total"], 2);
    assert_eq!(body["scans"].as_array().unwrap().len(), 1);
    assert_eq!(body["scans"][0]["url"], "https://b.example/");
}

#[tokio::test]
async fn test_json_scan_malformed_validator_output_is_500() {
    let store = Arc::new(MemoryStore::new());
    let app = build(
        store.clone(),
        malformed_validators(),
        StubPages { status: 200, fail: false },
    );

    let response = app
        .oneshot(post_json(json!({ "url": "https://example.com/" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("Anteater"), "unexpected error: {error}");
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_form_malformed_validator_output_renders_inline_error() {
    let store = Arc::new(MemoryStore::new());
    let app = build(
        store.clone(),
        malformed_validators(),
        StubPages { status: 200, fail: false },
    );

    let response = app.oneshot(post_form("https://example.com/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let html = body_text(response).await;
    assert!(html.contains("The scan could not be completed: Validator Anteater"));
    assert!(html.contains("<form"));
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_dashboard_renders_when_store_is_down() {
    let app = build(
        Arc::new(UnavailableStore),
        validators(),
        StubPages { status: 200, fail: false },
    );

    let response = app.oneshot(get("/dashboard/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("No URL checked yet"));
    assert!(html.contains("No failures recorded"));
}
