//! API Integration Tests
//!
//! Language services are replaced by in-process stubs, so no network access
//! is needed.
//!
//! Author: hephaex@gmail.com

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use habit_api::{create_router, create_router_for_testing, state::AppState};
use habit_core::{Annotator, EntityRecognizer, HabitError, RawEntity, RawToken, Result};
use habit_extractor::{AnnotationAdapter, HabitExtractor, HabitPipeline};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Helper to create a test request
fn create_json_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");

    match body {
        Some(json_body) => builder
            .body(Body::from(serde_json::to_string(&json_body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn raw(text: &str, lemma: &str, pos: &str, dep: &str, head: usize) -> RawToken {
    RawToken {
        text: text.to_string(),
        lemma: lemma.to_string(),
        pos: pos.to_string(),
        dep: dep.to_string(),
        head,
        idx: 0,
    }
}

/// Annotates "I read 20 pages daily" and fails for anything else
struct ReadingAnnotator;

#[async_trait]
impl Annotator for ReadingAnnotator {
    async fn annotate(&self, text: &str, _language: &str) -> Result<Vec<RawToken>> {
        if text != "I read 20 pages daily" {
            return Err(HabitError::AnnotationUnavailable("unknown text".to_string()));
        }
        Ok(vec![
            raw("I", "I", "PRON", "nsubj", 1),
            raw("read", "read", "VERB", "ROOT", 1),
            raw("20", "20", "NUM", "nummod", 3),
            raw("pages", "page", "NOUN", "dobj", 1),
            raw("daily", "daily", "ADV", "advmod", 1),
        ])
    }

    fn name(&self) -> &str {
        "stub-annotator"
    }
}

struct NoEntities;

#[async_trait]
impl EntityRecognizer for NoEntities {
    async fn recognize(&self, _text: &str, _language: &str) -> Result<Vec<RawEntity>> {
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "stub-ner"
    }
}

fn router_with_pipeline() -> (Router, Arc<AppState>) {
    let adapter = AnnotationAdapter::new(Arc::new(ReadingAnnotator), Arc::new(NoEntities));
    let pipeline = HabitPipeline::new(adapter, Arc::new(HabitExtractor::new()));
    let state = Arc::new(AppState::default().with_pipeline(Arc::new(pipeline)));
    (create_router(state.clone()), state)
}

// =============================================================================
// Health Check Tests
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(create_json_request("GET", "/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["nlp_available"], false);
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_health_reports_pipeline() {
    let (app, _) = router_with_pipeline();

    let response = app
        .oneshot(create_json_request("GET", "/health", None))
        .await
        .unwrap();

    let json = body_json(response).await;
    assert_eq!(json["nlp_available"], true);
}

#[tokio::test]
async fn test_readiness_without_pipeline() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(create_json_request("GET", "/ready", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = body_json(response).await;
    assert_eq!(json["ready"], false);
    assert_eq!(json["checks"]["pipeline_initialized"], false);
}

#[tokio::test]
async fn test_readiness_with_pipeline() {
    let (app, _) = router_with_pipeline();

    let response = app
        .oneshot(create_json_request("GET", "/ready", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["ready"], true);
}

#[tokio::test]
async fn test_readiness_while_draining() {
    let (app, state) = router_with_pipeline();
    state.set_ready(false);

    let response = app
        .oneshot(create_json_request("GET", "/ready", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["ready"], false);
    assert_eq!(json["checks"]["pipeline_initialized"], true);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(create_json_request("GET", "/metrics", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["uptime_seconds"].is_number());
    assert!(json["total_requests"].is_number());
    assert_eq!(json["analyses"], 0);
}

// =============================================================================
// Analysis API Tests
// =============================================================================

#[tokio::test]
async fn test_analyze_success() {
    let (app, state) = router_with_pipeline();

    let request = create_json_request(
        "POST",
        "/api/v1/habits/analyze",
        Some(json!({
            "text": "I read 20 pages daily",
            "user_id": "user-42"
        })),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "success");
    assert_eq!(json["original_text"], "I read 20 pages daily");
    assert!(json["request_id"].is_string());
    assert!(json["analyzed_at"].is_string());

    let analysis = &json["analysis"];
    assert_eq!(analysis["action"], "read");
    assert_eq!(analysis["target"], "pages");
    assert_eq!(analysis["main_quantity"]["number"], "20");
    assert_eq!(analysis["main_quantity"]["category"], "time_or_quantity");
    assert_eq!(analysis["frequency_count"], 7);
    assert_eq!(analysis["frequency_period"], 7);

    assert_eq!(state.get_analysis_count(), 1);
    assert_eq!(state.get_request_count(), 1);
}

#[tokio::test]
async fn test_analyze_service_failure_returns_empty_record() {
    let (app, _) = router_with_pipeline();

    let request = create_json_request(
        "POST",
        "/api/v1/habits/analyze",
        Some(json!({"text": "Something the annotator cannot handle"})),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["analysis"]["action"].is_null());
    assert_eq!(json["analysis"]["overall_confidence"], 0.0);
}

#[tokio::test]
async fn test_analyze_empty_text() {
    let (app, state) = router_with_pipeline();

    let request = create_json_request(
        "POST",
        "/api/v1/habits/analyze",
        Some(json!({"text": "   "})),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(state.get_analysis_count(), 0);
}

#[tokio::test]
async fn test_analyze_missing_text_field() {
    let (app, _) = router_with_pipeline();

    let request = create_json_request(
        "POST",
        "/api/v1/habits/analyze",
        Some(json!({"user_id": "user-42"})),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_analyze_invalid_json() {
    let (app, _) = router_with_pipeline();

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/habits/analyze")
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analyze_without_pipeline() {
    let app = create_router_for_testing();

    let request = create_json_request(
        "POST",
        "/api/v1/habits/analyze",
        Some(json!({"text": "I read 20 pages daily"})),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

// =============================================================================
// Misc
// =============================================================================

#[tokio::test]
async fn test_openapi_document() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(create_json_request("GET", "/api-docs/openapi.json", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["paths"]["/api/v1/habits/analyze"].is_object());
    assert!(json["paths"]["/health"].is_object());
}

#[tokio::test]
async fn test_security_headers_present() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(create_json_request("GET", "/health", None))
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
}

#[tokio::test]
async fn test_unknown_route() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(create_json_request("GET", "/api/v1/unknown", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
