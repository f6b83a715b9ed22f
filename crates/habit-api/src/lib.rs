//! HabitForge API - REST server
//!
//! Exposes the habit extraction pipeline over HTTP.
//!
//! Author: hephaex@gmail.com

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{http::HeaderValue, middleware as axum_middleware, routing::get, Json, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;
use utoipa::OpenApi;

use crate::handlers::{analyze, health};
use crate::state::AppState;

/// OpenAPI document
#[derive(OpenApi)]
#[openapi(
    info(title = "HabitForge API", description = "Habit extraction from free text"),
    paths(
        health::health_check,
        health::readiness_check,
        health::metrics,
        analyze::analyze_habit
    ),
    components(schemas(
        analyze::AnalyzeRequest,
        analyze::AnalyzeResponse,
        health::HealthResponse,
        health::ReadinessResponse,
        health::ReadinessChecks,
        health::MetricsResponse,
        error::ApiError
    )),
    tags(
        (name = "health", description = "Liveness, readiness and counters"),
        (name = "habits", description = "Habit analysis")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let server = &state.config.server;

    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/metrics", get(health::metrics))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api/v1", routes::api_routes())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::request_metrics_middleware,
        ))
        .layer(axum_middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_secs,
        )));

    if server.cors_enabled {
        router = router.layer(cors_layer(&server.cors_origins));
    }

    router
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Router with default config and no language services attached
pub fn create_router_for_testing() -> Router {
    create_router(Arc::new(AppState::default()))
}

/// CORS policy: the configured origins, or any origin when none are set
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}
