//! Request counting middleware
//!
//! Author: hephaex@gmail.com

use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Counts every request and logs its latency and status
pub async fn request_metrics_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let endpoint = normalize_endpoint(request.uri().path());

    state.increment_requests();
    let response = next.run(request).await;

    debug!(
        %method,
        endpoint = %endpoint,
        status = response.status().as_u16(),
        latency_us = start.elapsed().as_micros() as u64,
        "request completed"
    );

    response
}

/// Collapse trailing slashes and repeated separators so `/health/` and
/// `//health` log as `/health`
fn normalize_endpoint(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}
