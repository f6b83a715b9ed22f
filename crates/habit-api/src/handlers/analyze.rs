//! Habit analysis handlers
//!
//! Author: hephaex@gmail.com

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use habit_core::HabitRecord;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

/// Analysis request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    /// Free-text habit description
    #[schema(example = "I want to read 20 pages every day")]
    pub text: String,

    /// Caller identifier, only used for logging
    #[serde(default)]
    pub user_id: Option<String>,

    /// Two-letter language code; skips language identification
    #[serde(default)]
    #[schema(example = "en")]
    pub language: Option<String>,
}

/// Analysis response body
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyzeResponse {
    #[schema(value_type = String, example = "550e8400-e29b-41d4-a716-446655440000")]
    pub request_id: Uuid,

    #[schema(example = "success")]
    pub status: String,

    pub message: String,

    pub original_text: String,

    #[schema(value_type = String, example = "2026-01-15T08:30:00Z")]
    pub analyzed_at: DateTime<Utc>,

    /// Extracted habit record
    #[schema(value_type = Object)]
    pub analysis: HabitRecord,
}

/// Analyze one habit description
#[utoipa::path(
    post,
    path = "/api/v1/habits/analyze",
    tag = "habits",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis successful", body = AnalyzeResponse),
        (status = 400, description = "Invalid request", body = crate::error::ApiError),
        (status = 503, description = "Language services not configured", body = crate::error::ApiError)
    )
)]
pub async fn analyze_habit(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::BadRequest("Text cannot be empty".to_string()));
    }

    let pipeline = state.pipeline().ok_or_else(|| {
        AppError::ServiceUnavailable("Extraction pipeline not initialized".to_string())
    })?;

    let request_id = Uuid::new_v4();
    let analysis = pipeline
        .extract_with_language(&req.text, req.language.as_deref())
        .await?;
    state.increment_analyses();

    info!(
        %request_id,
        user_id = req.user_id.as_deref().unwrap_or("anonymous"),
        action = ?analysis.action,
        confidence = analysis.overall_confidence,
        "habit analyzed"
    );

    Ok(Json(AnalyzeResponse {
        request_id,
        status: "success".to_string(),
        message: "Habit analyzed successfully".to_string(),
        original_text: req.text,
        analyzed_at: Utc::now(),
        analysis,
    }))
}
