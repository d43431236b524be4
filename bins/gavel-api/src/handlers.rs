// HTTP route handlers for the Gavel API

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use gavel_common::types::Language;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use uuid::Uuid;

use crate::error::{JudgeError, GENERIC_FAILURE};
use crate::judge::JudgePipeline;
use crate::persist::RedisStore;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub code: String,
    pub language: Language,
    pub problem_id: i64,
}

/// Collapse the internal error taxonomy into the single user-facing
/// `{success: false, message}` shape; only the status code differs.
fn error_response(e: &JudgeError) -> Response {
    let (status, message) = match e {
        JudgeError::Validation(m) => (StatusCode::BAD_REQUEST, m.clone()),
        JudgeError::Sandbox(m) => (StatusCode::BAD_GATEWAY, m.clone()),
        JudgeError::Storage(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            GENERIC_FAILURE.to_string(),
        ),
    };
    (status, Json(json!({ "success": false, "message": message }))).into_response()
}

fn pipeline<'a>(state: &'a AppState) -> JudgePipeline<'a, crate::sandbox::PistonClient> {
    JudgePipeline::new(
        &state.sandbox,
        &state.languages,
        Duration::from_millis(state.config.pacing_delay_ms),
    )
}

/// POST /submissions - judge a full submission and persist the result
pub async fn submit_code(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SubmitRequest>,
) -> Response {
    let store = RedisStore::new(state.redis.clone());

    match pipeline(&state)
        .submit(
            &store,
            &store,
            payload.code,
            payload.language,
            payload.problem_id,
        )
        .await
    {
        Ok(submission_id) => {
            info!(
                submission_id = %submission_id,
                problem_id = payload.problem_id,
                language = %payload.language,
                "Submission accepted"
            );
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": "Code Submitted!",
                    "submission_id": submission_id,
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(problem_id = payload.problem_id, error = %e, "Submission failed");
            error_response(&e)
        }
    }
}

/// POST /submissions/run - evaluate the sample test cases only; nothing
/// is persisted, outcomes go straight back to the caller
pub async fn run_samples(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SubmitRequest>,
) -> Response {
    let store = RedisStore::new(state.redis.clone());

    match pipeline(&state)
        .run_samples(&store, payload.code, payload.language, payload.problem_id)
        .await
    {
        Ok(outcomes) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Result Generated!",
                "data": outcomes,
            })),
        )
            .into_response(),
        Err(e) => {
            error!(problem_id = payload.problem_id, error = %e, "Sample run failed");
            error_response(&e)
        }
    }
}

/// GET /submissions/{id} - fetch a persisted submission record
pub async fn get_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let submission_id = match Uuid::parse_str(&id) {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "message": "Invalid submission id" })),
            )
                .into_response();
        }
    };

    let store = RedisStore::new(state.redis.clone());
    match store.get_submission(&submission_id).await {
        Ok(Some(record)) => {
            (StatusCode::OK, Json(json!({ "success": true, "data": record }))).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "message": "Submission not found" })),
        )
            .into_response(),
        Err(e) => {
            error!(submission_id = %submission_id, error = %e, "Failed to fetch submission");
            error_response(&e)
        }
    }
}

/// GET /health - health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
