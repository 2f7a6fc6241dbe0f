//! Health check endpoint.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::state::AppState;

/// GET /health - Pings the persistent store.
///
/// Returns 200 when the store answers, 503 otherwise.
pub async fn health(State(state): State<AppState>) -> Response {
    match state.repository.ping().await {
        Ok(()) => {
            let database = json!({ "database": { "status": "up" } });
            (
                StatusCode::OK,
                Json(json!({
                    "status": "ok",
                    "info": database,
                    "error": {},
                    "details": database,
                })),
            )
                .into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "Health check failed");
            let database = json!({ "database": { "status": "down", "message": err.kind() } });
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "error",
                    "info": {},
                    "error": database,
                    "details": database,
                })),
            )
                .into_response()
        }
    }
}
