use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use crate::infrastructure::repositories::TtsRepository;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Ready only when the TTS backend answers its health probe
pub async fn health_ready(State(tts_repo): State<Arc<dyn TtsRepository>>) -> impl IntoResponse {
    match tts_repo.check_health().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "tts_backend": "connected"
            })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "TTS backend health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "tts_backend": "disconnected",
                    "error": e.to_string()
                })),
            )
        }
    }
}
