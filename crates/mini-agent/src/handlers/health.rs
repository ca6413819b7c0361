use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use tracing::warn;

use crate::models::chat::HealthResponse;
use crate::services::conversation::format_timestamp;
use crate::state::AppState;

pub fn health_payload() -> HealthResponse {
    HealthResponse {
        status: "healthy".to_string(),
        message: "Mini-Agent is running with Google Gemini!".to_string(),
        timestamp: format_timestamp(&Utc::now()),
    }
}

pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (StatusCode::OK, Json(health_payload()))
}

/// Landing page if the static directory has one, health payload otherwise
pub async fn root(State(state): State<AppState>) -> Response {
    let index = state.settings.static_dir().join("index.html");

    match tokio::fs::read_to_string(&index).await {
        Ok(html) => axum::response::Html(html).into_response(),
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to read {}: {}", index.display(), e);
            }
            health_check().await.into_response()
        }
    }
}

/// Uptime probes
pub async fn head_root() -> StatusCode {
    StatusCode::OK
}
