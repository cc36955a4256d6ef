use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::server::app::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub storage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health check endpoint
///
/// Probes the note store. Returns 200 OK when it answers within 5 seconds,
/// 503 Service Unavailable otherwise.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let storage = state.deps.storage.as_str().to_string();

    let error = match tokio::time::timeout(
        std::time::Duration::from_secs(5),
        state.deps.notes.ping(),
    )
    .await
    {
        Ok(Ok(())) => None,
        Ok(Err(e)) => Some(format!("Storage probe failed: {}", e)),
        Err(_) => Some("Storage probe timeout (>5s)".to_string()),
    };

    let (status_code, status) = match error {
        None => (StatusCode::OK, "healthy"),
        Some(_) => (StatusCode::SERVICE_UNAVAILABLE, "unhealthy"),
    };

    (
        status_code,
        Json(HealthResponse {
            status: status.to_string(),
            storage,
            error,
        }),
    )
}
