use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

/// Liveness probe; performs no dependency checks.
pub async fn health_handler() -> Json<HealthStatus> {
    Json(HealthStatus { status: "healthy" })
}
