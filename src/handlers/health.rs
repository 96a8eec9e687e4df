use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
}

/// Liveness probe. Answers 200 whether or not the store is reachable:
/// it reports on the process, not the database.
#[tracing::instrument]
pub async fn health_check() -> impl IntoResponse {
    Json(HealthStatus { status: "ok" })
}
