use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use service_core::error::AppError;

use crate::services::get_metrics;
use crate::startup::AppState;

/// Liveness: the process is up, regardless of the store.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "appointment-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness: 503 until the store answers a ping.
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let probe = state.store.probe().await;
    if !probe.reachable {
        return Err(AppError::ServiceUnavailable(
            probe
                .error
                .unwrap_or_else(|| "database not configured".to_string()),
        ));
    }
    Ok(Json(json!({ "status": "ready" })))
}

pub async fn metrics() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
