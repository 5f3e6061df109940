use axum::{extract::State, Json};

use crate::services::DiagnosticsReport;
use crate::startup::AppState;

/// `GET /test`: always 200, whatever the store state.
pub async fn test_database(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    Json(state.diagnostics.report().await)
}
